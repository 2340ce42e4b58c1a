//! Dashboard state as a pure reducer over discrete actions.
//!
//! All ordering logic lives in [`crate::engine::order`]; this module wires it
//! to the local cache and tracks the uncommitted-changes flag.

use crate::engine::cache::{self, LocalCache};
use crate::engine::{order, visits};
use crate::models::{DisplayMode, FilterOption, MoveDirection, Service, SortKey};

/// Discrete user actions applied to the dashboard
#[derive(Debug, Clone)]
pub enum Action {
    /// A fresh server list arrived
    Fetch(Vec<Service>),
    SortChanged(SortKey),
    FilterChanged(FilterOption),
    SearchChanged(String),
    MoveDirectional {
        index: usize,
        direction: MoveDirection,
        viewport_width: u32,
    },
    MoveAdjacent {
        from: usize,
        to: usize,
    },
    SetDisplayMode(DisplayMode),
    /// Persist the current order and display mode
    Commit,
    /// Discard uncommitted moves
    Revert,
    Delete(u64),
    RecordVisit(u64),
}

/// Full in-memory dashboard state
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Effective ordered list of every service
    pub services: Vec<Service>,
    /// Current view after filter and search
    pub filtered: Vec<Service>,
    /// Order to fall back to on revert
    baseline: Vec<Service>,
    pub sort_key: SortKey,
    pub filter_option: FilterOption,
    pub search: String,
    pub display_mode: DisplayMode,
    pub dirty: bool,
}

impl DashboardState {
    pub fn new(cache: &dyn LocalCache) -> Self {
        Self {
            services: vec![],
            filtered: vec![],
            baseline: vec![],
            sort_key: SortKey::default(),
            filter_option: FilterOption::default(),
            search: String::new(),
            display_mode: cache::saved_display_mode(cache).unwrap_or_default(),
            dirty: false,
        }
    }

    /// Apply one action, reading and writing the cache as needed
    pub fn apply(&mut self, action: Action, cache: &dyn LocalCache) {
        match action {
            Action::Fetch(server_list) => {
                let saved = cache::saved_order(cache);
                self.services = order::reconcile(&server_list, saved.as_deref());
                self.baseline = self.services.clone();
                self.refilter();
                self.dirty = false;
            }
            Action::SortChanged(key) => {
                self.sort_key = key;
                self.services = order::sort(&self.services, key);
                self.refilter();
            }
            Action::FilterChanged(option) => {
                self.filter_option = option;
                self.refilter();
            }
            Action::SearchChanged(search) => {
                self.search = search;
                self.refilter();
            }
            Action::MoveDirectional {
                index,
                direction,
                viewport_width,
            } => {
                let columns = order::columns_for_width(viewport_width);
                if order::move_directional(&mut self.filtered, index, direction, columns) {
                    self.services = self.filtered.clone();
                    self.dirty = true;
                }
            }
            Action::MoveAdjacent { from, to } => {
                if order::move_adjacent(&mut self.filtered, from, to) {
                    self.services = self.filtered.clone();
                    self.dirty = true;
                }
            }
            Action::SetDisplayMode(mode) => {
                self.display_mode = mode;
            }
            Action::Commit => {
                let ids: Vec<u64> = self.services.iter().map(|s| s.id).collect();
                cache::save_order(cache, &ids, self.display_mode);
                self.baseline = self.services.clone();
                self.dirty = false;
            }
            Action::Revert => {
                self.services = self.baseline.clone();
                self.filtered = self.baseline.clone();
                self.dirty = false;
            }
            Action::Delete(id) => {
                self.services.retain(|s| s.id != id);
                self.filtered.retain(|s| s.id != id);
                self.baseline.retain(|s| s.id != id);
                visits::remove_entry(cache, id);
            }
            Action::RecordVisit(id) => {
                visits::record_visit(cache, id);
            }
        }
    }

    fn refilter(&mut self) {
        self.filtered = order::filter(&self.services, self.filter_option, &self.search);
    }
}
