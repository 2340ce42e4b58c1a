//! Pure ordering operations over service lists.
//!
//! Everything here is synchronous and side-effect free; callers own the lists
//! and pass the cached order explicitly.

use std::collections::HashSet;

use crate::models::{FilterOption, MoveDirection, Service, SortKey};

/// Merge the canonical server list with a previously saved ordering.
///
/// Saved ids missing from the server list are dropped (deleted services),
/// repeated saved ids count once, and server entries missing from the saved
/// order are appended in server order (newly created services). The result
/// is always a permutation of the input.
pub fn reconcile(server_list: &[Service], persisted_order: Option<&[u64]>) -> Vec<Service> {
    let Some(order) = persisted_order else {
        return server_list.to_vec();
    };

    let mut result = Vec::with_capacity(server_list.len());
    let mut placed = HashSet::new();
    for id in order {
        if !placed.insert(*id) {
            continue;
        }
        if let Some(service) = server_list.iter().find(|s| s.id == *id) {
            result.push(service.clone());
        }
    }
    for service in server_list {
        if !placed.contains(&service.id) {
            result.push(service.clone());
        }
    }
    result
}

/// Stable sort by the given key; never mutates the input.
///
/// Name comparisons are case-folded. Records with no creation date sort last
/// for both date directions.
pub fn sort(list: &[Service], key: SortKey) -> Vec<Service> {
    let mut sorted = list.to_vec();
    match key {
        SortKey::NameAsc => {
            sorted.sort_by(|a, b| fold_name(a).cmp(&fold_name(b)));
        }
        SortKey::NameDesc => {
            sorted.sort_by(|a, b| fold_name(b).cmp(&fold_name(a)));
        }
        SortKey::DateAsc => {
            sorted.sort_by_key(|s| match s.created_at {
                Some(date) => (0, date.timestamp_millis()),
                None => (1, 0),
            });
        }
        SortKey::DateDesc => {
            sorted.sort_by_key(|s| match s.created_at {
                Some(date) => (0, -date.timestamp_millis()),
                None => (1, 0),
            });
        }
    }
    sorted
}

fn fold_name(service: &Service) -> String {
    service.name.to_lowercase()
}

/// Apply the category filter, then a case-insensitive substring search over
/// name and the home short description. An empty search is a no-op.
pub fn filter(list: &[Service], option: FilterOption, search: &str) -> Vec<Service> {
    let category = list.iter().filter(|s| match option {
        FilterOption::All => true,
        FilterOption::WithImages => !s.detailed_images.is_empty(),
        FilterOption::WithoutImages => s.detailed_images.is_empty(),
        FilterOption::MoreThan5Images => s.detailed_images.len() > 5,
    });

    let needle = search.trim().to_lowercase();
    category
        .filter(|s| {
            needle.is_empty()
                || s.name.to_lowercase().contains(&needle)
                || s.home_short_description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Free-form reorder: remove the element at `from` and reinsert it at `to`.
/// Returns false when either index is out of bounds or the move is a no-op.
pub fn move_adjacent(list: &mut Vec<Service>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() || from == to {
        return false;
    }
    let service = list.remove(from);
    list.insert(to, service);
    true
}

/// Swap-based move on a conceptual grid of `columns` columns.
///
/// Up/down swap across rows; left/right swap within the current row only.
/// Moves past an edge are no-ops. Returns whether a swap happened.
pub fn move_directional(
    list: &mut [Service],
    index: usize,
    direction: MoveDirection,
    columns: usize,
) -> bool {
    if index >= list.len() || columns == 0 {
        return false;
    }
    let len = list.len();
    let row_start = (index / columns) * columns;
    let row_end = (row_start + columns - 1).min(len - 1);

    let target = match direction {
        MoveDirection::Up => index.checked_sub(columns),
        MoveDirection::Down => {
            let below = index + columns;
            (below < len).then_some(below)
        }
        MoveDirection::Left => index.checked_sub(1).filter(|left| *left >= row_start),
        MoveDirection::Right => {
            let right = index + 1;
            (right <= row_end).then_some(right)
        }
    };

    match target {
        Some(target) => {
            list.swap(index, target);
            true
        }
        None => false,
    }
}

/// Grid column count for a viewport width, matching the fixed breakpoints
pub fn columns_for_width(width: u32) -> usize {
    if width >= 1024 {
        4
    } else if width >= 640 {
        2
    } else {
        1
    }
}
