//! Visit counters keyed by service id, persisted through the local cache.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::cache::{keys, LocalCache};
use crate::models::Service;

/// One point of the visits projection, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitEntry {
    pub name: String,
    pub visits: u64,
}

fn load_counts(cache: &dyn LocalCache) -> HashMap<String, u64> {
    cache
        .get(keys::SERVICE_VISITS)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

fn store_counts(cache: &dyn LocalCache, counts: &HashMap<String, u64>) {
    if let Ok(serialized) = serde_json::to_string(counts) {
        cache.set(keys::SERVICE_VISITS, &serialized);
    }
}

/// Increment the counter for one service, starting at 1 when absent
pub fn record_visit(cache: &dyn LocalCache, id: u64) {
    let mut counts = load_counts(cache);
    *counts.entry(id.to_string()).or_insert(0) += 1;
    store_counts(cache, &counts);
}

/// Counter for one service, 0 when never visited
pub fn visit_count(cache: &dyn LocalCache, id: u64) -> u64 {
    load_counts(cache).get(&id.to_string()).copied().unwrap_or(0)
}

/// Pair each service with its counter, preserving the input order
pub fn project_visits(cache: &dyn LocalCache, services: &[Service]) -> Vec<VisitEntry> {
    let counts = load_counts(cache);
    services
        .iter()
        .map(|service| VisitEntry {
            name: service.name.clone(),
            visits: counts.get(&service.id.to_string()).copied().unwrap_or(0),
        })
        .collect()
}

/// Entry with the highest count; ties go to the first encountered
pub fn most_visited(series: &[VisitEntry]) -> Option<&VisitEntry> {
    series.iter().reduce(|best, entry| {
        if entry.visits > best.visits {
            entry
        } else {
            best
        }
    })
}

/// Drop the counter for a deleted service
pub fn remove_entry(cache: &dyn LocalCache, id: u64) {
    let mut counts = load_counts(cache);
    if counts.remove(&id.to_string()).is_some() {
        store_counts(cache, &counts);
    }
}
