//! Service list reconciliation engine: ordering, filtering, visit counters,
//! and the dashboard reducer, all backed by an injected local cache.

pub mod cache;
pub mod order;
pub mod state;
pub mod visits;

pub use cache::{FileCache, LocalCache, MemoryCache};
pub use state::{Action, DashboardState};
pub use visits::VisitEntry;
