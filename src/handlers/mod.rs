pub mod admin;
pub mod api;
pub mod health;
pub mod metrics;
pub mod middleware;

pub use admin::*;
pub use api::{create_api_router, get_service, image_stats, list_services, ApiState};
pub use health::*;
pub use metrics::*;
pub use middleware::*;
