pub mod image_store;
pub mod service_repository;

#[cfg(test)]
mod tests;

pub use image_store::DiskImageStore;
pub use service_repository::{JsonFileRepository, ServiceRepository};

#[cfg(test)]
pub use service_repository::MockServiceRepository;
