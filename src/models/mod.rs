pub mod enums;
pub mod errors;
pub mod service;
pub mod validation;

pub use enums::{DisplayMode, FilterOption, MoveDirection, SortKey};
pub use errors::{
    RepositoryError, RepositoryResult, ServiceError, ServiceResult, ValidationError,
    ValidationResult,
};
pub use service::{
    ImageStats, MessageResponse, ReorderRequest, Service, ServiceForm, UploadedImage,
};
