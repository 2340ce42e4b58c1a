use thiserror::Error;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service not found: {id}")]
    ServiceNotFound { id: u64 },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Upload error: {message}")]
    UploadError { message: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Item not found")]
    NotFound,

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid field value: {field}={value}, reason={reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("Too many files: {field}, max_count={max_count}, actual_count={actual_count}")]
    TooManyFiles {
        field: String,
        max_count: usize,
        actual_count: usize,
    },

    #[error("File too large: {name}, max_bytes={max_bytes}, actual_bytes={actual_bytes}")]
    FileTooLarge {
        name: String,
        max_bytes: usize,
        actual_bytes: usize,
    },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::TooManyFiles { .. } | ValidationError::FileTooLarge { .. } => {
                ServiceError::UploadError {
                    message: err.to_string(),
                }
            }
            _ => ServiceError::ValidationError {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ServiceError::ServiceNotFound { id: 42 };
        assert_eq!(error.to_string(), "Service not found: 42");

        let validation_error = ValidationError::RequiredField {
            field: "name".to_string(),
        };
        assert_eq!(validation_error.to_string(), "Required field missing: name");
    }

    #[test]
    fn test_validation_error_conversion() {
        let validation_error = ValidationError::TooLong {
            field: "name".to_string(),
            max_length: 200,
            actual_length: 250,
        };

        let service_error: ServiceError = validation_error.into();
        match service_error {
            ServiceError::ValidationError { message } => {
                assert!(message.contains("Field too long"));
            }
            _ => panic!("Expected ValidationError conversion"),
        }
    }

    #[test]
    fn test_upload_error_conversion() {
        let file_error = ValidationError::FileTooLarge {
            name: "photo.jpg".to_string(),
            max_bytes: 5 * 1024 * 1024,
            actual_bytes: 6 * 1024 * 1024,
        };

        let service_error: ServiceError = file_error.into();
        match service_error {
            ServiceError::UploadError { message } => {
                assert!(message.contains("photo.jpg"));
            }
            _ => panic!("Expected UploadError conversion"),
        }
    }

    #[test]
    fn test_repository_error_from_serde() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_error.is_err());

        let repo_error: RepositoryError = json_error.unwrap_err().into();
        match repo_error {
            RepositoryError::Serialization { .. } => {}
            _ => panic!("Expected Serialization error"),
        }
    }
}
