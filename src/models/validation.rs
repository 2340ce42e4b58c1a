use crate::models::errors::{ValidationError, ValidationResult};
use crate::models::service::{ServiceForm, UploadedImage};

pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

pub const MAX_MAIN_IMAGES: usize = 1;
pub const MAX_DETAILED_IMAGES: usize = 15;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Validate a create request: all text fields required, uploads within limits
pub fn validate_create(form: &ServiceForm) -> ValidationResult<()> {
    require(&form.name, "name")?;
    require(&form.home_short_description, "homeShortDescription")?;
    require(&form.details_short_description, "detailsShortDescription")?;
    require(&form.description, "description")?;
    validate_lengths(form)?;
    validate_uploads(form)
}

/// Validate an update request: fields optional, but present fields must be sane
pub fn validate_update(form: &ServiceForm) -> ValidationResult<()> {
    validate_lengths(form)?;
    validate_uploads(form)
}

fn require(field: &Option<String>, name: &str) -> ValidationResult<()> {
    match field.as_deref() {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::RequiredField {
            field: name.to_string(),
        }),
    }
}

fn validate_lengths(form: &ServiceForm) -> ValidationResult<()> {
    check_length(&form.name, "name", MAX_NAME_LENGTH)?;
    check_length(
        &form.home_short_description,
        "homeShortDescription",
        MAX_SHORT_DESCRIPTION_LENGTH,
    )?;
    check_length(
        &form.details_short_description,
        "detailsShortDescription",
        MAX_SHORT_DESCRIPTION_LENGTH,
    )?;
    check_length(&form.description, "description", MAX_DESCRIPTION_LENGTH)
}

fn check_length(field: &Option<String>, name: &str, max: usize) -> ValidationResult<()> {
    if let Some(value) = field {
        if value.chars().count() > max {
            return Err(ValidationError::TooLong {
                field: name.to_string(),
                max_length: max,
                actual_length: value.chars().count(),
            });
        }
    }
    Ok(())
}

/// Enforce file count and per-file size limits on uploaded images
pub fn validate_uploads(form: &ServiceForm) -> ValidationResult<()> {
    if form.detailed_images.len() > MAX_DETAILED_IMAGES {
        return Err(ValidationError::TooManyFiles {
            field: "detailedImages".to_string(),
            max_count: MAX_DETAILED_IMAGES,
            actual_count: form.detailed_images.len(),
        });
    }
    if let Some(image) = &form.main_image {
        check_size(image)?;
    }
    for image in &form.detailed_images {
        check_size(image)?;
    }
    Ok(())
}

fn check_size(image: &UploadedImage) -> ValidationResult<()> {
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::FileTooLarge {
            name: image.original_name.clone(),
            max_bytes: MAX_IMAGE_BYTES,
            actual_bytes: image.bytes.len(),
        });
    }
    Ok(())
}
