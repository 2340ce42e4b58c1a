use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Core service record as it is stored and served over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub home_short_description: String,
    pub details_short_description: String,
    pub description: String,
    /// Path under `/images`; an empty string means "no image"
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub detailed_images: Vec<String>,
    #[serde(default)]
    pub image_details: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Text fields and parsed sequences submitted with a create or update request.
///
/// All text fields are optional so the same shape serves both operations:
/// on update, an omitted or empty field keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ServiceForm {
    pub name: Option<String>,
    pub home_short_description: Option<String>,
    pub details_short_description: Option<String>,
    pub description: Option<String>,
    pub image_details: Vec<String>,
    pub features: Vec<String>,
    pub main_image: Option<UploadedImage>,
    pub detailed_images: Vec<UploadedImage>,
}

/// One uploaded file as received from a multipart request
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("original_name", &self.original_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Response for image statistics of one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub image_count: usize,
    pub total_size_mb: f64,
    pub warning: Option<String>,
}

/// Request body for the whole-order replacement endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub ordered_ids: Vec<u64>,
}

/// Generic `{ "message": ... }` response for delete/reorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl Service {
    /// Create a new record from form fields and already-stored image paths.
    ///
    /// The id is a placeholder; the repository assigns the real one on insert.
    pub fn new(form: &ServiceForm, main_image: String, detailed_images: Vec<String>) -> Self {
        Self {
            id: 0,
            name: form.name.clone().unwrap_or_default(),
            home_short_description: form.home_short_description.clone().unwrap_or_default(),
            details_short_description: form.details_short_description.clone().unwrap_or_default(),
            description: form.description.clone().unwrap_or_default(),
            main_image,
            detailed_images,
            image_details: form.image_details.clone(),
            features: form.features.clone(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    /// Apply partial-update semantics from a form.
    ///
    /// Empty or omitted text fields keep the stored value. Image paths are
    /// replaced wholesale when `Some`, kept otherwise. `image_details` and
    /// `features` are replaced only when the new sequence is non-empty.
    pub fn apply_update(
        &mut self,
        form: &ServiceForm,
        main_image: Option<String>,
        detailed_images: Option<Vec<String>>,
    ) {
        if let Some(name) = non_empty(&form.name) {
            self.name = name;
        }
        if let Some(text) = non_empty(&form.home_short_description) {
            self.home_short_description = text;
        }
        if let Some(text) = non_empty(&form.details_short_description) {
            self.details_short_description = text;
        }
        if let Some(text) = non_empty(&form.description) {
            self.description = text;
        }
        if let Some(image) = main_image {
            self.main_image = image;
        }
        if let Some(images) = detailed_images {
            self.detailed_images = images;
        }
        if !form.image_details.is_empty() {
            self.image_details = form.image_details.clone();
        }
        if !form.features.is_empty() {
            self.features = form.features.clone();
        }
        self.updated_at = Some(Utc::now());
    }

    /// True when the record has at least one detailed image
    pub fn has_images(&self) -> bool {
        !self.detailed_images.is_empty()
    }

    /// Number of stored images including the main one
    pub fn image_count(&self) -> usize {
        let main = if self.main_image.is_empty() { 0 } else { 1 };
        main + self.detailed_images.len()
    }

    /// All stored image paths, main image first when present
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths = Vec::with_capacity(self.image_count());
        if !self.main_image.is_empty() {
            paths.push(self.main_image.as_str());
        }
        paths.extend(self.detailed_images.iter().map(String::as_str));
        paths
    }
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|s| !s.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_form() -> ServiceForm {
        ServiceForm {
            name: Some("Deep Cleaning".to_string()),
            home_short_description: Some("Thorough home cleaning".to_string()),
            details_short_description: Some("Room by room deep clean".to_string()),
            description: Some("Full description".to_string()),
            image_details: vec!["kitchen".to_string()],
            features: vec!["eco products".to_string()],
            main_image: None,
            detailed_images: vec![],
        }
    }

    #[test]
    fn test_service_creation() {
        let form = create_test_form();
        let service = Service::new(&form, "/images/main.jpg".to_string(), vec![]);

        assert_eq!(service.name, "Deep Cleaning");
        assert_eq!(service.main_image, "/images/main.jpg");
        assert!(service.created_at.is_some());
        assert!(service.updated_at.is_none());
        assert_eq!(service.image_count(), 1);
    }

    #[test]
    fn test_creation_without_main_image_stores_empty_string() {
        let form = create_test_form();
        let service = Service::new(&form, String::new(), vec![]);

        assert_eq!(service.main_image, "");
        assert_eq!(service.image_count(), 0);
        assert!(!service.has_images());
    }

    #[test]
    fn test_partial_update_keeps_empty_fields() {
        let form = create_test_form();
        let mut service = Service::new(&form, String::new(), vec![]);

        let update = ServiceForm {
            name: Some(String::new()),
            description: Some("New description".to_string()),
            ..Default::default()
        };
        service.apply_update(&update, None, None);

        assert_eq!(service.name, "Deep Cleaning");
        assert_eq!(service.description, "New description");
        assert!(service.updated_at.is_some());
    }

    #[test]
    fn test_update_replaces_images_wholesale() {
        let form = create_test_form();
        let mut service = Service::new(
            &form,
            "/images/old.jpg".to_string(),
            vec!["/images/a.jpg".to_string(), "/images/b.jpg".to_string()],
        );

        let update = ServiceForm::default();
        service.apply_update(
            &update,
            Some("/images/new.jpg".to_string()),
            Some(vec!["/images/c.jpg".to_string()]),
        );

        assert_eq!(service.main_image, "/images/new.jpg");
        assert_eq!(service.detailed_images, vec!["/images/c.jpg".to_string()]);
    }

    #[test]
    fn test_update_keeps_sequences_when_new_ones_empty() {
        let form = create_test_form();
        let mut service = Service::new(&form, String::new(), vec![]);

        let update = ServiceForm::default();
        service.apply_update(&update, None, None);

        assert_eq!(service.image_details, vec!["kitchen".to_string()]);
        assert_eq!(service.features, vec!["eco products".to_string()]);
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let form = create_test_form();
        let service = Service::new(&form, String::new(), vec![]);

        let json = serde_json::to_string(&service).unwrap();
        assert!(json.contains("\"homeShortDescription\""));
        assert!(json.contains("\"detailedImages\""));
        assert!(json.contains("\"mainImage\""));
        assert!(json.contains("\"createdAt\""));
        // updatedAt is omitted until the first update
        assert!(!json.contains("\"updatedAt\""));
    }

    #[test]
    fn test_serde_roundtrip() {
        let form = create_test_form();
        let service = Service::new(&form, "/images/x.jpg".to_string(), vec![]);

        let json = serde_json::to_string(&service).unwrap();
        let deserialized: Service = serde_json::from_str(&json).unwrap();
        assert_eq!(service, deserialized);
    }

    #[test]
    fn test_image_paths_main_first() {
        let form = create_test_form();
        let service = Service::new(
            &form,
            "/images/main.jpg".to_string(),
            vec!["/images/a.jpg".to_string()],
        );

        assert_eq!(service.image_paths(), vec!["/images/main.jpg", "/images/a.jpg"]);
    }
}
