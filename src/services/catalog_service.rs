use std::sync::Arc;

use tracing::{info, instrument};

use crate::models::{
    validation, ImageStats, Service, ServiceError, ServiceForm, ServiceResult,
};
use crate::repositories::{DiskImageStore, ServiceRepository};

const SIZE_WARNING_THRESHOLD_MB: f64 = 2.0;

/// Business logic for the service catalog: validation, image persistence,
/// and partial-update semantics on top of the repository.
pub struct CatalogService {
    repository: Arc<dyn ServiceRepository>,
    images: Arc<DiskImageStore>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ServiceRepository>, images: Arc<DiskImageStore>) -> Self {
        Self { repository, images }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<Service>> {
        Ok(self.repository.find_all().await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> ServiceResult<Service> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::ServiceNotFound { id })
    }

    /// Validate the form, persist the uploads, then insert the record
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: ServiceForm) -> ServiceResult<Service> {
        validation::validate_create(&form)?;

        let main_image = match &form.main_image {
            Some(image) => self.images.save(image).await?,
            None => String::new(),
        };
        let detailed_images = self.images.save_all(&form.detailed_images).await?;

        let service = self
            .repository
            .create(Service::new(&form, main_image, detailed_images))
            .await?;
        info!(id = service.id, name = %service.name, "created service");
        Ok(service)
    }

    /// Partial update: empty fields keep the stored value, supplied images
    /// replace the stored set wholesale
    #[instrument(skip(self, form))]
    pub async fn update(&self, id: u64, form: ServiceForm) -> ServiceResult<Service> {
        validation::validate_update(&form)?;

        let mut service = self.get(id).await?;

        let main_image = match &form.main_image {
            Some(image) => Some(self.images.save(image).await?),
            None => None,
        };
        let detailed_images = if form.detailed_images.is_empty() {
            None
        } else {
            Some(self.images.save_all(&form.detailed_images).await?)
        };

        service.apply_update(&form, main_image, detailed_images);
        let updated = self.repository.update(service).await?;
        info!(id, "updated service");
        Ok(updated)
    }

    /// Delete the record. Stored image files stay on disk; other records may
    /// reference the same paths after an update.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> ServiceResult<()> {
        if !self.repository.exists(id).await? {
            return Err(ServiceError::ServiceNotFound { id });
        }
        self.repository.delete(id).await?;
        info!(id, "deleted service");
        Ok(())
    }

    /// Replace the stored order with the given id sequence
    #[instrument(skip(self, ordered_ids))]
    pub async fn reorder(&self, ordered_ids: Vec<u64>) -> ServiceResult<Vec<Service>> {
        let reordered = self.repository.replace_order(ordered_ids).await?;
        info!(count = reordered.len(), "replaced service order");
        Ok(reordered)
    }

    /// Sum on-disk image sizes for one service, with a warning above 2 MB
    #[instrument(skip(self))]
    pub async fn image_stats(&self, id: u64) -> ServiceResult<ImageStats> {
        let service = self.get(id).await?;
        let total_bytes = self.images.total_size(&service.image_paths()).await;
        let total_size_mb = (total_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;

        let warning = (total_size_mb > SIZE_WARNING_THRESHOLD_MB)
            .then(|| "Warning: total image size is very large (more than 2 MB)".to_string());

        Ok(ImageStats {
            image_count: service.image_count(),
            total_size_mb,
            warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RepositoryError, UploadedImage};
    use crate::repositories::MockServiceRepository;

    async fn catalog(repository: MockServiceRepository) -> (tempfile::TempDir, CatalogService) {
        let dir = tempfile::tempdir().unwrap();
        let images = DiskImageStore::open(dir.path().to_path_buf()).await.unwrap();
        (
            dir,
            CatalogService::new(Arc::new(repository), Arc::new(images)),
        )
    }

    fn valid_form() -> ServiceForm {
        ServiceForm {
            name: Some("Office Cleaning".to_string()),
            home_short_description: Some("Spotless offices".to_string()),
            details_short_description: Some("Desks, floors, windows".to_string()),
            description: Some("Complete office cleaning".to_string()),
            ..Default::default()
        }
    }

    fn stored_service(id: u64) -> Service {
        let mut service = Service::new(&valid_form(), String::new(), vec![]);
        service.id = id;
        service
    }

    #[tokio::test]
    async fn test_get_missing_service_maps_to_not_found() {
        let mut repo = MockServiceRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let (_dir, catalog) = catalog(repo).await;

        let err = catalog.get(7).await.unwrap_err();
        assert!(matches!(err, ServiceError::ServiceNotFound { id: 7 }));
    }

    #[tokio::test]
    async fn test_create_without_main_image_stores_empty_string() {
        let mut repo = MockServiceRepository::new();
        repo.expect_create().returning(|mut service| {
            service.id = 1;
            Ok(service)
        });
        let (_dir, catalog) = catalog(repo).await;

        let created = catalog.create(valid_form()).await.unwrap();
        assert_eq!(created.main_image, "");
        assert!(created.detailed_images.is_empty());
    }

    #[tokio::test]
    async fn test_create_persists_uploads_before_insert() {
        let mut repo = MockServiceRepository::new();
        repo.expect_create().returning(|mut service| {
            service.id = 1;
            Ok(service)
        });
        let (_dir, catalog) = catalog(repo).await;

        let mut form = valid_form();
        form.main_image = Some(UploadedImage {
            original_name: "main.jpg".to_string(),
            bytes: vec![0u8; 64],
        });
        form.detailed_images = vec![UploadedImage {
            original_name: "detail.png".to_string(),
            bytes: vec![0u8; 32],
        }];

        let created = catalog.create(form).await.unwrap();
        assert!(created.main_image.starts_with("/images/"));
        assert_eq!(created.detailed_images.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields_without_touching_store() {
        let repo = MockServiceRepository::new();
        let (_dir, catalog) = catalog(repo).await;

        let mut form = valid_form();
        form.name = None;
        let err = catalog.create(form).await.unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_upload_as_upload_error() {
        let repo = MockServiceRepository::new();
        let (_dir, catalog) = catalog(repo).await;

        let mut form = valid_form();
        form.main_image = Some(UploadedImage {
            original_name: "huge.jpg".to_string(),
            bytes: vec![0u8; validation::MAX_IMAGE_BYTES + 1],
        });
        let err = catalog.create(form).await.unwrap_err();
        assert!(matches!(err, ServiceError::UploadError { .. }));
    }

    #[tokio::test]
    async fn test_update_keeps_fields_absent_from_form() {
        let mut repo = MockServiceRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(stored_service(id))));
        repo.expect_update().returning(Ok);
        let (_dir, catalog) = catalog(repo).await;

        let form = ServiceForm {
            description: Some("Rewritten".to_string()),
            ..Default::default()
        };

        let updated = catalog.update(3, form).await.unwrap();
        assert_eq!(updated.name, "Office Cleaning");
        assert_eq!(updated.description, "Rewritten");
    }

    #[tokio::test]
    async fn test_delete_missing_service_is_not_found() {
        let mut repo = MockServiceRepository::new();
        repo.expect_exists().returning(|_| Ok(false));
        let (_dir, catalog) = catalog(repo).await;

        let err = catalog.delete(9).await.unwrap_err();
        assert!(matches!(err, ServiceError::ServiceNotFound { id: 9 }));
    }

    #[tokio::test]
    async fn test_repository_failure_surfaces_as_repository_error() {
        let mut repo = MockServiceRepository::new();
        repo.expect_find_all()
            .returning(|| Err(RepositoryError::NotFound));
        let (_dir, catalog) = catalog(repo).await;

        let err = catalog.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::Repository { .. }));
    }

    #[tokio::test]
    async fn test_image_stats_counts_main_and_detailed() {
        let mut repo = MockServiceRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut service = stored_service(id);
            service.main_image = "/images/missing-main.jpg".to_string();
            service.detailed_images = vec!["/images/missing-a.jpg".to_string()];
            Ok(Some(service))
        });
        let (_dir, catalog) = catalog(repo).await;

        let stats = catalog.image_stats(1).await.unwrap();
        assert_eq!(stats.image_count, 2);
        // missing files are skipped, so no size and no warning
        assert_eq!(stats.total_size_mb, 0.0);
        assert!(stats.warning.is_none());
    }
}
