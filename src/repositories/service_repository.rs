use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

#[cfg(test)]
use mockall::automock;

use crate::models::{RepositoryError, RepositoryResult, Service};

/// Trait defining the interface for service data access operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// All services in stored order
    async fn find_all(&self) -> RepositoryResult<Vec<Service>>;

    /// Find a service by its id
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Service>>;

    /// Insert a new service; the repository assigns the id
    async fn create(&self, service: Service) -> RepositoryResult<Service>;

    /// Replace an existing service record
    async fn update(&self, service: Service) -> RepositoryResult<Service>;

    /// Delete a service record
    async fn delete(&self, id: u64) -> RepositoryResult<()>;

    /// Replace the stored order with the given id sequence.
    ///
    /// Unknown ids are ignored; stored services missing from the sequence keep
    /// their relative order at the end.
    async fn replace_order(&self, ordered_ids: Vec<u64>) -> RepositoryResult<Vec<Service>>;

    /// Check if a service exists
    async fn exists(&self, id: u64) -> RepositoryResult<bool>;

    /// Count stored services
    async fn count(&self) -> RepositoryResult<usize>;
}

/// JSON-file implementation backed by a single document on disk.
///
/// The whole file is read and rewritten per operation; a process-wide lock
/// serializes writers. A file that fails to parse is an error, not an empty
/// list, so a corrupt store never gets silently overwritten.
pub struct JsonFileRepository {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl JsonFileRepository {
    /// Open the store, creating an empty document when the file is missing
    pub async fn open(path: PathBuf) -> RepositoryResult<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if tokio::fs::metadata(&path).await.is_err() {
            tokio::fs::write(&path, "[]").await?;
            info!(path = %path.display(), "initialized empty service store");
        }
        Ok(Self {
            path,
            lock: Arc::new(RwLock::new(())),
        })
    }

    async fn read_services(&self) -> RepositoryResult<Vec<Service>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let services = serde_json::from_str(&contents)?;
        Ok(services)
    }

    async fn write_services(&self, services: &[Service]) -> RepositoryResult<()> {
        let serialized = serde_json::to_string_pretty(services)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }

    fn next_id(services: &[Service]) -> u64 {
        services.iter().map(|s| s.id).max().map_or(1, |max| max + 1)
    }
}

#[async_trait]
impl ServiceRepository for JsonFileRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Service>> {
        let _guard = self.lock.read().await;
        self.read_services().await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Service>> {
        let _guard = self.lock.read().await;
        let services = self.read_services().await?;
        Ok(services.into_iter().find(|s| s.id == id))
    }

    #[instrument(skip(self, service))]
    async fn create(&self, mut service: Service) -> RepositoryResult<Service> {
        let _guard = self.lock.write().await;
        let mut services = self.read_services().await?;
        service.id = Self::next_id(&services);
        services.push(service.clone());
        self.write_services(&services).await?;
        debug!(id = service.id, "created service record");
        Ok(service)
    }

    #[instrument(skip(self, service))]
    async fn update(&self, service: Service) -> RepositoryResult<Service> {
        let _guard = self.lock.write().await;
        let mut services = self.read_services().await?;
        let slot = services
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = service.clone();
        self.write_services(&services).await?;
        Ok(service)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> RepositoryResult<()> {
        let _guard = self.lock.write().await;
        let mut services = self.read_services().await?;
        let before = services.len();
        services.retain(|s| s.id != id);
        if services.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.write_services(&services).await?;
        debug!(id, "deleted service record");
        Ok(())
    }

    #[instrument(skip(self, ordered_ids))]
    async fn replace_order(&self, ordered_ids: Vec<u64>) -> RepositoryResult<Vec<Service>> {
        let _guard = self.lock.write().await;
        let services = self.read_services().await?;

        // repeated ids count once so the stored document keeps one record per id
        let mut reordered = Vec::with_capacity(services.len());
        let mut placed = HashSet::new();
        for id in &ordered_ids {
            if !placed.insert(*id) {
                continue;
            }
            if let Some(service) = services.iter().find(|s| s.id == *id) {
                reordered.push(service.clone());
            }
        }
        for service in &services {
            if !placed.contains(&service.id) {
                reordered.push(service.clone());
            }
        }

        self.write_services(&reordered).await?;
        Ok(reordered)
    }

    async fn exists(&self, id: u64) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.find_all().await?.len())
    }
}
