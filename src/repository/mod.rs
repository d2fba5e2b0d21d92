pub mod credentials;
pub mod http;
#[cfg(test)]
pub(crate) mod memory;

use crate::error::{ConsoleError, Result};
use crate::models::Entity;
use async_trait::async_trait;

pub use credentials::{CredentialProvider, StaticCredentials};
pub use http::{HttpCollection, HttpSingleton, RestClient};

/// CRUD access to one REST collection.
#[async_trait]
pub trait CollectionRepository<T: Entity>: Send + Sync {
    async fn list_all(&self) -> Result<Vec<T>>;

    async fn get_one(&self, id: i64) -> Result<T>;

    async fn create(&self, entity: &T) -> Result<T>;

    async fn update(&self, id: i64, patch: &T::Patch) -> Result<T>;

    async fn delete(&self, id: i64) -> Result<()>;

    /// Whether [`reorder`](Self::reorder) is backed by a batch endpoint.
    fn supports_reorder(&self) -> bool {
        false
    }

    /// Persists a complete ordering in one call.
    async fn reorder(&self, ids: &[i64]) -> Result<()> {
        let _ = ids;
        Err(ConsoleError::Unsupported(
            "this collection has no reorder endpoint".to_string(),
        ))
    }

    async fn set_enabled(&self, id: i64, enabled: bool) -> Result<()> {
        let patch = T::enabled_patch(enabled);
        self.update(id, &patch).await?;
        Ok(())
    }
}

/// A single configuration document read and replaced as a whole.
#[async_trait]
pub trait SingletonRepository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    async fn fetch(&self) -> Result<T>;

    async fn store(&self, value: &T) -> Result<T>;
}
