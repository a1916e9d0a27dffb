//! Repository traits for data access
//!
//! These traits define the interface for data storage without specifying
//! the implementation (SQLite, in-memory, etc.)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Item;

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Item repository trait
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Get all items
    async fn list(&self) -> RepoResult<Vec<Item>>;

    /// Get an item by ID
    async fn get(&self, id: &Uuid) -> RepoResult<Option<Item>>;

    /// Create a new item
    async fn create(&self, item: &Item) -> RepoResult<()>;

    /// Update an item
    async fn update(&self, item: &Item) -> RepoResult<()>;

    /// Delete an item. Returns `true` if a row was removed.
    async fn delete(&self, id: &Uuid) -> RepoResult<bool>;
}
