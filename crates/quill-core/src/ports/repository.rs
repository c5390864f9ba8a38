use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, PostChanges};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it as stored.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Blog post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// All posts, oldest first. Ties on `created` are ordered by id.
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Any single post, or `None` when the store is empty.
    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError>;

    /// Bulk insert, used for seeding.
    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<(), RepoError>;

    /// Apply a partial update to `title`/`content` and return the updated post.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<BlogPost, RepoError>;

    /// Remove every post. Returns how many were removed.
    async fn purge(&self) -> Result<u64, RepoError>;
}
