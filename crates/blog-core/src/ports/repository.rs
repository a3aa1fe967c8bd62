use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, BlogPostChanges};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    ///
    /// Returns [`RepoError::NotFound`] when no entity had that ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Blog post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// All stored posts, newest first.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Insert a batch of posts in one round trip.
    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<Vec<BlogPost>, RepoError>;

    /// Replace the supplied fields of a stored post.
    ///
    /// Returns `None` if no post has the given ID.
    async fn update(
        &self,
        id: Uuid,
        changes: &BlogPostChanges,
    ) -> Result<Option<BlogPost>, RepoError>;

    /// Remove every stored post, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}
