//! SQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder};
use uuid::Uuid;

use blog_core::domain::{BlogPost, BlogPostChanges};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::sql_base::{SqlBaseRepository, query_error};

/// SQL blog post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::Created)
            .all(self.connection())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(self.connection())
            .await
            .map_err(query_error)
    }

    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<Vec<BlogPost>, RepoError> {
        if posts.is_empty() {
            return Ok(posts);
        }

        let models = posts.iter().cloned().map(post::ActiveModel::from);
        let inserted = PostEntity::insert_many(models)
            .exec_without_returning(self.connection())
            .await
            .map_err(query_error)?;

        tracing::debug!(count = inserted, "Inserted blog posts");
        Ok(posts)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &BlogPostChanges,
    ) -> Result<Option<BlogPost>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(query_error)?
        else {
            return Ok(None);
        };

        let mut post = BlogPost::from(model);
        changes.apply(&mut post);

        let updated = post::ActiveModel::from(post)
            .update(self.connection())
            .await
            .map_err(query_error)?;

        tracing::debug!(post_id = %id, "Updated blog post");
        Ok(Some(updated.into()))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(self.connection())
            .await
            .map_err(query_error)?;

        tracing::debug!(count = result.rows_affected, "Deleted all blog posts");
        Ok(result.rows_affected)
    }
}
