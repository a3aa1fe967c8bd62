//! `/posts` resource handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Author, BlogPost, BlogPostChanges, BlogPostData};
use blog_shared::dto::{
    AuthorDto, CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id,
        author: post.author.full_name(),
        title: post.title,
        content: post.content,
        created: post.created,
    }
}

fn to_author(dto: AuthorDto) -> Author {
    Author::new(dto.first_name, dto.last_name)
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    tracing::debug!(count = posts.len(), "Listing blog posts");

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.into_iter().map(to_response).collect(),
    }))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let missing = req.missing_fields();
    let (Some(author), Some(title), Some(content)) = (req.author, req.title, req.content) else {
        return Err(AppError::BadRequest(format!(
            "Missing required field(s) in request body: {}",
            missing.join(", ")
        )));
    };
    let data = BlogPostData {
        author: to_author(author),
        title,
        content,
        created: req.created,
    };
    data.validate()?;

    let post = state.posts.insert(BlogPost::create(data)).await?;
    tracing::info!(post_id = %post.id, "Blog post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if let Some(body_id) = req.id {
        if body_id != id {
            return Err(AppError::BadRequest(format!(
                "Request path id ({}) and request body id ({}) must match",
                id, body_id
            )));
        }
    }

    let changes = BlogPostChanges {
        author: req.author.map(to_author),
        title: req.title,
        content: req.content,
        created: req.created,
    };
    if changes.is_empty() {
        return Err(AppError::BadRequest(
            "Request body must contain at least one of: author, title, content, created"
                .to_string(),
        ));
    }
    changes.validate()?;

    state
        .posts
        .update(id, &changes)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;
    tracing::info!(post_id = %id, "Blog post updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Blog post deleted");

    Ok(HttpResponse::NoContent().finish())
}
