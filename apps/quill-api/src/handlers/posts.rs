//! Blog post resource handlers.

use actix_web::{HttpResponse, web};
use chrono::SecondsFormat;
use uuid::Uuid;

use quill_core::domain::{Author, BlogPost, PostChanges};
use quill_core::error::{DomainError, RepoError};
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        author: post.author.display_name(),
        title: post.title,
        content: post.content,
        created: post.created.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid post id `{raw}`")))
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing `{field}` in request body"))
}

/// Report an absent post by id rather than the generic repository message.
fn for_post(id: Uuid) -> impl FnOnce(RepoError) -> AppError {
    move |err| match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: "BlogPost",
            id,
        }
        .into(),
        other => other.into(),
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "BlogPost",
            id,
        })?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let title = req.title.ok_or_else(|| missing("title"))?;
    let content = req.content.ok_or_else(|| missing("content"))?;
    let author = req.author.ok_or_else(|| missing("author"))?;
    let first_name = author.first_name.ok_or_else(|| missing("author.firstName"))?;
    let last_name = author.last_name.ok_or_else(|| missing("author.lastName"))?;

    let post = BlogPost::new(Author::new(first_name, last_name), title, content)?;
    let saved = state.posts.insert(post).await?;

    tracing::info!(request_id = %request_id.as_str(), post_id = %saved.id, "Created post");

    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// PUT /posts/{id}
///
/// Responds 201 on success, not 200/204. Existing clients check for 201.
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let req = body.into_inner();

    let body_id = req.id.as_deref().map(Uuid::parse_str);
    if !matches!(body_id, Some(Ok(body_id)) if body_id == id) {
        return Err(AppError::BadRequest(format!(
            "Request path id ({}) and request body id ({}) must match",
            path.as_str(),
            req.id.as_deref().unwrap_or("none"),
        )));
    }

    let changes = PostChanges::new(req.title, req.content)?;
    let updated = state.posts.update(id, changes).await.map_err(for_post(id))?;

    tracing::info!(request_id = %request_id.as_str(), post_id = %id, "Updated post");

    Ok(HttpResponse::Created().json(to_response(updated)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    state.posts.delete(id).await.map_err(for_post(id))?;

    tracing::info!(request_id = %request_id.as_str(), post_id = %id, "Deleted post");

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_response_joins_author_and_formats_created() {
        let post = BlogPost {
            id: Uuid::nil(),
            author: Author::new("Jane", "Doe"),
            title: "Hello World".into(),
            content: "First post".into(),
            created: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        let res = to_response(post);

        assert_eq!(res.author, "Jane Doe");
        assert_eq!(res.created, "2024-01-02T03:04:05.000Z");
        assert_eq!(res.id, "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_invalid_id_is_bad_request() {
        assert!(matches!(parse_post_id("nope"), Err(AppError::BadRequest(_))));
    }
}
