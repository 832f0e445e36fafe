//! Comment handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::NewComment;
use blog_shared::dto::CreateCommentRequest;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts/{post_id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment = state
        .store
        .create_comment(
            path.into_inner(),
            NewComment {
                content: req.content,
                author: req.author,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// GET /posts/{post_id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let comments = state.store.list_comments(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    state.store.delete_comment(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
