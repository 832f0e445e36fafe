//! Tag handlers.

use actix_web::{HttpResponse, web};

use crate::state::AppState;

/// GET /tags
pub async fn list_tags(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.store.list_tags().await)
}

/// GET /tags/{tag_name}/posts - an unknown tag yields an empty list.
pub async fn posts_by_tag(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(state.store.posts_by_tag(&path.into_inner()).await)
}
