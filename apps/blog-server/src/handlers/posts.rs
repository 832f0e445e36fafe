//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{NewPost, PageRequest, PostFilter, PostUpdate};
use blog_shared::dto::{AuthorQuery, CreatePostRequest, ListPostsQuery, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /posts?author=<name>
pub async fn create_post(
    state: web::Data<AppState>,
    query: web::Query<AuthorQuery>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let author = query.into_inner().author;
    if author.chars().count() < AuthorQuery::MIN_LENGTH {
        return Err(AppError::Validation(vec![format!(
            "author must be at least {} characters",
            AuthorQuery::MIN_LENGTH
        )]));
    }

    let req = body.into_inner();
    let post = state
        .store
        .create_post(NewPost {
            title: req.title,
            content: req.content,
            tags: req.tags,
            published: req.published,
            author,
        })
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /posts?page=&page_size=&tag=&published=&search=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let defaults = PageRequest::default();
    let request = PageRequest::new(
        query.page.unwrap_or(defaults.page),
        query.page_size.unwrap_or(defaults.page_size),
    );

    let mut errors = Vec::new();
    if request.page < 1 {
        errors.push("page must be at least 1".to_string());
    }
    if request.page_size < 1 || request.page_size > PageRequest::MAX_PAGE_SIZE {
        errors.push(format!(
            "page_size must be between 1 and {}",
            PageRequest::MAX_PAGE_SIZE
        ));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Empty strings mean "no filter".
    let filter = PostFilter {
        tag: query.tag.filter(|t| !t.is_empty()),
        published: query.published,
        search: query.search.filter(|s| !s.is_empty()),
    };

    let page = state.store.list_posts(&filter, request).await;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /posts/{post_id} - counts as a view.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let post = state.store.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .store
        .update_post(
            path.into_inner(),
            PostUpdate {
                title: req.title,
                content: req.content,
                tags: req.tags,
                published: req.published,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    state.store.delete_post(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
