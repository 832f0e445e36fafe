//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod stats;
mod tags;
mod upload;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(health::root))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/posts")
            .route("", web::post().to(posts::create_post))
            .route("", web::get().to(posts::list_posts))
            .route("/{post_id}", web::get().to(posts::get_post))
            .route("/{post_id}", web::put().to(posts::update_post))
            .route("/{post_id}", web::delete().to(posts::delete_post))
            .route("/{post_id}/image", web::post().to(upload::upload_post_image))
            .route("/{post_id}/comments", web::post().to(comments::create_comment))
            .route("/{post_id}/comments", web::get().to(comments::list_comments)),
    )
    .route("/comments/{comment_id}", web::delete().to(comments::delete_comment))
    .route("/tags", web::get().to(tags::list_tags))
    .route("/tags/{tag_name}/posts", web::get().to(tags::posts_by_tag))
    .route("/stats", web::get().to(stats::get_stats));
}
