//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

/// Body of `PUT /posts/{id}`. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// Query string of `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorQuery {
    pub author: String,
}

impl AuthorQuery {
    pub const MIN_LENGTH: usize = 3;
}

/// Query string of `GET /posts`. Missing paging fields fall back to the
/// server's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub tag: Option<String>,
    pub published: Option<bool>,
    pub search: Option<String>,
}

/// Body of `POST /posts/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub author: String,
}

/// Response of a successful image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub message: String,
    pub image_url: String,
}
