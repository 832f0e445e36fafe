use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, Page, PageRequest, Post, PostFilter, PostUpdate, Stats};
use crate::error::DomainError;

/// Content store - owns posts, comments and the tag registry.
///
/// Every method is atomic with respect to the store's own state.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create a post and register its tags (lowercased).
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;

    /// Point the post at a new image reference. The previous resource is left alone.
    async fn set_post_image(&self, post_id: u64, image_url: String) -> Result<Post, DomainError>;

    /// Existence check for internal bookkeeping. Never counts as a view.
    async fn post_exists(&self, post_id: u64) -> bool;

    /// Fetch a post for a reader. Each successful call adds one view.
    async fn get_post(&self, post_id: u64) -> Result<Post, DomainError>;

    /// Filtered listing, newest first (ties: higher id first).
    async fn list_posts(&self, filter: &PostFilter, page: PageRequest) -> Page<Post>;

    /// Overwrite only the supplied fields.
    async fn update_post(&self, post_id: u64, update: PostUpdate) -> Result<Post, DomainError>;

    /// Delete a post, its comments, and (best effort) its image.
    async fn delete_post(&self, post_id: u64) -> Result<(), DomainError>;

    async fn create_comment(&self, post_id: u64, input: NewComment) -> Result<Comment, DomainError>;

    /// Comments of a post, newest first.
    async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, DomainError>;

    async fn delete_comment(&self, comment_id: u64) -> Result<(), DomainError>;

    /// Every tag ever registered, ascending.
    async fn list_tags(&self) -> Vec<String>;

    /// All posts carrying the tag, newest first. Empty when none do.
    async fn posts_by_tag(&self, tag: &str) -> Vec<Post>;

    async fn stats(&self) -> Stats;
}
