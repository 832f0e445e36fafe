//! Domain entities - the core business objects.

mod comment;
mod page;
mod post;
mod stats;

pub use comment::{Comment, NewComment};
pub use page::{Page, PageRequest};
pub use post::{NewPost, Post, PostFilter, PostUpdate, normalize_tag};
pub use stats::{Stats, TagCount};
