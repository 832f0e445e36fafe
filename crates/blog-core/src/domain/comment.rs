use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - attached to exactly one post, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: u64, post_id: u64, input: NewComment, now: DateTime<Utc>) -> Self {
        Self {
            id,
            post_id,
            content: input.content,
            author: input.author,
            created_at: now,
        }
    }
}

/// Input for creating a comment.
#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub content: String,
    pub author: String,
}
