use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post entity - represents a blog post.
///
/// Tags are kept exactly as submitted. Every comparison against them goes
/// through [`normalize_tag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub author: String,
    pub image_url: Option<String>,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a post from validated input. Views start at zero and both
    /// timestamps are set to `now`.
    pub fn new(id: u64, input: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            tags: input.tags,
            published: input.published,
            author: input.author,
            image_url: None,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        self.tags.iter().any(|t| normalize_tag(t) == wanted)
    }

    /// Overwrite the supplied fields and refresh `updated_at`.
    ///
    /// The update must already be validated.
    pub fn apply(&mut self, update: PostUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(published) = update.published {
            self.published = published;
        }
        self.updated_at = now;
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub author: String,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title)
    }
}

/// Partial update: `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

impl PostUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

/// Conjunctive filter for post listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub tag: Option<String>,
    pub published: Option<bool>,
    pub search: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(tag) = &self.tag {
            if !post.has_tag(tag) {
                return false;
            }
        }

        if let Some(published) = self.published {
            if post.published != published {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !post.title.to_lowercase().contains(&needle)
                && !post.content.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}

/// The form a tag takes in the registry and in every comparison.
pub fn normalize_tag(tag: &str) -> String {
    tag.to_lowercase()
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}
