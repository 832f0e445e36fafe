use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::post::Post;

/// Aggregate statistics over the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_views: u64,
    pub total_comments: usize,
    pub popular_tags: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

impl Stats {
    pub const POPULAR_TAG_LIMIT: usize = 5;

    /// Compute statistics from the current posts and comment count.
    pub fn compute<'a>(posts: impl IntoIterator<Item = &'a Post>, total_comments: usize) -> Self {
        let mut total_posts = 0;
        let mut published_posts = 0;
        let mut total_views = 0;
        let mut tag_counts: HashMap<String, usize> = HashMap::new();

        for post in posts {
            total_posts += 1;
            if post.published {
                published_posts += 1;
            }
            total_views += post.views;
            // Counted as submitted: "Go" and "go" are separate entries.
            for tag in &post.tags {
                *tag_counts.entry(tag.clone()).or_default() += 1;
            }
        }

        Self {
            total_posts,
            published_posts,
            draft_posts: total_posts - published_posts,
            total_views,
            total_comments,
            popular_tags: top_tags(tag_counts, Self::POPULAR_TAG_LIMIT),
        }
    }
}

/// Highest counts first, ties in ascending tag order.
fn top_tags(counts: HashMap<String, usize>, limit: usize) -> Vec<TagCount> {
    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    ranked.truncate(limit);
    ranked
}
