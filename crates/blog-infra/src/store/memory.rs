//! In-memory content store.
//!
//! All state sits behind one async RwLock, so every operation (id assignment
//! plus insert, view increment, cascade delete) is a single critical section.
//! Note: Data is lost on process restart.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::DomainError;
use blog_core::domain::{
    Comment, NewComment, NewPost, Page, PageRequest, Post, PostFilter, PostUpdate, Stats,
    normalize_tag,
};
use blog_core::ports::{ContentStore, FileStorage};

#[derive(Default)]
struct StoreState {
    posts: HashMap<u64, Post>,
    comments: HashMap<u64, Comment>,
    tags: BTreeSet<String>,
    post_counter: u64,
    comment_counter: u64,
}

impl StoreState {
    fn register_tags(&mut self, tags: &[String]) {
        for tag in tags {
            self.tags.insert(normalize_tag(tag));
        }
    }

    /// Posts matching `keep`, newest first.
    fn sorted_posts(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().filter(|p| keep(p)).cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

/// Content store holding posts, comments and the tag registry in memory.
pub struct InMemoryContentStore {
    state: RwLock<StoreState>,
    files: Arc<dyn FileStorage>,
}

impl InMemoryContentStore {
    /// `files` receives image removals when posts are deleted.
    pub fn new(files: Arc<dyn FileStorage>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            files,
        }
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        input.validate()?;

        let mut state = self.state.write().await;
        state.post_counter += 1;
        let id = state.post_counter;

        state.register_tags(&input.tags);
        let post = Post::new(id, input, Utc::now());
        state.posts.insert(id, post.clone());

        tracing::debug!(post_id = id, "Post created");
        Ok(post)
    }

    async fn set_post_image(&self, post_id: u64, image_url: String) -> Result<Post, DomainError> {
        let mut state = self.state.write().await;
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        post.image_url = Some(image_url);
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn post_exists(&self, post_id: u64) -> bool {
        self.state.read().await.posts.contains_key(&post_id)
    }

    async fn get_post(&self, post_id: u64) -> Result<Post, DomainError> {
        // Write lock: reading a post counts a view.
        let mut state = self.state.write().await;
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        post.views += 1;
        Ok(post.clone())
    }

    async fn list_posts(&self, filter: &PostFilter, page: PageRequest) -> Page<Post> {
        let state = self.state.read().await;
        Page::paginate(state.sorted_posts(|p| filter.matches(p)), page)
    }

    async fn update_post(&self, post_id: u64, update: PostUpdate) -> Result<Post, DomainError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&post_id) {
            return Err(DomainError::post_not_found(post_id));
        }
        update.validate()?;

        if let Some(tags) = &update.tags {
            state.register_tags(tags);
        }

        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        post.apply(update, Utc::now());
        Ok(post.clone())
    }

    async fn delete_post(&self, post_id: u64) -> Result<(), DomainError> {
        let removed = {
            let mut state = self.state.write().await;
            let post = state
                .posts
                .remove(&post_id)
                .ok_or_else(|| DomainError::post_not_found(post_id))?;

            let before = state.comments.len();
            state.comments.retain(|_, c| c.post_id != post_id);
            tracing::debug!(
                post_id,
                comments_removed = before - state.comments.len(),
                "Post deleted"
            );
            post
        };

        if let Some(image_url) = removed.image_url {
            if let Err(e) = self.files.remove(&image_url).await {
                tracing::warn!(post_id, image_url = %image_url, "Failed to remove post image: {}", e);
            }
        }

        Ok(())
    }

    async fn create_comment(&self, post_id: u64, input: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&post_id) {
            return Err(DomainError::post_not_found(post_id));
        }

        state.comment_counter += 1;
        let id = state.comment_counter;
        let comment = Comment::new(id, post_id, input, Utc::now());
        state.comments.insert(id, comment.clone());

        tracing::debug!(post_id, comment_id = id, "Comment created");
        Ok(comment)
    }

    async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, DomainError> {
        let state = self.state.read().await;
        if !state.posts.contains_key(&post_id) {
            return Err(DomainError::post_not_found(post_id));
        }

        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn delete_comment(&self, comment_id: u64) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state
            .comments
            .remove(&comment_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::comment_not_found(comment_id))
    }

    async fn list_tags(&self) -> Vec<String> {
        // BTreeSet iterates in ascending order.
        self.state.read().await.tags.iter().cloned().collect()
    }

    async fn posts_by_tag(&self, tag: &str) -> Vec<Post> {
        self.state.read().await.sorted_posts(|p| p.has_tag(tag))
    }

    async fn stats(&self) -> Stats {
        let state = self.state.read().await;
        Stats::compute(state.posts.values(), state.comments.len())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blog_core::ports::{StorageError, StoredFile};

    use super::*;
    use crate::storage::InMemoryFileStorage;

    fn store() -> InMemoryContentStore {
        InMemoryContentStore::new(Arc::new(InMemoryFileStorage::new()))
    }

    fn new_post(title: &str, tags: &[&str], published: bool) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("{title} content"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            published,
            author: "alice".to_string(),
        }
    }

    fn comment(text: &str) -> NewComment {
        NewComment {
            content: text.to_string(),
            author: "bob".to_string(),
        }
    }

    /// Storage whose removals always fail.
    struct BrokenStorage;

    #[async_trait]
    impl FileStorage for BrokenStorage {
        async fn store(
            &self,
            _file_name: Option<&str>,
            _content_type: &str,
            _data: &[u8],
        ) -> Result<StoredFile, StorageError> {
            Err(StorageError::Io("read-only".to_string()))
        }

        async fn remove(&self, _reference: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("permission denied".to_string()))
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = store();
        let first = store.create_post(new_post("One", &[], false)).await.unwrap();
        let second = store.create_post(new_post("Two", &[], false)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.views, 0);
        assert_eq!(first.image_url, None);
        assert_eq!(first.author, "alice");
    }

    #[tokio::test]
    async fn test_blank_title_leaves_state_unchanged() {
        let store = store();
        let err = store
            .create_post(new_post("   ", &["Ignored"], true))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(store.list_tags().await.is_empty());
        assert_eq!(store.stats().await.total_posts, 0);

        // No id was consumed by the failed attempt.
        let post = store.create_post(new_post("Real", &[], false)).await.unwrap();
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn test_tags_case_folded_and_deduplicated() {
        let store = store();
        let post = store
            .create_post(new_post("Hello", &["Go", "go"], false))
            .await
            .unwrap();

        assert_eq!(post.tags, vec!["Go".to_string(), "go".to_string()]);
        assert_eq!(store.list_tags().await, vec!["go".to_string()]);
    }

    #[tokio::test]
    async fn test_get_post_counts_each_read() {
        let store = store();
        let post = store.create_post(new_post("Viewed", &[], true)).await.unwrap();

        for n in 1..=5 {
            let read = store.get_post(post.id).await.unwrap();
            assert_eq!(read.views, n);
            assert_eq!(read.updated_at, post.updated_at);
        }
        assert_eq!(store.stats().await.total_views, 5);
    }

    #[tokio::test]
    async fn test_internal_reads_do_not_count_views() {
        let store = store();
        let post = store.create_post(new_post("Quiet", &["x"], true)).await.unwrap();

        assert!(store.post_exists(post.id).await);
        store.list_posts(&PostFilter::default(), PageRequest::default()).await;
        store.posts_by_tag("x").await;
        store.stats().await;

        assert_eq!(store.get_post(post.id).await.unwrap().views, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_post() {
        let store = store();
        let err = store.get_post(42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 42, .. }));
        assert!(!store.post_exists(42).await);
    }

    #[tokio::test]
    async fn test_list_second_page_of_twelve() {
        let store = store();
        for i in 0..12 {
            store
                .create_post(new_post(&format!("Post {i}"), &[], true))
                .await
                .unwrap();
        }

        let page = store
            .list_posts(&PostFilter::default(), PageRequest::new(2, 10))
            .await;
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 2);
        // Newest first: page two holds the two oldest posts.
        let ids: Vec<u64> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let past = store
            .list_posts(&PostFilter::default(), PageRequest::new(3, 10))
            .await;
        assert!(past.items.is_empty());
        assert_eq!(past.total, 12);
        assert_eq!(past.total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_filters_combine() {
        let store = store();
        store
            .create_post(new_post("Rust tips", &["Rust"], true))
            .await
            .unwrap();
        store
            .create_post(new_post("Rust draft", &["rust"], false))
            .await
            .unwrap();
        store
            .create_post(new_post("Go tips", &["go"], true))
            .await
            .unwrap();

        let filter = PostFilter {
            tag: Some("RUST".to_string()),
            published: Some(true),
            search: None,
        };
        let page = store.list_posts(&filter, PageRequest::default()).await;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Rust tips");

        let search = PostFilter {
            search: Some("TIPS".to_string()),
            ..Default::default()
        };
        let titles: Vec<String> = store
            .list_posts(&search, PageRequest::default())
            .await
            .items
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Go tips".to_string(), "Rust tips".to_string()]);
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let store = store();
        let post = store
            .create_post(new_post("Hello", &["a"], false))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = store
            .update_post(
                post.id,
                PostUpdate {
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.published);
        assert_eq!(updated.title, "Hello");
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.tags, post.tags);
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.updated_at > post.updated_at);
    }

    #[tokio::test]
    async fn test_update_registers_new_tags() {
        let store = store();
        let post = store.create_post(new_post("Hello", &["a"], false)).await.unwrap();

        store
            .update_post(
                post.id,
                PostUpdate {
                    tags: Some(vec!["Zed".to_string(), "B".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            store.list_tags().await,
            vec!["a".to_string(), "b".to_string(), "zed".to_string()]
        );
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let store = store();
        let post = store.create_post(new_post("Hello", &[], false)).await.unwrap();

        let err = store
            .update_post(
                post.id,
                PostUpdate {
                    title: Some("  ".to_string()),
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let unchanged = store.get_post(post.id).await.unwrap();
        assert_eq!(unchanged.title, "Hello");
        assert!(!unchanged.published);
    }

    #[tokio::test]
    async fn test_update_unknown_post() {
        let store = store();
        let err = store
            .update_post(7, PostUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 7, .. }));
    }

    #[tokio::test]
    async fn test_set_image_overwrites_reference() {
        let store = store();
        let post = store.create_post(new_post("Cover", &[], false)).await.unwrap();

        store
            .set_post_image(post.id, "/uploads/a.png".to_string())
            .await
            .unwrap();
        let updated = store
            .set_post_image(post.id, "/uploads/b.png".to_string())
            .await
            .unwrap();

        assert_eq!(updated.image_url.as_deref(), Some("/uploads/b.png"));
        assert!(updated.updated_at >= post.updated_at);
        assert!(store.set_post_image(99, "x".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_comments_and_image() {
        let files = Arc::new(InMemoryFileStorage::new());
        let store = InMemoryContentStore::new(files.clone());

        let post = store.create_post(new_post("Doomed", &["tmp"], true)).await.unwrap();
        let other = store.create_post(new_post("Survivor", &[], true)).await.unwrap();
        let stored = files.store(Some("cover.png"), "image/png", b"png").await.unwrap();
        store
            .set_post_image(post.id, stored.reference.clone())
            .await
            .unwrap();

        let c1 = store.create_comment(post.id, comment("one")).await.unwrap();
        let c2 = store.create_comment(post.id, comment("two")).await.unwrap();
        let kept = store.create_comment(other.id, comment("keep")).await.unwrap();

        store.delete_post(post.id).await.unwrap();

        assert!(matches!(
            store.list_comments(post.id).await,
            Err(DomainError::NotFound { .. })
        ));
        for id in [c1.id, c2.id] {
            assert!(matches!(
                store.delete_comment(id).await,
                Err(DomainError::NotFound { .. })
            ));
        }
        assert_eq!(store.list_comments(other.id).await.unwrap(), vec![kept]);
        assert!(!files.contains(&stored.reference).await);
        assert_eq!(store.stats().await.total_comments, 1);

        // Ids are never reused.
        let next = store.create_post(new_post("Next", &[], false)).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn test_delete_survives_image_removal_failure() {
        let store = InMemoryContentStore::new(Arc::new(BrokenStorage));
        let post = store.create_post(new_post("Broken", &[], false)).await.unwrap();
        store
            .set_post_image(post.id, "/uploads/gone.png".to_string())
            .await
            .unwrap();
        store.create_comment(post.id, comment("hi")).await.unwrap();

        store.delete_post(post.id).await.unwrap();

        assert!(!store.post_exists(post.id).await);
        assert_eq!(store.stats().await.total_comments, 0);
        assert!(store.delete_post(post.id).await.is_err());
    }

    #[tokio::test]
    async fn test_tag_registry_never_shrinks() {
        let store = store();
        let post = store.create_post(new_post("Tagged", &["Keep"], false)).await.unwrap();
        store.delete_post(post.id).await.unwrap();

        assert_eq!(store.list_tags().await, vec!["keep".to_string()]);
        assert!(store.posts_by_tag("keep").await.is_empty());
        assert!(store.stats().await.popular_tags.is_empty());
    }

    #[tokio::test]
    async fn test_comments_newest_first() {
        let store = store();
        let post = store.create_post(new_post("Chatty", &[], true)).await.unwrap();
        for text in ["first", "second", "third"] {
            store.create_comment(post.id, comment(text)).await.unwrap();
        }

        let texts: Vec<String> = store
            .list_comments(post.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_comment_on_unknown_post() {
        let store = store();
        let err = store.create_comment(5, comment("orphan")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 5, .. }));
        assert!(store.delete_comment(1).await.is_err());
    }

    #[tokio::test]
    async fn test_posts_by_tag_ignores_case() {
        let store = store();
        store.create_post(new_post("A", &["Rust"], true)).await.unwrap();
        store.create_post(new_post("B", &["python"], true)).await.unwrap();
        store.create_post(new_post("C", &["RUST"], false)).await.unwrap();

        let titles: Vec<String> = store
            .posts_by_tag("rust")
            .await
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["C".to_string(), "A".to_string()]);
        assert!(store.posts_by_tag("haskell").await.is_empty());
    }

    #[tokio::test]
    async fn test_stats_invariants() {
        let store = store();
        let a = store.create_post(new_post("A", &["rust", "web"], true)).await.unwrap();
        let b = store.create_post(new_post("B", &["rust"], false)).await.unwrap();
        store.create_post(new_post("C", &[], false)).await.unwrap();
        store.get_post(a.id).await.unwrap();
        store.get_post(a.id).await.unwrap();
        store.get_post(b.id).await.unwrap();
        store.create_comment(b.id, comment("nice")).await.unwrap();

        let stats = store.stats().await;
        assert_eq!(stats.published_posts + stats.draft_posts, stats.total_posts);
        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.published_posts, 1);
        assert_eq!(stats.total_views, 3);
        assert_eq!(stats.total_comments, 1);
        assert_eq!(stats.popular_tags[0].tag, "rust");
        assert_eq!(stats.popular_tags[0].count, 2);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(store());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_post(new_post(&format!("P{i}"), &[], false))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<u64>>());
    }
}
