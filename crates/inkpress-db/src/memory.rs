//! In-memory stores.
//!
//! Used by the test suite and by `STORE_BACKEND=memory`. Each store guards
//! its collection with a `tokio::sync::RwLock` and counts every call so tests
//! can assert that a request never reached the store.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use inkpress_core::{PostFilters, SortDirection, SortField, SortSpec, StoreError};
use inkpress_models::{Category, NewCategory, NewPost, Post, PostPatch};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{CategoryStore, PostStore};

fn matches_filters(post: &Post, filters: &PostFilters) -> bool {
    filters.category.as_ref().is_none_or(|c| &post.category == c)
        && filters.author.as_ref().is_none_or(|a| &post.author == a)
        && filters.tag.as_ref().is_none_or(|t| post.has_tag(t))
}

fn compare_posts(a: &Post, b: &Post, sort: SortSpec) -> Ordering {
    let by_field = match sort.field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Author => a.author.cmp(&b.author),
        SortField::Category => a.category.cmp(&b.category),
    };
    let ordering = by_field.then_with(|| a.id.cmp(&b.id));

    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[derive(Default)]
struct PostCollection {
    posts: Vec<Post>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl PostCollection {
    /// Wall-clock time, bumped so successive writes never share a timestamp.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

#[derive(Default)]
pub struct MemoryPostStore {
    inner: RwLock<PostCollection>,
    calls: AtomicUsize,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the store with existing posts, kept as given.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let last_timestamp = posts.iter().map(|p| p.created_at.max(p.updated_at)).max();
        Self {
            inner: RwLock::new(PostCollection {
                posts,
                last_timestamp,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of trait calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find(
        &self,
        filters: &PostFilters,
        sort: SortSpec,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Post>, StoreError> {
        self.record_call();
        let inner = self.inner.read().await;

        let mut matching: Vec<&Post> = inner
            .posts
            .iter()
            .filter(|post| matches_filters(post, filters))
            .collect();
        matching.sort_by(|a, b| compare_posts(a, b, sort));

        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filters: &PostFilters) -> Result<i64, StoreError> {
        self.record_call();
        let inner = self.inner.read().await;
        let total = inner
            .posts
            .iter()
            .filter(|post| matches_filters(post, filters))
            .count();
        Ok(total as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        self.record_call();
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        self.record_call();
        let mut inner = self.inner.write().await;
        let now = inner.next_timestamp();

        let post = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            author: post.author,
            category: post.category,
            tags: post.tags,
            is_published: post.is_published,
            created_at: now,
            updated_at: now,
        };
        inner.posts.push(post.clone());

        Ok(post)
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        self.record_call();
        let mut inner = self.inner.write().await;
        let now = inner.next_timestamp();

        let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        patch.apply(post);
        post.updated_at = now;

        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.record_call();
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != id);
        Ok(inner.posts.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryCategoryStore {
    categories: RwLock<Vec<Category>>,
    calls: AtomicUsize,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        self.record_call();
        let mut categories = self.categories.read().await.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        self.record_call();
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: NewCategory) -> Result<Category, StoreError> {
        self.record_call();
        let mut categories = self.categories.write().await;

        if categories
            .iter()
            .any(|c| c.name == category.name || c.slug == category.slug)
        {
            return Err(StoreError::Conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: category.name,
            slug: category.slug,
            description: category.description,
            created_at: now,
            updated_at: now,
        };
        categories.push(category.clone());

        Ok(category)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.record_call();
        let mut categories = self.categories.write().await;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() < before)
    }
}
