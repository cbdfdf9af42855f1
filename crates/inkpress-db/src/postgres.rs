//! PostgreSQL-backed stores.
//!
//! Filters and paging values are always bound parameters. The only text
//! spliced into SQL is the sort column and direction, both of which come
//! from closed enums.

use async_trait::async_trait;
use inkpress_core::{PostFilters, SortSpec, StoreError};
use inkpress_models::{Category, NewCategory, NewPost, Post, PostPatch};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::store::{CategoryStore, PostStore};

const POST_COLUMNS: &str = "id, title, content, excerpt, featured_image, author, category, tags, \
     is_published, created_at, updated_at";

const CATEGORY_COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

/// Appends `WHERE` conditions for every present filter.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &PostFilters) {
    builder.push(" WHERE TRUE");

    if let Some(category) = &filters.category {
        builder.push(" AND category = ");
        builder.push_bind(category.clone());
    }

    if let Some(author) = &filters.author {
        builder.push(" AND author = ");
        builder.push_bind(author.clone());
    }

    if let Some(tag) = &filters.tag {
        builder.push(" AND tags @> ARRAY[");
        builder.push_bind(tag.clone());
        builder.push("]::TEXT[]");
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts many posts in one statement. Used by the seeder.
    pub async fn insert_batch(&self, posts: &[NewPost]) -> Result<u64, StoreError> {
        if posts.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO posts (id, title, content, excerpt, featured_image, author, category, \
             tags, is_published) ",
        );
        builder.push_values(posts, |mut row, post| {
            row.push_bind(Uuid::new_v4())
                .push_bind(post.title.clone())
                .push_bind(post.content.clone())
                .push_bind(post.excerpt.clone())
                .push_bind(post.featured_image.clone())
                .push_bind(post.author.clone())
                .push_bind(post.category.clone())
                .push_bind(post.tags.clone())
                .push_bind(post.is_published);
        });

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn find(
        &self,
        filters: &PostFilters,
        sort: SortSpec,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Post>, StoreError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        push_filters(&mut builder, filters);

        let direction = sort.direction.as_sql();
        builder.push(format!(
            " ORDER BY {} {direction}, id {direction}",
            sort.field.column()
        ));
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(skip);

        builder
            .build_query_as::<Post>()
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::backend)
    }

    async fn count(&self, filters: &PostFilters) -> Result<i64, StoreError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        push_filters(&mut builder, filters);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::backend)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (id, title, content, excerpt, featured_image, author, category, \
             tags, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(post.title)
        .bind(post.content)
        .bind(post.excerpt)
        .bind(post.featured_image)
        .bind(post.author)
        .bind(post.category)
        .bind(post.tags)
        .bind(post.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        // COALESCE keeps the stored value for every absent field.
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET \
                title = COALESCE($1, title), \
                content = COALESCE($2, content), \
                excerpt = COALESCE($3, excerpt), \
                featured_image = COALESCE($4, featured_image), \
                author = COALESCE($5, author), \
                category = COALESCE($6, category), \
                tags = COALESCE($7, tags), \
                is_published = COALESCE($8, is_published), \
                updated_at = NOW() \
             WHERE id = $9 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.excerpt)
        .bind(patch.featured_image)
        .bind(patch.author)
        .bind(patch.category)
        .bind(patch.tags)
        .bind(patch.is_published)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)
    }

    async fn insert(&self, category: NewCategory) -> Result<Category, StoreError> {
        let name = category.name.clone();

        sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (id, name, slug, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(category.name)
        .bind(category.slug)
        .bind(category.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict(format!("Category '{}' already exists", name))
            } else {
                StoreError::backend(e)
            }
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(result.rows_affected() > 0)
    }
}
