//! PostgreSQL repository implementations.
//!
//! Both repositories share one connection pool behind an `Arc`; the pool
//! itself is never cloned.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};

use quill_core::domain::{
    CodeSnippet, NewPost, NewSnippet, Post, PostFilter, PostPatch, SnippetPatch,
};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, SnippetRepository};

use super::entity::code_snippet::{self, Entity as SnippetEntity};
use super::entity::post::{self, Entity as PostEntity, Tags};

/// PostgreSQL post repository.
pub struct PgPostRepository {
    db: Arc<DbConn>,
}

impl PgPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

/// PostgreSQL snippet repository.
pub struct PgSnippetRepository {
    db: Arc<DbConn>,
}

impl PgSnippetRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

/// Classify driver errors into the repository taxonomy. Unique and foreign
/// key violations surface as `Constraint`; connection problems as
/// `Connection`; everything else as `Query`.
fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match &err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
            _ => RepoError::Query(err.to_string()),
        },
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let published_at = input.published.then_some(now);

        let model = post::ActiveModel {
            title: Set(input.title),
            slug: Set(input.slug),
            excerpt: Set(input.excerpt),
            content: Set(input.content),
            published: Set(input.published),
            tags: Set(Tags(input.tags)),
            reading_time_minutes: Set(input.reading_time_minutes),
            created_at: Set(now),
            updated_at: Set(now),
            published_at: Set(published_at),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, slug = %model.slug, "post created");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find().order_by_desc(post::Column::CreatedAt);

        if let Some(published) = filter.published {
            query = query.filter(post::Column::Published.eq(published));
        }

        if let Some(tag) = &filter.tag {
            // JSONB containment: matches when the tags array holds this
            // exact string.
            let needle = serde_json::json!([tag]).to_string();
            query = query.filter(Expr::cust_with_values(r#""tags" @> ?::jsonb"#, [needle]));
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }

        let results = query.all(&*self.db).await.map_err(map_db_err)?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let results = PostEntity::find()
            .filter(post::Column::Published.eq(true))
            .order_by_desc(post::Column::PublishedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: post::ActiveModel = existing.into();

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(excerpt) = patch.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(published) = patch.published {
            active.published = Set(published);
            // Re-stamped on every publishing write, even when already
            // published; never cleared on un-publish. Historical behavior,
            // kept as-is.
            if published {
                active.published_at = Set(Some(Utc::now()));
            }
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(Tags(tags));
        }
        if let Some(reading_time_minutes) = patch.reading_time_minutes {
            active.reading_time_minutes = Set(reading_time_minutes);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl SnippetRepository for PgSnippetRepository {
    async fn create(&self, input: NewSnippet) -> Result<CodeSnippet, RepoError> {
        let model = code_snippet::ActiveModel {
            post_id: Set(input.post_id),
            title: Set(input.title),
            language: Set(input.language),
            code: Set(input.code),
            description: Set(input.description),
            order_index: Set(input.order_index),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, patch: SnippetPatch) -> Result<CodeSnippet, RepoError> {
        let existing = SnippetEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: code_snippet::ActiveModel = existing.into();

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(language) = patch.language {
            active.language = Set(language);
        }
        if let Some(code) = patch.code {
            active.code = Set(code);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(order_index) = patch.order_index {
            active.order_index = Set(order_index);
        }

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = SnippetEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<CodeSnippet>, RepoError> {
        let results = SnippetEntity::find()
            .filter(code_snippet::Column::PostId.eq(post_id))
            .order_by_asc(code_snippet::Column::OrderIndex)
            .order_by_asc(code_snippet::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}
