//! In-memory repository implementations.
//!
//! Used when no database is configured and by the test suite. They honor the
//! same contracts as the Postgres repositories: slug uniqueness, foreign key
//! enforcement, cascade delete, and ordering.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use quill_core::domain::{
    CodeSnippet, NewPost, NewSnippet, Post, PostFilter, PostPatch, SnippetPatch,
};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, SnippetRepository};

#[derive(Default)]
struct Tables {
    posts: HashMap<i32, Post>,
    snippets: HashMap<i32, CodeSnippet>,
    next_post_id: i32,
    next_snippet_id: i32,
}

/// Shared backing store for the in-memory repository pair. Both repositories
/// must hold the same store so post deletion can cascade into snippets.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

pub struct InMemorySnippetRepository {
    store: Arc<InMemoryStore>,
}

impl InMemorySnippetRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().unwrap();

        if tables.posts.values().any(|p| p.slug == input.slug) {
            return Err(RepoError::Constraint(format!(
                "duplicate slug: {}",
                input.slug
            )));
        }

        tables.next_post_id += 1;
        let now = Utc::now();
        let post = Post {
            id: tables.next_post_id,
            title: input.title,
            slug: input.slug,
            excerpt: input.excerpt,
            content: input.content,
            published: input.published,
            tags: input.tags,
            reading_time_minutes: input.reading_time_minutes,
            created_at: now,
            updated_at: now,
            published_at: input.published.then_some(now),
        };

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().unwrap();
        Ok(tables.posts.get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().unwrap();
        Ok(tables.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().unwrap();

        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| filter.published.is_none_or(|published| p.published == published))
            .filter(|p| {
                filter
                    .tag
                    .as_ref()
                    .is_none_or(|tag| p.tags.iter().any(|t| t == tag))
            })
            .cloned()
            .collect();

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = filter.offset.unwrap_or(0) as usize;
        let posts: Vec<Post> = posts.into_iter().skip(offset).collect();

        Ok(match filter.limit {
            Some(limit) => posts.into_iter().take(limit as usize).collect(),
            None => posts,
        })
    }

    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().unwrap();

        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.published)
            .cloned()
            .collect();

        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().unwrap();

        // Missing rows are NotFound even when the patch would also collide.
        if !tables.posts.contains_key(&id) {
            return Err(RepoError::NotFound);
        }

        if let Some(slug) = &patch.slug {
            if tables.posts.values().any(|p| p.id != id && &p.slug == slug) {
                return Err(RepoError::Constraint(format!("duplicate slug: {slug}")));
            }
        }

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(slug) = patch.slug {
            post.slug = slug;
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(published) = patch.published {
            post.published = published;
            if published {
                post.published_at = Some(Utc::now());
            }
        }
        if let Some(tags) = patch.tags {
            post.tags = tags;
        }
        if let Some(reading_time_minutes) = patch.reading_time_minutes {
            post.reading_time_minutes = reading_time_minutes;
        }
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut tables = self.store.tables.write().unwrap();

        let removed = tables.posts.remove(&id).is_some();
        if removed {
            // Cascade, as the FK constraint does in Postgres.
            tables.snippets.retain(|_, s| s.post_id != id);
        }

        Ok(removed)
    }
}

#[async_trait]
impl SnippetRepository for InMemorySnippetRepository {
    async fn create(&self, input: NewSnippet) -> Result<CodeSnippet, RepoError> {
        let mut tables = self.store.tables.write().unwrap();

        if !tables.posts.contains_key(&input.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                input.post_id
            )));
        }

        tables.next_snippet_id += 1;
        let snippet = CodeSnippet {
            id: tables.next_snippet_id,
            post_id: input.post_id,
            title: input.title,
            language: input.language,
            code: input.code,
            description: input.description,
            order_index: input.order_index,
            created_at: Utc::now(),
        };

        tables.snippets.insert(snippet.id, snippet.clone());
        Ok(snippet)
    }

    async fn update(&self, id: i32, patch: SnippetPatch) -> Result<CodeSnippet, RepoError> {
        let mut tables = self.store.tables.write().unwrap();
        let snippet = tables.snippets.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(title) = patch.title {
            snippet.title = title;
        }
        if let Some(language) = patch.language {
            snippet.language = language;
        }
        if let Some(code) = patch.code {
            snippet.code = code;
        }
        if let Some(description) = patch.description {
            snippet.description = description;
        }
        if let Some(order_index) = patch.order_index {
            snippet.order_index = order_index;
        }

        Ok(snippet.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut tables = self.store.tables.write().unwrap();
        Ok(tables.snippets.remove(&id).is_some())
    }

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<CodeSnippet>, RepoError> {
        let tables = self.store.tables.read().unwrap();

        let mut snippets: Vec<CodeSnippet> = tables
            .snippets
            .values()
            .filter(|s| s.post_id == post_id)
            .cloned()
            .collect();

        snippets.sort_by_key(|s| (s.order_index, s.id));
        Ok(snippets)
    }
}
