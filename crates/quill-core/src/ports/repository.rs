use async_trait::async_trait;

use crate::domain::{CodeSnippet, NewPost, NewSnippet, Post, PostFilter, PostPatch, SnippetPatch};
use crate::error::RepoError;

/// Post repository - typed CRUD over the posts table.
///
/// Implementations own a store handle injected at construction; every call is
/// an independent round-trip with no application-level retry or timeout.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post. Stamps `created_at`/`updated_at` to now and sets
    /// `published_at` to now iff `published` is true. A duplicate slug fails
    /// with [`RepoError::Constraint`].
    async fn create(&self, input: NewPost) -> Result<Post, RepoError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// List posts matching the filter, newest first (`created_at` descending).
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// List published posts ordered by `published_at` descending.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Apply a partial update. Only supplied fields change; `updated_at` is
    /// always refreshed. A patch carrying `published = Some(true)` re-stamps
    /// `published_at` even when the post was already published, and
    /// `published = Some(false)` leaves `published_at` untouched - both are
    /// deliberate carry-overs from the system this one replaces.
    /// Fails with [`RepoError::NotFound`] when `id` matches nothing.
    async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, RepoError>;

    /// Delete a post and, via the store cascade, all its snippets. Returns
    /// whether a row was removed; a missing id is not an error.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}

/// Snippet repository - CRUD over the code_snippets table, scoped to a
/// parent post by foreign key.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Insert a snippet. A `post_id` referencing no post fails with
    /// [`RepoError::Constraint`].
    async fn create(&self, input: NewSnippet) -> Result<CodeSnippet, RepoError>;

    /// Apply a partial update. Fails with [`RepoError::NotFound`] when `id`
    /// matches nothing.
    async fn update(&self, id: i32, patch: SnippetPatch) -> Result<CodeSnippet, RepoError>;

    /// Delete a snippet by id. Returns whether a row was removed; a missing
    /// id is not an error.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;

    /// Snippets of a post, ordered by `order_index` ascending (id as the
    /// stable tiebreak).
    async fn list_by_post(&self, post_id: i32) -> Result<Vec<CodeSnippet>, RepoError>;
}
