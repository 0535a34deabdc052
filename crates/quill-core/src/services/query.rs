//! Read-side composition: a post together with its ordered snippets.

use std::sync::Arc;

use crate::domain::PostWithSnippets;
use crate::error::RepoError;
use crate::ports::{PostRepository, SnippetRepository};

/// Lookup key for the detail view.
#[derive(Debug, Clone)]
pub enum PostKey {
    Id(i32),
    Slug(String),
}

/// Answers "post with its snippets" for id- and slug-keyed lookups.
///
/// The two reads are sequential and untransacted: a snippet inserted between
/// them may or may not appear. Call volume is low and the domain tolerates
/// that staleness, so no stronger consistency is bought here.
pub struct PostQueryService {
    posts: Arc<dyn PostRepository>,
    snippets: Arc<dyn SnippetRepository>,
}

impl PostQueryService {
    pub fn new(posts: Arc<dyn PostRepository>, snippets: Arc<dyn SnippetRepository>) -> Self {
        Self { posts, snippets }
    }

    /// Fetch a post by id or slug and attach its snippets, ordered by
    /// `order_index`. Returns `None` when the post does not exist.
    pub async fn get(&self, key: PostKey) -> Result<Option<PostWithSnippets>, RepoError> {
        let post = match &key {
            PostKey::Id(id) => self.posts.get_by_id(*id).await?,
            PostKey::Slug(slug) => self.posts.get_by_slug(slug).await?,
        };

        let Some(post) = post else {
            return Ok(None);
        };

        let code_snippets = self.snippets.list_by_post(post.id).await?;

        Ok(Some(PostWithSnippets {
            post,
            code_snippets,
        }))
    }
}
