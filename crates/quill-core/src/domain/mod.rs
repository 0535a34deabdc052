//! Domain entities and their create/patch input types.

mod post;
mod snippet;

pub use post::{NewPost, Post, PostFilter, PostPatch, PostWithSnippets};
pub use snippet::{CodeSnippet, NewSnippet, SnippetDraft, SnippetPatch};
