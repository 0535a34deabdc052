//! SeaORM entities mirroring the `posts` and `code_snippets` tables.

pub mod code_snippet;
pub mod post;
