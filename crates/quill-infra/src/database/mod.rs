//! Database access: connection management plus the Postgres and in-memory
//! repository implementations.

mod connect;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres;

pub use connect::DatabaseConfig;
pub use memory::{InMemoryPostRepository, InMemorySnippetRepository, InMemoryStore};

#[cfg(feature = "postgres")]
pub use connect::connect;
#[cfg(feature = "postgres")]
pub use postgres::{PgPostRepository, PgSnippetRepository};

#[cfg(test)]
mod tests;
