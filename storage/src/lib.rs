//! Storage crate: per-user record persistence behind the [`UserStore`] trait.
//!
//! ## Modules
//!
//! - `error` – Storage error types
//! - `models` – `UserRow`, the `users` table row and its conversion to `UserRecord`
//! - `user_store` – `UserStore` trait (the store boundary used by matchmaking)
//! - `sqlite_user_store` – `SqliteUserStore` (SQLite via sqlx)
//! - `inmemory_user_store` – `InMemoryUserStore` (tests, ephemeral runs)
//! - `sqlite_pool` – `SqlitePoolManager`

mod error;
mod inmemory_user_store;
mod models;
mod sqlite_pool;
mod sqlite_user_store;
mod user_store;

pub use error::StorageError;
pub use inmemory_user_store::InMemoryUserStore;
pub use models::UserRow;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_user_store::SqliteUserStore;
pub use user_store::UserStore;
