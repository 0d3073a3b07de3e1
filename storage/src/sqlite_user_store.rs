//! SQLite-backed [`UserStore`].
//!
//! Uses SqlitePoolManager and [`UserRow`]. One row per user in the `users` table.

use anon_core::{UserId, UserRecord};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::UserRow;
use crate::sqlite_pool::SqlitePoolManager;
use crate::user_store::UserStore;

const SELECT_COLUMNS: &str = "SELECT user_id, is_active, current_chat, last_activity, country, language, gender, match_wait_start FROM users";

const UPSERT: &str = r#"
    INSERT OR REPLACE INTO users
        (user_id, is_active, current_chat, last_activity, country, language, gender, match_wait_start)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

#[derive(Clone)]
pub struct SqliteUserStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteUserStore {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating users table if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                is_active INTEGER DEFAULT 0,
                current_chat INTEGER,
                last_activity TEXT,
                country TEXT,
                language TEXT,
                gender TEXT,
                match_wait_start TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Tables created by the earlier deployment lack match_wait_start.
        let (has_wait_column,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM pragma_table_info('users') WHERE name = 'match_wait_start'",
        )
        .fetch_one(pool)
        .await?;
        if has_wait_column == 0 {
            info!("Adding match_wait_start column to users");
            sqlx::query("ALTER TABLE users ADD COLUMN match_wait_start TEXT")
                .execute(pool)
                .await?;
        }

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_is_active ON users(is_active)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_current_chat ON users(current_chat)")
            .execute(pool)
            .await?;

        info!("Users table ready");
        Ok(())
    }

    fn bind_row<'q>(
        query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
        row: UserRow,
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        query
            .bind(row.user_id)
            .bind(row.is_active)
            .bind(row.current_chat)
            .bind(row.last_activity)
            .bind(row.country)
            .bind(row.language)
            .bind(row.gender)
            .bind(row.match_wait_start)
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get(&self, user_id: UserId) -> Result<UserRecord, StorageError> {
        let pool = self.pool_manager.pool();

        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE user_id = ?", SELECT_COLUMNS))
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(row
            .map(UserRow::into_record)
            .unwrap_or_else(|| UserRecord::new(user_id)))
    }

    async fn put(&self, record: &UserRecord) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        Self::bind_row(sqlx::query(UPSERT), UserRow::from_record(record))
            .execute(pool)
            .await?;

        debug!(user_id = record.user_id, "Saved user record");
        Ok(())
    }

    async fn put_many(&self, records: &[UserRecord]) -> Result<(), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        for record in records {
            Self::bind_row(sqlx::query(UPSERT), UserRow::from_record(record))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(count = records.len(), "Saved user records in one transaction");
        Ok(())
    }

    async fn find_candidates(&self, exclude: UserId) -> Result<Vec<UserRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} WHERE is_active = 1 AND (current_chat IS NULL OR current_chat = 0) AND user_id != ?",
            SELECT_COLUMNS
        ))
        .bind(exclude)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_record).collect())
    }

    async fn find_paired(&self) -> Result<Vec<UserRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} WHERE current_chat IS NOT NULL AND current_chat != 0",
            SELECT_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_record).collect())
    }

    async fn count_active(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_active = 1")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
