//! Persistence layer.
//!
//! Each concern has its own store trait ([`ChatStore`], [`RecipeStore`],
//! [`ExperimentStore`]); [`SqliteStore`] implements all of them.  To swap to
//! another database, implement the traits for a new type and change the
//! concrete type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.
//!
//! The `sqlx::query` (runtime-verified) form is used so that no
//! `DATABASE_URL` environment variable is needed at compile time.

pub mod chat;
pub mod dao;
pub mod experiment;
pub mod recipe;

pub use dao::{ChatMessage, ExperimentRecord};

pub use chat::ChatStore;
pub use experiment::ExperimentStore;
pub use recipe::RecipeStore;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// SQLite-backed store for chat turns, recipes and experiments.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://mealbot.db"`
    /// or `"sqlite::memory:"` for tests.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own empty
        // database, so those pools are pinned to one long-lived connection.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        let pool = pool_options.connect_with(options).await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Round-trip a trivial query to prove the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection.  Later queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Parse an RFC 3339 column, falling back to "now" with a warning.
pub(crate) fn parse_timestamp(raw: &str, column: &'static str) -> chrono::DateTime<chrono::Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, column, error = %e, "failed to parse timestamp; using now");
        chrono::Utc::now()
    })
}

#[cfg(test)]
pub(crate) async fn memory_store() -> SqliteStore {
    SqliteStore::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}
