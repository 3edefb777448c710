//! SQLite persistence layer for Valentine invitations.
//!
//! This crate provides async database operations for invitation records
//! using SQLx with SQLite, and an [`InvitationStore`] implementation on top.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, SqliteInvitationStore};
//! use invitation_core::{InvitationDraft, InvitationStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:valentine.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create an invitation
//!     let store = SqliteInvitationStore::new(db);
//!     let record = InvitationDraft::new("Sam", "Ana", "Be mine?").into_record(0)?;
//!     let id = store.create(&record).await?;
//!     println!("share ?invite={id}");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod invitation;
pub mod models;
mod store;

pub use error::{DatabaseError, Result};
pub use models::InvitationRow;
pub use store::SqliteInvitationStore;

pub use invitation_core::InvitationStore;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 8;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/valentine.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing, keep a single connection)
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
