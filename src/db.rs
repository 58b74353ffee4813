use sqlx::{postgres::PgPoolOptions, PgPool};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::OnceCell;

const CREATE_LEADS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS leads (
    id UUID PRIMARY KEY,
    email TEXT NOT NULL,
    ip_address TEXT NOT NULL DEFAULT 'unknown',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_LEADS_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS leads_email_lower_key ON leads (lower(email))";

/// A connection created on first use and shared for the life of the process.
///
/// Concurrent first callers all await the same initialization future, so
/// exactly one connection is ever stored. A failed attempt leaves the slot
/// empty and the next caller tries again.
pub struct LazyConnection<T> {
    cell: OnceCell<T>,
    attempts: AtomicUsize,
}

impl<T> LazyConnection<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Returns the shared connection, running `connect` only if none exists yet.
    pub async fn get_or_connect<F, Fut, E>(&self, connect: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell
            .get_or_try_init(|| {
                self.attempts.fetch_add(1, Ordering::SeqCst);
                connect()
            })
            .await
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Number of times `connect` has been invoked.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl<T> Default for LazyConnection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Postgres pool owned by the composition root and injected into the store.
pub struct Database {
    database_url: String,
    max_connections: u32,
    pool: LazyConnection<PgPool>,
}

impl Database {
    /// Creates the handle without touching the network.
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            pool: LazyConnection::new(),
        }
    }

    /// The shared pool, created and migrated on first call.
    pub async fn pool(&self) -> Result<&PgPool, sqlx::Error> {
        self.pool
            .get_or_connect(|| async move {
                tracing::info!("Opening database connection pool");
                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .connect(&self.database_url)
                    .await?;

                sqlx::query(CREATE_LEADS_TABLE).execute(&pool).await?;
                sqlx::query(CREATE_LEADS_EMAIL_INDEX).execute(&pool).await?;

                tracing::info!("✓ Database connection pool established");
                Ok(pool)
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.pool.get().is_some()
    }
}
