mod product;
mod shared;
mod user;

pub use product::IProductRepo;
use product::{InMemoryProductRepo, SqliteProductRepo};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, SqliteUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub products: Arc<dyn IProductRepo>,
}

impl Repos {
    /// Opens (or creates) the SQLite database at `database_path` and runs the migrations.
    ///
    /// Every write is committed with `synchronous = FULL` so an acknowledged
    /// product is visible to the reminder recovery after a restart.
    pub async fn create_sqlite(database_path: &Path) -> anyhow::Result<Self> {
        if let Some(dir) = database_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self::create_sqlite_from_pool(pool))
    }

    pub fn create_sqlite_from_pool(pool: SqlitePool) -> Self {
        Self {
            users: Arc::new(SqliteUserRepo::new(pool.clone())),
            products: Arc::new(SqliteProductRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            products: Arc::new(InMemoryProductRepo::new()),
        }
    }
}

/// Both repository implementations, the SQLite one backed by a private in memory database
#[cfg(test)]
pub(crate) async fn create_test_repos() -> Vec<Repos> {
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("Valid sqlite url");
    // An in memory database lives as long as its connection, so keep exactly one around
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("To open in memory sqlite");
    sqlx::migrate!().run(&pool).await.expect("To run migrations");

    vec![Repos::create_inmemory(), Repos::create_sqlite_from_pool(pool)]
}
