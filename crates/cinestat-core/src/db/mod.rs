//! Database module - SQLx with SQLite
//!
//! Film documents are stored as JSON text, one per row, and queried with
//! SQLite's JSON functions.

mod films;

use crate::error::{Error, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::PathBuf;

/// Environment variable overriding the database location
pub const DB_PATH_ENV: &str = "CINESTAT_DB_PATH";

/// Database state
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Create a new database connection with default path
    pub async fn new() -> Result<Self> {
        let db_path = get_db_path()?;
        Self::open(db_path).await
    }

    /// Create a new database connection with a specific path
    pub async fn open(db_path: PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        log::info!("Connecting to database: {}", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Release pooled connections
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<()> {
        log::info!("Running database migrations...");

        // One JSON document per film; attributes are not typed by the schema
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS films (
                id TEXT PRIMARY KEY,
                doc TEXT NOT NULL CHECK (json_valid(doc)),
                imported_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Year filters are the most common predicate
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_films_year ON films(json_extract(doc, '$.year'))",
        )
        .execute(&self.pool)
        .await?;

        log::info!("Database migrations completed");
        Ok(())
    }
}

/// Where the database path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbPathSource {
    Environment,
    Default,
}

impl DbPathSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbPathSource::Environment => "env",
            DbPathSource::Default => "default",
        }
    }
}

/// Get database file path
/// Priority: CINESTAT_DB_PATH env var > default app data directory
pub fn get_db_path() -> Result<PathBuf> {
    resolve_db_path().map(|(path, _)| path)
}

/// Get database file path along with where it was resolved from
pub fn resolve_db_path() -> Result<(PathBuf, DbPathSource)> {
    // Check for environment variable override
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok((expand_path(&path), DbPathSource::Environment));
        }
    }

    // Default: use app data directory
    let dirs = directories::ProjectDirs::from("com", "cinestat", "Cinestat")
        .ok_or_else(|| Error::config("Could not determine project directories"))?;

    Ok((dirs.data_dir().join("cinestat.db"), DbPathSource::Default))
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests don't run in parallel
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_get_db_path_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        // Without env var, should return default path
        std::env::remove_var(DB_PATH_ENV);
        let (path, source) = resolve_db_path().unwrap();
        assert!(path.to_string_lossy().contains("cinestat.db"));
        assert_eq!(source, DbPathSource::Default);
    }

    #[test]
    fn test_get_db_path_env_override() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let test_path = "/tmp/test_cinestat.db";
        std::env::set_var(DB_PATH_ENV, test_path);
        let (path, source) = resolve_db_path().unwrap();
        assert_eq!(path.to_string_lossy(), test_path);
        assert_eq!(source, DbPathSource::Environment);
        std::env::remove_var(DB_PATH_ENV);
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/films.db");
        assert!(expanded.to_string_lossy().ends_with("films.db"));
        assert_eq!(expand_path("/data/films.db"), PathBuf::from("/data/films.db"));
    }

    #[tokio::test]
    async fn test_open_creates_films_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::open(dir.path().join("nested").join("test.db"))
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'films'",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
