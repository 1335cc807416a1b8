use crate::config::StoreConfig;
use crate::error::DaybookError;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::fs;

/// Connects to the configured database file, creating it and its schema if missing.
pub(crate) async fn connect(config: &StoreConfig) -> Result<SqlitePool, DaybookError> {
    if let Some(dir) = config.database_path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_url())
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            content_style TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '',
            mood TEXT NOT NULL DEFAULT '',
            priority INTEGER NOT NULL DEFAULT 0,
            weather TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_date ON notes(date)")
        .execute(&pool)
        .await?;

    tracing::info!(path = %config.database_path.display(), "note store ready");

    Ok(pool)
}
