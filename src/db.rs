use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::Path;

pub type DbPool = SqlitePool;

/// Initialize the database connection pool and run migrations. For the
/// embedding shell; the core's functions only ever receive `&SqlitePool`.
pub async fn initialize_db(db_path: &Path) -> Result<DbPool, Box<dyn std::error::Error>> {
  if let Some(parent) = db_path.parent() {
    fs::create_dir_all(parent)?;
  }
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  println!("Initializing database at: {}", db_path.display());

  // Create connection pool
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  // Run migrations
  sqlx::migrate!("./migrations").run(&pool).await?;

  println!("Database initialized successfully");

  Ok(pool)
}
