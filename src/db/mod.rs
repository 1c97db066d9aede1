pub mod models;
pub mod queries;
pub mod repository;

use sqlx::{Pool, Sqlite, SqlitePool, sqlite::SqliteConnectOptions};
use anyhow::Result;
use std::str::FromStr;

pub async fn init_pool(database_url: &str) -> Result<Pool<Sqlite>> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    Ok(pool)
}
