// Database module - SQLite stand-in for the spreadsheet service

use std::str::FromStr;

use color_eyre::{eyre::ensure, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub mod models;
pub use models::*;

mod import;
mod migrations;
mod sheets;

/// Raised when a document, collection or worksheet does not exist or is not
/// shared with the service. The spreadsheet service does not tell the two apart.
#[derive(Debug, thiserror::Error)]
#[error("{0} is not accessible")]
pub struct Inaccessible(pub String);

#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
        ensure!(one == 1, "connection check failed");

        migrations::run(&pool).await?;

        tracing::info!("database connection has been verified");

        Ok(Self { pool })
    }

    pub async fn migration_applied(&self, version: &str) -> Result<bool> {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?)")
                .bind(version)
                .fetch_one(&self.pool)
                .await?;

        Ok(applied)
    }
}
