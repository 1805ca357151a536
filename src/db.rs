//! Database connection management
//!
//! A single process-global connection pool, initialized once at startup.

use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to the database and install the global pool.
/// Panics on connection failure; the application cannot run without it.
pub async fn init_db(url: String) {
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(16)
        .connect_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300));

    let pool = Database::connect(options)
        .await
        .expect("Failed to connect to the database.");

    DB_POOL.set(pool).expect("init_db() called more than once.");
}

pub fn get_db_pool() -> &'static DatabaseConnection {
    DB_POOL
        .get()
        .expect("Database pool accessed before initialization.")
}
