use std::env;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use dotenvy::dotenv;
use tokio::sync::Mutex;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Shared handle to the SQLite connection, injected into handlers via
/// [`crate::handlers::AppState`].
pub type Db = Arc<Mutex<SqliteConnection>>;

pub fn establish_connection() -> SqliteConnection {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "app.db".to_string());
    let mut conn = SqliteConnection::establish(&database_url)
        .unwrap_or_else(|err| panic!("Error connecting to {database_url}: {err}"));
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .expect("Failed to enable foreign key enforcement");
    conn
}
