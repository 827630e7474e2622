mod migrations;

use anyhow::Context;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use std::path::Path;

use crate::auth::password;
use crate::error::AppResult;

pub type DbPool = Pool<SqliteConnectionManager>;

pub const IN_MEMORY: &str = ":memory:";

const PRAGMAS: &str = "PRAGMA busy_timeout = 5000;
                       PRAGMA journal_mode = WAL;
                       PRAGMA foreign_keys = ON;";

/// Open the pool and run migrations. `:memory:` gives a single-connection pool
/// so every checkout sees the same database.
pub fn create_pool(sqlite_path: &str) -> anyhow::Result<DbPool> {
    let pool = if sqlite_path == IN_MEMORY {
        let manager = SqliteConnectionManager::memory()
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)
            .context("Failed to create in-memory database pool")?
    } else {
        if let Some(parent) = Path::new(sqlite_path).parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let manager = SqliteConnectionManager::file(sqlite_path)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
            )
            .with_init(|conn| conn.execute_batch(PRAGMAS));

        Pool::builder()
            .max_size(10)
            .build(manager)
            .context("Failed to create database pool")?
    };

    let conn = pool.get().context("Failed to get connection for migrations")?;
    migrations::run(&conn).context("Failed to run migrations")?;

    Ok(pool)
}

/// Create the administrator account if no user owns `email` yet.
/// Returns whether an account was created.
pub fn seed_admin(pool: &DbPool, email: &str, password: &str) -> AppResult<bool> {
    let conn = pool.get()?;
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
        rusqlite::params![email],
        |row| row.get(0),
    )?;
    if exists {
        return Ok(false);
    }

    let password_hash = password::hash_password(password)?;
    let now = yoga_model::time::now();
    conn.execute(
        "INSERT INTO users (email, first_name, last_name, password_hash, admin, created_at, updated_at)
         VALUES (?1, 'Admin', 'Admin', ?2, 1, ?3, ?3)",
        rusqlite::params![email, password_hash, now],
    )?;
    Ok(true)
}
