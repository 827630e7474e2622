use rusqlite::{Connection, OptionalExtension};
use yoga_model::SignupRequest;

use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::models::{UserRecord, USER_COLUMNS};

pub fn find_all(conn: &Connection) -> AppResult<Vec<UserRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
    let rows = stmt.query_map([], UserRecord::from_row)?;
    let users: Result<Vec<_>, _> = rows.collect();
    Ok(users?)
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<UserRecord>> {
    let user = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            rusqlite::params![id],
            UserRecord::from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn find_by_email(conn: &Connection, email: &str) -> AppResult<Option<UserRecord>> {
    let user = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            rusqlite::params![email],
            UserRecord::from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        rusqlite::params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Store a new non-admin account. A taken email is a bad request.
pub fn register(conn: &Connection, body: &SignupRequest) -> AppResult<i64> {
    let password_hash = password::hash_password(&body.password)?;
    let now = yoga_model::time::now();

    let result = conn.execute(
        "INSERT INTO users (email, last_name, first_name, password_hash, admin, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
        rusqlite::params![body.email, body.last_name, body.first_name, password_hash, now],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::BadRequest("Error: Email is already taken!".to_string()))
        }
        Err(e) => Err(AppError::Database(e)),
    }
}

/// Check credentials. Unknown email and wrong password are indistinguishable.
pub fn authenticate(conn: &Connection, email: &str, password: &str) -> AppResult<UserRecord> {
    let user = find_by_email(conn, email)?.ok_or(AppError::Unauthorized)?;
    if !password::verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }
    Ok(user)
}

/// Participations go with the account.
pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
    let affected = conn.execute("DELETE FROM users WHERE id = ?1", rusqlite::params![id])?;
    if affected == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }
    Ok(())
}
