use rusqlite::Row;
use yoga_model::{Teacher, User};

/// A `users` row. Only [`User`] is ever serialized.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub password_hash: String,
    pub admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

pub const USER_COLUMNS: &str =
    "id, email, last_name, first_name, password_hash, admin, created_at, updated_at";

impl UserRecord {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            email: row.get(1)?,
            last_name: row.get(2)?,
            first_name: row.get(3)?,
            password_hash: row.get(4)?,
            admin: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

impl From<UserRecord> for User {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            email: u.email,
            last_name: u.last_name,
            first_name: u.first_name,
            admin: u.admin,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

pub const TEACHER_COLUMNS: &str = "id, last_name, first_name, created_at, updated_at";

pub fn teacher_from_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
