use rusqlite::{Connection, OptionalExtension};
use yoga_model::Teacher;

use crate::error::AppResult;
use crate::models::{teacher_from_row, TEACHER_COLUMNS};

pub fn find_all(conn: &Connection) -> AppResult<Vec<Teacher>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY id"
    ))?;
    let rows = stmt.query_map([], teacher_from_row)?;
    let teachers: Result<Vec<_>, _> = rows.collect();
    Ok(teachers?)
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Teacher>> {
    let teacher = conn
        .query_row(
            &format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?1"),
            rusqlite::params![id],
            teacher_from_row,
        )
        .optional()?;
    Ok(teacher)
}

pub fn exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM teachers WHERE id = ?1)",
        rusqlite::params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}
