//! Session directory and participation bookkeeping.
//!
//! Membership lives in `participations`, whose composite key keeps a user from
//! joining the same session twice. The join and leave checks still go through
//! [`Session::is_participant`] so callers get a 400 instead of a constraint
//! error.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, Row};
use yoga_model::{Session, SessionRequest};

use crate::error::{AppError, AppResult};
use crate::services::{teachers, users};

const SESSION_COLUMNS: &str = "id, name, date, teacher_id, description, created_at, updated_at";

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        teacher_id: row.get(3)?,
        description: row.get(4)?,
        users: Vec::new(),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn participants(conn: &Connection, session_id: i64) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM participations WHERE session_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(rusqlite::params![session_id], |row| row.get(0))?;
    let ids: Result<Vec<i64>, _> = rows.collect();
    Ok(ids?)
}

fn session_not_found() -> AppError {
    AppError::NotFound("Session not found".into())
}

pub fn find_all(conn: &Connection) -> AppResult<Vec<Session>> {
    let mut members: HashMap<i64, Vec<i64>> = HashMap::new();
    {
        let mut stmt =
            conn.prepare("SELECT session_id, user_id FROM participations ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
        for row in rows {
            let (session_id, user_id) = row?;
            members.entry(session_id).or_default().push(user_id);
        }
    }

    let mut stmt = conn.prepare(&format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY id"))?;
    let rows = stmt.query_map([], session_from_row)?;
    let mut sessions: Vec<Session> = rows.collect::<Result<_, _>>()?;
    for session in &mut sessions {
        session.users = members.remove(&session.id).unwrap_or_default();
    }
    Ok(sessions)
}

pub fn get_by_id(conn: &Connection, id: i64) -> AppResult<Option<Session>> {
    let session = conn
        .query_row(
            &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
            rusqlite::params![id],
            session_from_row,
        )
        .optional()?;

    match session {
        Some(mut session) => {
            session.users = participants(conn, id)?;
            Ok(Some(session))
        }
        None => Ok(None),
    }
}

fn require(conn: &Connection, id: i64) -> AppResult<Session> {
    get_by_id(conn, id)?.ok_or_else(session_not_found)
}

fn ensure_teacher(conn: &Connection, teacher_id: i64) -> AppResult<()> {
    if !teachers::exists(conn, teacher_id)? {
        return Err(AppError::BadRequest(format!("Teacher {teacher_id} not found")));
    }
    Ok(())
}

pub fn create(conn: &Connection, body: &SessionRequest) -> AppResult<Session> {
    let date = body.validate()?;
    ensure_teacher(conn, body.teacher_id)?;

    let participant_ids = body.participant_ids();
    for user_id in &participant_ids {
        if !users::exists(conn, *user_id)? {
            return Err(AppError::BadRequest(format!("User {user_id} not found")));
        }
    }

    let now = yoga_model::time::now();
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO sessions (name, date, teacher_id, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        rusqlite::params![body.name, date, body.teacher_id, body.description, now],
    )?;
    let id = tx.last_insert_rowid();
    for user_id in &participant_ids {
        tx.execute(
            "INSERT INTO participations (session_id, user_id) VALUES (?1, ?2)",
            rusqlite::params![id, user_id],
        )?;
    }
    tx.commit()?;

    tracing::info!(session_id = id, "Session created");
    require(conn, id)
}

/// Replace the scheduling fields of a session. Participants are left as they are.
pub fn update(conn: &Connection, id: i64, body: &SessionRequest) -> AppResult<Session> {
    let date = body.validate()?;
    ensure_teacher(conn, body.teacher_id)?;

    let now = yoga_model::time::now();
    let affected = conn.execute(
        "UPDATE sessions SET name = ?1, date = ?2, teacher_id = ?3, description = ?4, updated_at = ?5
         WHERE id = ?6",
        rusqlite::params![body.name, date, body.teacher_id, body.description, now, id],
    )?;
    if affected == 0 {
        return Err(session_not_found());
    }

    require(conn, id)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
    let affected = conn.execute("DELETE FROM sessions WHERE id = ?1", rusqlite::params![id])?;
    if affected == 0 {
        return Err(session_not_found());
    }
    tracing::info!(session_id = id, "Session deleted");
    Ok(())
}

pub fn participate(conn: &Connection, id: i64, user_id: i64) -> AppResult<()> {
    let session = require(conn, id)?;
    if !users::exists(conn, user_id)? {
        return Err(AppError::NotFound("User not found".into()));
    }
    if session.is_participant(user_id) {
        return Err(AppError::BadRequest("User already participates".into()));
    }

    let tx = conn.unchecked_transaction()?;
    insert_participation(&tx, id, user_id)?;
    touch(&tx, id)?;
    tx.commit()?;

    tracing::debug!(session_id = id, user_id, "Participation added");
    Ok(())
}

pub fn no_longer_participate(conn: &Connection, id: i64, user_id: i64) -> AppResult<()> {
    let session = require(conn, id)?;
    if !session.is_participant(user_id) {
        return Err(AppError::BadRequest("User does not participate".into()));
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM participations WHERE session_id = ?1 AND user_id = ?2",
        rusqlite::params![id, user_id],
    )?;
    touch(&tx, id)?;
    tx.commit()?;

    tracing::debug!(session_id = id, user_id, "Participation removed");
    Ok(())
}

/// A concurrent join that slipped past the membership check lands on the
/// composite key and is reported the same way.
fn insert_participation(conn: &Connection, id: i64, user_id: i64) -> AppResult<()> {
    let result = conn.execute(
        "INSERT INTO participations (session_id, user_id) VALUES (?1, ?2)",
        rusqlite::params![id, user_id],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::BadRequest("User already participates".into()))
        }
        Err(e) => Err(AppError::Database(e)),
    }
}

fn touch(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE sessions SET updated_at = ?1 WHERE id = ?2",
        rusqlite::params![yoga_model::time::now(), id],
    )?;
    Ok(())
}
