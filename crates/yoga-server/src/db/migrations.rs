use rusqlite::Connection;

const SCHEMA: &str = include_str!("schema.sql");

pub fn run(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)?;

    // Reference teachers, inserted once on an empty table
    let teachers: i64 = conn.query_row("SELECT COUNT(*) FROM teachers", [], |row| row.get(0))?;
    if teachers == 0 {
        conn.execute_batch(
            "INSERT INTO teachers (first_name, last_name) VALUES ('Margot', 'DELAHAYE');
             INSERT INTO teachers (first_name, last_name) VALUES ('Hélène', 'THIERCELIN');",
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent_and_seed_teachers_once() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM teachers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }
}
