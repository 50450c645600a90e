use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (activity selections)");
        conn.execute_batch(
            "
            CREATE TABLE activity_selections (
                id                  TEXT PRIMARY KEY,
                activity_id         INTEGER NOT NULL,
                activity_title      TEXT NOT NULL,
                activity_emoji      TEXT NOT NULL,
                activity_response   TEXT,
                client_hint         TEXT,
                recipient_name      TEXT,
                host_email          TEXT,
                -- RFC 3339, UTC, assigned by the API on insert
                created_at          TEXT NOT NULL
            );

            CREATE INDEX idx_selections_created
                ON activity_selections(created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
