use crate::Database;
use crate::models::SelectionRow;
use anyhow::Result;
use chrono::SecondsFormat;
use rusqlite::Connection;
use valentine_types::api::SelectionRecord;

impl Database {
    // -- Activity selections --

    /// Append a selection. Rows are never updated or deleted afterwards.
    pub fn insert_selection(&self, record: &SelectionRecord) -> Result<()> {
        // Fixed-width timestamps keep lexical order equal to time order.
        let created_at = record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true);

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO activity_selections
                    (id, activity_id, activity_title, activity_emoji, activity_response,
                     client_hint, recipient_name, host_email, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    record.id,
                    record.activity_id,
                    record.activity_title,
                    record.activity_emoji,
                    record.activity_response,
                    record.client_hint,
                    record.recipient_name,
                    record.host_email,
                    created_at,
                ],
            )?;
            Ok(())
        })
    }

    /// Newest selections first.
    pub fn list_selections(&self, limit: u32) -> Result<Vec<SelectionRow>> {
        self.with_conn(|conn| query_selections(conn, limit))
    }
}

fn query_selections(conn: &Connection, limit: u32) -> Result<Vec<SelectionRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, activity_id, activity_title, activity_emoji, activity_response,
                client_hint, recipient_name, host_email, created_at
         FROM activity_selections
         ORDER BY created_at DESC, rowid DESC
         LIMIT ?1",
    )?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(SelectionRow {
                id: row.get(0)?,
                activity_id: row.get(1)?,
                activity_title: row.get(2)?,
                activity_emoji: row.get(3)?,
                activity_response: row.get(4)?,
                client_hint: row.get(5)?,
                recipient_name: row.get(6)?,
                host_email: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
