use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_bool, to_intensity, to_optional_bool},
    models::WorryEntry,
};

fn row_to_entry(row: &Row) -> Result<WorryEntry> {
    let created_at: String = row.get("created_at")?;
    let reminder_at: String = row.get("reminder_at")?;
    let updated_at: String = row.get("updated_at")?;
    let intensity: i64 = row.get("intensity")?;
    let is_answered: i64 = row.get("is_answered")?;
    let outcome: Option<i64> = row.get("outcome")?;

    Ok(WorryEntry {
        id: row.get("id")?,
        worry_text: row.get("worry_text")?,
        control_thought: row.get("control_thought")?,
        intensity: to_intensity(intensity, "intensity")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        reminder_at: parse_datetime(&reminder_at, "reminder_at")?,
        is_answered: to_bool(is_answered),
        outcome: to_optional_bool(outcome),
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn insert_entry(&self, entry: &WorryEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO worries (id, worry_text, control_thought, intensity, created_at, reminder_at, is_answered, outcome, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id,
                    record.worry_text,
                    record.control_thought,
                    record.intensity as i64,
                    record.created_at.to_rfc3339(),
                    record.reminder_at.to_rfc3339(),
                    record.is_answered as i64,
                    record.outcome.map(|value| value as i64),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_entry(&self, entry_id: &str) -> Result<Option<WorryEntry>> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, worry_text, control_thought, intensity, created_at, reminder_at, is_answered, outcome, updated_at
                 FROM worries
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![entry_id])?;
            let entry = match rows.next()? {
                Some(row) => Some(row_to_entry(row)?),
                None => None,
            };
            Ok(entry)
        })
        .await
    }

    pub async fn fetch_all_entries(&self) -> Result<Vec<WorryEntry>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, worry_text, control_thought, intensity, created_at, reminder_at, is_answered, outcome, updated_at
                 FROM worries
                 ORDER BY created_at DESC",
            )?;

            let mut rows = stmt.query([])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_entry(row)?);
            }

            Ok(entries)
        })
        .await
    }

    /// Marks an entry answered with its outcome judgment. Guarded so an
    /// already-answered entry is left untouched: the first outcome wins.
    /// Returns whether a row actually changed.
    pub async fn mark_entry_answered(
        &self,
        entry_id: &str,
        outcome: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE worries
                 SET is_answered = 1,
                     outcome = ?1,
                     updated_at = ?2
                 WHERE id = ?3
                   AND is_answered = 0",
                params![outcome as i64, updated_at.to_rfc3339(), entry_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn update_entry_reminder(
        &self,
        entry_id: &str,
        reminder_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE worries
                 SET reminder_at = ?1,
                     updated_at = ?2
                 WHERE id = ?3
                   AND is_answered = 0",
                params![reminder_at.to_rfc3339(), updated_at.to_rfc3339(), entry_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            // Deleting an already-removed entry is not an error.
            conn.execute("DELETE FROM worries WHERE id = ?1", params![entry_id])?;
            Ok(())
        })
        .await
    }

    /// Unanswered entries whose reminder is still ahead of `now`; used to
    /// re-register alerts after a process restart.
    pub async fn fetch_unanswered_future_entries(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<WorryEntry>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, worry_text, control_thought, intensity, created_at, reminder_at, is_answered, outcome, updated_at
                 FROM worries
                 WHERE is_answered = 0
                   AND reminder_at > ?1
                 ORDER BY reminder_at ASC",
            )?;

            let mut rows = stmt.query(params![now.to_rfc3339()])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_entry(row)?);
            }

            Ok(entries)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    use crate::db::{Database, WorryEntry};

    async fn temp_db() -> (TempDir, Database) {
        let dir = TempDir::new().expect("temp dir");
        let db = Database::new(dir.path().join("worrybox.sqlite3")).expect("open db");
        (dir, db)
    }

    fn sample_entry(offset: chrono::Duration) -> WorryEntry {
        WorryEntry::new(
            "Presentation goes badly".into(),
            Some("I have prepared more than enough".into()),
            6,
            Utc::now() + offset,
        )
    }

    #[tokio::test]
    async fn insert_and_fetch_roundtrip() {
        let (_dir, db) = temp_db().await;
        let entry = sample_entry(Duration::hours(3));
        db.insert_entry(&entry).await.unwrap();

        let fetched = db.get_entry(&entry.id).await.unwrap().expect("entry stored");
        assert_eq!(fetched.worry_text, entry.worry_text);
        assert_eq!(fetched.control_thought, entry.control_thought);
        assert_eq!(fetched.intensity, 6);
        assert!(!fetched.is_answered);
        assert_eq!(fetched.outcome, None);
    }

    #[tokio::test]
    async fn mark_answered_keeps_first_outcome() {
        let (_dir, db) = temp_db().await;
        let entry = sample_entry(Duration::hours(1));
        db.insert_entry(&entry).await.unwrap();

        let first = db
            .mark_entry_answered(&entry.id, true, Utc::now())
            .await
            .unwrap();
        assert!(first);

        let second = db
            .mark_entry_answered(&entry.id, false, Utc::now())
            .await
            .unwrap();
        assert!(!second, "second answer must not change the row");

        let stored = db.get_entry(&entry.id).await.unwrap().unwrap();
        assert!(stored.is_answered);
        assert_eq!(stored.outcome, Some(true));
    }

    #[tokio::test]
    async fn delete_is_tolerant_of_missing_rows() {
        let (_dir, db) = temp_db().await;
        db.delete_entry("no-such-id").await.unwrap();
    }

    #[tokio::test]
    async fn future_entries_excludes_answered_and_past() {
        let (_dir, db) = temp_db().await;
        let future = sample_entry(Duration::hours(2));
        let past = sample_entry(Duration::hours(-2));
        let answered = sample_entry(Duration::hours(4));
        db.insert_entry(&future).await.unwrap();
        db.insert_entry(&past).await.unwrap();
        db.insert_entry(&answered).await.unwrap();
        db.mark_entry_answered(&answered.id, false, Utc::now())
            .await
            .unwrap();

        let upcoming = db.fetch_unanswered_future_entries(Utc::now()).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, future.id);
    }
}
