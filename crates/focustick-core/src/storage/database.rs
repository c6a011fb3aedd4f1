//! SQLite-based session storage and statistics.
//!
//! Provides persistent storage for:
//! - Completed timer sessions
//! - Session statistics (daily and all-time)
//! - Key-value store for persisted engine state

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::timer::Session;

use super::data_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub mode: String,
    pub duration_secs: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_sessions: u64,
    pub completed_work_sessions: u64,
    pub total_work_secs: u64,
    pub total_break_secs: u64,
}

/// SQLite database for session storage.
///
/// Stores completed timer sessions and provides statistics.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/focustick/focustick.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join("focustick.db");
        let conn =
            Connection::open(&path).map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                mode         TEXT NOT NULL,
                duration_secs INTEGER NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_mode ON sessions(mode);",
        )?;
        Ok(())
    }

    /// Record a completed session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(&self, session: &Session) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO sessions (mode, duration_secs, completed_at)
             VALUES (?1, ?2, ?3)",
            params![
                session.mode.as_str(),
                session.duration_secs,
                session.completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent sessions, newest first.
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, duration_secs, completed_at
             FROM sessions
             ORDER BY completed_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, mode, duration_secs, completed_at) = row?;
            let completed_at = DateTime::parse_from_rfc3339(&completed_at)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
                .with_timezone(&Utc);
            records.push(SessionRecord {
                id,
                mode,
                duration_secs,
                completed_at,
            });
        }
        Ok(records)
    }

    pub fn stats_today(&self) -> Result<Stats, DatabaseError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.stats_where(
            "WHERE completed_at >= ?1",
            params![format!("{today}T00:00:00+00:00")],
        )
    }

    pub fn stats_all(&self) -> Result<Stats, DatabaseError> {
        self.stats_where("", params![])
    }

    fn stats_where(
        &self,
        clause: &str,
        params: impl rusqlite::Params,
    ) -> Result<Stats, DatabaseError> {
        let sql = format!(
            "SELECT mode, COUNT(*), COALESCE(SUM(duration_secs), 0)
             FROM sessions
             {clause}
             GROUP BY mode"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;

        let mut stats = Stats::default();
        for row in rows {
            let (mode, count, secs) = row?;
            stats.total_sessions += count;
            match mode.as_str() {
                "work" => {
                    stats.completed_work_sessions += count;
                    stats.total_work_secs += secs;
                }
                "short_break" | "long_break" => {
                    stats.total_break_secs += secs;
                }
                _ => {}
            }
        }
        Ok(stats)
    }

    /// Read a value from the key-value store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Write a value to the key-value store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerMode;
    use uuid::Uuid;

    fn session(mode: TimerMode, duration_secs: u32) -> Session {
        Session {
            id: Uuid::new_v4(),
            mode,
            duration_secs,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn record_and_read_back_sessions() {
        let db = Database::open_memory().unwrap();
        db.record_session(&session(TimerMode::Work, 1500)).unwrap();
        db.record_session(&session(TimerMode::ShortBreak, 300))
            .unwrap();

        let recent = db.recent_sessions(5).unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first.
        assert_eq!(recent[0].mode, "short_break");
        assert_eq!(recent[1].mode, "work");
        assert_eq!(recent[1].duration_secs, 1500);
    }

    #[test]
    fn recent_sessions_respects_limit() {
        let db = Database::open_memory().unwrap();
        for _ in 0..8 {
            db.record_session(&session(TimerMode::Work, 60)).unwrap();
        }
        assert_eq!(db.recent_sessions(5).unwrap().len(), 5);
    }

    #[test]
    fn stats_split_work_and_breaks() {
        let db = Database::open_memory().unwrap();
        db.record_session(&session(TimerMode::Work, 1500)).unwrap();
        db.record_session(&session(TimerMode::Work, 1500)).unwrap();
        db.record_session(&session(TimerMode::ShortBreak, 300))
            .unwrap();
        db.record_session(&session(TimerMode::LongBreak, 900))
            .unwrap();

        let stats = db.stats_all().unwrap();
        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.completed_work_sessions, 2);
        assert_eq!(stats.total_work_secs, 3000);
        assert_eq!(stats.total_break_secs, 1200);

        // All sessions were recorded just now, so today's stats match.
        let today = db.stats_today().unwrap();
        assert_eq!(today.total_sessions, 4);
        assert_eq!(today.completed_work_sessions, 2);
    }

    #[test]
    fn kv_round_trip_and_overwrite() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("timer_engine").unwrap(), None);
        db.kv_set("timer_engine", "{}").unwrap();
        assert_eq!(db.kv_get("timer_engine").unwrap().as_deref(), Some("{}"));
        db.kv_set("timer_engine", "{\"running\":false}").unwrap();
        assert_eq!(
            db.kv_get("timer_engine").unwrap().as_deref(),
            Some("{\"running\":false}")
        );
    }
}
