use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::orchestrator::EventScores;

pub mod models;
use models::*;

/// Thread-safe SQLite points store (single connection with mutex)
#[derive(Clone)]
pub struct PointsStore {
    conn: Arc<Mutex<Connection>>,
}

impl PointsStore {
    /// Open (or create) the SQLite database at the given path
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open points database {}", path))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Self::from_connection(conn)
    }

    /// Throwaway store, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = PointsStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("points store connection lock poisoned"))
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Replace every stored award of the event with `scores`.
    ///
    /// Runs in a single transaction: either all bets of the event end up
    /// with their new points or none do. Re-running with the same scores
    /// leaves the totals unchanged.
    pub fn replace_event_points(&self, scores: &EventScores) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM prediction_points WHERE event_key=?1",
            params![scores.event_key],
        )?;

        let now = Utc::now();
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO prediction_points (
                    event_key, bet_id, user_id, rule, points, evaluated_at
                 ) VALUES (?1,?2,?3,?4,?5,?6)",
            )?;
            for score in &scores.scores {
                for (rule, points) in &score.awards {
                    stmt.execute(params![
                        scores.event_key,
                        score.bet_id,
                        score.user_id,
                        rule.as_str(),
                        points,
                        now,
                    ])?;
                    inserted += 1;
                }
            }
        }
        tx.commit()
            .with_context(|| format!("Failed to commit points for {}", scores.event_key))?;

        debug!(
            "Replaced {} stored award(s) with {} for {}",
            removed, inserted, scores.event_key
        );
        info!(
            "Stored points for {} bet(s) of {}",
            scores.scores.len(),
            scores.event_key
        );
        Ok(inserted)
    }

    /// All stored awards of one event
    pub fn event_points(&self, event_key: &str) -> Result<Vec<StoredPoints>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT event_key, bet_id, user_id, rule, points, evaluated_at
             FROM prediction_points WHERE event_key=?1 ORDER BY bet_id, rule",
        )?;
        let rows = stmt
            .query_map(params![event_key], map_stored_points)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Total points of a user across all events
    pub fn user_total(&self, user_id: i64) -> Result<i64> {
        let conn = self.lock()?;
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(points),0) FROM prediction_points WHERE user_id=?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// League standings, best first
    pub fn standings(&self, limit: i64) -> Result<Vec<UserStanding>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, SUM(points) AS total FROM prediction_points
             GROUP BY user_id ORDER BY total DESC, user_id ASC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(UserStanding {
                    user_id: row.get(0)?,
                    points: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

fn map_stored_points(row: &rusqlite::Row) -> rusqlite::Result<StoredPoints> {
    Ok(StoredPoints {
        event_key: row.get(0)?,
        bet_id: row.get(1)?,
        user_id: row.get(2)?,
        rule: row.get(3)?,
        points: row.get(4)?,
        evaluated_at: row.get(5)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS prediction_points (
    event_key    TEXT    NOT NULL,
    bet_id       INTEGER NOT NULL,
    user_id      INTEGER NOT NULL,
    rule         TEXT    NOT NULL,
    points       INTEGER NOT NULL,
    evaluated_at TEXT    NOT NULL,
    PRIMARY KEY (event_key, bet_id, rule)
);

CREATE INDEX IF NOT EXISTS idx_points_user ON prediction_points(user_id);
"#;
