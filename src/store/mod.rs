//! Player registry
//!
//! Registered players and the sessions they played, kept in a SQLite file
//! under the platform data directory. Each finished session is recorded
//! together with the player's best score in a single transaction.

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use serde::Serialize;

use crate::error::StoreError;

/// Database file name inside the data directory
pub const DB_FILE: &str = "game_users.sqlite";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        username          TEXT NOT NULL UNIQUE,
        registration_date TEXT NOT NULL,
        last_played       TEXT,
        highscore         INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE IF NOT EXISTS game_sessions (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id   INTEGER NOT NULL REFERENCES users(id),
        play_date TEXT NOT NULL,
        score     INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_sessions_user ON game_sessions(user_id);";

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// RFC 3339 local time
    pub registered_at: String,
    pub last_played: Option<String>,
    pub highscore: u32,
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub highscore: u32,
}

/// One finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub id: i64,
    pub played_at: String,
    pub score: u32,
}

/// SQLite-backed player store
pub struct UserStore {
    conn: Connection,
}

fn now_stamp() -> String {
    chrono::Local::now().to_rfc3339()
}

impl UserStore {
    /// Open (or create) the database in `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|source| StoreError::DataDir {
            path: data_dir.to_path_buf(),
            source,
        })?;
        let db_path = data_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;
        log::info!("Opened player store at {}", db_path.display());
        Self::with_connection(conn)
    }

    /// Throwaway store for demos and tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Register a new player. Names are trimmed and must be unique.
    pub fn register_user(&self, name: &str) -> Result<User, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::BlankName);
        }

        let inserted = self.conn.execute(
            "INSERT INTO users (username, registration_date) VALUES (?1, ?2)",
            params![name, now_stamp()],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::DuplicateUser(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        log::info!("Registered player {name}");
        self.user(name)?
            .ok_or_else(|| StoreError::UnknownUser(name.to_string()))
    }

    /// All players, best score first
    pub fn list_users(&self) -> Result<Vec<UserSummary>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT username, highscore FROM users ORDER BY highscore DESC, username ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UserSummary {
                name: row.get(0)?,
                highscore: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Look a player up by name
    pub fn user(&self, name: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, registration_date, last_played, highscore
                 FROM users WHERE username = ?1",
                params![name.trim()],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        registered_at: row.get(2)?,
                        last_played: row.get(3)?,
                        highscore: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Best score for a player, `None` if the name is not registered
    pub fn highscore(&self, name: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.user(name)?.map(|u| u.highscore))
    }

    /// Record a finished session and raise the player's best score if beaten.
    /// Returns the player's best score afterwards.
    pub fn record_session(&mut self, name: &str, score: u32) -> Result<u32, StoreError> {
        let name = name.trim();
        let stamp = now_stamp();
        let tx = self.conn.transaction()?;

        let user_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM users WHERE username = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        let Some(user_id) = user_id else {
            return Err(StoreError::UnknownUser(name.to_string()));
        };

        tx.execute(
            "UPDATE users SET last_played = ?1, highscore = MAX(highscore, ?2) WHERE id = ?3",
            params![stamp, score, user_id],
        )?;
        tx.execute(
            "INSERT INTO game_sessions (user_id, play_date, score) VALUES (?1, ?2, ?3)",
            params![user_id, stamp, score],
        )?;
        let best: u32 = tx.query_row(
            "SELECT highscore FROM users WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        tx.commit()?;

        log::info!("Recorded session for {name}: score {score}, best {best}");
        Ok(best)
    }

    /// Sessions played by a player, oldest first
    pub fn sessions(&self, name: &str) -> Result<Vec<SessionRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT s.id, s.play_date, s.score
             FROM game_sessions s JOIN users u ON u.id = s.user_id
             WHERE u.username = ?1
             ORDER BY s.id ASC",
        )?;
        let rows = stmt.query_map(params![name.trim()], |row| {
            Ok(SessionRecord {
                id: row.get(0)?,
                played_at: row.get(1)?,
                score: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
