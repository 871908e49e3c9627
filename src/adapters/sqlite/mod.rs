//! SQLite adapter: Implementation of Storage.
//!
//! Persists the signed-in user and the donation history locally. The session
//! is a single row holding the user as JSON; donations get one row each.
//!
//! # Mutex Behavior
//!
//! The connection is protected by a `Mutex`. A poisoned mutex (from a panic
//! in another thread) causes a panic here rather than continuing on state
//! that may be half written.
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};

use crate::domain::{Donation, DonationStatus, DonationType, PaymentMethod, User};
use crate::ports::{DonationPage, Storage};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// SQLite storage adapter.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                user_json TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS donations (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                amount REAL,
                items_json TEXT,
                quantity INTEGER,
                charity_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL,
                payment_method TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_donations_created
                ON donations(created_at DESC);
            CREATE INDEX IF NOT EXISTS idx_donations_user
                ON donations(user_id);
            ",
        )?;

        Ok(())
    }

    /// Raw column values of a donation row; decoded outside the row closure
    /// so decode failures surface as [`StorageError`].
    fn read_row(row: &Row<'_>) -> rusqlite::Result<DonationRow> {
        Ok(DonationRow {
            id: row.get(0)?,
            kind: row.get(1)?,
            amount: row.get(2)?,
            items_json: row.get(3)?,
            quantity: row.get(4)?,
            charity_id: row.get(5)?,
            user_id: row.get(6)?,
            status: row.get(7)?,
            payment_method: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn query_donations(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Donation>, StorageError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, Self::read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(DonationRow::into_donation).collect()
    }
}

const DONATION_COLUMNS: &str = "id, kind, amount, items_json, quantity, charity_id, user_id, \
                                status, payment_method, created_at";

struct DonationRow {
    id: String,
    kind: String,
    amount: Option<f64>,
    items_json: Option<String>,
    quantity: Option<i64>,
    charity_id: String,
    user_id: String,
    status: String,
    payment_method: Option<String>,
    created_at: String,
}

impl DonationRow {
    fn into_donation(self) -> Result<Donation, StorageError> {
        let corrupt = |reason: String| StorageError::Corrupt {
            id: self.id.clone(),
            reason,
        };

        let kind: DonationType = self.kind.parse().map_err(corrupt)?;
        let status = DonationStatus::parse(&self.status)
            .ok_or_else(|| corrupt(format!("unknown status {}", self.status)))?;
        let payment_method = match self.payment_method.as_deref() {
            Some(s) => Some(
                PaymentMethod::parse(s)
                    .ok_or_else(|| corrupt(format!("unknown payment method {s}")))?,
            ),
            None => None,
        };
        let items = match self.items_json.as_deref() {
            Some(json) => Some(serde_json::from_str::<Vec<String>>(json)?),
            None => None,
        };
        let quantity = match self.quantity {
            Some(q) => Some(u32::try_from(q).map_err(|e| corrupt(e.to_string()))?),
            None => None,
        };
        let date = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(Donation {
            id: self.id,
            kind,
            amount: self.amount,
            items,
            quantity,
            charity_id: self.charity_id,
            user_id: self.user_id,
            date,
            status,
            payment_method,
        })
    }
}

impl Storage for SqliteStorage {
    type Error = StorageError;

    fn save_session(&self, user: &User) -> Result<(), Self::Error> {
        let json = serde_json::to_string(user)?;
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute(
            "INSERT OR REPLACE INTO session (id, user_json, saved_at) VALUES (1, ?1, ?2)",
            params![json, Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)],
        )?;

        tracing::debug!(user_id = %user.id, "Saved session");
        Ok(())
    }

    fn load_session(&self) -> Result<Option<User>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let result = conn.query_row("SELECT user_json FROM session WHERE id = 1", [], |row| {
            row.get::<_, String>(0)
        });

        match result {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear_session(&self) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute("DELETE FROM session WHERE id = 1", [])?;
        tracing::debug!("Cleared session");
        Ok(())
    }

    fn save_donation(&self, donation: &Donation) -> Result<(), Self::Error> {
        let items_json = donation
            .items
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute(
            &format!(
                "INSERT INTO donations ({DONATION_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            params![
                donation.id,
                donation.kind.as_str(),
                donation.amount,
                items_json,
                donation.quantity.map(i64::from),
                donation.charity_id,
                donation.user_id,
                donation.status.as_str(),
                donation.payment_method.map(|m| m.as_str()),
                donation.date.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;

        tracing::debug!("Saved donation {} to storage", donation.id);
        Ok(())
    }

    fn load_donations(&self) -> Result<Vec<Donation>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        Self::query_donations(
            &conn,
            &format!("SELECT {DONATION_COLUMNS} FROM donations ORDER BY created_at ASC, rowid ASC"),
            [],
        )
    }

    fn load_donations_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<DonationPage, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let total_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM donations", [], |row| row.get(0))?;

        let items = Self::query_donations(
            &conn,
            &format!(
                "SELECT {DONATION_COLUMNS} FROM donations \
                 ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2"
            ),
            params![limit as i64, offset as i64],
        )?;

        Ok(DonationPage::new(items, total_count as usize, offset, limit))
    }
}
