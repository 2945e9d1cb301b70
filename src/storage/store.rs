//! Clinic Store - SQLite-backed persistence for appointments and gallery images
//!
//! All records live in a single SQLite database. Each collection carries an
//! autoincrement `seq` column so list operations return records in insertion
//! order, stable across restarts.
//!
//! Every public operation runs under one connection lock, so identifier
//! assignment and the validate-then-write sequence are atomic per call.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{
    Appointment, AppointmentStatus, GalleryImage, ImageCategory, NewAppointment, NewGalleryImage,
};

/// Database file name inside the data directory
pub const DB_FILE: &str = "clinicbook.db";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS appointments (
        seq        INTEGER PRIMARY KEY AUTOINCREMENT,
        id         TEXT NOT NULL UNIQUE,
        name       TEXT NOT NULL,
        phone      TEXT NOT NULL,
        email      TEXT,
        date       TEXT NOT NULL,
        time       TEXT,
        service    TEXT NOT NULL,
        message    TEXT,
        status     TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS gallery_images (
        seq        INTEGER PRIMARY KEY AUTOINCREMENT,
        id         TEXT NOT NULL UNIQUE,
        url        TEXT NOT NULL,
        title      TEXT NOT NULL,
        category   TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS admin_users (
        username      TEXT PRIMARY KEY,
        password_hash TEXT NOT NULL,
        created_at    TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS admin_sessions (
        token      TEXT PRIMARY KEY,
        username   TEXT NOT NULL REFERENCES admin_users(username) ON DELETE CASCADE,
        expires_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_sessions_username ON admin_sessions(username);
";

/// A stored operator account
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub username: String,
    /// PHC-format password hash
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A stored bearer-token session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Record counts for health reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub appointments: u64,
    pub gallery_images: u64,
}

impl std::fmt::Display for StoreCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} appointments, {} gallery images",
            self.appointments, self.gallery_images
        )
    }
}

/// The clinic's persistence store
pub struct ClinicStore {
    /// std::sync::Mutex because rusqlite connections are not Sync
    conn: Mutex<Connection>,
    /// Database path, None for in-memory stores
    path: Option<PathBuf>,
}

impl ClinicStore {
    /// Create or open the store inside a data directory
    pub fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(DB_FILE);

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        let store = Self::init(conn, Some(path))?;
        tracing::info!(path = ?store.path, "Opened clinic store");
        Ok(store)
    }

    /// Create a throwaway store backed by memory
    pub fn in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Get the database file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }

    /// Verify the database answers queries
    pub fn ping(&self) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Count records in both collections
    pub fn counts(&self) -> StorageResult<StoreCounts> {
        let conn = self.conn()?;
        let appointments: i64 =
            conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
        let gallery_images: i64 =
            conn.query_row("SELECT COUNT(*) FROM gallery_images", [], |row| row.get(0))?;

        Ok(StoreCounts {
            appointments: appointments as u64,
            gallery_images: gallery_images as u64,
        })
    }

    // ============================================
    // APPOINTMENTS
    // ============================================

    /// List all appointments in insertion order
    pub fn list_appointments(&self) -> StorageResult<Vec<Appointment>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, phone, email, date, time, service, message, status, created_at
             FROM appointments ORDER BY seq ASC",
        )?;

        let rows = stmt.query_map([], appointment_from_row)?;
        let appointments = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    /// Get a single appointment
    pub fn get_appointment(&self, id: &str) -> StorageResult<Appointment> {
        let conn = self.conn()?;
        fetch_appointment(&conn, id)?.ok_or_else(|| StorageError::not_found("Appointment", id))
    }

    /// Validate and persist a new appointment with status `pending`
    pub fn create_appointment(&self, input: NewAppointment) -> StorageResult<Appointment> {
        input.validate()?;
        let appointment = input.into_appointment();

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO appointments
                (id, name, phone, email, date, time, service, message, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                appointment.id,
                appointment.name,
                appointment.phone,
                appointment.email,
                appointment.date,
                appointment.time,
                appointment.service,
                appointment.message,
                appointment.status.as_str(),
                appointment.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!(appointment_id = %appointment.id, "Stored appointment");
        Ok(appointment)
    }

    /// Overwrite an appointment's status; no history is kept
    pub fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> StorageResult<Appointment> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE appointments SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;

        if changed == 0 {
            return Err(StorageError::not_found("Appointment", id));
        }

        fetch_appointment(&conn, id)?.ok_or_else(|| StorageError::not_found("Appointment", id))
    }

    // ============================================
    // GALLERY
    // ============================================

    /// List all gallery images in insertion order
    pub fn list_gallery_images(&self) -> StorageResult<Vec<GalleryImage>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, url, title, category, created_at FROM gallery_images ORDER BY seq ASC",
        )?;

        let rows = stmt.query_map([], gallery_image_from_row)?;
        let images = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(images)
    }

    /// Validate and persist a new gallery image
    pub fn create_gallery_image(&self, input: NewGalleryImage) -> StorageResult<GalleryImage> {
        input.validate()?;
        let image = input.into_image();

        let conn = self.conn()?;
        insert_gallery_image(&conn, &image)?;

        tracing::debug!(image_id = %image.id, "Stored gallery image");
        Ok(image)
    }

    /// Permanently remove a gallery image
    ///
    /// Deleting an id that does not exist, including a repeated delete,
    /// fails with `NotFound`.
    pub fn delete_gallery_image(&self, id: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM gallery_images WHERE id = ?1", params![id])?;

        if removed == 0 {
            return Err(StorageError::not_found("Gallery image", id));
        }
        Ok(())
    }

    /// Insert fully-formed images in one transaction, only if the gallery is empty
    ///
    /// Returns the number of images inserted.
    pub fn seed_gallery_images(&self, images: &[GalleryImage]) -> StorageResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let existing: i64 =
            tx.query_row("SELECT COUNT(*) FROM gallery_images", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        for image in images {
            insert_gallery_image(&tx, image)?;
        }
        tx.commit()?;

        Ok(images.len())
    }

    // ============================================
    // ADMIN ACCOUNTS AND SESSIONS
    // ============================================

    /// Number of operator accounts
    pub fn admin_count(&self) -> StorageResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM admin_users", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn find_admin(&self, username: &str) -> StorageResult<Option<AdminUser>> {
        let conn = self.conn()?;
        let admin = conn
            .query_row(
                "SELECT username, password_hash, created_at FROM admin_users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(AdminUser {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                        created_at: parse_timestamp(row, 2)?,
                    })
                },
            )
            .optional()?;
        Ok(admin)
    }

    pub fn insert_admin(&self, admin: &AdminUser) -> StorageResult<()> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO admin_users (username, password_hash, created_at)
             VALUES (?1, ?2, ?3)",
            params![
                admin.username,
                admin.password_hash,
                admin.created_at.to_rfc3339()
            ],
        )?;

        if inserted == 0 {
            return Err(StorageError::Validation(format!(
                "Admin '{}' already exists",
                admin.username
            )));
        }
        Ok(())
    }

    /// Replace an operator's password hash and revoke their other sessions
    pub fn update_admin_password(
        &self,
        username: &str,
        password_hash: &str,
        keep_session: Option<&str>,
    ) -> StorageResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE admin_users SET password_hash = ?1 WHERE username = ?2",
            params![password_hash, username],
        )?;
        if changed == 0 {
            return Err(StorageError::not_found("Admin", username));
        }

        tx.execute(
            "DELETE FROM admin_sessions WHERE username = ?1 AND token IS NOT ?2",
            params![username, keep_session],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn insert_session(&self, session: &Session) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO admin_sessions (token, username, expires_at) VALUES (?1, ?2, ?3)",
            params![
                session.token,
                session.username,
                session.expires_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    pub fn find_session(&self, token: &str) -> StorageResult<Option<Session>> {
        let conn = self.conn()?;
        let session = conn
            .query_row(
                "SELECT token, username, expires_at FROM admin_sessions WHERE token = ?1",
                params![token],
                |row| {
                    Ok(Session {
                        token: row.get(0)?,
                        username: row.get(1)?,
                        expires_at: parse_timestamp(row, 2)?,
                    })
                },
            )
            .optional()?;
        Ok(session)
    }

    /// Remove a session, returning whether it existed
    pub fn delete_session(&self, token: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM admin_sessions WHERE token = ?1",
            params![token],
        )?;
        Ok(removed > 0)
    }

    /// Drop every session that expired at or before `now`
    ///
    /// Sessions whose expiry cannot be decoded are dropped too.
    pub fn purge_expired_sessions(&self, now: DateTime<Utc>) -> StorageResult<usize> {
        let conn = self.conn()?;
        // RFC 3339 strings in UTC compare correctly as text only with equal
        // precision, so compare parsed values instead.
        let mut stmt = conn.prepare_cached("SELECT token, expires_at FROM admin_sessions")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);

        let expired: Vec<String> = rows
            .into_iter()
            .filter(|(_, raw)| match DateTime::parse_from_rfc3339(raw) {
                Ok(expires_at) => expires_at.with_timezone(&Utc) <= now,
                Err(e) => {
                    tracing::warn!(expires_at = %raw, error = %e, "Dropping undecodable session");
                    true
                }
            })
            .map(|(token, _)| token)
            .collect();

        for token in &expired {
            conn.execute("DELETE FROM admin_sessions WHERE token = ?1", params![token])?;
        }
        Ok(expired.len())
    }
}

fn fetch_appointment(conn: &Connection, id: &str) -> StorageResult<Option<Appointment>> {
    let appointment = conn
        .query_row(
            "SELECT id, name, phone, email, date, time, service, message, status, created_at
             FROM appointments WHERE id = ?1",
            params![id],
            appointment_from_row,
        )
        .optional()?;
    Ok(appointment)
}

fn insert_gallery_image(conn: &Connection, image: &GalleryImage) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO gallery_images (id, url, title, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            image.id,
            image.url,
            image.title,
            image.category.as_str(),
            image.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let status: String = row.get(8)?;
    let status = status
        .parse::<AppointmentStatus>()
        .map_err(|e| conversion_error(8, e))?;

    Ok(Appointment {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        date: row.get(4)?,
        time: row.get(5)?,
        service: row.get(6)?,
        message: row.get(7)?,
        status,
        created_at: parse_timestamp(row, 9)?,
    })
}

fn gallery_image_from_row(row: &Row<'_>) -> rusqlite::Result<GalleryImage> {
    let category: String = row.get(3)?;
    let category = category
        .parse::<ImageCategory>()
        .map_err(|e| conversion_error(3, e))?;

    Ok(GalleryImage {
        id: row.get(0)?,
        url: row.get(1)?,
        title: row.get(2)?,
        category,
        created_at: parse_timestamp(row, 4)?,
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn sample_appointment() -> NewAppointment {
        NewAppointment::new("Sarah Johnson", "+1-555-0123", "2024-01-01", "Dental Cleaning")
            .email("sarah.johnson@email.com")
            .time("10:00 AM")
            .message("Regular checkup")
    }

    #[test]
    fn test_create_appointment_assigns_pending_and_timestamp() {
        let store = ClinicStore::in_memory().unwrap();
        let before = Utc::now();

        let created = store.create_appointment(sample_appointment()).unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.status, AppointmentStatus::Pending);
        assert!(created.created_at >= before);
    }

    #[test]
    fn test_create_appointment_ids_unique() {
        let store = ClinicStore::in_memory().unwrap();

        let a = store.create_appointment(sample_appointment()).unwrap();
        let b = store.create_appointment(sample_appointment()).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.list_appointments().unwrap().len(), 2);
    }

    #[test]
    fn test_create_appointment_empty_name_rejected_without_write() {
        let store = ClinicStore::in_memory().unwrap();
        let input = NewAppointment::new("", "9876543210", "2024-01-01", "X");

        let result = store.create_appointment(input);

        assert!(matches!(result, Err(StorageError::Validation(_))));
        assert!(store.list_appointments().unwrap().is_empty());
    }

    #[test]
    fn test_list_round_trips_fields() {
        let store = ClinicStore::in_memory().unwrap();
        let created = store.create_appointment(sample_appointment()).unwrap();

        let listed = store.list_appointments().unwrap();

        assert_eq!(listed.len(), 1);
        let stored = &listed[0];
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.name, "Sarah Johnson");
        assert_eq!(stored.phone, "+1-555-0123");
        assert_eq!(stored.email.as_deref(), Some("sarah.johnson@email.com"));
        assert_eq!(stored.date, "2024-01-01");
        assert_eq!(stored.time.as_deref(), Some("10:00 AM"));
        assert_eq!(stored.service, "Dental Cleaning");
        assert_eq!(stored.message.as_deref(), Some("Regular checkup"));
        assert_eq!(stored.created_at, created.created_at);
    }

    #[test]
    fn test_list_appointments_insertion_order() {
        let store = ClinicStore::in_memory().unwrap();
        let names = ["First", "Second", "Third"];
        for name in names {
            store
                .create_appointment(NewAppointment::new(name, "1", "2024-01-01", "Checkup"))
                .unwrap();
        }

        let listed: Vec<String> = store
            .list_appointments()
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(listed, names);
    }

    #[test]
    fn test_status_last_write_wins() {
        let store = ClinicStore::in_memory().unwrap();
        let created = store.create_appointment(sample_appointment()).unwrap();

        store
            .update_appointment_status(&created.id, AppointmentStatus::Confirmed)
            .unwrap();
        let updated = store
            .update_appointment_status(&created.id, AppointmentStatus::Cancelled)
            .unwrap();

        assert_eq!(updated.status, AppointmentStatus::Cancelled);
        assert_eq!(
            store.get_appointment(&created.id).unwrap().status,
            AppointmentStatus::Cancelled
        );

        // Any status is reachable from any other
        let reopened = store
            .update_appointment_status(&created.id, AppointmentStatus::Pending)
            .unwrap();
        assert_eq!(reopened.status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_update_status_unknown_id() {
        let store = ClinicStore::in_memory().unwrap();

        let result = store.update_appointment_status("unknown-id", AppointmentStatus::Confirmed);

        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[test]
    fn test_gallery_create_list_delete() {
        let store = ClinicStore::in_memory().unwrap();
        let image = store
            .create_gallery_image(NewGalleryImage::new(
                "https://x/y.jpg",
                "Room",
                ImageCategory::Clinic,
            ))
            .unwrap();

        let listed = store.list_gallery_images().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, image.id);
        assert_eq!(listed[0].url, "https://x/y.jpg");
        assert_eq!(listed[0].title, "Room");
        assert_eq!(listed[0].category, ImageCategory::Clinic);

        store.delete_gallery_image(&image.id).unwrap();
        assert!(store.list_gallery_images().unwrap().is_empty());

        let second = store.delete_gallery_image(&image.id);
        assert!(matches!(second, Err(StorageError::NotFound { .. })));
    }

    #[test]
    fn test_gallery_requires_url_and_title() {
        let store = ClinicStore::in_memory().unwrap();

        let no_url = store.create_gallery_image(NewGalleryImage::new("", "Room", ImageCategory::Team));
        let no_title =
            store.create_gallery_image(NewGalleryImage::new("https://x/y.jpg", " ", ImageCategory::Team));

        assert!(matches!(no_url, Err(StorageError::Validation(_))));
        assert!(matches!(no_title, Err(StorageError::Validation(_))));
        assert_eq!(store.counts().unwrap().gallery_images, 0);
    }

    #[test]
    fn test_seed_only_when_empty() {
        let store = ClinicStore::in_memory().unwrap();
        let images = vec![
            NewGalleryImage::new("https://a", "A", ImageCategory::Clinic).into_image(),
            NewGalleryImage::new("https://b", "B", ImageCategory::Team).into_image(),
        ];

        assert_eq!(store.seed_gallery_images(&images).unwrap(), 2);
        assert_eq!(store.seed_gallery_images(&images).unwrap(), 0);
        assert_eq!(store.list_gallery_images().unwrap().len(), 2);
    }

    #[test]
    fn test_reopen_persists_records() {
        let dir = tempdir().unwrap();
        let created = {
            let store = ClinicStore::open(dir.path()).unwrap();
            store.create_appointment(sample_appointment()).unwrap()
        };

        let store = ClinicStore::open(dir.path()).unwrap();
        let listed = store.list_appointments().unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert!(store.path().unwrap().ends_with(DB_FILE));
    }

    #[test]
    fn test_sessions_expire_and_purge() {
        let store = ClinicStore::in_memory().unwrap();
        store
            .insert_admin(&AdminUser {
                username: "admin".to_string(),
                password_hash: "hash".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();

        let now = Utc::now();
        let live = Session {
            token: "live".to_string(),
            username: "admin".to_string(),
            expires_at: now + Duration::hours(1),
        };
        let stale = Session {
            token: "stale".to_string(),
            username: "admin".to_string(),
            expires_at: now - Duration::minutes(1),
        };
        store.insert_session(&live).unwrap();
        store.insert_session(&stale).unwrap();

        assert_eq!(store.purge_expired_sessions(now).unwrap(), 1);
        assert!(store.find_session("stale").unwrap().is_none());
        assert_eq!(store.find_session("live").unwrap(), Some(live));
    }

    #[test]
    fn test_purge_drops_undecodable_sessions() {
        let store = ClinicStore::in_memory().unwrap();
        store
            .insert_admin(&AdminUser {
                username: "admin".to_string(),
                password_hash: "hash".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO admin_sessions (token, username, expires_at)
                 VALUES ('garbled', 'admin', 'not-a-timestamp')",
                [],
            )
            .unwrap();

        assert!(store.find_session("garbled").is_err());
        assert_eq!(store.purge_expired_sessions(Utc::now()).unwrap(), 1);
        assert!(store.find_session("garbled").unwrap().is_none());
    }

    #[test]
    fn test_password_update_revokes_other_sessions() {
        let store = ClinicStore::in_memory().unwrap();
        store
            .insert_admin(&AdminUser {
                username: "admin".to_string(),
                password_hash: "old".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();
        let expires_at = Utc::now() + Duration::hours(1);
        for token in ["current", "other"] {
            store
                .insert_session(&Session {
                    token: token.to_string(),
                    username: "admin".to_string(),
                    expires_at,
                })
                .unwrap();
        }

        store
            .update_admin_password("admin", "new", Some("current"))
            .unwrap();

        assert_eq!(store.find_admin("admin").unwrap().unwrap().password_hash, "new");
        assert!(store.find_session("current").unwrap().is_some());
        assert!(store.find_session("other").unwrap().is_none());
        assert!(matches!(
            store.update_admin_password("nobody", "x", None),
            Err(StorageError::NotFound { .. })
        ));
    }
}
