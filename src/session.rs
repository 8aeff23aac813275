use log::{info, warn};
use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::models::{DEMO_USER_ID, User, now_timestamp};

/// Key the signed-in user is stored under
pub const SESSION_KEY: &str = "studyflow_user";

pub const DEMO_EMAIL: &str = "demo@studyflow.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_NAME: &str = "Usuario Demo";

/// Simulated latency of a login round trip
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to encode session: {0}")]
    EncodeError(#[from] serde_json::Error),
    #[error("Failed to create session directory: {0}")]
    DirectoryError(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credenciales inválidas")]
    InvalidCredentials,
    #[error("Session storage error: {0}")]
    Storage(#[from] SessionError),
}

/// Where the signed-in user is kept between runs.
pub trait SessionStorage {
    fn load(&self) -> Result<Option<String>, SessionError>;
    fn save(&mut self, value: &str) -> Result<(), SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
}

/// Session storage that lives only as long as the process
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStorage {
    value: Option<String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored value, parseable or not
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &str) -> Result<(), SessionError> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.value = None;
        Ok(())
    }
}

/// Key/value table in a local SQLite file.
pub struct SqliteSessionStorage {
    conn: Connection,
}

impl SqliteSessionStorage {
    /// Open (or create) the storage file and its table
    pub fn new(path: &str) -> Result<Self, SessionError> {
        let db_path = PathBuf::from(path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SessionError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        let storage = Self { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self, SessionError> {
        let storage = Self {
            conn: Connection::open_in_memory()?,
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    fn initialize_schema(&self) -> Result<(), SessionError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, now_timestamp()],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }
}

impl SessionStorage for SqliteSessionStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        self.get(SESSION_KEY)
    }

    fn save(&mut self, value: &str) -> Result<(), SessionError> {
        self.set(SESSION_KEY, value)
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.remove(SESSION_KEY)
    }
}

/// The user record handed out by a successful login
pub fn demo_user() -> User {
    let now = now_timestamp();
    User {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
        name: DEMO_NAME.to_string(),
        avatar: None,
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Check a credential pair after `delay`.
///
/// Takes owned arguments so the future can be spawned; calls are
/// independent of each other.
pub async fn authenticate(email: String, password: String, delay: Duration) -> Result<User, AuthError> {
    tokio::time::sleep(delay).await;
    if email == DEMO_EMAIL && password == DEMO_PASSWORD {
        Ok(demo_user())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

/// Current identity plus the loading/error flags a login form shows.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
    login_delay: Duration,
}

impl SessionStore {
    /// Starts in the loading state until `restore` runs.
    pub fn new(storage: Box<dyn SessionStorage>, login_delay: Duration) -> Self {
        Self {
            storage,
            user: None,
            loading: true,
            error: None,
            login_delay,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }

    pub fn storage(&self) -> &dyn SessionStorage {
        self.storage.as_ref()
    }

    /// Adopt a persisted user if there is a readable one. Unparseable
    /// entries are removed. Always leaves the store not loading.
    pub fn restore(&mut self) {
        match self.storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("event=session_restore status=ok user_id={}", user.id);
                    self.user = Some(user);
                }
                Err(e) => {
                    warn!("event=session_restore status=discarded reason={}", e);
                    if let Err(e) = self.storage.clear() {
                        warn!("event=session_clear status=error reason={}", e);
                    }
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!("event=session_restore status=error reason={}", e);
            }
        }
        self.loading = false;
    }

    /// Mark a login attempt as in flight
    pub fn begin_login(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of `authenticate`: persist and adopt the user on
    /// success, record the message on failure.
    pub fn complete_login(&mut self, result: Result<User, AuthError>) -> Result<&User, AuthError> {
        self.loading = false;
        let persisted = result.and_then(|user| {
            let encoded = serde_json::to_string(&user).map_err(SessionError::from)?;
            self.storage.save(&encoded)?;
            Ok(user)
        });

        match persisted {
            Ok(user) => {
                info!("event=login status=ok user_id={}", user.id);
                Ok(&*self.user.insert(user))
            }
            Err(e) => {
                warn!("event=login status=error reason={}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        self.begin_login();
        let result = authenticate(email.to_string(), password.to_string(), self.login_delay).await;
        self.complete_login(result).cloned()
    }

    /// Forget the user and its persisted entry. The in-memory state is
    /// cleared even when the storage call fails.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.loading = false;
        self.error = None;
        info!("event=logout status=ok");
        self.storage.clear()
    }
}
