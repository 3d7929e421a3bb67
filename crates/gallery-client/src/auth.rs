//! Display-name panel and its storage port.
//!
//! There is no authentication: the "login" only records a display name under
//! a fixed key so it survives restarts, exactly like a browser's local
//! storage entry.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Storage key under which the display name is kept.
pub const DISPLAY_NAME_KEY: &str = "user";

/// Errors raised by display-name stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage could not be read or written.
    #[error("display name store failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a login attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// The submitted name is missing or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Port for persisting the display name across sessions.
pub trait DisplayNameStore: Send + Sync {
    /// Load the stored name, if one exists.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Store the name, replacing any previous value.
    fn save(&self, name: &str) -> Result<(), StoreError>;

    /// Remove the stored name.
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store writing the name under [`DISPLAY_NAME_KEY`] in a
/// directory of the host's choosing.
pub struct FileDisplayNameStore {
    dir: PathBuf,
}

impl FileDisplayNameStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(DISPLAY_NAME_KEY)
    }
}

impl DisplayNameStore for FileDisplayNameStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path()) {
            Ok(name) => Ok(Some(name)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, name: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(), name)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct InMemoryDisplayNameStore {
    name: Mutex<Option<String>>,
}

impl InMemoryDisplayNameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayNameStore for InMemoryDisplayNameStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.name.lock().map(|name| name.clone()).unwrap_or(None))
    }

    fn save(&self, name: &str) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.name.lock() {
            *slot = Some(name.to_owned());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.name.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Display-name panel state.
pub struct AuthPanel {
    store: Box<dyn DisplayNameStore>,
    user: Option<String>,
}

impl AuthPanel {
    /// Create the panel, restoring any previously stored name.
    ///
    /// A store that fails to load is treated as empty; the user can still
    /// log in for the session.
    pub fn new(store: Box<dyn DisplayNameStore>) -> Self {
        let user = match store.load() {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "stored display name unavailable");
                None
            }
        };
        Self { store, user }
    }

    /// The current display name, if one is set.
    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Record the display name and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::EmptyUsername`] when the name is blank. A store
    /// write failure is logged but does not fail the login; the name still
    /// applies for the session.
    pub fn login(&mut self, username: &str) -> Result<(), LoginError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(LoginError::EmptyUsername);
        }
        if let Err(err) = self.store.save(trimmed) {
            warn!(error = %err, "display name not persisted");
        }
        self.user = Some(trimmed.to_owned());
        Ok(())
    }

    /// Forget the display name, in memory and in the store.
    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "stored display name not cleared");
        }
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn login_records_and_persists_the_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut panel = AuthPanel::new(Box::new(FileDisplayNameStore::new(dir.path())));

        panel.login("ada").expect("login succeeds");
        assert_eq!(panel.current_user(), Some("ada"));

        // A fresh panel over the same directory restores the name.
        let restored = AuthPanel::new(Box::new(FileDisplayNameStore::new(dir.path())));
        assert_eq!(restored.current_user(), Some("ada"));
    }

    #[test]
    fn logout_forgets_the_name_durably() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut panel = AuthPanel::new(Box::new(FileDisplayNameStore::new(dir.path())));
        panel.login("ada").expect("login succeeds");

        panel.logout();
        assert_eq!(panel.current_user(), None);

        let restored = AuthPanel::new(Box::new(FileDisplayNameStore::new(dir.path())));
        assert_eq!(restored.current_user(), None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_names_are_rejected(#[case] username: &str) {
        let mut panel = AuthPanel::new(Box::new(InMemoryDisplayNameStore::new()));
        assert_eq!(panel.login(username), Err(LoginError::EmptyUsername));
        assert_eq!(panel.current_user(), None);
    }

    #[test]
    fn login_trims_surrounding_whitespace() {
        let mut panel = AuthPanel::new(Box::new(InMemoryDisplayNameStore::new()));
        panel.login("  ada  ").expect("login succeeds");
        assert_eq!(panel.current_user(), Some("ada"));
    }

    #[test]
    fn file_store_uses_the_fixed_key_as_filename() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileDisplayNameStore::new(dir.path());
        store.save("ada").expect("save succeeds");

        assert!(dir.path().join(DISPLAY_NAME_KEY).exists());
    }
}
