//! Session
//!
//! Simulated sign-in: credentials are checked for presence only and the
//! resulting user record is kept in persistent storage. It exists to put a
//! name and e-mail on checkout requests.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::{PersistentStore, StoreError, USER_KEY};

/// Display name given to users who sign in without registering.
pub const DEFAULT_USER_NAME: &str = "Usuário";

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A required field was blank.
    #[error("all fields are required")]
    MissingFields,

    /// The user record could not be written or removed.
    #[error("failed to persist session")]
    Store(#[from] StoreError),

    /// The user record could not be serialized.
    #[error("failed to encode session")]
    Encode(#[from] serde_json::Error),
}

/// Signed-in user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Sign-in e-mail
    pub email: String,

    /// Display name
    pub name: String,
}

/// Mock authentication backed by the persistent store. Credentials are
/// never checked and passwords are never stored.
pub struct Session {
    store: Arc<dyn PersistentStore>,
}

impl Session {
    /// Creates a session over `store`.
    pub fn new(store: Arc<dyn PersistentStore>) -> Self {
        Self { store }
    }

    /// Signs in with an e-mail and password. Neither may be blank.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingFields`] for blank input, or a storage error.
    pub fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        if is_blank(email) || is_blank(password) {
            return Err(SessionError::MissingFields);
        }

        self.sign_in(User {
            email: email.trim().to_string(),
            name: DEFAULT_USER_NAME.to_string(),
        })
    }

    /// Registers and signs in. Name, e-mail and password are all required.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingFields`] for blank input, or a storage error.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User, SessionError> {
        if is_blank(name) || is_blank(email) || is_blank(password) {
            return Err(SessionError::MissingFields);
        }

        self.sign_in(User {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
        })
    }

    /// Forgets the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(USER_KEY)?;

        debug!("signed out");

        Ok(())
    }

    /// The signed-in user, if any. An unreadable record counts as signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn current(&self) -> Result<Option<User>, SessionError> {
        let Some(record) = self.store.load(USER_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&record) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                warn!("ignoring unreadable user record: {error}");

                Ok(None)
            }
        }
    }

    fn sign_in(&self, user: User) -> Result<User, SessionError> {
        self.store.save(USER_KEY, &serde_json::to_string(&user)?)?;

        debug!(email = %user.email, "signed in");

        Ok(user)
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn login_stores_default_name() -> TestResult {
        let session = session();

        let user = session.login("ana@example.com", "secret")?;

        assert_eq!(user.name, DEFAULT_USER_NAME);
        assert_eq!(session.current()?, Some(user));

        Ok(())
    }

    #[test]
    fn login_requires_both_fields() {
        let session = session();

        assert!(matches!(
            session.login("", "secret"),
            Err(SessionError::MissingFields)
        ));
        assert!(matches!(
            session.login("ana@example.com", "  "),
            Err(SessionError::MissingFields)
        ));
    }

    #[test]
    fn register_keeps_given_name() -> TestResult {
        let session = session();

        session.register("Ana Souza", "ana@example.com", "secret")?;

        let user = session.current()?.ok_or("expected a signed-in user")?;

        assert_eq!(user.name, "Ana Souza");
        assert_eq!(user.email, "ana@example.com");

        Ok(())
    }

    #[test]
    fn register_requires_name() {
        let result = session().register("", "ana@example.com", "secret");

        assert!(matches!(result, Err(SessionError::MissingFields)));
    }

    #[test]
    fn password_is_never_persisted() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());

        session.register("Ana", "ana@example.com", "hunter2")?;

        let record = store.load(USER_KEY)?.ok_or("expected a user record")?;

        assert!(!record.contains("hunter2"));

        Ok(())
    }

    #[test]
    fn logout_clears_user() -> TestResult {
        let session = session();
        session.login("ana@example.com", "secret")?;

        session.logout()?;

        assert_eq!(session.current()?, None);

        Ok(())
    }

    #[test]
    fn corrupt_record_reads_as_signed_out() -> TestResult {
        let session = Session::new(Arc::new(MemoryStore::with_entry(USER_KEY, "{")));

        assert_eq!(session.current()?, None);

        Ok(())
    }
}
