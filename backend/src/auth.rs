//! The authentication provider, modeled as an opaque capability.
//!
//! The provider owns credentials and the notion of "currently signed in";
//! the rest of the system only consumes the identity it reports and the
//! session-change notifications. [`MemoryAuthProvider`] is the in-process
//! implementation used in development and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{info, warn};
use shared::{Session, UserId};
use uuid::Uuid;

use crate::error::AuthError;
use crate::subscription::{Listeners, SubscriptionHandle};

/// Listener invoked with `Some(session)` on sign-in (or resume) and `None`
/// on sign-out.
pub type SessionListener = Box<dyn Fn(&Option<Session>) + Send>;

/// Opaque capability producing a user identity and session-change
/// notifications.
pub trait AuthProvider: Send + Sync {
    /// Authenticate an existing account. Success also fires the
    /// session-change listeners.
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Create an account and sign it in. Success also fires the
    /// session-change listeners.
    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// End the current session, if any. Fires the listeners with `None`.
    fn sign_out(&self);

    /// Register for session-change notifications. The registration lasts as
    /// long as the returned handle.
    fn on_session_change(&self, listener: SessionListener) -> SubscriptionHandle;

    /// Report the current session state (a resumed session or its absence)
    /// to registered listeners. Called once at startup, after listeners are
    /// in place, to resolve the initial "unknown" state.
    fn resume(&self);
}

const MIN_PASSWORD_CHARS: usize = 6;

struct Account {
    user_id: UserId,
    password: String,
}

/// In-process authentication provider: an email/password map and a current
/// session.
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<Session>>,
    listeners: Arc<Listeners<Option<Session>>>,
}

impl MemoryAuthProvider {
    /// Provider with no accounts and no session.
    pub fn new() -> Self {
        MemoryAuthProvider {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            listeners: Listeners::new(),
        }
    }

    /// Provider with one pre-registered account, convenient for development
    /// and tests.
    pub fn with_account(email: &str, password: &str) -> Self {
        let provider = Self::new();
        provider.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                user_id: UserId::new(Uuid::new_v4().to_string()),
                password: password.to_string(),
            },
        );
        provider
    }

    /// Provider that resumes an already-signed-in session for `email` when
    /// [`AuthProvider::resume`] is called.
    pub fn with_resumed_session(email: &str, password: &str) -> Self {
        let provider = Self::with_account(email, password);
        let session = {
            let accounts = provider.accounts.lock().unwrap();
            let account = accounts.get(email).expect("account just inserted");
            Session {
                user_id: account.user_id.clone(),
                email: email.to_string(),
            }
        };
        *provider.current.lock().unwrap() = Some(session);
        provider
    }

    fn set_current(&self, session: Option<Session>) {
        *self.current.lock().unwrap() = session.clone();
        self.listeners.notify(&session);
    }
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for MemoryAuthProvider {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some(account) if account.password == password => Session {
                    user_id: account.user_id.clone(),
                    email: email.to_string(),
                },
                _ => {
                    warn!("sign-in rejected for {email}");
                    return Err(AuthError::InvalidCredentials);
                }
            }
        };
        info!("signed in as {email}");
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::WeakPassword);
        }

        let session = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::AccountExists);
            }
            let user_id = UserId::new(Uuid::new_v4().to_string());
            accounts.insert(
                email.to_string(),
                Account {
                    user_id: user_id.clone(),
                    password: password.to_string(),
                },
            );
            Session {
                user_id,
                email: email.to_string(),
            }
        };
        info!("created account for {email}");
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    fn sign_out(&self) {
        info!("signed out");
        self.set_current(None);
    }

    fn on_session_change(&self, listener: SessionListener) -> SubscriptionHandle {
        self.listeners.subscribe(listener)
    }

    fn resume(&self) {
        let current = self.current.lock().unwrap().clone();
        self.listeners.notify(&current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_provider_has_no_accounts_and_no_session() {
        let provider = MemoryAuthProvider::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            provider.on_session_change(Box::new(move |session| {
                seen.lock().unwrap().push(session.clone());
            }))
        };

        provider.resume();
        assert_eq!(*seen.lock().unwrap(), vec![None]);

        let err = provider.sign_in("me@example.com", "hunter22").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn sign_in_with_wrong_password_is_invalid_credentials() {
        let provider = MemoryAuthProvider::with_account("me@example.com", "hunter22");
        let err = provider.sign_in("me@example.com", "wrong").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);

        let err = provider.sign_in("nobody@example.com", "hunter22").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn sign_up_enforces_password_strength_and_uniqueness() {
        let provider = MemoryAuthProvider::with_account("taken@example.com", "hunter22");

        let err = provider.sign_up("new@example.com", "short").unwrap_err();
        assert_eq!(err, AuthError::WeakPassword);

        let err = provider.sign_up("taken@example.com", "long-enough").unwrap_err();
        assert_eq!(err, AuthError::AccountExists);

        let session = provider.sign_up("new@example.com", "long-enough").unwrap();
        assert_eq!(session.email, "new@example.com");
    }

    #[test]
    fn sign_up_then_sign_in_yields_the_same_identity() {
        let provider = MemoryAuthProvider::new();
        let created = provider.sign_up("me@example.com", "hunter22").unwrap();
        provider.sign_out();
        let resumed = provider.sign_in("me@example.com", "hunter22").unwrap();
        assert_eq!(created.user_id, resumed.user_id);
    }

    #[test]
    fn resume_reports_the_persisted_session() {
        let provider = MemoryAuthProvider::with_resumed_session("me@example.com", "hunter22");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            provider.on_session_change(Box::new(move |session| {
                seen.lock().unwrap().push(session.clone());
            }))
        };

        provider.resume();
        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().email, "me@example.com");
    }
}
