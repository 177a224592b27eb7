//! Session state machine for the remote variant.
//!
//! Three states: `Unknown` until the provider makes its first report, then
//! `Authenticated` or `Unauthenticated` as the provider announces changes.
//! While `Unknown` the presentation layer shows a loading indicator and
//! issues no store calls; leaving `Authenticated` must drop any open store
//! subscriptions so no live query outlives the identity it was scoped to.

use std::sync::{Arc, Mutex};

use log::info;
use shared::Session;

use crate::auth::AuthProvider;
use crate::error::AuthError;
use crate::subscription::{Listeners, SubscriptionHandle};

/// Where the session machine currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No determination yet; the provider has not reported.
    Unknown,
    /// No signed-in user.
    Unauthenticated,
    /// A signed-in user; carries the identity store scopes are built from.
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Listener invoked on every state transition.
pub type SessionStateListener = Box<dyn Fn(&SessionState) + Send>;

/// Tracks the current authenticated identity and fans out transitions.
///
/// Owns the provider registration: dropping the manager stops the updates.
pub struct SessionManager {
    provider: Arc<dyn AuthProvider>,
    state: Arc<Mutex<SessionState>>,
    listeners: Arc<Listeners<SessionState>>,
    _provider_sub: SubscriptionHandle,
}

impl SessionManager {
    /// Register with the provider and start in `Unknown`. Call
    /// [`resume`](Self::resume) afterwards to trigger the provider's initial
    /// report.
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let state = Arc::new(Mutex::new(SessionState::Unknown));
        let listeners: Arc<Listeners<SessionState>> = Listeners::new();

        let provider_sub = {
            let state = state.clone();
            let listeners = listeners.clone();
            provider.on_session_change(Box::new(move |session| {
                let next = match session {
                    Some(session) => SessionState::Authenticated(session.clone()),
                    None => SessionState::Unauthenticated,
                };
                info!(
                    "session transition: {}",
                    match &next {
                        SessionState::Authenticated(s) => format!("authenticated as {}", s.email),
                        _ => "unauthenticated".to_string(),
                    }
                );
                *state.lock().unwrap() = next.clone();
                listeners.notify(&next);
            }))
        };

        SessionManager {
            provider,
            state,
            listeners,
            _provider_sub: provider_sub,
        }
    }

    /// Ask the provider for its initial determination (resumed session or
    /// none). Until it answers, [`state`](Self::state) stays `Unknown`.
    pub fn resume(&self) {
        self.provider.resume();
    }

    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    /// Register for state transitions; lasts as long as the handle.
    pub fn on_change(&self, listener: SessionStateListener) -> SubscriptionHandle {
        self.listeners.subscribe(listener)
    }

    /// Forwarded to the provider. A failure is returned verbatim to the
    /// caller's form and leaves the session state untouched.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.provider.sign_in(email, password)
    }

    /// Forwarded to the provider; same failure contract as `sign_in`.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.provider.sign_up(email, password)
    }

    pub fn sign_out(&self) {
        self.provider.sign_out();
    }
}
