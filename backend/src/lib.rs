//! Backend for the budget tracker.
//!
//! Everything the presentation layer needs short of rendering: the two
//! persistence variants behind one capability set, the session state machine
//! that gates the remote variant, the pure aggregator that derives totals,
//! and the command service the UI issues add/delete through.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod storage;
pub mod subscription;

pub use auth::{AuthProvider, MemoryAuthProvider};
pub use config::{AppConfig, StoreMode};
pub use domain::aggregator::{aggregate, aggregate_snapshot};
pub use domain::entry_service::EntryService;
pub use error::{AuthError, BudgetError, StoreError};
pub use session::{SessionManager, SessionState};
pub use storage::{
    DocumentStore, EntryStore, LocalStore, MemoryDocumentStore, RemoteStore, Snapshot,
};
pub use subscription::SubscriptionHandle;
