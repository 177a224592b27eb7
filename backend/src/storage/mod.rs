//! # Storage
//!
//! The persistence adapter: one capability set, two interchangeable
//! variants. [`LocalStore`] persists durable JSON snapshots on disk;
//! [`RemoteStore`] adapts an opaque [`DocumentStore`] capability scoped to
//! the signed-in user. The presentation layer exists once and talks to
//! either through [`EntryStore`].

pub mod document;
pub mod local;
pub mod memory;
pub mod remote;
pub mod traits;

pub use document::DocumentStore;
pub use local::LocalStore;
pub use memory::MemoryDocumentStore;
pub use remote::RemoteStore;
pub use traits::{EntryStore, Snapshot, SnapshotListener};
