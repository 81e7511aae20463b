//! # HUDSYNC Core
//!
//! The store kernel: scoped key/value state with change notification.
//!
//! ## Architecture Rules
//!
//! 1. **No host bindings** - the kernel never sees the engine; transports
//!    live one crate up
//! 2. **Synchronous, run-to-completion** - every operation finishes on the
//!    calling turn; there are no suspension points and no locks
//! 3. **Isolated dispatch** - a failing listener is logged and skipped,
//!    never allowed to abort the remaining batch
//!
//! ## Example
//!
//! ```rust
//! use hudsync_core::DataStore;
//! use hudsync_shared::DataScope;
//!
//! let mut store = DataStore::new();
//! store.set(DataScope::Player, "gold", 500.into());
//! assert!(store.get(DataScope::Player, "gold").is_some());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod listener;
pub mod pending;
pub mod store;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use listener::{CallbackError, KeyUpdate, ListenerFn, ListenerRegistry};
pub use pending::{PendingRequest, RequestTracker};
pub use store::{DataStore, ScopeTable};
