//! Named change listeners and the per-scope dispatch registry.
//!
//! Listeners watch a single key inside a single scope. Names are the unit
//! of identity: registering a name that already exists replaces the old
//! callback in place, and unregistering removes by name alone. Dispatch
//! walks the registry in insertion order and never lets one failing
//! callback starve the rest of the batch.

use hudsync_shared::{DataScope, DataValue};
use thiserror::Error;

/// Failure reported by a listener callback.
///
/// Callbacks return this instead of panicking so that dispatch can log
/// the failure and carry on with the remaining listeners.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("listener callback failed: {0}")]
pub struct CallbackError(String);

impl CallbackError {
    /// Creates a callback error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Snapshot handed to a listener when its watched key changes.
#[derive(Debug)]
pub struct KeyUpdate<'a> {
    /// Scope the change landed in.
    pub scope: DataScope,
    /// Key that changed.
    pub key: &'a str,
    /// Value now stored under the key, if any.
    pub value: Option<&'a DataValue>,
    /// Name the receiving listener was registered under.
    pub listener: &'a str,
}

/// Boxed callback invoked on key changes.
pub type ListenerFn = Box<dyn FnMut(&KeyUpdate<'_>) -> Result<(), CallbackError> + Send>;

/// One named listener watching one key.
struct ListenerEntry {
    name: String,
    key: String,
    callback: ListenerFn,
}

/// Insertion-ordered listener table for a single scope.
///
/// Registration order is dispatch order. Re-registering an existing name
/// swaps the callback without moving the entry, so a listener keeps its
/// place in the batch across re-registrations.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<ListenerEntry>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `callback` under `name`, watching `key`.
    ///
    /// If `name` is already registered the entry is overwritten in place:
    /// the new callback and key take effect but the entry keeps its
    /// original dispatch position.
    pub fn register(&mut self, name: impl Into<String>, key: impl Into<String>, callback: ListenerFn) {
        let name = name.into();
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.key = key;
            entry.callback = callback;
            return;
        }
        self.entries.push(ListenerEntry {
            name,
            key,
            callback,
        });
    }

    /// Removes the listener registered under `name`.
    ///
    /// Returns `true` if an entry was removed, `false` if the name was
    /// never registered (or already removed).
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// Invokes every listener watching `key`, in registration order.
    ///
    /// A callback that returns an error is logged and skipped; dispatch
    /// continues with the rest of the batch. Returns the number of
    /// listeners invoked.
    pub fn dispatch(&mut self, scope: DataScope, key: &str, value: Option<&DataValue>) -> usize {
        let mut invoked = 0;
        for entry in self.entries.iter_mut().filter(|e| e.key == key) {
            invoked += 1;
            let update = KeyUpdate {
                scope,
                key,
                value,
                listener: &entry.name,
            };
            if let Err(err) = (entry.callback)(&update) {
                tracing::warn!(
                    listener = %entry.name,
                    %scope,
                    key,
                    %err,
                    "Listener callback failed, continuing dispatch"
                );
            }
        }
        invoked
    }

    /// Number of listeners currently registered, across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every listener in the registry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}
