//! The scoped key/value store with per-key change dispatch.
//!
//! `DataStore` owns one value table and one listener registry per scope.
//! Values are JSON trees; insertion order is preserved so snapshots and
//! dispatch batches replay in a stable order. Lookup is a linear scan,
//! which is the right trade at HUD scale (tens of keys per scope).

use crate::listener::{ListenerFn, ListenerRegistry};
use hudsync_shared::{DataScope, DataValue};

/// Insertion-ordered value table for a single scope.
#[derive(Debug, Default, Clone)]
pub struct ScopeTable {
    entries: Vec<(String, DataValue)>,
}

impl ScopeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// An existing key keeps its insertion position; a new key appends.
    pub fn set(&mut self, key: impl Into<String>, value: DataValue) -> Option<DataValue> {
        let key = key.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Removes `key` from the table, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<DataValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every key in the table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Scoped state store with named change listeners.
///
/// One instance owns all three scopes. All operations are synchronous and
/// take `&self`/`&mut self`; the store is single-owner by construction and
/// relies on the borrow checker instead of locks.
#[derive(Default)]
pub struct DataStore {
    values: [ScopeTable; DataScope::ALL.len()],
    listeners: [ListenerRegistry; DataScope::ALL.len()],
}

impl DataStore {
    /// Creates a store with all scopes empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key` in `scope`, if any.
    ///
    /// A missing key and a never-written key are indistinguishable.
    #[must_use]
    pub fn get(&self, scope: DataScope, key: &str) -> Option<&DataValue> {
        self.values[scope.index()].get(key)
    }

    /// Iterates the `(key, value)` pairs of `scope` in insertion order.
    pub fn scope_values(&self, scope: DataScope) -> impl Iterator<Item = (&str, &DataValue)> {
        self.values[scope.index()].iter()
    }

    /// Stores `value` under `key` in `scope`, returning the replaced value.
    ///
    /// Writing alone does not notify listeners; callers decide when to
    /// follow up with [`DataStore::trigger_listeners`].
    pub fn set(
        &mut self,
        scope: DataScope,
        key: impl Into<String>,
        value: DataValue,
    ) -> Option<DataValue> {
        self.values[scope.index()].set(key, value)
    }

    /// Removes `key` from `scope`, returning its value if present.
    pub fn remove(&mut self, scope: DataScope, key: &str) -> Option<DataValue> {
        self.values[scope.index()].remove(key)
    }

    /// Registers `callback` under `name`, watching `key` in `scope`.
    ///
    /// Re-registering an existing name replaces its callback in place;
    /// see [`ListenerRegistry::register`].
    pub fn register_listener(
        &mut self,
        scope: DataScope,
        name: impl Into<String>,
        key: impl Into<String>,
        callback: ListenerFn,
    ) {
        self.listeners[scope.index()].register(name, key, callback);
    }

    /// Removes the listener registered under `name` in `scope`.
    ///
    /// Returns `true` if a listener was removed. Unregistering a name
    /// that was never registered is a no-op and returns `false`.
    pub fn unregister_listener(&mut self, scope: DataScope, name: &str) -> bool {
        self.listeners[scope.index()].unregister(name)
    }

    /// Dispatches the current value of `key` to every listener watching it.
    ///
    /// Listeners run synchronously in registration order and receive the
    /// stored value as it is at call time (`None` if the key is absent).
    /// Returns the number of listeners invoked.
    pub fn trigger_listeners(&mut self, scope: DataScope, key: &str) -> usize {
        let value = self.values[scope.index()].get(key);
        self.listeners[scope.index()].dispatch(scope, key, value)
    }

    /// Number of listeners registered in `scope`, across all keys.
    #[must_use]
    pub fn listener_count(&self, scope: DataScope) -> usize {
        self.listeners[scope.index()].len()
    }

    /// Drops every value in `scope`; listeners stay registered.
    ///
    /// Layout reloads use this to rebuild a scope from fresh server state
    /// without tearing down the panels watching it.
    pub fn clear_values(&mut self, scope: DataScope) {
        self.values[scope.index()].clear();
    }

    /// Drops every listener in `scope`; values stay stored.
    pub fn clear_listeners(&mut self, scope: DataScope) {
        self.listeners[scope.index()].clear();
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("DataStore");
        for scope in DataScope::ALL {
            dbg.field(scope.wire_name(), &self.values[scope.index()].len());
        }
        dbg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_get_on_empty_store_is_none() {
        let store = DataStore::new();
        assert!(store.get(DataScope::Player, "gold").is_none());
    }

    #[test]
    fn test_set_then_get_returns_the_value() {
        let mut store = DataStore::new();
        store.set(DataScope::Player, "gold", json!(500));
        assert_eq!(store.get(DataScope::Player, "gold"), Some(&json!(500)));
    }

    #[test]
    fn test_scopes_are_disjoint() {
        let mut store = DataStore::new();
        store.set(DataScope::Player, "gold", json!(500));

        assert!(store.get(DataScope::Team, "gold").is_none());
        assert!(store.get(DataScope::Global, "gold").is_none());
    }

    #[test]
    fn test_set_returns_replaced_value() {
        let mut store = DataStore::new();
        assert_eq!(store.set(DataScope::Global, "phase", json!("pick")), None);
        assert_eq!(
            store.set(DataScope::Global, "phase", json!("play")),
            Some(json!("pick"))
        );
        assert_eq!(store.get(DataScope::Global, "phase"), Some(&json!("play")));
    }

    #[test]
    fn test_overwrite_keeps_insertion_order() {
        let mut store = DataStore::new();
        store.set(DataScope::Player, "gold", json!(1));
        store.set(DataScope::Player, "xp", json!(2));
        store.set(DataScope::Player, "gold", json!(3));

        let keys: Vec<&str> = store.scope_values(DataScope::Player).map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["gold", "xp"]);
    }

    #[test]
    fn test_remove_returns_value_and_forgets_key() {
        let mut store = DataStore::new();
        store.set(DataScope::Team, "score", json!(12));

        assert_eq!(store.remove(DataScope::Team, "score"), Some(json!(12)));
        assert_eq!(store.remove(DataScope::Team, "score"), None);
        assert!(store.get(DataScope::Team, "score").is_none());
    }

    #[test]
    fn test_trigger_reaches_only_listeners_on_that_scope_and_key() {
        let mut store = DataStore::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let player_hits = Arc::clone(&hits);
        store.register_listener(
            DataScope::Player,
            "hud_gold",
            "gold",
            Box::new(move |_| {
                player_hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );
        let team_hits = Arc::clone(&hits);
        store.register_listener(
            DataScope::Team,
            "hud_gold",
            "gold",
            Box::new(move |_| {
                team_hits.fetch_add(10, Ordering::SeqCst);
                Ok(())
            }),
        );

        let invoked = store.trigger_listeners(DataScope::Player, "gold");

        assert_eq!(invoked, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_trigger_passes_current_value_not_stale() {
        let mut store = DataStore::new();
        let seen = Arc::new(std::sync::Mutex::new(None));
        let seen_clone = Arc::clone(&seen);
        store.register_listener(
            DataScope::Player,
            "hud_gold",
            "gold",
            Box::new(move |update| {
                *seen_clone.lock().unwrap() = Some(update.value.cloned());
                Ok(())
            }),
        );

        store.set(DataScope::Player, "gold", json!(100));
        store.set(DataScope::Player, "gold", json!(250));
        store.trigger_listeners(DataScope::Player, "gold");

        assert_eq!(*seen.lock().unwrap(), Some(Some(json!(250))));
    }

    #[test]
    fn test_trigger_on_absent_key_passes_none() {
        let mut store = DataStore::new();
        let seen = Arc::new(std::sync::Mutex::new(None));
        let seen_clone = Arc::clone(&seen);
        store.register_listener(
            DataScope::Global,
            "watch",
            "missing",
            Box::new(move |update| {
                *seen_clone.lock().unwrap() = Some(update.value.is_none());
                Ok(())
            }),
        );

        let invoked = store.trigger_listeners(DataScope::Global, "missing");

        assert_eq!(invoked, 1);
        assert_eq!(*seen.lock().unwrap(), Some(true));
    }

    #[test]
    fn test_trigger_with_no_listeners_is_a_noop() {
        let mut store = DataStore::new();
        store.set(DataScope::Player, "gold", json!(500));
        assert_eq!(store.trigger_listeners(DataScope::Player, "gold"), 0);
    }

    #[test]
    fn test_unregister_stops_future_dispatch() {
        let mut store = DataStore::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        store.register_listener(
            DataScope::Player,
            "hud_gold",
            "gold",
            Box::new(move |_| {
                hits_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        store.trigger_listeners(DataScope::Player, "gold");
        assert!(store.unregister_listener(DataScope::Player, "hud_gold"));
        store.trigger_listeners(DataScope::Player, "gold");

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_unknown_name_is_harmless() {
        let mut store = DataStore::new();
        assert!(!store.unregister_listener(DataScope::Player, "never_registered"));
    }

    #[test]
    fn test_clear_values_keeps_listeners_and_other_scopes() {
        let mut store = DataStore::new();
        store.set(DataScope::Player, "gold", json!(500));
        store.set(DataScope::Global, "phase", json!("play"));
        store.register_listener(DataScope::Player, "watch", "gold", Box::new(|_| Ok(())));

        store.clear_values(DataScope::Player);

        assert!(store.get(DataScope::Player, "gold").is_none());
        assert_eq!(store.get(DataScope::Global, "phase"), Some(&json!("play")));
        assert_eq!(store.listener_count(DataScope::Player), 1);
    }

    #[test]
    fn test_clear_listeners_keeps_values() {
        let mut store = DataStore::new();
        store.set(DataScope::Player, "gold", json!(500));
        store.register_listener(DataScope::Player, "watch", "gold", Box::new(|_| Ok(())));

        store.clear_listeners(DataScope::Player);

        assert_eq!(store.get(DataScope::Player, "gold"), Some(&json!(500)));
        assert_eq!(store.listener_count(DataScope::Player), 0);
    }

    #[test]
    fn test_nested_json_values_round_trip_through_the_store() {
        let mut store = DataStore::new();
        let roster = json!({
            "heroes": ["axe", "lina"],
            "bans": 2,
            "locked": true
        });

        store.set(DataScope::Team, "roster", roster.clone());

        assert_eq!(store.get(DataScope::Team, "roster"), Some(&roster));
    }
}
