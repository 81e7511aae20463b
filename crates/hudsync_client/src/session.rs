//! The per-game synchronization session.
//!
//! One [`GameSession`] exists per running game. It owns the store, the
//! pending-request tracker, the notice bus, and the transport, and it is
//! the only place where those pieces meet: HUD code talks to the session,
//! the host glue feeds inbound traffic into it, and nothing else holds a
//! reference to the internals.
//!
//! The session is not a singleton. Construct it where the game starts,
//! pass it to the panels that need it, drop it when the game ends.

use crate::notify::{NotifyBus, NoticeReceiver};
use crate::transport::Transport;
use hudsync_core::{DataStore, ListenerFn, RequestTracker, SyncConfig, SyncError, SyncResult};
use hudsync_shared::{
    DataRequest, DataScope, DataUpdate, DataValue, EntityTransmit, LocalNotice, RequestId,
};
use std::time::Instant;

/// Context object owning one game's synchronized state.
pub struct GameSession<T: Transport> {
    config: SyncConfig,
    store: DataStore,
    tracker: RequestTracker,
    notices: NotifyBus,
    transport: T,
}

impl<T: Transport> GameSession<T> {
    /// Creates a session with default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(SyncConfig::default(), transport)
    }

    /// Creates a session with explicit configuration.
    pub fn with_config(config: SyncConfig, transport: T) -> Self {
        let tracker = RequestTracker::new(config.request_timeout(), config.max_pending_requests);
        let notices = NotifyBus::new(config.notify_capacity);
        tracing::info!(
            timeout_ms = config.request_timeout_ms,
            max_pending = config.max_pending_requests,
            "Game session created"
        );
        Self {
            config,
            store: DataStore::new(),
            tracker,
            notices,
            transport,
        }
    }

    /// The configuration this session was built with.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    // ========================================================================
    // STORE FACADE
    // ========================================================================

    /// Returns the value stored under `key` in `scope`, if any.
    #[must_use]
    pub fn get(&self, scope: DataScope, key: &str) -> Option<&DataValue> {
        self.store.get(scope, key)
    }

    /// Iterates the `(key, value)` pairs of `scope` in insertion order.
    pub fn scope_values(&self, scope: DataScope) -> impl Iterator<Item = (&str, &DataValue)> {
        self.store.scope_values(scope)
    }

    /// Registers a named listener watching `key` in `scope`.
    pub fn register_listener(
        &mut self,
        scope: DataScope,
        name: impl Into<String>,
        key: impl Into<String>,
        callback: ListenerFn,
    ) {
        self.store.register_listener(scope, name, key, callback);
    }

    /// Removes the listener registered under `name` in `scope`.
    pub fn unregister_listener(&mut self, scope: DataScope, name: &str) -> bool {
        self.store.unregister_listener(scope, name)
    }

    /// Dispatches the current value of `key` to its listeners.
    pub fn trigger_listeners(&mut self, scope: DataScope, key: &str) -> usize {
        self.store.trigger_listeners(scope, key)
    }

    /// Number of listeners registered in `scope`.
    #[must_use]
    pub fn listener_count(&self, scope: DataScope) -> usize {
        self.store.listener_count(scope)
    }

    // ========================================================================
    // SCOPE CONVENIENCES
    // ========================================================================

    /// Returns the player-scope value under `key`, if any.
    #[must_use]
    pub fn player_data(&self, key: &str) -> Option<&DataValue> {
        self.get(DataScope::Player, key)
    }

    /// Returns the team-scope value under `key`, if any.
    #[must_use]
    pub fn team_data(&self, key: &str) -> Option<&DataValue> {
        self.get(DataScope::Team, key)
    }

    /// Returns the global-scope value under `key`, if any.
    #[must_use]
    pub fn global_data(&self, key: &str) -> Option<&DataValue> {
        self.get(DataScope::Global, key)
    }

    /// Registers a listener on the player scope.
    pub fn watch_player(
        &mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        callback: ListenerFn,
    ) {
        self.register_listener(DataScope::Player, name, key, callback);
    }

    /// Registers a listener on the team scope.
    pub fn watch_team(
        &mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        callback: ListenerFn,
    ) {
        self.register_listener(DataScope::Team, name, key, callback);
    }

    /// Registers a listener on the global scope.
    pub fn watch_global(
        &mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        callback: ListenerFn,
    ) {
        self.register_listener(DataScope::Global, name, key, callback);
    }

    /// Removes a player-scope listener by name.
    pub fn unwatch_player(&mut self, name: &str) -> bool {
        self.unregister_listener(DataScope::Player, name)
    }

    /// Removes a team-scope listener by name.
    pub fn unwatch_team(&mut self, name: &str) -> bool {
        self.unregister_listener(DataScope::Team, name)
    }

    /// Removes a global-scope listener by name.
    pub fn unwatch_global(&mut self, name: &str) -> bool {
        self.unregister_listener(DataScope::Global, name)
    }

    /// Requests a player-scope key from the server.
    pub fn request_player_data(&mut self, key: impl Into<String>) -> SyncResult<RequestId> {
        self.request_data(DataScope::Player, key)
    }

    /// Requests a team-scope key from the server.
    pub fn request_team_data(&mut self, key: impl Into<String>) -> SyncResult<RequestId> {
        self.request_data(DataScope::Team, key)
    }

    /// Requests a global-scope key from the server.
    pub fn request_global_data(&mut self, key: impl Into<String>) -> SyncResult<RequestId> {
        self.request_data(DataScope::Global, key)
    }

    // ========================================================================
    // OUTBOUND
    // ========================================================================

    /// Asks the server for the current value of `key` in `scope`.
    ///
    /// Fire-and-forget: the returned id correlates a later update with
    /// this request, but nothing guarantees the server answers. The local
    /// store is not touched; the reply lands through [`Self::apply_update`]
    /// like any other update.
    pub fn request_data(
        &mut self,
        scope: DataScope,
        key: impl Into<String>,
    ) -> SyncResult<RequestId> {
        let key = key.into();
        let id = self.tracker.track(scope, key.clone(), Instant::now());
        let request = DataRequest {
            scope,
            key,
            request_id: id,
        };
        if let Err(err) = self.transport.send_data_request(&request) {
            self.tracker.forget(id);
            return Err(SyncError::Transport(err.to_string()));
        }
        tracing::debug!(id, scope = %scope, key = %request.key, "Data request sent");
        Ok(id)
    }

    /// Asks the server for a fresh session token.
    ///
    /// Fire-and-forget with an empty payload; the reply, if any, arrives
    /// as an ordinary update.
    pub fn request_token(&mut self) -> SyncResult<()> {
        self.transport.send_token_request()?;
        tracing::debug!("Token request sent");
        Ok(())
    }

    // ========================================================================
    // INBOUND
    // ========================================================================

    /// Applies one authoritative update.
    ///
    /// In order: writes the value, dispatches the key's listeners, settles
    /// the oldest matching pending request, then re-broadcasts the change
    /// on the notice bus. Returns the number of listeners invoked.
    pub fn apply_update(&mut self, update: DataUpdate) -> usize {
        let DataUpdate { scope, key, value } = update;
        self.store.set(scope, key.clone(), value.clone());
        let invoked = self.store.trigger_listeners(scope, &key);
        if let Some(id) = self.tracker.settle(scope, &key) {
            tracing::debug!(id, scope = %scope, key = %key, "Pending request settled");
        }
        self.notices
            .emit(&LocalNotice::DataUpdated { scope, key, value });
        invoked
    }

    /// Decodes and applies a raw `data-updated` payload from the host bus.
    ///
    /// The scope string is the one field that must be well-formed; an
    /// unknown scope is rejected before anything is written. `Key` and
    /// `Value` fall back to empty and null, matching how loosely the
    /// server side builds these tables.
    pub fn apply_wire_update(&mut self, payload: &DataValue) -> SyncResult<usize> {
        let scope: DataScope = payload
            .get("DataType")
            .and_then(DataValue::as_str)
            .unwrap_or_default()
            .parse()?;
        let key = payload
            .get("Key")
            .and_then(DataValue::as_str)
            .unwrap_or_default()
            .to_string();
        let value = payload.get("Value").cloned().unwrap_or(DataValue::Null);
        Ok(self.apply_update(DataUpdate { scope, key, value }))
    }

    /// Relays an entity-scoped payload to local observers.
    ///
    /// Pass-through only: the store is never written, no listeners fire,
    /// and nothing is tracked. Observers see it as
    /// [`LocalNotice::EntityData`].
    pub fn relay_entity_data(&mut self, transmit: EntityTransmit) {
        let EntityTransmit {
            key,
            value,
            entity_index,
        } = transmit;
        tracing::debug!(key = %key, entity_index, "Entity data relayed");
        self.notices.emit(&LocalNotice::EntityData {
            key,
            value,
            entity_index,
        });
    }

    /// Decodes and relays a raw `entity-data-transmit` payload.
    pub fn relay_wire_entity_data(&mut self, payload: &DataValue) {
        let transmit = EntityTransmit {
            key: payload
                .get("Key")
                .and_then(DataValue::as_str)
                .unwrap_or_default()
                .to_string(),
            value: payload.get("Value").cloned().unwrap_or(DataValue::Null),
            entity_index: payload
                .get("EntityIndex")
                .and_then(DataValue::as_u64)
                .and_then(|i| u32::try_from(i).ok())
                .unwrap_or(0),
        };
        self.relay_entity_data(transmit);
    }

    // ========================================================================
    // OBSERVATION & MAINTENANCE
    // ========================================================================

    /// Subscribes to the local notice stream.
    pub fn subscribe(&mut self) -> NoticeReceiver {
        self.notices.subscribe()
    }

    /// Sweeps out data requests the server never answered.
    ///
    /// Call once per UI frame or on a coarse timer. Each expired request
    /// is logged; there is no retry. Returns how many expired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let expired = self.tracker.sweep(now);
        for request in &expired {
            tracing::warn!(
                id = request.id,
                scope = %request.scope,
                key = %request.key,
                "Data request expired without a reply"
            );
        }
        expired.len()
    }

    /// Number of data requests still waiting for a reply.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.tracker.pending_count()
    }
}

impl<T: Transport> std::fmt::Debug for GameSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("store", &self.store)
            .field("pending", &self.tracker.pending_count())
            .field("subscribers", &self.notices.subscriber_count())
            .finish()
    }
}
