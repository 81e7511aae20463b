//! Payloads exchanged with the host event bus.
//!
//! The host runtime owns the actual wire serialization; these are the
//! structures both sides agree on. Field renames keep the JSON shape
//! identical to the event tables the existing server scripts emit.

use crate::scope::DataScope;
use serde::{Deserialize, Serialize};

/// Dynamic value stored under a key.
///
/// HUD payloads are JSON-shaped tables. Last write wins; there is no
/// versioning and no merge.
pub type DataValue = serde_json::Value;

/// Correlation id for an outbound data request.
///
/// Allocated per session, monotonically increasing, never reused within a
/// session's lifetime.
pub type RequestId = u64;

/// Outbound `request-data` payload (client → server).
///
/// Fire-and-forget: the reply, if any, arrives later as a [`DataUpdate`]
/// with no transport-level correlation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    /// Scope the key lives in.
    #[serde(rename = "DataType")]
    pub scope: DataScope,
    /// Requested key.
    #[serde(rename = "Key")]
    pub key: String,
    /// Correlation id allocated by the requesting session.
    #[serde(rename = "RequestId")]
    pub request_id: RequestId,
}

/// Inbound `data-updated` payload (server → client).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataUpdate {
    /// Scope the key lives in.
    #[serde(rename = "DataType")]
    pub scope: DataScope,
    /// Updated key.
    #[serde(rename = "Key")]
    pub key: String,
    /// New value. Replaces whatever was stored before.
    #[serde(rename = "Value")]
    pub value: DataValue,
}

/// Inbound `entity-data-transmit` payload (server → client).
///
/// Relayed to local observers as-is; never written to the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityTransmit {
    /// Payload key.
    #[serde(rename = "Key")]
    pub key: String,
    /// Payload value.
    #[serde(rename = "Value")]
    pub value: DataValue,
    /// Index of the entity this payload belongs to.
    #[serde(rename = "EntityIndex")]
    pub entity_index: u32,
}

/// Local-only notice re-broadcast after inbound traffic is handled.
///
/// Catch-all observers (debug overlays, recorders) subscribe to these
/// instead of registering a per-key listener for every key they might
/// care about. Notices never leave the process.
#[derive(Clone, Debug, PartialEq)]
pub enum LocalNotice {
    /// A key changed; the store already holds the new value.
    DataUpdated {
        /// Scope the key lives in.
        scope: DataScope,
        /// Updated key.
        key: String,
        /// The value that was written.
        value: DataValue,
    },
    /// Entity-scoped payload passed through without a store write.
    EntityData {
        /// Payload key.
        key: String,
        /// Payload value.
        value: DataValue,
        /// Index of the entity this payload belongs to.
        entity_index: u32,
    },
}

impl LocalNotice {
    /// Returns the key this notice is about.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::DataUpdated { key, .. } | Self::EntityData { key, .. } => key,
        }
    }

    /// Returns the scope, if the notice concerns stored data.
    ///
    /// Entity pass-through payloads have no scope: they never touch the
    /// store.
    #[must_use]
    pub const fn scope(&self) -> Option<DataScope> {
        match self {
            Self::DataUpdated { scope, .. } => Some(*scope),
            Self::EntityData { .. } => None,
        }
    }
}
