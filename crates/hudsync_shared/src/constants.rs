//! Wire event names and protocol defaults.
//!
//! **CRITICAL:** the authoritative side subscribes to and emits these exact
//! strings. Changing one here without redeploying the server scripts splits
//! the protocol.

// =============================================================================
// EVENT NAMES - CLIENT → SERVER
// =============================================================================

/// Fire-and-forget request for one key's current value.
pub const EV_REQUEST_DATA: &str = "_cl_data_handler_request";

/// Request for a fresh session token.
pub const EV_REQUEST_TOKEN: &str = "_cl_data_handler_request_token";

// =============================================================================
// EVENT NAMES - SERVER → CLIENT
// =============================================================================

/// A key changed on the authoritative side.
pub const EV_DATA_UPDATED: &str = "_sv_data_handler_updated";

/// Entity-scoped payload relayed past the store to local observers.
///
/// Spelling kept verbatim: live server scripts already emit this name.
pub const EV_ENTITY_TRANSMIT: &str = "_sv_data_handler_transmite_entity_data";

// =============================================================================
// EVENT NAMES - LOCAL RE-BROADCAST
// =============================================================================

/// Local notice: a key was written and its listeners were dispatched.
pub const EV_LOCAL_UPDATED: &str = "_cl_data_handler_updated";

/// Local notice: an entity payload passed through.
///
/// Spelling kept verbatim, same reason as [`EV_ENTITY_TRANSMIT`].
pub const EV_LOCAL_ENTITY_TRANSMIT: &str = "_cl_data_handler_transmite_entity_data";

// =============================================================================
// PROTOCOL DEFAULTS
// =============================================================================

/// Default deadline for a pending data request before the sweep drops it.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// Default cap on outstanding data requests per session.
pub const DEFAULT_MAX_PENDING: usize = 64;

/// Default capacity of each raw-notice subscriber channel.
pub const DEFAULT_NOTIFY_CAPACITY: usize = 1024;
