//! # HUDSYNC Client
//!
//! Client-side integration for the store kernel: the session that owns a
//! game's synchronized state, the transport seam to the host event bus,
//! the local notice fan-out, and the HUD glue (mouse registry, formatting
//! helpers).
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────┐  request-data / request-token   ┌──────────────┐
//! │  Game    │ ───────────────────────────────>│  Transport   │──> server
//! │ Session  │                                 └──────────────┘
//! │          │  data-updated / entity-transmit ┌──────────────┐
//! │          │ <───────────────────────────────│  host glue   │<── server
//! └────┬─────┘                                 └──────────────┘
//!      │ write → trigger → settle → notice
//!      ▼
//! per-key listeners + NotifyBus subscribers
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hudsync_client::{GameSession, NullTransport};
//! use hudsync_shared::{DataScope, DataUpdate, DataValue};
//!
//! let mut session = GameSession::new(NullTransport::new());
//! session.watch_player("hud_gold", "gold", Box::new(|update| {
//!     // repaint the gold label from update.value
//!     let _ = update.value;
//!     Ok(())
//! }));
//!
//! session.apply_update(DataUpdate {
//!     scope: DataScope::Player,
//!     key: "gold".to_string(),
//!     value: DataValue::from(500),
//! });
//! assert_eq!(session.player_data("gold"), Some(&DataValue::from(500)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod hud;
pub mod input;
pub mod notify;
pub mod session;
pub mod transport;

pub use input::{MouseCallbackFn, MouseCallbacks, MouseStatus};
pub use notify::{NoticeReceiver, NotifyBus};
pub use session::GameSession;
pub use transport::{MockTransport, NullTransport, SharedLog, Transport, TransportError};
