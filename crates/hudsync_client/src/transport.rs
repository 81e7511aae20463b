//! The transport seam between the session and the host event bus.
//!
//! The session never talks to the host runtime directly. It talks to a
//! [`Transport`], and the host glue implements it. Everything here is
//! fire-and-forget by contract: a successful send means the verb left the
//! session, not that the server acted on it.

use hudsync_core::SyncError;
use hudsync_shared::DataRequest;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Failure to hand a verb to the host event bus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The host side is gone (panel torn down, connection dropped).
    #[error("transport is closed")]
    Closed,

    /// The host bus refused the verb.
    #[error("host bus rejected {verb}: {reason}")]
    Rejected {
        /// Wire verb that was being sent.
        verb: &'static str,
        /// Host-supplied reason.
        reason: String,
    },
}

impl From<TransportError> for SyncError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Outbound verbs the session can emit.
///
/// Implementations translate these calls into whatever the host runtime
/// expects. They must not block: the session runs on the UI turn.
pub trait Transport: Send {
    /// Emits the `request-data` verb with the given payload.
    fn send_data_request(&mut self, request: &DataRequest) -> Result<(), TransportError>;

    /// Emits the `request-token` verb. The payload is empty.
    fn send_token_request(&mut self) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_data_request(&mut self, request: &DataRequest) -> Result<(), TransportError> {
        (**self).send_data_request(request)
    }

    fn send_token_request(&mut self) -> Result<(), TransportError> {
        (**self).send_token_request()
    }
}

// ============================================================================
// TEST DOUBLES
// ============================================================================

/// Everything a [`MockTransport`] has been asked to send.
#[derive(Debug, Default, Clone)]
pub struct TransportLog {
    /// `request-data` payloads, in send order.
    pub data_requests: Vec<DataRequest>,
    /// How many times the token verb was emitted.
    pub token_requests: usize,
}

/// Shared handle to a [`MockTransport`]'s log.
pub type SharedLog = Arc<Mutex<TransportLog>>;

/// Recording transport for tests.
///
/// Keeps a shared log the test holds onto while the session owns the
/// transport itself.
#[derive(Debug, Default)]
pub struct MockTransport {
    log: Arc<Mutex<TransportLog>>,
    reject_sends: bool,
}

impl MockTransport {
    /// Creates a mock that accepts every send.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that rejects every send.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            log: Arc::new(Mutex::new(TransportLog::default())),
            reject_sends: true,
        }
    }

    /// Handle to the send log, for assertions after the session takes
    /// ownership of the mock.
    #[must_use]
    pub fn log_handle(&self) -> SharedLog {
        Arc::clone(&self.log)
    }
}

impl Transport for MockTransport {
    fn send_data_request(&mut self, request: &DataRequest) -> Result<(), TransportError> {
        if self.reject_sends {
            return Err(TransportError::Rejected {
                verb: hudsync_shared::constants::EV_REQUEST_DATA,
                reason: "mock configured to reject".to_string(),
            });
        }
        self.log.lock().data_requests.push(request.clone());
        Ok(())
    }

    fn send_token_request(&mut self) -> Result<(), TransportError> {
        if self.reject_sends {
            return Err(TransportError::Rejected {
                verb: hudsync_shared::constants::EV_REQUEST_TOKEN,
                reason: "mock configured to reject".to_string(),
            });
        }
        self.log.lock().token_requests += 1;
        Ok(())
    }
}

/// Transport that silently drops everything.
///
/// Lets HUD layouts run and render with no server behind them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl NullTransport {
    /// Creates a null transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Transport for NullTransport {
    fn send_data_request(&mut self, _request: &DataRequest) -> Result<(), TransportError> {
        Ok(())
    }

    fn send_token_request(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
