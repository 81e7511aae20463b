//! Error types shared across the synchronization stack.

use hudsync_shared::UnknownScope;
use thiserror::Error;

/// Errors surfaced by store, session, and transport operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// An inbound payload named a scope the store does not track.
    #[error(transparent)]
    UnknownScope(#[from] UnknownScope),

    /// The transport rejected or failed to deliver an outbound message.
    #[error("transport send failed: {0}")]
    Transport(String),

    /// Configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for fallible synchronization operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scope_message_names_the_scope() {
        let err = SyncError::from(UnknownScope("HeroData".to_string()));
        assert!(err.to_string().contains("HeroData"));
    }

    #[test]
    fn test_transport_error_is_descriptive() {
        let err = SyncError::Transport("channel closed".to_string());
        assert_eq!(err.to_string(), "transport send failed: channel closed");
    }
}
