//! Session invalidation notifications
//!
//! Interested layers (UI state, navigation) subscribe to the session service
//! and react when the session is torn down, typically by clearing their own
//! state and sending the user back to sign-in. The client itself performs no
//! navigation; the notification is the whole outward interface.

use async_trait::async_trait;

/// Why the session was invalidated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The proxy rejected the credential (HTTP 401 or 403)
    Rejected { status: u16 },
    /// The user signed out locally
    SignedOut,
}

/// Observer notified when the session is invalidated
#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn session_invalidated(&self, reason: &InvalidationReason);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_carries_the_status() {
        let reason = InvalidationReason::Rejected { status: 401 };
        match reason {
            InvalidationReason::Rejected { status } => assert_eq!(status, 401),
            InvalidationReason::SignedOut => panic!("expected Rejected"),
        }
    }
}
