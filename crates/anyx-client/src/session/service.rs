//! Session-state service
//!
//! One place owns the stored credential: reads parse the record on demand,
//! sign-in flows store it, and invalidation clears the record and notifies
//! every subscriber. A malformed stored record is never fatal; it is logged
//! and treated as "no session".

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::session::events::{InvalidationReason, SessionObserver};
use crate::session::storage::{SessionStorage, SESSION_STORAGE_KEY};

/// Persisted credential bundle. Extra fields in the stored record are
/// tolerated and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to authenticated requests
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// Owns the stored session and the invalidation subscriber list
pub struct SessionService {
    storage: Arc<dyn SessionStorage>,
    observers: RwLock<Vec<Arc<dyn SessionObserver>>>,
}

impl SessionService {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer for invalidation notifications
    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) {
        self.observers.write().unwrap().push(observer);
    }

    /// Current session, if a valid record is stored. A record that fails to
    /// parse yields `None` and a warning; requests then go out anonymously.
    pub fn current(&self) -> Option<Session> {
        let raw = self.storage.read(SESSION_STORAGE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!("Stored session record is not a valid session, ignoring it: {}", err);
                None
            }
        }
    }

    /// Bearer token of the current session, if any
    pub fn access_token(&self) -> Option<String> {
        self.current().map(|session| session.access_token)
    }

    /// Persist a session record (called by the sign-in flow)
    pub fn store(&self, session: &Session) -> ClientResult<()> {
        let raw = serde_json::to_string(session)?;
        self.storage.write(SESSION_STORAGE_KEY, &raw);
        Ok(())
    }

    /// Clear the stored record and notify every subscriber exactly once
    pub async fn invalidate(&self, reason: InvalidationReason) {
        self.storage.remove(SESSION_STORAGE_KEY);
        debug!("Session invalidated: {:?}", reason);

        let observers: Vec<Arc<dyn SessionObserver>> = self.observers.read().unwrap().clone();
        for observer in observers {
            observer.session_invalidated(&reason).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingObserver {
        seen: Mutex<Vec<InvalidationReason>>,
    }

    impl RecordingObserver {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }

        fn reasons(&self) -> Vec<InvalidationReason> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionObserver for RecordingObserver {
        async fn session_invalidated(&self, reason: &InvalidationReason) {
            self.seen.lock().unwrap().push(*reason);
        }
    }

    fn service() -> SessionService {
        SessionService::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_store_then_current_roundtrips() {
        let service = service();
        assert!(service.current().is_none());

        service.store(&Session::new("token-1")).unwrap();
        assert_eq!(service.current(), Some(Session::new("token-1")));
        assert_eq!(service.access_token().as_deref(), Some("token-1"));
    }

    #[test]
    fn test_extra_fields_in_the_record_are_tolerated() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(
            SESSION_STORAGE_KEY,
            r#"{"access_token":"token-2","refresh_token":"r","user":{"id":7}}"#,
        );

        let service = SessionService::new(storage);
        assert_eq!(service.access_token().as_deref(), Some("token-2"));
    }

    #[test]
    fn test_malformed_record_reads_as_no_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(SESSION_STORAGE_KEY, "{definitely not json");

        let service = SessionService::new(storage);
        assert!(service.current().is_none());
        assert!(service.access_token().is_none());
    }

    #[test]
    fn test_record_without_token_reads_as_no_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(SESSION_STORAGE_KEY, r#"{"user":"somebody"}"#);

        let service = SessionService::new(storage);
        assert!(service.current().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_clears_the_record_and_notifies_each_subscriber_once() {
        let storage = Arc::new(MemoryStorage::new());
        let service = SessionService::new(storage.clone());
        service.store(&Session::new("token-3")).unwrap();

        let first = Arc::new(RecordingObserver::new());
        let second = Arc::new(RecordingObserver::new());
        service.subscribe(first.clone());
        service.subscribe(second.clone());

        service
            .invalidate(InvalidationReason::Rejected { status: 401 })
            .await;

        assert!(storage.read(SESSION_STORAGE_KEY).is_none());
        assert!(service.current().is_none());
        assert_eq!(
            first.reasons(),
            vec![InvalidationReason::Rejected { status: 401 }]
        );
        assert_eq!(
            second.reasons(),
            vec![InvalidationReason::Rejected { status: 401 }]
        );
    }

    #[tokio::test]
    async fn test_invalidate_without_subscribers_still_clears() {
        let service = service();
        service.store(&Session::new("token-4")).unwrap();

        service.invalidate(InvalidationReason::SignedOut).await;
        assert!(service.current().is_none());
    }
}
