//! Session state: storage seam, observer notifications, and the service
//! that ties them together.

pub mod events;
pub mod service;
pub mod storage;

pub use events::{InvalidationReason, SessionObserver};
pub use service::{Session, SessionService};
pub use storage::{MemoryStorage, SessionStorage, SESSION_STORAGE_KEY};
