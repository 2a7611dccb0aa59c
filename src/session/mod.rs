//! Session state - the login flag and the active objective, persisted to durable
//! key/value storage and restored at startup.
//!
//! The store is an ordinary value owned by whoever drives the interface. It is passed
//! explicitly to the code that needs it.

/// Durable key/value storage backends
pub mod storage;
/// The session/objective store
pub mod store;

pub use storage::{KeyValueStorage, MemoryStorage, SystemStateStorage};
pub use store::{LOGIN_KEY, LoginState, OBJECTIVE_KEY, SessionStore};
