//! GridKit Settings Crate
//!
//! Persists the page configuration as one JSON document and restores it,
//! either merged over defaults or verbatim.

pub mod error;
pub mod persistence;
pub mod store;

pub use error::{SettingsError, SettingsResult};
pub use persistence::{merge_json, parse_document, LoadMode, StatePersistence};
pub use store::{FileStore, MemoryStore, StateStore};
