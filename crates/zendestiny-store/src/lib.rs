//! Persistence: the key-value capability backing saved profiles and the
//! daily-fortune cache, with in-memory and JSON-file implementations.

pub mod error;
pub mod kv;
pub mod profiles;

pub use error::StoreError;
pub use kv::{JsonFileStore, KvStore, MemoryStore};
pub use profiles::ProfileStore;
