//! # store
//!
//! String key/value storage with typed getters, plus the frozen
//! [`NameTable`] used to select a storage kind. The backends are plain
//! in-memory maps standing in for whatever scoped storage the host
//! provides; the typed getters coerce through `tools` and substitute the
//! caller's fallback on anything missing or malformed.

mod error;
mod name_table;
mod storage;

pub use error::StoreError;
pub use name_table::{INVALID_NAME, NameTable};
pub use storage::{LOCAL, SESSION, StorageManager, storage_kinds};
