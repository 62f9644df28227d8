//! Snapshot persistence.
//!
//! The engine hands the store opaque bytes after each mutation and reads
//! them back on construction. Encoding is the codec's job; keeping the bytes
//! is the store's.
//!
//! - `SnapshotCodec`: `GameState` to bytes and back (JSON or bincode)
//! - `SnapshotStore`: where the bytes live (memory, a file, nowhere)

pub mod codec;
pub mod store;

pub use codec::SnapshotCodec;
pub use store::{FileStore, MemoryStore, NullStore, SnapshotStore, StoreError, DEFAULT_KEY};
