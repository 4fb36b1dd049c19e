//! CloudTune Storage
//!
//! Persistence for the two user collections, the playlist and the
//! favorites list.
//!
//! # Architecture
//!
//! - **Key-value seam**: every backend implements [`KeyValueStore`], a blob
//!   store with `get`/`set` and no transactional semantics
//! - **Backends**: [`MemoryStore`] for tests, [`FileStore`] for one JSON file
//!   per key on disk
//! - **Collections**: [`CollectionStore`] serializes track lists and recovers
//!   from missing or corrupt blobs by falling back to empty lists
//!
//! # Example
//!
//! ```rust
//! use cloudtune_core::{SourceId, Track};
//! use cloudtune_storage::{CollectionStore, MemoryStore};
//! use std::sync::Arc;
//!
//! let collections = CollectionStore::new(Arc::new(MemoryStore::new()));
//! assert!(collections.load_playlist().is_empty());
//!
//! let playlist = vec![Track::new("1", SourceId::QQ, "夜曲", "周杰伦")];
//! collections.save_playlist(&playlist).unwrap();
//! assert_eq!(collections.load_playlist(), playlist);
//! ```

mod collections;
mod error;
mod file;
mod kv;

pub use collections::{CollectionStore, FAVORITES_KEY, PLAYLIST_KEY};
pub use error::{Result, StorageError};
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
