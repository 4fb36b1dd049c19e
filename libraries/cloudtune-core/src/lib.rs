//! CloudTune Core
//!
//! Platform-agnostic types, traits, and error handling shared by every
//! CloudTune crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackKey`, `SourceId`
//! - **Core Traits**: `CatalogLookup` (search + stream URL resolution)
//! - **Error Handling**: unified `TuneError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cloudtune_core::{SourceId, Track};
//!
//! let track = Track::new("1", SourceId::QQ, "夜曲", "周杰伦");
//! assert_eq!(track.key().source.display_name(), "QQ Music");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, TuneError};
pub use traits::CatalogLookup;
pub use types::{SourceId, Track, TrackKey};
