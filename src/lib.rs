//! Tent Text - entity extraction and autolinking for short posts
//!
//! This library finds references in free-form text and renders them as
//! HTML links. It provides:
//! - Extraction of URLs, `#hashtags`, `^mentions`, `^mention/lists` and `$cashtags`
//! - Sorted, non-overlapping entity sequences with UTF-16 offsets
//! - Offset conversion between UTF-16 code units and code points
//! - HTML autolinking with configurable classes, hrefs and modifiers
//! - Post validation by weighted length
//! - Batch helpers, optionally parallel
//! - Optional WASM bindings
//!
//! ## Quick Start
//!
//! ```rust
//! use tent_text::text::{Autolink, Extractor};
//!
//! let text = "Reading ^alice's #rust notes at https://example.com";
//!
//! let entities = Extractor::new().extract_entities_with_indices(text);
//! assert_eq!(entities.len(), 3);
//!
//! let html = Autolink::new().auto_link(text);
//! assert!(html.contains("href=\"https://alice.tent.is\""));
//! ```
//!
//! ## Offsets
//!
//! Entity offsets are UTF-16 code units, matching JavaScript string
//! indices. Convert them when counting code points:
//!
//! ```rust
//! use tent_text::text::{offsets, Extractor};
//!
//! let text = "\u{1F602} #tag";
//! let mut entities = Extractor::new().extract_hashtags_with_indices(text);
//! assert_eq!((entities[0].start, entities[0].end), (3, 7));
//!
//! offsets::to_code_point_space(text, &mut entities);
//! assert_eq!((entities[0].start, entities[0].end), (2, 6));
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Run batch helpers on the rayon thread pool
//! - `wasm` - Enable WebAssembly bindings

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]

// Prelude module for convenient imports
pub mod prelude;

// Extraction, offsets, rendering and validation
pub mod text;

/// Re-export commonly used types for convenience
pub use text::{
    Autolink, AutolinkOptions, ConfigError, Entity, EntityError, EntityKind, EntityKinds,
    Extractor, ExtractorConfig, LinkAttributes, OffsetTable, Validator,
};

// Conditional compilation for WASM bindings
#[cfg(feature = "wasm")]
mod wasm;
