//! Entity extraction and autolinking
//!
//! # Module Organization
//!
//! ## Entities
//! - [`Entity`] - One recognized reference with its offsets
//! - [`EntityKind`] / [`EntityKinds`] - Kinds and requested-kind sets
//!
//! ## Extraction
//! - [`Extractor`] - Finds URLs, hashtags, mentions and cashtags
//! - [`regexen`] - The pattern catalog the extractor runs
//!
//! ## Offsets
//! - [`offsets`] - UTF-16 <-> code-point conversion
//!
//! ## Rendering
//! - [`Autolink`] - Turns entities into HTML anchors
//!
//! ## Validation
//! - [`Validator`] - Post length and character checks
//!
//! ## Batches
//! - [`parallel`] - Batch helpers, parallel with the `parallel` feature

/// No-op unless the `logging` feature is enabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod autolink;
pub mod entity;
pub mod error;
pub mod extractor;
pub mod offsets;
pub mod regexen;
pub mod validator;

// Batch helpers (always available, uses rayon when feature is enabled)
pub mod parallel;

// ============================================================================
// Entities
// ============================================================================

pub use entity::{Entity, EntityError, EntityKind, EntityKinds};

// ============================================================================
// Extraction
// ============================================================================

pub use extractor::{Extractor, ExtractorConfig};

// ============================================================================
// Offsets
// ============================================================================

pub use offsets::{
    to_code_point_space, to_utf16_space, units_to_code_point_space, units_to_utf16_space,
    OffsetTable,
};

// ============================================================================
// Rendering
// ============================================================================

pub use autolink::{
    default_mention_link, escape_brackets, escape_html, Autolink, AutolinkOptions,
    LinkAttributeModifier, LinkAttributes, LinkTextModifier, MentionLinker,
};
pub use error::ConfigError;

// ============================================================================
// Validation
// ============================================================================

pub use validator::{Validator, MAX_POST_LENGTH};

// ============================================================================
// Batches
// ============================================================================

pub use parallel::{auto_link_batch, auto_link_batch_owned, extract_batch};
