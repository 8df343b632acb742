//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from tent-text.
//! Importing this module with a wildcard import brings them into scope:
//!
//! ```
//! use tent_text::prelude::*;
//!
//! let html = Autolink::new().auto_link("#hello");
//! assert!(html.contains("class=\"hashtag\""));
//! ```
//!
//! # Re-exported Items
//!
//! ## Entities
//! - [`Entity`] - One recognized reference
//! - [`EntityKind`] - URL, hashtag, mention or cashtag
//! - [`EntityKinds`] - Set of requested kinds
//!
//! ## Extraction
//! - [`Extractor`] - Entity extractor
//! - [`ExtractorConfig`] - Extraction options
//!
//! ## Rendering
//! - [`Autolink`] - HTML autolinker
//! - [`AutolinkOptions`] - Rendering options
//! - [`LinkAttributes`] - Attribute map handed to attribute modifiers
//!
//! ## Offsets
//! - [`to_code_point_space`] / [`to_utf16_space`] - Offset conversion
//!
//! ## Validation
//! - [`Validator`] - Post validity checks
//!
//! ## Errors
//! - [`ConfigError`] - Invalid renderer options
//! - [`EntityError`] - Invalid entity span

// ============================================================================
// Entities
// ============================================================================

pub use crate::text::{Entity, EntityKind, EntityKinds};

// ============================================================================
// Extraction
// ============================================================================

pub use crate::text::{Extractor, ExtractorConfig};

// ============================================================================
// Rendering
// ============================================================================

pub use crate::text::{Autolink, AutolinkOptions, LinkAttributes};

// ============================================================================
// Offsets
// ============================================================================

pub use crate::text::{to_code_point_space, to_utf16_space};

// ============================================================================
// Validation
// ============================================================================

pub use crate::text::Validator;

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::text::{ConfigError, EntityError};
