//! Extracted entities
//!
//! An [`Entity`] describes one recognized reference in a post: its kind, the
//! half-open range it covers and the canonical value. Offsets start out in
//! UTF-16 code-unit space; see [`offsets`](super::offsets) for conversion to
//! code-point space.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of reference an [`Entity`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A URL, with or without scheme
    Url,
    /// A `#hashtag`
    Hashtag,
    /// A `^mention` or a `^mention/list`
    MentionOrList,
    /// A `$cashtag`
    Cashtag,
}

impl EntityKind {
    /// All kinds, in extraction order
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Url,
        EntityKind::Hashtag,
        EntityKind::MentionOrList,
        EntityKind::Cashtag,
    ];

    #[inline]
    fn bit(self) -> u8 {
        match self {
            EntityKind::Url => 1,
            EntityKind::Hashtag => 1 << 1,
            EntityKind::MentionOrList => 1 << 2,
            EntityKind::Cashtag => 1 << 3,
        }
    }

    /// Short lowercase name, as used in serialized output
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Url => "url",
            EntityKind::Hashtag => "hashtag",
            EntityKind::MentionOrList => "mention_or_list",
            EntityKind::Cashtag => "cashtag",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of requested entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityKinds(u8);

impl EntityKinds {
    /// The empty set
    pub const NONE: EntityKinds = EntityKinds(0);

    /// Every kind
    pub const ALL: EntityKinds = EntityKinds(0b1111);

    /// A set holding a single kind
    #[inline]
    pub fn only(kind: EntityKind) -> Self {
        EntityKinds(kind.bit())
    }

    /// Add a kind to the set
    #[inline]
    pub fn with(self, kind: EntityKind) -> Self {
        EntityKinds(self.0 | kind.bit())
    }

    /// Remove a kind from the set
    #[inline]
    pub fn without(self, kind: EntityKind) -> Self {
        EntityKinds(self.0 & !kind.bit())
    }

    /// Check whether a kind is requested
    #[inline]
    pub fn contains(&self, kind: EntityKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Check whether no kind is requested
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the requested kinds in extraction order
    pub fn iter(&self) -> impl Iterator<Item = EntityKind> {
        let set = *self;
        EntityKind::ALL
            .into_iter()
            .filter(move |kind| set.contains(*kind))
    }
}

impl From<EntityKind> for EntityKinds {
    fn from(kind: EntityKind) -> Self {
        EntityKinds::only(kind)
    }
}

impl FromIterator<EntityKind> for EntityKinds {
    fn from_iter<I: IntoIterator<Item = EntityKind>>(iter: I) -> Self {
        iter.into_iter().fold(EntityKinds::NONE, EntityKinds::with)
    }
}

/// Error building an [`Entity`] by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityError {
    /// The range is empty or inverted
    InvalidSpan {
        /// Requested start offset
        start: usize,
        /// Requested end offset
        end: usize,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::InvalidSpan { start, end } => write!(
                f,
                "Invalid entity span: start {} must be less than end {}",
                start, end
            ),
        }
    }
}

impl std::error::Error for EntityError {}

/// One recognized reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// What kind of reference this is
    pub kind: EntityKind,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Canonical value: the full URL, or the name without its sigil
    pub value: String,
    /// `/list-name` suffix of a list mention, including the slash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_slug: Option<String>,
    /// Human-readable form of a shortened URL, rendered as given (may
    /// carry markup)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    /// Canonical form of a shortened URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
}

impl Entity {
    /// Create an entity covering `[start, end)`
    ///
    /// Fails with [`EntityError::InvalidSpan`] unless `start < end`.
    pub fn new(
        kind: EntityKind,
        start: usize,
        end: usize,
        value: impl Into<String>,
    ) -> Result<Self, EntityError> {
        if start >= end {
            return Err(EntityError::InvalidSpan { start, end });
        }
        Ok(Self::spanning(kind, start, end, value.into()))
    }

    /// Unchecked constructor for matches the extractor already validated
    #[inline]
    pub(crate) fn spanning(kind: EntityKind, start: usize, end: usize, value: String) -> Self {
        Self {
            kind,
            start,
            end,
            value,
            list_slug: None,
            display_url: None,
            expanded_url: None,
        }
    }

    /// Attach a list slug (`/list-name`)
    pub fn with_list_slug(mut self, slug: impl Into<String>) -> Self {
        self.list_slug = Some(slug.into());
        self
    }

    /// Attach the display form of a shortened URL
    pub fn with_display_url(mut self, display_url: impl Into<String>) -> Self {
        self.display_url = Some(display_url.into());
        self
    }

    /// Attach the expanded form of a shortened URL
    pub fn with_expanded_url(mut self, expanded_url: impl Into<String>) -> Self {
        self.expanded_url = Some(expanded_url.into());
        self
    }

    /// Length of the covered range
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range is empty (never true for extracted entities)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this entity shares any offset with another
    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }
}
