//! Entity extraction
//!
//! The [`Extractor`] runs the pattern catalog for each requested
//! [`EntityKind`], applies the boundary checks the patterns cannot express,
//! and merges the results into one sequence that is sorted by start offset
//! and free of overlaps.
//!
//! All offsets in the returned entities are UTF-16 code-unit offsets.
//!
//! # Example
//!
//! ```rust
//! use tent_text::text::{EntityKind, Extractor};
//!
//! let extractor = Extractor::new();
//! let entities = extractor.extract_entities_with_indices("^user loves #rust http://t.co");
//!
//! let kinds: Vec<_> = entities.iter().map(|e| e.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![EntityKind::MentionOrList, EntityKind::Hashtag, EntityKind::Url]
//! );
//! ```

use super::entity::{Entity, EntityKind, EntityKinds};
use super::offsets::Utf16Index;
use super::regexen;
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Extraction options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Extract URLs that have no `http://`/`https://` scheme
    pub extract_url_without_protocol: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            extract_url_without_protocol: true,
        }
    }
}

impl ExtractorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether scheme-less URLs are extracted
    pub fn with_url_without_protocol(mut self, enabled: bool) -> Self {
        self.extract_url_without_protocol = enabled;
        self
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Extracts URLs, hashtags, mentions and cashtags from text
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with the given configuration
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract entities of the requested kinds
    ///
    /// The result is sorted by start offset and no two entities overlap.
    /// When matches of different kinds collide, the one starting first
    /// wins; among matches with the same start, the longest wins. Hashtags
    /// inside a URL are dropped even when URLs themselves are not requested.
    pub fn extract(&self, text: &str, kinds: EntityKinds) -> Vec<Entity> {
        if text.is_empty() || kinds.is_empty() {
            return Vec::new();
        }

        let index = Utf16Index::new(text);
        let mut entities = Vec::new();

        for kind in kinds.iter() {
            let found = match kind {
                EntityKind::Url => self.scan_urls(text, &index),
                EntityKind::Hashtag => {
                    let hashtags = scan_hashtags(text, &index);
                    if kinds.contains(EntityKind::Url) || hashtags.is_empty() {
                        hashtags
                    } else {
                        let urls = self.scan_urls(text, &index);
                        hashtags
                            .into_iter()
                            .filter(|tag| !urls.iter().any(|url| url.overlaps(tag)))
                            .collect()
                    }
                }
                EntityKind::MentionOrList => scan_mentions_or_lists(text, &index),
                EntityKind::Cashtag => scan_cashtags(text, &index),
            };
            log_debug!("extracted {} {} candidate(s)", found.len(), kind);
            entities.extend(found);
        }

        resolve_overlaps(entities)
    }

    /// Extract every kind of entity
    pub fn extract_entities_with_indices(&self, text: &str) -> Vec<Entity> {
        self.extract(text, EntityKinds::ALL)
    }

    /// Extract URLs as strings
    pub fn extract_urls(&self, text: &str) -> Vec<String> {
        values(self.extract_urls_with_indices(text))
    }

    /// Extract URL entities
    pub fn extract_urls_with_indices(&self, text: &str) -> Vec<Entity> {
        self.extract(text, EntityKinds::only(EntityKind::Url))
    }

    /// Extract hashtags (without `#`) as strings
    pub fn extract_hashtags(&self, text: &str) -> Vec<String> {
        values(self.extract_hashtags_with_indices(text))
    }

    /// Extract hashtag entities
    pub fn extract_hashtags_with_indices(&self, text: &str) -> Vec<Entity> {
        self.extract(text, EntityKinds::only(EntityKind::Hashtag))
    }

    /// Extract cashtags (without `$`) as strings
    pub fn extract_cashtags(&self, text: &str) -> Vec<String> {
        values(self.extract_cashtags_with_indices(text))
    }

    /// Extract cashtag entities
    pub fn extract_cashtags_with_indices(&self, text: &str) -> Vec<Entity> {
        self.extract(text, EntityKinds::only(EntityKind::Cashtag))
    }

    /// Extract mentioned names (without sigil), skipping list mentions
    pub fn extract_mentioned_names(&self, text: &str) -> Vec<String> {
        values(self.extract_mentioned_names_with_indices(text))
    }

    /// Extract mention entities, skipping list mentions
    pub fn extract_mentioned_names_with_indices(&self, text: &str) -> Vec<Entity> {
        let mut mentions = self.extract_mentions_or_lists_with_indices(text);
        mentions.retain(|entity| entity.list_slug.is_none());
        mentions
    }

    /// Extract mention and list mention entities
    pub fn extract_mentions_or_lists_with_indices(&self, text: &str) -> Vec<Entity> {
        self.extract(text, EntityKinds::only(EntityKind::MentionOrList))
    }

    /// Extract the name a post replies to: a mention that opens the text,
    /// after optional leading whitespace
    pub fn extract_reply_mention(&self, text: &str) -> Option<String> {
        let caps = regexen::reply_mention().captures(text)?;
        let name = caps.name("name")?;
        if regexen::invalid_mention_end().is_match(&text[name.end()..]) {
            return None;
        }
        Some(name.as_str().to_string())
    }

    fn scan_urls(&self, text: &str, index: &Utf16Index) -> Vec<Entity> {
        let mut urls = Vec::new();

        for caps in regexen::url().captures_iter(text) {
            let (Some(url), Some(domain)) = (caps.name("url"), caps.name("domain")) else {
                continue;
            };

            if caps.name("protocol").is_some() {
                if !regexen::url_domain_for_validation().is_match(domain.as_str()) {
                    continue;
                }
                let end = match regexen::valid_tco_url().find(url.as_str()) {
                    Some(tco) => url.start() + tco.end(),
                    None => url.end(),
                };
                urls.push(entity_at(text, index, EntityKind::Url, url.start(), end));
                continue;
            }

            if !self.config.extract_url_without_protocol {
                continue;
            }
            let before = caps.name("before").map_or("", |m| m.as_str());
            if regexen::url_without_protocol_invalid_preceding().is_match(before) {
                continue;
            }

            // Only ASCII domains with a known TLD count without a scheme.
            // A bare `name.cc` needs a path behind it.
            let mut last: Option<(usize, bool)> = None;
            for ascii in regexen::valid_ascii_domain().captures_iter(domain.as_str()) {
                let Some(found) = ascii.get(1) else {
                    continue;
                };
                let start = domain.start() + found.start();
                let end = domain.start() + found.end();
                let short = regexen::invalid_short_domain().is_match(found.as_str());
                if !short {
                    urls.push(entity_at(text, index, EntityKind::Url, start, end));
                }
                last = Some((start, short));
            }

            let Some((start, short)) = last else {
                continue;
            };
            if caps.name("path").is_some() {
                if short {
                    urls.push(entity_at(text, index, EntityKind::Url, start, url.end()));
                } else if let Some(entity) = urls.last_mut() {
                    entity.end = index.byte_to_utf16(url.end());
                    entity.value = text[start..url.end()].to_string();
                }
            }
        }

        urls
    }
}

// ============================================================================
// Per-kind Scanners
// ============================================================================

fn scan_hashtags(text: &str, index: &Utf16Index) -> Vec<Entity> {
    let mut hashtags = Vec::new();

    for caps in regexen::hashtag().captures_iter(text) {
        let (Some(hashtag), Some(tag)) = (caps.name("hashtag"), caps.name("tag")) else {
            continue;
        };
        if regexen::invalid_hashtag_initial().is_match(tag.as_str()) {
            continue;
        }
        if regexen::invalid_hashtag_end().is_match(&text[hashtag.end()..]) {
            continue;
        }
        hashtags.push(Entity::spanning(
            EntityKind::Hashtag,
            index.byte_to_utf16(hashtag.start()),
            index.byte_to_utf16(hashtag.end()),
            tag.as_str().to_string(),
        ));
    }

    hashtags
}

/// Characters that glue a following sigil to the previous word
#[inline]
fn is_invalid_mention_preceding(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '_' | '!' | '#' | '$' | '%' | '&' | '*' | '@' | '＠' | '^' | '＾'
        )
}

fn scan_mentions_or_lists(text: &str, index: &Utf16Index) -> Vec<Entity> {
    let mut mentions = Vec::new();

    for caps in regexen::mention_or_list().captures_iter(text) {
        let (Some(sigil), Some(name)) = (caps.name("sigil"), caps.name("name")) else {
            continue;
        };
        let list = caps.name("list");

        if text[..sigil.start()]
            .chars()
            .next_back()
            .is_some_and(is_invalid_mention_preceding)
        {
            continue;
        }

        let end = list.map_or(name.end(), |l| l.end());
        if regexen::invalid_mention_end().is_match(&text[end..]) {
            continue;
        }

        let mut entity = Entity::spanning(
            EntityKind::MentionOrList,
            index.byte_to_utf16(sigil.start()),
            index.byte_to_utf16(end),
            name.as_str().to_string(),
        );
        if let Some(list) = list {
            entity.list_slug = Some(list.as_str().to_string());
        }
        mentions.push(entity);
    }

    mentions
}

/// A cashtag ends at the end of text, whitespace or ASCII punctuation
#[inline]
fn ends_cashtag(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|ch| ch.is_whitespace() || ch.is_ascii_punctuation())
}

fn scan_cashtags(text: &str, index: &Utf16Index) -> Vec<Entity> {
    let mut cashtags = Vec::new();

    for caps in regexen::cashtag().captures_iter(text) {
        let (Some(cashtag), Some(symbol)) = (caps.name("cashtag"), caps.name("symbol")) else {
            continue;
        };

        let end = if ends_cashtag(&text[cashtag.end()..]) {
            cashtag.end()
        } else if caps.name("suffix").is_some() && ends_cashtag(&text[symbol.end()..]) {
            symbol.end()
        } else {
            continue;
        };

        cashtags.push(Entity::spanning(
            EntityKind::Cashtag,
            index.byte_to_utf16(cashtag.start()),
            index.byte_to_utf16(end),
            text[symbol.start()..end].to_string(),
        ));
    }

    cashtags
}

// ============================================================================
// Helpers
// ============================================================================

fn entity_at(
    text: &str,
    index: &Utf16Index,
    kind: EntityKind,
    start: usize,
    end: usize,
) -> Entity {
    Entity::spanning(
        kind,
        index.byte_to_utf16(start),
        index.byte_to_utf16(end),
        text[start..end].to_string(),
    )
}

fn values(entities: Vec<Entity>) -> Vec<String> {
    entities.into_iter().map(|entity| entity.value).collect()
}

/// Sort by start, longest first on ties, and drop every entity that
/// overlaps one already kept
///
/// The sort is stable, so an exact tie keeps the kind extracted first.
pub(crate) fn resolve_overlaps(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<Entity> = Vec::with_capacity(entities.len());
    for entity in entities {
        if let Some(last) = kept.last() {
            if entity.start < last.end {
                log_debug!(
                    "dropping {} at {}..{} overlapping {} at {}..{}",
                    entity.kind,
                    entity.start,
                    entity.end,
                    last.kind,
                    last.start,
                    last.end
                );
                continue;
            }
        }
        kept.push(entity);
    }
    kept
}
