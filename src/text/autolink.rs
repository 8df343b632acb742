//! HTML autolinking
//!
//! [`Autolink`] walks a text together with its sorted, non-overlapping
//! entities and wraps every entity in an `<a>` element. Everything between
//! entities is copied through untouched.
//!
//! # Attribute order
//!
//! Attributes are emitted in insertion order:
//!
//! | kind      | order                                   |
//! |-----------|-----------------------------------------|
//! | URL       | `href`, `title`?, `class`?, `target`?   |
//! | hashtag   | `href`, `title`, `class`                |
//! | cashtag   | `href`, `title`, `class`                |
//! | mention   | `class`, `href`                         |
//!
//! followed by `rel="nofollow"` when enabled and then whatever the
//! attribute modifier adds. Re-inserting an existing key keeps its position.
//!
//! # Example
//!
//! ```rust
//! use tent_text::text::Autolink;
//!
//! let html = Autolink::new().auto_link_hashtags("This has a #hashtag");
//! assert_eq!(
//!     html,
//!     "This has a <a href=\"https://skate.io/search?q=%23hashtag\" \
//!      title=\"#hashtag\" class=\"hashtag\" rel=\"nofollow\">#hashtag</a>"
//! );
//! ```

use super::entity::{Entity, EntityKind};
use super::error::ConfigError;
use super::extractor::{Extractor, ExtractorConfig};
use super::offsets::Utf16Index;
use super::regexen;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Defaults
// ============================================================================

/// Default CSS class for list links
pub const DEFAULT_LIST_CLASS: &str = "list-slug";
/// Default CSS class for mention links
pub const DEFAULT_MENTION_CLASS: &str = "username";
/// Default CSS class for hashtag links
pub const DEFAULT_HASHTAG_CLASS: &str = "hashtag";
/// Default CSS class for cashtag links
pub const DEFAULT_CASHTAG_CLASS: &str = "cashtag";
/// Default href base for list links; `name/slug` is appended
pub const DEFAULT_LIST_URL_BASE: &str = "https://twitter.com/";
/// Default href base for hashtag links; the tag is appended
pub const DEFAULT_HASHTAG_URL_BASE: &str = "https://skate.io/search?q=%23";
/// Default href base for cashtag links; the symbol is appended
pub const DEFAULT_CASHTAG_URL_BASE: &str = "https://twitter.com/#!/search?q=%24";

/// Default mention target: the name's tent.is profile
pub fn default_mention_link(name: &str) -> String {
    format!("https://{}.tent.is", name)
}

// ============================================================================
// Options
// ============================================================================

/// Plain-data rendering options
///
/// Loadable from JSON; missing fields keep their defaults.
///
/// ```rust
/// use tent_text::text::AutolinkOptions;
///
/// let json = r#"{ "no_follow": false, "url_target": "_blank" }"#;
/// let options = AutolinkOptions::from_json(json).unwrap();
/// assert!(!options.no_follow);
/// assert_eq!(options.hashtag_class, "hashtag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutolinkOptions {
    /// CSS class for URL links
    pub url_class: Option<String>,
    /// CSS class for list links
    pub list_class: String,
    /// CSS class for mention links
    pub mention_class: String,
    /// CSS class for hashtag links
    pub hashtag_class: String,
    /// CSS class for cashtag links
    pub cashtag_class: String,
    /// Href base for list links
    pub list_url_base: String,
    /// Href base for hashtag links
    pub hashtag_url_base: String,
    /// Href base for cashtag links
    pub cashtag_url_base: String,
    /// Add `rel="nofollow"` to every link
    pub no_follow: bool,
    /// Put at-sign sigils inside the anchor too
    pub mention_include_symbol: bool,
    /// Element wrapped around sigils, e.g. `s`
    pub symbol_tag: Option<String>,
    /// Element wrapped around the text after a sigil, e.g. `b`
    pub text_with_symbol_tag: Option<String>,
    /// `target` attribute for URL links
    pub url_target: Option<String>,
}

impl Default for AutolinkOptions {
    fn default() -> Self {
        Self {
            url_class: None,
            list_class: DEFAULT_LIST_CLASS.to_string(),
            mention_class: DEFAULT_MENTION_CLASS.to_string(),
            hashtag_class: DEFAULT_HASHTAG_CLASS.to_string(),
            cashtag_class: DEFAULT_CASHTAG_CLASS.to_string(),
            list_url_base: DEFAULT_LIST_URL_BASE.to_string(),
            hashtag_url_base: DEFAULT_HASHTAG_URL_BASE.to_string(),
            cashtag_url_base: DEFAULT_CASHTAG_URL_BASE.to_string(),
            no_follow: true,
            mention_include_symbol: false,
            symbol_tag: None,
            text_with_symbol_tag: None,
            url_target: None,
        }
    }
}

impl AutolinkOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: AutolinkOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the wrapper tags are plain element names
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tag in [&self.symbol_tag, &self.text_with_symbol_tag]
            .into_iter()
            .flatten()
        {
            if !tag.is_empty() && !tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(ConfigError::invalid_tag(tag.as_str()));
            }
        }
        Ok(())
    }

    /// Set the CSS class for URL links
    pub fn with_url_class(mut self, class: impl Into<String>) -> Self {
        self.url_class = Some(class.into());
        self
    }

    /// Set the CSS class for list links
    pub fn with_list_class(mut self, class: impl Into<String>) -> Self {
        self.list_class = class.into();
        self
    }

    /// Set the CSS class for mention links
    pub fn with_mention_class(mut self, class: impl Into<String>) -> Self {
        self.mention_class = class.into();
        self
    }

    /// Set the CSS class for hashtag links
    pub fn with_hashtag_class(mut self, class: impl Into<String>) -> Self {
        self.hashtag_class = class.into();
        self
    }

    /// Set the CSS class for cashtag links
    pub fn with_cashtag_class(mut self, class: impl Into<String>) -> Self {
        self.cashtag_class = class.into();
        self
    }

    /// Set the href base for list links
    pub fn with_list_url_base(mut self, base: impl Into<String>) -> Self {
        self.list_url_base = base.into();
        self
    }

    /// Set the href base for hashtag links
    pub fn with_hashtag_url_base(mut self, base: impl Into<String>) -> Self {
        self.hashtag_url_base = base.into();
        self
    }

    /// Set the href base for cashtag links
    pub fn with_cashtag_url_base(mut self, base: impl Into<String>) -> Self {
        self.cashtag_url_base = base.into();
        self
    }

    /// Enable or disable `rel="nofollow"`
    pub fn with_no_follow(mut self, enabled: bool) -> Self {
        self.no_follow = enabled;
        self
    }

    /// Put at-sign sigils inside the anchor
    pub fn with_mention_include_symbol(mut self, enabled: bool) -> Self {
        self.mention_include_symbol = enabled;
        self
    }

    /// Wrap sigils in `<tag>..</tag>`
    pub fn with_symbol_tag(mut self, tag: impl Into<String>) -> Self {
        self.symbol_tag = Some(tag.into());
        self
    }

    /// Wrap the text after a sigil in `<tag>..</tag>`
    pub fn with_text_with_symbol_tag(mut self, tag: impl Into<String>) -> Self {
        self.text_with_symbol_tag = Some(tag.into());
        self
    }

    /// Set the `target` attribute of URL links
    pub fn with_url_target(mut self, target: impl Into<String>) -> Self {
        self.url_target = Some(target.into());
        self
    }
}

// ============================================================================
// Link Attributes
// ============================================================================

/// Insertion-ordered attribute map of one anchor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttributes {
    entries: Vec<(String, String)>,
}

impl LinkAttributes {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value of an attribute
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Check whether an attribute is set
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no attribute is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// Callbacks
// ============================================================================

/// Maps a mention name to its link target
pub type MentionLinker = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Adds or overrides attributes of an entity's anchor
pub type LinkAttributeModifier = Arc<dyn Fn(&Entity, &mut LinkAttributes) + Send + Sync>;

/// Replaces the link text of an entity's anchor
pub type LinkTextModifier = Arc<dyn Fn(&Entity, &str) -> String + Send + Sync>;

// ============================================================================
// Renderer
// ============================================================================

/// HTML autolinker
///
/// Configuration is read-only while rendering, so one instance can be
/// shared across threads.
#[derive(Clone)]
pub struct Autolink {
    options: AutolinkOptions,
    mention_linker: MentionLinker,
    attribute_modifier: Option<LinkAttributeModifier>,
    text_modifier: Option<LinkTextModifier>,
    extractor: Extractor,
}

impl Default for Autolink {
    fn default() -> Self {
        Self {
            options: AutolinkOptions::default(),
            mention_linker: Arc::new(default_mention_link),
            attribute_modifier: None,
            text_modifier: None,
            extractor: Extractor::with_config(
                ExtractorConfig::new().with_url_without_protocol(false),
            ),
        }
    }
}

impl fmt::Debug for Autolink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autolink")
            .field("options", &self.options)
            .field("attribute_modifier", &self.attribute_modifier.is_some())
            .field("text_modifier", &self.text_modifier.is_some())
            .field("extractor", &self.extractor)
            .finish_non_exhaustive()
    }
}

impl Autolink {
    /// Create a renderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options
    pub fn with_options(options: AutolinkOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::default()
        })
    }

    /// Use a custom mention link target
    pub fn with_mention_linker<F>(mut self, linker: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.mention_linker = Arc::new(linker);
        self
    }

    /// Install an attribute modifier
    pub fn with_link_attribute_modifier<F>(mut self, modifier: F) -> Self
    where
        F: Fn(&Entity, &mut LinkAttributes) + Send + Sync + 'static,
    {
        self.attribute_modifier = Some(Arc::new(modifier));
        self
    }

    /// Install a link text modifier
    pub fn with_link_text_modifier<F>(mut self, modifier: F) -> Self
    where
        F: Fn(&Entity, &str) -> String + Send + Sync + 'static,
    {
        self.text_modifier = Some(Arc::new(modifier));
        self
    }

    /// The active options
    pub fn options(&self) -> &AutolinkOptions {
        &self.options
    }

    /// The extractor used by the `auto_link*` entry points
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Escape `<` and `>`, then link every kind of entity
    ///
    /// URLs without a scheme are not linked.
    pub fn auto_link(&self, text: &str) -> String {
        let text = escape_brackets(text);
        let entities = self.extractor.extract_entities_with_indices(&text);
        self.auto_link_entities(&text, &entities)
    }

    /// Link hashtags only
    pub fn auto_link_hashtags(&self, text: &str) -> String {
        let entities = self.extractor.extract_hashtags_with_indices(text);
        self.auto_link_entities(text, &entities)
    }

    /// Link cashtags only
    pub fn auto_link_cashtags(&self, text: &str) -> String {
        let entities = self.extractor.extract_cashtags_with_indices(text);
        self.auto_link_entities(text, &entities)
    }

    /// Link URLs with a scheme only
    pub fn auto_link_urls(&self, text: &str) -> String {
        let entities = self.extractor.extract_urls_with_indices(text);
        self.auto_link_entities(text, &entities)
    }

    /// Link mentions and list mentions only
    pub fn auto_link_mentions_and_lists(&self, text: &str) -> String {
        let entities = self.extractor.extract_mentions_or_lists_with_indices(text);
        self.auto_link_entities(text, &entities)
    }

    /// Link the given entities
    ///
    /// Entities must be sorted and non-overlapping with UTF-16 offsets into
    /// `text`. Offsets past the text are clamped.
    pub fn auto_link_entities(&self, text: &str, entities: &[Entity]) -> String {
        log_debug!("rendering {} entities", entities.len());

        let index = Utf16Index::new(text);
        let mut out = String::with_capacity(text.len() * 2);
        let mut begin = 0;

        for entity in entities {
            let start = index.utf16_to_byte(entity.start).max(begin);
            let end = index.utf16_to_byte(entity.end).max(start);
            out.push_str(&text[begin..start]);

            let sigil = text[start..end].chars().next();
            match entity.kind {
                EntityKind::Url => self.link_to_url(entity, &mut out),
                EntityKind::Hashtag => {
                    self.link_to_hashtag(entity, sigil.unwrap_or('#'), &mut out)
                }
                EntityKind::MentionOrList => {
                    self.link_to_mention_or_list(entity, sigil.unwrap_or('^'), &mut out)
                }
                EntityKind::Cashtag => self.link_to_cashtag(entity, &mut out),
            }
            begin = end;
        }
        out.push_str(&text[begin..]);

        out
    }

    fn link_to_url(&self, entity: &Entity, out: &mut String) {
        let url = entity.value.as_str();
        let mut attrs = LinkAttributes::new();
        attrs.insert("href", url);

        let text = match (&entity.display_url, &entity.expanded_url) {
            (Some(display), Some(expanded)) => {
                attrs.insert("title", expanded.as_str());
                display.clone()
            }
            _ => escape_html(url),
        };

        if let Some(class) = non_empty(&self.options.url_class) {
            attrs.insert("class", class);
        }
        if let Some(target) = non_empty(&self.options.url_target) {
            attrs.insert("target", target);
        }

        self.link_to_text(entity, text, attrs, out);
    }

    fn link_to_hashtag(&self, entity: &Entity, sigil: char, out: &mut String) {
        let tag = entity.value.as_str();
        let mut attrs = LinkAttributes::new();
        attrs.insert("href", format!("{}{}", self.options.hashtag_url_base, tag));
        attrs.insert("title", format!("#{}", tag));
        attrs.insert("class", self.options.hashtag_class.as_str());

        self.link_to_text_with_symbol(entity, sigil, tag, attrs, out);
    }

    fn link_to_cashtag(&self, entity: &Entity, out: &mut String) {
        let symbol = entity.value.as_str();
        let mut attrs = LinkAttributes::new();
        attrs.insert("href", format!("{}{}", self.options.cashtag_url_base, symbol));
        attrs.insert("title", format!("${}", symbol));
        attrs.insert("class", self.options.cashtag_class.as_str());

        self.link_to_text_with_symbol(entity, '$', symbol, attrs, out);
    }

    fn link_to_mention_or_list(&self, entity: &Entity, sigil: char, out: &mut String) {
        let mut attrs = LinkAttributes::new();
        let text = match &entity.list_slug {
            Some(slug) => {
                let name = format!("{}{}", entity.value, slug);
                attrs.insert("class", self.options.list_class.as_str());
                attrs.insert("href", format!("{}{}", self.options.list_url_base, name));
                name
            }
            None => {
                attrs.insert("class", self.options.mention_class.as_str());
                attrs.insert("href", (self.mention_linker)(&entity.value));
                entity.value.clone()
            }
        };

        self.link_to_text_with_symbol(entity, sigil, &text, attrs, out);
    }

    fn link_to_text_with_symbol(
        &self,
        entity: &Entity,
        sigil: char,
        text: &str,
        attrs: LinkAttributes,
        out: &mut String,
    ) {
        let mut buf = [0u8; 4];
        let sigil: &str = sigil.encode_utf8(&mut buf);

        let tagged_symbol = wrap_in_tag(self.options.symbol_tag.as_deref(), sigil);
        let tagged_text = wrap_in_tag(
            self.options.text_with_symbol_tag.as_deref(),
            &escape_html(text),
        );

        let include_symbol =
            self.options.mention_include_symbol || !regexen::at_signs().is_match(sigil);

        if include_symbol {
            self.link_to_text(entity, tagged_symbol + &tagged_text, attrs, out);
        } else {
            out.push_str(&tagged_symbol);
            self.link_to_text(entity, tagged_text, attrs, out);
        }
    }

    fn link_to_text(
        &self,
        entity: &Entity,
        text: String,
        mut attrs: LinkAttributes,
        out: &mut String,
    ) {
        if self.options.no_follow {
            attrs.insert("rel", "nofollow");
        }
        if let Some(modifier) = &self.attribute_modifier {
            modifier(entity, &mut attrs);
        }
        let text = match &self.text_modifier {
            Some(modifier) => modifier(entity, &text),
            None => text,
        };

        out.push_str("<a");
        for (key, value) in attrs.iter() {
            out.push(' ');
            out.push_str(&escape_html(key));
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');
        out.push_str(&text);
        out.push_str("</a>");
    }
}

#[inline]
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn wrap_in_tag(tag: Option<&str>, content: &str) -> String {
    match tag.filter(|t| !t.is_empty()) {
        Some(tag) => format!("<{}>{}</{}>", tag, content, tag),
        None => content.to_string(),
    }
}

// ============================================================================
// Escaping
// ============================================================================

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text and attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape only `<` and `>`
pub fn escape_brackets(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;

    for pos in memchr::memchr2_iter(b'<', b'>', bytes) {
        out.push_str(&text[last..pos]);
        out.push_str(if bytes[pos] == b'<' { "&lt;" } else { "&gt;" });
        last = pos + 1;
    }
    out.push_str(&text[last..]);

    out
}
