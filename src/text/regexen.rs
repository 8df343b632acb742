//! Pattern catalog for entity matching
//!
//! Patterns are assembled from small named pieces with `macro_rules!`
//! templates, since `concat!()` only accepts literals. Each compiled
//! [`Regex`] is built once, on first use, and shared from a `OnceLock`.
//!
//! The `regex` crate has no lookaround, so the boundary conditions that
//! follow a match (what may come after a mention, a hashtag or a cashtag)
//! are checked by the extractor on the raw matches.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

// ============================================================================
// Character Classes
// ============================================================================

/// Characters never valid in a post.
macro_rules! invalid_chars {
    () => {
        "\u{FFFE}\u{FEFF}\u{FFFF}\u{202A}-\u{202E}"
    };
}

/// ASCII control characters.
macro_rules! ctrl_chars {
    () => {
        r"\x00-\x1F\x7F"
    };
}

/// Unicode space characters, including a few outside `\p{White_Space}`.
macro_rules! unicode_spaces {
    () => {
        "\u{09}-\u{0D}\u{20}\u{85}\u{A0}\u{1680}\u{180E}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}"
    };
}

/// Accented Latin letters, combined with ASCII letters in classes.
macro_rules! latin_accents {
    () => {
        concat!(
            "\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{00FF}\u{0100}-\u{024F}\u{0253}-\u{0254}",
            "\u{0256}-\u{0257}\u{0259}\u{025B}\u{0263}\u{0268}\u{026F}\u{0272}\u{0289}\u{02BB}\u{1E00}-\u{1EFF}"
        )
    };
}

macro_rules! punctuation_chars {
    () => {
        r##"-_!"#$%&'()*+,./:;<=>?@\[\]^`{|}~"##
    };
}

macro_rules! punctuation_chars_no_hyphen {
    () => {
        r##"_!"#$%&'()*+,./:;<=>?@\[\]^`{|}~"##
    };
}

macro_rules! punctuation_chars_no_hyphen_underscore {
    () => {
        r##"!"#$%&'()*+,./:;<=>?@\[\]^`{|}~"##
    };
}

// ============================================================================
// Domains
// ============================================================================

macro_rules! url_preceding_chars {
    () => {
        concat!(r"(?:[^a-z0-9@＠$#＃", invalid_chars!(), r"]|^)")
    };
}

macro_rules! domain_edge_char {
    () => {
        concat!(
            "[^",
            punctuation_chars!(),
            ctrl_chars!(),
            invalid_chars!(),
            unicode_spaces!(),
            "]"
        )
    };
}

macro_rules! subdomain_middle_char {
    () => {
        concat!(
            "[^",
            punctuation_chars_no_hyphen_underscore!(),
            ctrl_chars!(),
            invalid_chars!(),
            unicode_spaces!(),
            "]"
        )
    };
}

macro_rules! domain_middle_char {
    () => {
        concat!(
            "[^",
            punctuation_chars_no_hyphen!(),
            ctrl_chars!(),
            invalid_chars!(),
            unicode_spaces!(),
            "]"
        )
    };
}

macro_rules! subdomain {
    () => {
        concat!(
            "(?:(?:",
            domain_edge_char!(),
            subdomain_middle_char!(),
            "*)?",
            domain_edge_char!(),
            r"\.)"
        )
    };
}

macro_rules! domain_name {
    () => {
        concat!(
            "(?:(?:",
            domain_edge_char!(),
            domain_middle_char!(),
            "*)?",
            domain_edge_char!(),
            r"\.)"
        )
    };
}

macro_rules! gtld {
    () => {
        concat!(
            "(?:aero|asia|biz|cat|com|coop|edu|gov|info|int|jobs|mil|mobi|museum|name|net|org|",
            "pro|tel|travel|xxx|app|blog|dev|online|site|social|xyz)"
        )
    };
}

macro_rules! cctld {
    () => {
        concat!(
            "(?:ac|ad|ae|af|ag|ai|al|am|an|ao|aq|ar|as|at|au|aw|ax|az|ba|bb|bd|be|bf|bg|bh|bi|",
            "bj|bm|bn|bo|br|bs|bt|bv|bw|by|bz|ca|cc|cd|cf|cg|ch|ci|ck|cl|cm|cn|co|cr|cs|cu|cv|",
            "cx|cy|cz|dd|de|dj|dk|dm|do|dz|ec|ee|eg|eh|er|es|et|eu|fi|fj|fk|fm|fo|fr|ga|gb|gd|",
            "ge|gf|gg|gh|gi|gl|gm|gn|gp|gq|gr|gs|gt|gu|gw|gy|hk|hm|hn|hr|ht|hu|id|ie|il|im|in|",
            "io|iq|ir|is|it|je|jm|jo|jp|ke|kg|kh|ki|km|kn|kp|kr|kw|ky|kz|la|lb|lc|li|lk|lr|ls|",
            "lt|lu|lv|ly|ma|mc|md|me|mg|mh|mk|ml|mm|mn|mo|mp|mq|mr|ms|mt|mu|mv|mw|mx|my|mz|na|",
            "nc|ne|nf|ng|ni|nl|no|np|nr|nu|nz|om|pa|pe|pf|pg|ph|pk|pl|pm|pn|pr|ps|pt|pw|py|qa|",
            "re|ro|rs|ru|rw|sa|sb|sc|sd|se|sg|sh|si|sj|sk|sl|sm|sn|so|sr|ss|st|su|sv|sx|sy|sz|",
            "tc|td|tf|tg|th|tj|tk|tl|tm|tn|to|tp|tr|tt|tv|tw|tz|ua|ug|uk|us|uy|uz|va|vc|ve|vg|",
            "vi|vn|vu|wf|ws|ye|yt|za|zm|zw)"
        )
    };
}

macro_rules! punycode {
    () => {
        "(?:xn--[0-9a-z]+)"
    };
}

/// Loose domain: labels of non-punctuation characters and a TLD of two or
/// more such characters. The TLD is checked against the known lists later.
macro_rules! simplified_domain {
    () => {
        concat!(
            "(?:",
            subdomain!(),
            "*",
            domain_name!(),
            domain_edge_char!(),
            "{2,})"
        )
    };
}

// ============================================================================
// URL Paths and Queries
// ============================================================================

macro_rules! url_path_char {
    () => {
        concat!(
            r"[-a-z\p{Cyrillic}0-9!\*';:=+,.$/%#\[\]_~&|@",
            latin_accents!(),
            "]"
        )
    };
}

/// One level of parentheses, or two levels nested.
macro_rules! url_balanced_parens {
    () => {
        concat!(
            r"\((?:",
            url_path_char!(),
            "+|(?:",
            r"\(",
            url_path_char!(),
            r"+\)",
            r"))\)"
        )
    };
}

macro_rules! url_path_ending {
    () => {
        concat!(
            r"[-a-z\p{Cyrillic}0-9=_#/+",
            latin_accents!(),
            "]|(?:",
            url_balanced_parens!(),
            ")"
        )
    };
}

macro_rules! url_path {
    () => {
        concat!(
            "(?:(?:",
            url_path_char!(),
            "*(?:",
            url_balanced_parens!(),
            url_path_char!(),
            "*)*",
            url_path_ending!(),
            ")|(?:",
            url_path_char!(),
            "+/))"
        )
    };
}

macro_rules! url_query_char {
    () => {
        r"[-a-z0-9!?*'\(\);:&=+$/%#\[\]_\.,~|@]"
    };
}

macro_rules! url_query_ending {
    () => {
        "[a-z0-9_&=#/]"
    };
}

macro_rules! url {
    () => {
        concat!(
            "(?P<before>",
            url_preceding_chars!(),
            ")",
            "(?P<url>",
            "(?P<protocol>https?://)?",
            "(?P<domain>",
            simplified_domain!(),
            ")",
            "(?::[0-9]+)?",
            "(?P<path>/",
            url_path!(),
            "*)?",
            r"(?P<query>\?",
            url_query_char!(),
            "*",
            url_query_ending!(),
            ")?",
            ")"
        )
    };
}

// ============================================================================
// Mentions, Hashtags, Cashtags
// ============================================================================

macro_rules! mention_sigils {
    () => {
        r"[\^＾]"
    };
}

macro_rules! mention_name {
    () => {
        "[a-z0-9_]{1,20}"
    };
}

macro_rules! hashtag_special_chars {
    () => {
        "_\u{200C}\u{200D}\u{A67E}\u{05BE}\u{05F3}\u{05F4}\u{FF5E}\u{301C}\u{309B}\u{309C}\u{30A0}\u{30FB}\u{3003}\u{0F0B}\u{0F0C}\u{00B7}"
    };
}

macro_rules! hashtag_alnum {
    () => {
        concat!(r"[\p{L}\p{M}\p{Nd}", hashtag_special_chars!(), "]")
    };
}

// ============================================================================
// Compiled Patterns
// ============================================================================

/// Size limit for the compiled URL program, which repeats large Unicode
/// classes many times over.
const URL_SIZE_LIMIT: usize = 64 * (1 << 20);

const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

fn compile(pattern: &str, size_limit: usize) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
        .unwrap_or_else(|e| panic!("built-in pattern failed to compile: {}", e))
}

macro_rules! catalog_regex {
    ($(#[$doc:meta])* $name:ident, $pattern:expr, $limit:expr) => {
        $(#[$doc])*
        pub fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| compile($pattern, $limit))
        }
    };
    ($(#[$doc:meta])* $name:ident, $pattern:expr) => {
        catalog_regex!($(#[$doc])* $name, $pattern, DEFAULT_SIZE_LIMIT);
    };
}

catalog_regex!(
    /// A URL candidate with named groups `before`, `url`, `protocol`,
    /// `domain`, `path` and `query`.
    url,
    url!(),
    URL_SIZE_LIMIT
);

catalog_regex!(
    /// A full domain ending in a known TLD.
    url_domain_for_validation,
    concat!(
        r"\A(?:",
        subdomain!(),
        "*",
        domain_name!(),
        "(?:",
        gtld!(),
        "|",
        cctld!(),
        "|",
        punycode!(),
        r"))\z"
    ),
    URL_SIZE_LIMIT
);

catalog_regex!(
    /// An ASCII-only domain ending in a known TLD; group 1 is the domain.
    valid_ascii_domain,
    concat!(
        "((?:[-a-z0-9",
        latin_accents!(),
        r"]+\.)+(?:",
        gtld!(),
        "|",
        cctld!(),
        "|",
        punycode!(),
        "))(?:[^0-9a-z@]|$)"
    )
);

catalog_regex!(
    /// A bare domain under a ccTLD, which needs a path to count as a URL.
    invalid_short_domain,
    concat!(r"\A", domain_name!(), cctld!(), r"\z"),
    URL_SIZE_LIMIT
);

catalog_regex!(
    /// Characters that disqualify a scheme-less URL when they precede it.
    url_without_protocol_invalid_preceding,
    r"[-_./]\z"
);

catalog_regex!(
    /// The canonical part of a `t.co` short link.
    valid_tco_url,
    r"\Ahttps?://t\.co/[a-z0-9]+"
);

catalog_regex!(
    /// A mention or list mention, with groups `sigil`, `name` and `list`.
    mention_or_list,
    concat!(
        "(?P<sigil>",
        mention_sigils!(),
        ")(?P<name>",
        mention_name!(),
        ")(?P<list>/[a-z][a-z0-9_-]{0,24})?"
    )
);

catalog_regex!(
    /// Text that may not follow a mention.
    invalid_mention_end,
    concat!(r"\A(?:", mention_sigils!(), "|[", latin_accents!(), "]|://)")
);

catalog_regex!(
    /// A mention opening the text, with group `name`.
    reply_mention,
    concat!(
        r"\A[",
        unicode_spaces!(),
        "]*",
        mention_sigils!(),
        "(?P<name>",
        mention_name!(),
        ")"
    )
);

catalog_regex!(
    /// A hashtag, with groups `hashtag` (including the sigil) and `tag`.
    hashtag,
    concat!(
        r"(?:^|[^&\p{L}\p{M}\p{Nd}",
        hashtag_special_chars!(),
        "])(?P<hashtag>[#＃](?P<tag>",
        hashtag_alnum!(),
        r"*[\p{L}\p{M}]",
        hashtag_alnum!(),
        "*))"
    )
);

catalog_regex!(
    /// Text that may not follow a hashtag.
    invalid_hashtag_end,
    r"\A(?:[#＃]|://)"
);

catalog_regex!(
    /// Characters a hashtag body may not start with.
    invalid_hashtag_initial,
    "\\A[\u{FE0F}\u{20E3}]"
);

catalog_regex!(
    /// A cashtag, with groups `cashtag` (including `$`), `symbol` and the
    /// optional `suffix`.
    cashtag,
    concat!(
        "(?:^|[",
        unicode_spaces!(),
        r"])(?P<cashtag>\$(?P<symbol>[a-z]{1,6})(?P<suffix>[._][a-z]{1,2})?)"
    )
);

catalog_regex!(
    /// The at-sign family. Sigils outside it are linked together with
    /// their text.
    at_signs,
    r"\A[@＠]\z"
);
