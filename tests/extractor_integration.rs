//! Integration tests for entity extraction
//!
//! These tests cover hashtags, mentions, cashtags, URLs, reply mentions and
//! the merged, overlap-free output of full extraction.

use tent_text::text::{offsets, Entity, EntityKind, EntityKinds, Extractor, ExtractorConfig};

fn spans(entities: &[Entity]) -> Vec<(usize, usize)> {
    entities.iter().map(|e| (e.start, e.end)).collect()
}

// ============================================================================
// Hashtag Tests
// ============================================================================

#[test]
fn test_hashtag_at_the_beginning() {
    let extracted = Extractor::new().extract_hashtags("#hashtag mention");
    assert_eq!(extracted, vec!["hashtag"]);
}

#[test]
fn test_hashtag_with_leading_space() {
    let extracted = Extractor::new().extract_hashtags(" #hashtag mention");
    assert_eq!(extracted, vec!["hashtag"]);
}

#[test]
fn test_hashtag_in_mid_text() {
    let extracted = Extractor::new().extract_hashtags("mention #hashtag here");
    assert_eq!(extracted, vec!["hashtag"]);
}

#[test]
fn test_multiple_hashtags() {
    let extracted = Extractor::new().extract_hashtags("text #hashtag1 #hashtag2");
    assert_eq!(extracted, vec!["hashtag1", "hashtag2"]);
}

#[test]
fn test_hashtag_with_indices() {
    let extracted =
        Extractor::new().extract_hashtags_with_indices(" #user1 mention #user2 here #user3 ");
    assert_eq!(spans(&extracted), vec![(1, 7), (16, 22), (28, 34)]);
}

#[test]
fn test_hashtag_with_supplementary_characters() {
    let text = "\u{10400} #hashtag \u{10400} #hashtag";
    let mut extracted = Extractor::new().extract_hashtags_with_indices(text);

    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].value, "hashtag");
    assert_eq!(extracted[1].value, "hashtag");
    assert_eq!(spans(&extracted), vec![(3, 11), (15, 23)]);

    offsets::to_code_point_space(text, &mut extracted);
    assert_eq!(spans(&extracted), vec![(2, 10), (13, 21)]);

    offsets::to_utf16_space(text, &mut extracted);
    assert_eq!(spans(&extracted), vec![(3, 11), (15, 23)]);
}

#[test]
fn test_hashtag_with_non_latin_letters() {
    let extracted = Extractor::new().extract_hashtags("#日本語 and #café");
    assert_eq!(extracted, vec!["日本語", "café"]);
}

#[test]
fn test_hashtag_after_ampersand_is_skipped() {
    assert!(Extractor::new().extract_hashtags("&#39;").is_empty());
}

// ============================================================================
// Mention Tests
// ============================================================================

#[test]
fn test_mention_at_the_beginning() {
    assert_eq!(Extractor::new().extract_mentioned_names("^user mention"), vec!["user"]);
}

#[test]
fn test_mention_with_leading_space() {
    assert_eq!(Extractor::new().extract_mentioned_names(" ^user mention"), vec!["user"]);
}

#[test]
fn test_mention_in_mid_text() {
    assert_eq!(Extractor::new().extract_mentioned_names("mention ^user here"), vec!["user"]);
}

#[test]
fn test_mention_preceded_by_letter_is_skipped() {
    assert!(Extractor::new().extract_mentioned_names("meet^the beach").is_empty());
}

#[test]
fn test_mention_preceded_by_punctuation() {
    assert_eq!(Extractor::new().extract_mentioned_names("great.^username"), vec!["username"]);
}

#[test]
fn test_mention_followed_by_punctuation() {
    assert_eq!(Extractor::new().extract_mentioned_names("^username&^$%^"), vec!["username"]);
}

#[test]
fn test_mentions_followed_by_colon() {
    assert_eq!(Extractor::new().extract_mentioned_names("^foo: ^bar"), vec!["foo", "bar"]);
}

#[test]
fn test_multiple_mentions() {
    let extracted = Extractor::new().extract_mentioned_names("mention ^user1 here and ^user2 here");
    assert_eq!(extracted, vec!["user1", "user2"]);
}

#[test]
fn test_mention_with_indices() {
    let extracted = Extractor::new()
        .extract_mentioned_names_with_indices(" ^user1 mention ^user2 here ^user3 ");
    assert_eq!(spans(&extracted), vec![(1, 7), (16, 22), (28, 34)]);
}

#[test]
fn test_mention_with_supplementary_characters() {
    let text = "\u{10400} ^mention \u{10400} ^mention";
    let mut extracted = Extractor::new().extract_mentioned_names_with_indices(text);

    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].value, "mention");
    assert_eq!(spans(&extracted), vec![(3, 11), (15, 23)]);

    offsets::to_code_point_space(text, &mut extracted);
    assert_eq!(spans(&extracted), vec![(2, 10), (13, 21)]);

    offsets::to_utf16_space(text, &mut extracted);
    assert_eq!(spans(&extracted), vec![(3, 11), (15, 23)]);
}

#[test]
fn test_mentions_and_lists() {
    let extracted =
        Extractor::new().extract_mentions_or_lists_with_indices("^alice and ^bob/rustaceans");
    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].value, "alice");
    assert!(extracted[0].list_slug.is_none());
    assert_eq!(extracted[1].value, "bob");
    assert_eq!(extracted[1].list_slug.as_deref(), Some("/rustaceans"));
    assert_eq!(spans(&extracted), vec![(0, 6), (11, 26)]);
}

// ============================================================================
// Reply Tests
// ============================================================================

#[test]
fn test_reply_at_the_start() {
    assert_eq!(
        Extractor::new().extract_reply_mention("^user reply"),
        Some("user".to_string())
    );
}

#[test]
fn test_reply_with_leading_space() {
    assert_eq!(
        Extractor::new().extract_reply_mention(" ^user reply"),
        Some("user".to_string())
    );
}

#[test]
fn test_no_reply_mid_text() {
    assert_eq!(Extractor::new().extract_reply_mention("hello ^user"), None);
}

// ============================================================================
// Cashtag Tests
// ============================================================================

#[test]
fn test_cashtags_with_indices() {
    let extracted = Extractor::new().extract_cashtags_with_indices("$TWTR and $goog.b, not a$BC");
    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].value, "TWTR");
    assert_eq!(extracted[1].value, "goog.b");
    assert_eq!(spans(&extracted), vec![(0, 5), (10, 17)]);
}

#[test]
fn test_cashtag_followed_by_letter_is_skipped() {
    assert!(Extractor::new().extract_cashtags("$AAPLé").is_empty());
}

// ============================================================================
// URL Tests
// ============================================================================

#[test]
fn test_url_with_indices() {
    let extracted =
        Extractor::new().extract_urls_with_indices("http://t.co url https://www.twitter.com ");
    assert_eq!(spans(&extracted), vec![(0, 11), (16, 39)]);
}

#[test]
fn test_url_without_protocol() {
    let text = "www.twitter.com, www.yahoo.co.jp, t.co/blahblah, www.poloshirts.uk.com";
    let extractor = Extractor::new();

    assert_eq!(
        extractor.extract_urls(text),
        vec!["www.twitter.com", "www.yahoo.co.jp", "t.co/blahblah", "www.poloshirts.uk.com"]
    );

    let extracted = extractor.extract_urls_with_indices(text);
    assert_eq!(spans(&extracted[..3]), vec![(0, 15), (17, 32), (34, 47)]);

    let without = Extractor::with_config(ExtractorConfig::new().with_url_without_protocol(false));
    assert!(without.extract_urls(text).is_empty());
}

#[test]
fn test_url_followed_by_punctuation() {
    let text = "http://games.aarp.org/games/mahjongg-dimensions.aspx!!!!!!";
    assert_eq!(
        Extractor::new().extract_urls(text),
        vec!["http://games.aarp.org/games/mahjongg-dimensions.aspx"]
    );
}

#[test]
fn test_url_with_punctuation() {
    let urls = [
        "http://www.foo.com/foo/path-with-period./",
        "http://www.foo.org.za/foo/bar/688.1",
        "http://www.foo.com/bar-path/some.stm?param1=foo;param2=P1|0||P2|0",
        "http://foo.com/bar/123/foo_&_bar/",
        "http://foo.com/bar(test)bar(test)bar(test)",
        "www.foo.com/foo/path-with-period./",
        "www.foo.org.za/foo/bar/688.1",
        "www.foo.com/bar-path/some.stm?param1=foo;param2=P1|0||P2|0",
        "foo.com/bar/123/foo_&_bar/",
    ];

    let extractor = Extractor::new();
    for url in urls {
        assert_eq!(extractor.extract_urls(url), vec![url], "url: {}", url);
    }
}

#[test]
fn test_url_with_supplementary_characters() {
    let text = "\u{10400} http://twitter.com \u{10400} http://twitter.com";
    let mut extracted = Extractor::new().extract_urls_with_indices(text);

    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].value, "http://twitter.com");
    assert_eq!(extracted[1].value, "http://twitter.com");
    assert_eq!(spans(&extracted), vec![(3, 21), (25, 43)]);

    offsets::to_code_point_space(text, &mut extracted);
    assert_eq!(spans(&extracted), vec![(2, 20), (23, 41)]);

    offsets::to_utf16_space(text, &mut extracted);
    assert_eq!(spans(&extracted), vec![(3, 21), (25, 43)]);
}

// ============================================================================
// Full Extraction Tests
// ============================================================================

#[test]
fn test_all_kinds_in_order() {
    let text = "^alice: #rust $RUST http://rust-lang.org";
    let extracted = Extractor::new().extract_entities_with_indices(text);

    let kinds: Vec<_> = extracted.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EntityKind::MentionOrList,
            EntityKind::Hashtag,
            EntityKind::Cashtag,
            EntityKind::Url
        ]
    );
    assert_eq!(spans(&extracted), vec![(0, 6), (8, 13), (14, 19), (20, 40)]);
}

#[test]
fn test_url_fragment_is_not_a_hashtag() {
    let text = "read http://example.com/#intro now";
    let extracted = Extractor::new().extract_entities_with_indices(text);

    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0].kind, EntityKind::Url);
    assert_eq!(extracted[0].value, "http://example.com/#intro");
}

#[test]
fn test_requested_kinds_only() {
    let text = "#tag ^name $CASH";
    let kinds = EntityKinds::only(EntityKind::Hashtag).with(EntityKind::Cashtag);
    let extracted = Extractor::new().extract(text, kinds);

    let values: Vec<_> = extracted.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["tag", "CASH"]);
}

#[test]
fn test_empty_text() {
    assert!(Extractor::new().extract_entities_with_indices("").is_empty());
    assert_eq!(Extractor::new().extract_reply_mention(""), None);
}

#[test]
fn test_extractor_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Extractor>();
}
