//! Benchmarks for extraction, autolinking and offset conversion
//!
//! Three workloads are measured:
//! 1. Extraction - single kinds and the merged full extraction
//! 2. Autolink - rendering posts to HTML
//! 3. Offsets - converting entity spans between UTF-16 and code points
//!
//! Run with: cargo bench --bench autolink

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tent_text::text::{offsets, Autolink, EntityKind, EntityKinds, Extractor};

// ============================================================================
// Inputs
// ============================================================================

mod inputs {
    pub fn plain() -> &'static str {
        "Nothing to link in this post, just a few words about the weather today."
    }

    pub fn mixed() -> &'static str {
        "^alice/rustaceans: #rust 1.80 is out, $MSFT and $GOOG.B dip. \
         Notes at https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html#lazycell \
         and www.example.com/changes ^bob ^carol"
    }

    pub fn supplementary() -> &'static str {
        "\u{1F602}\u{1F602} #smile ^friend \u{10400} http://t.co/abc123 \u{1F602} $EMJ"
    }

    pub fn long() -> String {
        mixed().repeat(20)
    }
}

// ============================================================================
// Extraction
// ============================================================================

fn bench_extract(c: &mut Criterion) {
    let extractor = Extractor::new();
    let mixed = inputs::mixed();
    let long = inputs::long();

    let mut g = c.benchmark_group("extract");
    g.bench_function("plain_all", |b| {
        b.iter(|| extractor.extract_entities_with_indices(black_box(inputs::plain())))
    });
    g.bench_function("mixed_all", |b| {
        b.iter(|| extractor.extract_entities_with_indices(black_box(mixed)))
    });
    g.bench_function("mixed_urls", |b| {
        b.iter(|| extractor.extract(black_box(mixed), EntityKinds::only(EntityKind::Url)))
    });
    g.bench_function("mixed_hashtags", |b| {
        b.iter(|| extractor.extract_hashtags_with_indices(black_box(mixed)))
    });
    g.bench_function("mixed_mentions", |b| {
        b.iter(|| extractor.extract_mentions_or_lists_with_indices(black_box(mixed)))
    });
    g.bench_function("long_all", |b| {
        b.iter(|| extractor.extract_entities_with_indices(black_box(&long)))
    });
    g.finish();
}

// ============================================================================
// Autolink
// ============================================================================

fn bench_autolink(c: &mut Criterion) {
    let linker = Autolink::new();
    let mixed = inputs::mixed();
    let entities = linker.extractor().extract_entities_with_indices(mixed);

    let mut g = c.benchmark_group("autolink");
    g.bench_function("plain", |b| b.iter(|| linker.auto_link(black_box(inputs::plain()))));
    g.bench_function("mixed", |b| b.iter(|| linker.auto_link(black_box(mixed))));
    g.bench_function("supplementary", |b| {
        b.iter(|| linker.auto_link(black_box(inputs::supplementary())))
    });
    g.bench_function("mixed_prebuilt_entities", |b| {
        b.iter(|| linker.auto_link_entities(black_box(mixed), black_box(&entities)))
    });
    g.finish();
}

// ============================================================================
// Offsets
// ============================================================================

fn bench_offsets(c: &mut Criterion) {
    let text = inputs::supplementary();
    let entities = Extractor::new().extract_entities_with_indices(text);

    let mut g = c.benchmark_group("offsets");
    g.bench_function("to_code_points", |b| {
        b.iter(|| {
            let mut converted = entities.clone();
            offsets::to_code_point_space(black_box(text), &mut converted);
            converted
        })
    });
    g.bench_function("round_trip", |b| {
        b.iter(|| {
            let mut converted = entities.clone();
            offsets::to_code_point_space(black_box(text), &mut converted);
            offsets::to_utf16_space(black_box(text), &mut converted);
            converted
        })
    });
    g.finish();
}

criterion_group!(benches, bench_extract, bench_autolink, bench_offsets);
criterion_main!(benches);
