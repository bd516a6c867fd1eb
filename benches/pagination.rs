//! Benchmarks for segmentation and coordinate lookups.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use folio::{Book, BookIndex, GridMeasurer, Layout, Size, TextStyle, segment};

/// A headed book of `chapters` chapters with `filler` body chars each.
fn synthesize(chapters: usize, filler: usize) -> String {
    let body = "天地玄黄宇宙洪荒日月盈昃辰宿列张".repeat(filler / 16 + 1);
    let mut text = String::new();
    for n in 1..=chapters {
        text.push_str(&format!("第{n}章 起承转合\n"));
        text.push_str(&body);
        text.push('\n');
    }
    text
}

fn layout() -> Layout {
    let style = TextStyle {
        font_size: 16.0,
        line_spacing: 1.4,
    };
    Layout::new(style, Size::new(390.0, 700.0))
}

fn bench_segment(c: &mut Criterion) {
    let text = synthesize(120, 2_000);
    c.bench_function("segment_headed_text", |b| {
        b.iter(|| segment::segment(&text));
    });
}

fn bench_segment_chunked(c: &mut Criterion) {
    let text = "流".repeat(400_000);
    c.bench_function("segment_chunk_fallback", |b| {
        b.iter(|| segment::segment(&text));
    });
}

fn bench_first_page_cold(c: &mut Criterion) {
    let text = synthesize(120, 2_000);
    c.bench_function("first_page_cold", |b| {
        b.iter(|| {
            let index = BookIndex::new(Book::new(text.clone()), Box::new(GridMeasurer), layout());
            index.page_at(60, 0)
        });
    });
}

fn bench_locate_warm(c: &mut Criterion) {
    let text = synthesize(120, 2_000);
    let len = text.len();
    let index = BookIndex::new(Book::new(text), Box::new(GridMeasurer), layout());
    // Warm every chapter's page cache so only the searches are measured.
    for offset in (0..len).step_by(997) {
        index.locate(offset);
    }
    c.bench_function("locate_warm", |b| {
        let mut offset = 0;
        b.iter(|| {
            offset = (offset + 7_919) % len;
            index.locate(offset)
        });
    });
}

criterion_group!(
    benches,
    bench_segment,
    bench_segment_chunked,
    bench_first_page_cold,
    bench_locate_warm
);
criterion_main!(benches);
