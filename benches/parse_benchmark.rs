//! Benchmarks for unfiling parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the classification pipeline over synthetic filing HTML.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unfiling::{detect_filing_type, parse_str, SemanticTree, Unfiling};

/// Builds a synthetic 10-Q with the given number of body pages.
fn create_test_filing(page_count: usize) -> String {
    let mut html = String::new();

    // cover and opening sections
    html.push_str("<p>UNITED STATES SECURITIES AND EXCHANGE COMMISSION</p>");
    html.push_str("<p>FORM 10-Q</p>");
    html.push_str(
        "<p style=\"text-align:center;font-weight:bold\">PART I - FINANCIAL INFORMATION</p>",
    );
    html.push_str("<p style=\"font-weight:bold\">Item 1. Financial Statements</p>");

    // body pages with a repeated banner, prose, and a page number
    for page in 1..=page_count {
        html.push_str("<hr>");
        html.push_str("<p style=\"font-weight:bold\">Benchmark Holdings Form 10-Q</p>");
        for paragraph in 0..4 {
            html.push_str(&format!(
                "<p>Page {page} paragraph {paragraph}: recurring operating commentary \
                 with enough length to read as prose rather than a heading or stray \
                 page furniture.</p>"
            ));
        }
        html.push_str(&format!("<p>{page}</p>"));
    }
    html
}

/// Benchmark filing type detection.
fn bench_type_detection(c: &mut Criterion) {
    let filing = create_test_filing(1);
    let unmarked = "<p>just a document with no form markers anywhere in it</p>";

    c.bench_function("detect_filing_type", |b| {
        b.iter(|| detect_filing_type(black_box(&filing)));
    });

    c.bench_function("detect_unmarked_document", |b| {
        b.iter(|| detect_filing_type(black_box(unmarked)).is_none());
    });
}

/// Benchmark the full pipeline at various filing sizes.
fn bench_filing_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("filing_parsing");

    for page_count in [1, 10, 50].iter() {
        let html = create_test_filing(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = parse_str(black_box(&html));
            });
        });
    }

    group.finish();
}

/// Benchmark tree construction over an already parsed filing.
fn bench_tree_construction(c: &mut Criterion) {
    let elements = parse_str(&create_test_filing(10)).unwrap();

    c.bench_function("tree_construction", |b| {
        b.iter(|| SemanticTree::build(black_box(elements.clone())));
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = Unfiling::new().with_premerge(false);
        });
    });
}

criterion_group!(
    benches,
    bench_type_detection,
    bench_filing_parsing,
    bench_tree_construction,
    bench_builder_creation,
);
criterion_main!(benches);
