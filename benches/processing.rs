//! Benchmarks for document processing.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use palettize::{parse_document, process_source, serialize, Processor};

/// A storyboard with `views` labels, cycling through matched, gray, and unmatched colors.
fn synthetic_storyboard(views: usize) -> String {
    let colors = [
        r#"<color key="textColor" red="0.87843137254901960" green="0.19215686274509805" blue="0.19215686274509805" alpha="1" colorSpace="custom" customColorSpace="sRGB"/>"#,
        r#"<color key="textColor" white="0.5" alpha="1" colorSpace="custom" customColorSpace="genericGamma22GrayColorSpace"/>"#,
        r#"<color key="textColor" red="0.1" green="0.5" blue="0.9" alpha="1" colorSpace="custom" customColorSpace="sRGB"/>"#,
    ];

    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<document type=\"com.apple.InterfaceBuilder3.CocoaTouch.Storyboard.XIB\" version=\"3.0\">\n    <scenes>\n        <scene sceneID=\"s\">\n            <objects>\n",
    );
    for i in 0..views {
        out.push_str(&format!(
            "                <label text=\"Label {i}\" id=\"label-{i}\">\n                    {}\n                </label>\n",
            colors[i % colors.len()]
        ));
        if i % 10 == 0 {
            out.push_str(&format!(
                "                <tableViewCellContentView key=\"contentView\" id=\"content-{i}\"/>\n"
            ));
        }
    }
    out.push_str("            </objects>\n        </scene>\n    </scenes>\n    <resources/>\n</document>\n");
    out
}

/// Benchmark parse + process + serialize at several document sizes
fn bench_process_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_source");
    for views in [10usize, 100, 1000] {
        let text = synthetic_storyboard(views);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(views), &text, |b, text| {
            b.iter(|| {
                let mut processor = Processor::default();
                process_source(black_box(text), &mut processor).expect("Failed to process")
            })
        });
    }
    group.finish();
}

/// Benchmark parsing alone
fn bench_parse(c: &mut Criterion) {
    let text = synthetic_storyboard(1000);
    c.bench_function("parse_1000", |b| {
        b.iter(|| parse_document(black_box(&text)).expect("Failed to parse"))
    });
}

/// Benchmark serialization alone
fn bench_serialize(c: &mut Criterion) {
    let text = synthetic_storyboard(1000);
    let document = parse_document(&text).expect("Failed to parse");
    c.bench_function("serialize_1000", |b| {
        b.iter(|| serialize(black_box(&document)).expect("Failed to serialize"))
    });
}

criterion_group!(benches, bench_process_source, bench_parse, bench_serialize);
criterion_main!(benches);
