//! Package rendering benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use quire_core::Document;

fn large_document() -> Document {
    let mut doc = Document::new();
    doc.add_title("Benchmark");
    doc.add_author("Bench Author");
    for i in 1..=500u32 {
        let path = format!("text/chapter{i}.xhtml");
        doc.add_xhtml_data(&path, "<html/>").unwrap();
        let part = doc.add_nav_point(&format!("Chapter {i}"), &path, i * 2 - 1);
        part.add_nav_point("Section", &format!("{path}#s1"), i * 2);
    }
    doc
}

fn rendering_benchmark(c: &mut Criterion) {
    let doc = large_document();

    c.bench_function("render_opf_500_chapters", |b| {
        b.iter(|| std::hint::black_box(doc.to_opf_xml().unwrap()))
    });

    c.bench_function("render_ncx_500_chapters", |b| {
        b.iter(|| std::hint::black_box(doc.to_ncx_xml().unwrap()))
    });
}

criterion_group!(benches, rendering_benchmark);
criterion_main!(benches);
