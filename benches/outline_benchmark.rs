//! Benchmarks for outline extraction.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdf_outline::outline::{FontHierarchy, HeadingClassifier};
use pdf_outline::{OutlineExtractor, OutlineOptions, TextFragment};

/// Synthetic report: a title page, then sections with subsections and body text.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in 0..page_count {
        let mut lines = vec![
            (format!("Section {}", page + 1), 18.0),
            ("Key Findings".to_string(), 14.0),
        ];
        for n in 0..20 {
            lines.push((format!("Body line {} of page {} with ordinary prose.", n, page), 10.0));
        }
        if page == 0 {
            lines.insert(0, ("Benchmark Report".to_string(), 24.0));
        }

        let mut operations = Vec::new();
        let mut y = 760.0_f32;
        for (text, size) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Real(size)],
            ));
            operations.push(Operation::new("Td", vec![Object::Real(72.0), Object::Real(y)]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
            y -= size * 1.5;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn synthetic_fragments(pages: u32) -> Vec<TextFragment> {
    let mut fragments = vec![TextFragment::new("Benchmark Report", 24.0, 1)];
    for page in 1..=pages {
        fragments.push(TextFragment::new(format!("Section {}", page), 18.0, page));
        fragments.push(TextFragment::new("Key Findings", 14.0, page));
        for n in 0..20 {
            fragments.push(TextFragment::new(
                format!("Body line {} with ordinary prose", n),
                10.0,
                page,
            ));
        }
    }
    fragments
}

/// Full pipeline on an in-memory document.
fn bench_extract_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_bytes");

    for page_count in [1, 10, 50] {
        let data = create_test_pdf(page_count);
        let extractor = OutlineExtractor::default();

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract_bytes(black_box(&data), "bench"));
        });
    }

    group.finish();
}

/// Hierarchy, classification and assembly without PDF parsing.
fn bench_build_outline(c: &mut Criterion) {
    let fragments = synthetic_fragments(50);
    let extractor = OutlineExtractor::default();

    c.bench_function("build_outline_50_pages", |b| {
        b.iter(|| extractor.build_outline(black_box(&fragments), "bench"));
    });
}

/// Structural gate alone.
fn bench_structural_gate(c: &mut Criterion) {
    let options = OutlineOptions::default();
    let classifier = HeadingClassifier::new(&options);
    let hierarchy = FontHierarchy::from_sizes([24.0, 18.0, 14.0, 10.0]);
    let samples = [
        "INTRODUCTION",
        "Chapter One: Foundations.",
        "Page 12",
        "www.example.com",
        "an ordinary sentence of body text",
    ];

    c.bench_function("structural_gate", |b| {
        b.iter(|| {
            samples
                .iter()
                .filter(|s| classifier.is_potential_heading(black_box(s)))
                .count()
        });
    });

    c.bench_function("tier_lookup", |b| {
        b.iter(|| hierarchy.level_for(black_box(14.0)));
    });
}

criterion_group!(
    benches,
    bench_extract_bytes,
    bench_build_outline,
    bench_structural_gate,
);
criterion_main!(benches);
