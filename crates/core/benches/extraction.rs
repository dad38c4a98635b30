use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use precis_core::{ContentExtractor, Document, Readability, paragraphs_from_html, preprocess_html};

fn long_article(paragraphs: usize) -> String {
    let mut html = String::from("<html><head><title>Bench</title></head><body><nav><a href=\"/\">Home</a></nav><article>");
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p>Paragraph {i} describes the river, the towns along it, and the people rebuilding after the flood.</p>"
        ));
    }
    html.push_str("</article><footer><p>Copyright, all rights reserved.</p></footer></body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let article = std::fs::read_to_string("../../tests/fixtures/article.html").unwrap();
    let medium = long_article(100);
    let large = long_article(2_000);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "fixture"), &article, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "100p"), &medium, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "2000p"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_preprocess(c: &mut Criterion) {
    let html = long_article(100);
    let config = Default::default();

    c.bench_function("preprocess", |b| b.iter(|| preprocess_html(black_box(&html), &config)));
}

fn bench_readability(c: &mut Criterion) {
    let html = long_article(100);
    let reader = Readability::new();

    c.bench_function("readability_transform", |b| b.iter(|| reader.transform(black_box(&html))));
}

fn bench_paragraphs(c: &mut Criterion) {
    let fragment = Readability::new().transform(&long_article(100)).unwrap();

    c.bench_function("paragraphs_from_html", |b| b.iter(|| paragraphs_from_html(black_box(&fragment))));
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = long_article(100);
    let extractor = ContentExtractor::new();

    c.bench_function("full_extraction", |b| b.iter(|| extractor.extract_html(black_box(&html))));
}

criterion_group!(
    benches,
    bench_parse,
    bench_preprocess,
    bench_readability,
    bench_paragraphs,
    bench_full_extraction
);
criterion_main!(benches);
