use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_parser::{parse, parse_fragment, serialize};

const SMALL_PAGE: &str = r#"<main data-node-id="main" class="p-8">
  <section data-node-id="hero" class="space-y-4">
    <h1 data-node-id="title" class="text-4xl font-bold">Welcome</h1>
    <p data-node-id="lead">A short introduction.</p>
  </section>
</main>"#;

fn list_page(items: usize) -> String {
    let mut markup = String::from(r#"<main class="p-8"><ul class="grid">"#);
    for i in 0..items {
        markup.push_str(&format!(
            r#"<li class="card"><img src="/img/{i}.png" alt=""><h3>Item {i}</h3><p>Description &amp; more</p></li>"#
        ));
    }
    markup.push_str("</ul></main>");
    markup
}

fn parse_small_page(c: &mut Criterion) {
    c.bench_function("parse_small_page", |b| b.iter(|| parse(black_box(SMALL_PAGE))));
}

fn parse_large_page_assigning_ids(c: &mut Criterion) {
    let markup = list_page(200);

    c.bench_function("parse_large_page_assigning_ids", |b| {
        b.iter(|| parse(black_box(&markup)))
    });
}

fn reparse_canonical_markup(c: &mut Criterion) {
    let canonical = parse(&list_page(200)).html;

    c.bench_function("reparse_canonical_markup", |b| {
        b.iter(|| parse(black_box(&canonical)))
    });
}

fn fragment_roundtrip(c: &mut Criterion) {
    let markup = list_page(200);

    c.bench_function("fragment_roundtrip", |b| {
        b.iter(|| {
            let fragment = parse_fragment(black_box(&markup)).unwrap();
            serialize(&fragment)
        })
    });
}

criterion_group!(
    benches,
    parse_small_page,
    parse_large_page_assigning_ids,
    reparse_canonical_markup,
    fragment_roundtrip
);
criterion_main!(benches);
