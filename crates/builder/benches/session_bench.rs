use builder::TreeBuilder;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dom::{Document, Viewport};

const DEEP_LEVELS: usize = 1_000;
const WIDE_SIBLINGS: usize = 10_000;

fn bench_deep_session(c: &mut Criterion) {
    c.bench_function("bench_deep_session", |b| {
        b.iter(|| {
            let mut doc = Document::new(Viewport::new(1280.0, 720.0));
            let mut builder = TreeBuilder::new();
            builder.start(&doc, None).unwrap();
            for _ in 0..DEEP_LEVELS {
                builder.start_element(&mut doc, "div").unwrap();
            }
            for _ in 0..DEEP_LEVELS {
                builder.end_element().unwrap();
            }
            builder.end().unwrap();
            black_box(doc.len());
        });
    });
}

fn bench_wide_session(c: &mut Criterion) {
    c.bench_function("bench_wide_session", |b| {
        b.iter(|| {
            let mut doc = Document::new(Viewport::new(1280.0, 720.0));
            let mut builder = TreeBuilder::new();
            builder.start(&doc, None).unwrap();
            for _ in 0..WIDE_SIBLINGS {
                builder.start_element(&mut doc, "div").unwrap();
                builder.end_element().unwrap();
            }
            builder.end().unwrap();
            black_box(doc.len());
        });
    });
}

criterion_group!(benches, bench_deep_session, bench_wide_session);
criterion_main!(benches);
