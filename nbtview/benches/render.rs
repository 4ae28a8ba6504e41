use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nbtview::{html::to_html, render, Payload, RenderOptions, Renderer, Tag};

/// Something shaped like a chunk: two dozen sections, each with a
/// palette list and a packed long array.
fn chunk_like() -> Tag {
    let sections = (0..24)
        .map(|y| {
            Tag::anonymous(Payload::Compound(vec![
                Tag::named("Y", Payload::Byte(y)),
                Tag::named(
                    "palette",
                    Payload::List(
                        (0..16)
                            .map(|i| {
                                Tag::anonymous(Payload::Compound(vec![Tag::named(
                                    "Name",
                                    Payload::String(format!("minecraft:block_{}", i)),
                                )]))
                            })
                            .collect(),
                    ),
                ),
                Tag::named("data", Payload::LongArray((0..256).collect())),
            ]))
        })
        .collect();

    Tag::named(
        "",
        Payload::Compound(vec![
            Tag::named("DataVersion", Payload::Int(3465)),
            Tag::named("sections", Payload::List(sections)),
            Tag::named("Heightmap", Payload::IntArray(vec![64; 256])),
        ]),
    )
}

pub fn render_benchmark(c: &mut Criterion) {
    let tag = chunk_like();

    c.bench_function("render", |b| {
        b.iter(|| black_box(render(&tag)));
    });

    c.bench_function("render truncated", |b| {
        let renderer = Renderer::new(RenderOptions { truncate: Some(50) });
        b.iter(|| black_box(renderer.render(&tag)));
    });

    c.bench_function("html", |b| {
        let tree = render(&tag);
        b.iter(|| black_box(to_html(&tree)));
    });
}

criterion_group!(benches, render_benchmark);
criterion_main!(benches);
