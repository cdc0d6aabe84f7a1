use chat_markdown_engine::{CmarkLexer, Lexer, Renderer, to_html};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
mod common;

fn bench_lexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexing");
    group.sample_size(10);

    let lexer = CmarkLexer::default();
    for sections in [1, 10, 100] {
        let content = common::generate_chat_reply(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &content, |b, content| {
            b.iter(|| lexer.lex(std::hint::black_box(content)));
        });
    }

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.sample_size(10);

    let renderer = Renderer::<CmarkLexer>::default();
    let content = common::generate_chat_reply(100);
    group.bench_function("render_reply", |b| {
        b.iter(|| renderer.render(std::hint::black_box(&content), false));
    });

    let nested = common::generate_nested_list(24);
    group.bench_function("render_nested_list", |b| {
        b.iter(|| renderer.render(std::hint::black_box(&nested), false));
    });

    let node = renderer.render(&content, false);
    group.bench_function("to_html", |b| {
        b.iter(|| to_html(std::hint::black_box(&node)));
    });

    group.finish();
}

criterion_group!(benches, bench_lexing, bench_rendering);
criterion_main!(benches);
