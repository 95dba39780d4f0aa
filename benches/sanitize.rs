use criterion::{Criterion, criterion_group, criterion_main};
use logfence::sanitize::validate_row;
use std::hint::black_box;

fn render_row(span_count: usize) -> String {
    let mut message = String::new();
    for _ in 0..span_count {
        message.push_str("<span class=\"syn-base\">x</span>");
    }
    format!(
        "<div class=\"log-row\">\n  \
         <div class=\"log-line-no\"><pre>000001</pre></div>\n  \
         <div class=\"log-time\"><pre><span class=\"log-date\">2026-01-01</span> \
         <span class=\"log-clock\">12:00:00</span></pre></div>\n  \
         <div class=\"badge-info\"><pre>i</pre></div>\n  \
         <div><pre>{message}</pre></div>\n</div>\n"
    )
}

fn bench_validate_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_row");

    let short = render_row(16);
    group.bench_function("short_message", |b| {
        b.iter(|| validate_row(black_box(&short)));
    });

    let long = render_row(4096);
    group.bench_function("long_message", |b| {
        b.iter(|| validate_row(black_box(&long)));
    });

    let rejected = render_row(16).replace("syn-base", "not-allowed");
    group.bench_function("rejected_class", |b| {
        b.iter(|| validate_row(black_box(&rejected)).is_err());
    });

    group.finish();
}

criterion_group!(benches, bench_validate_row);
criterion_main!(benches);
