use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use headerparse::{
    parse_accept, parse_accept_language, parse_cache_control, parse_content_type, parse_forwarded,
    parse_link, split_list,
};

fn content_type_parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_type_parse");

    let values = [
        ("simple", "text/plain"),
        ("parameters", "text/html; charset=\"UTF-8\"; level=1"),
        (
            "suffix_comment",
            "application/vnd.github.v3+json; charset=utf-8 (github api)",
        ),
    ];

    for (name, value) in values.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), value, |b, value| {
            b.iter(|| {
                let _ = parse_content_type(black_box(value), true).unwrap();
            });
        });
    }

    group.finish();
}

fn accept_parse_benchmark(c: &mut Criterion) {
    let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,\
                  image/avif,image/webp,image/apng,*/*;q=0.8,\
                  application/signed-exchange;v=b3;q=0.7";

    c.bench_function("accept_parse_chrome", |b| {
        b.iter(|| {
            let _ = parse_accept(black_box(accept), false).unwrap();
        });
    });

    c.bench_function("accept_language_parse", |b| {
        b.iter(|| {
            let _ = parse_accept_language(black_box("zh-CN,zh;q=0.9,en;q=0.8,en-GB;q=0.7"));
        });
    });
}

fn accept_element_count_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("accept_element_count");

    for count in [10, 100, 1000].iter() {
        let header = (0..*count)
            .map(|i| format!("type{}/sub;q=0.{}", i, i % 10))
            .collect::<Vec<_>>()
            .join(", ");
        group.bench_with_input(BenchmarkId::from_parameter(count), &header, |b, header| {
            b.iter(|| {
                let _ = parse_accept(black_box(header), true).unwrap();
            });
        });
    }

    group.finish();
}

fn structured_header_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured_header_parse");

    group.bench_function("cache_control", |b| {
        b.iter(|| {
            let _ = parse_cache_control(black_box(
                "public, max-age=31536000, immutable, stale-while-revalidate=60",
            ));
        });
    });

    group.bench_function("forwarded", |b| {
        b.iter(|| {
            let _ = parse_forwarded(
                black_box("for=192.0.2.60;proto=http;by=203.0.113.43, for=\"[2001:db8:cafe::17]\""),
                true,
            )
            .unwrap();
        });
    });

    group.bench_function("link", |b| {
        b.iter(|| {
            let _ = parse_link(
                black_box(
                    "<https://api.example.com/items?page=2>; rel=\"next\", \
                     <https://api.example.com/items?page=9>; rel=\"last\"; title=\"Last, final\"",
                ),
                true,
            )
            .unwrap();
        });
    });

    group.bench_function("split_list", |b| {
        b.iter(|| {
            let _ = split_list(black_box("first, \"comma ->,<- here\", last, , tail"));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    content_type_parse_benchmark,
    accept_parse_benchmark,
    accept_element_count_benchmark,
    structured_header_benchmark
);
criterion_main!(benches);
