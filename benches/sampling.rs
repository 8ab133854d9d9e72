/// Benchmarks for path sampling and text-on-path layout
///
/// Run with: cargo bench
use canvas_textpath::{
    PathSampler, Point, RecordingSurface, StyleOptions, TextOverflow, layout_text_on_path,
    path_length, render_text_on_path,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// A wavy polyline with `segments` segments
fn wave(segments: usize) -> Vec<Point> {
    (0..=segments)
        .map(|i| {
            let x = i as f64 * 4.0;
            Point::new(x, (x / 20.0).sin() * 30.0)
        })
        .collect()
}

/// Benchmark a forward walk over many offsets
fn benchmark_sampler_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler_walk");

    for segments in [16usize, 256, 4096] {
        let points = wave(segments);
        let length = path_length(&points);
        let steps = 1000;
        group.throughput(Throughput::Elements(steps as u64));

        group.bench_with_input(BenchmarkId::from_parameter(segments), &points, |b, points| {
            b.iter(|| {
                let Some(mut sampler) = PathSampler::new(black_box(points)) else {
                    return;
                };
                for i in 0..steps {
                    black_box(sampler.point_at(length * i as f64 / steps as f64));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark fitting and placing a label
fn benchmark_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let points = wave(256);
    let label = "Rue du Faubourg Saint-Honoré";

    let styles = [
        ("left", StyleOptions::new("14px Arial")),
        ("justify", StyleOptions::new("14px Arial").with_justify(true)),
        (
            "ellipsis",
            StyleOptions::new("14px Arial").with_overflow(TextOverflow::Ellipsis),
        ),
    ];

    for (name, style) in &styles {
        group.bench_function(*name, |b| {
            let mut metrics = RecordingSurface::new(7.0);
            b.iter(|| layout_text_on_path(&mut metrics, black_box(&points), label, style));
        });
    }

    group.finish();
}

/// Benchmark drawing through the recording surface
fn benchmark_render(c: &mut Criterion) {
    let points = wave(256);
    let style = StyleOptions::new("14px Arial").with_justify(true);

    c.bench_function("render_recording", |b| {
        let mut surface = RecordingSurface::new(7.0);
        b.iter(|| {
            surface.clear_operations();
            render_text_on_path(&mut surface, black_box(&points), "Grand Canal", &style)
        });
    });
}

criterion_group!(benches, benchmark_sampler_walk, benchmark_layout, benchmark_render);
criterion_main!(benches);
