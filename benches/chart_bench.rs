//! Benchmarks for chart layout and SVG rendering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use neurotrack::chart::{Animation, AxisScale, ChartData, ChartLayout, ChartRenderer, SvgSurface};

fn create_series(count: usize) -> ChartData {
    let values = (0..count).map(|i| ((i * 37 + 11) % 100) as f64).collect();
    let labels = (0..count).map(|i| format!("{:02}:00", i % 24)).collect();
    ChartData::new(values, labels, "episodes")
}

fn bench_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");

    for size in [7, 30, 365] {
        let data = create_series(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("from_values_{}", size), |b| {
            b.iter(|| AxisScale::from_values(black_box(&data.values)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [7, 30, 365] {
        let renderer = ChartRenderer::new(create_series(size), ChartLayout::default());
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("svg_frame_{}", size), |b| {
            b.iter(|| {
                let mut svg = SvgSurface::new();
                renderer.draw(&mut svg, black_box(0.5));
                svg.finish()
            })
        });
    }

    group.bench_function("full_animation_30", |b| {
        let renderer = ChartRenderer::new(create_series(30), ChartLayout::default());
        let frames = Animation::default().frames(30);
        b.iter(|| {
            for &p in &frames {
                let mut svg = SvgSurface::new();
                renderer.draw(&mut svg, p);
                black_box(svg.finish());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_scale, bench_render);
criterion_main!(benches);
