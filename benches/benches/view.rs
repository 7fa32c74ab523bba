// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use gatemap_geometry::DataExtent;
use gatemap_view2d::{DEFAULT_MARGIN, ViewTransform, ZoomDirection};
use kurbo::{Point, Size, Vec2};

fn fitted() -> ViewTransform {
    let mut view = ViewTransform::new(Size::new(1280.0, 720.0), 100.0);
    view.fit_to_data(&DataExtent::new(-5000.0, 5000.0, -4800.0, 5200.0), DEFAULT_MARGIN);
    view
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");

    group.bench_function("pixel_to_data(1k)", |b| {
        let view = fitted();
        b.iter(|| {
            for i in 0..1_000 {
                let p = Point::new(f64::from(i) * 1.28, f64::from(i) * 0.72);
                black_box(view.pixel_to_data(p));
            }
        });
    });

    group.bench_function("drag_pan(100 moves)", |b| {
        b.iter_batched(
            fitted,
            |mut view| {
                for _ in 0..100 {
                    view.pan(Vec2::new(3.0, -2.0));
                }
                black_box(view);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("zoom_in_out(50 steps)", |b| {
        b.iter_batched(
            fitted,
            |mut view| {
                let anchor = Point::new(911.0, 204.0);
                for _ in 0..25 {
                    view.zoom(anchor, ZoomDirection::In);
                }
                for _ in 0..25 {
                    view.zoom(anchor, ZoomDirection::Out);
                }
                black_box(view);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("resize_refit", |b| {
        b.iter_batched(
            fitted,
            |mut view| {
                for w in [640.0, 1920.0, 800.0, 1280.0] {
                    black_box(view.fit_to_surface_resize(Size::new(w, 720.0)));
                }
                black_box(view);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_view);
criterion_main!(benches);
