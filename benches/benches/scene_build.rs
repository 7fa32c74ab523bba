// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gatemap_geometry::color::assign_ramp;
use gatemap_geometry::{Checkpoint, Crossing, DisplayConfig, PathPoint, Vec3, build};

/// Checkpoints spaced around a circle, facing outward.
fn ring(n: usize) -> Vec<Checkpoint> {
    let mut cps: Vec<Checkpoint> = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            Checkpoint::new(
                i as i64,
                Vec3::new(5000.0 * cos, 10.0 * sin, 5000.0 * sin),
                Vec3::new(cos, 0.0, sin),
            )
            .with_track_width(90.0 + (i % 7) as f64 * 10.0)
        })
        .collect();
    assign_ramp(&mut cps);
    cps
}

fn path(n: usize) -> Vec<PathPoint> {
    (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            Vec3::new(4990.0 * angle.cos(), 0.0, 4990.0 * angle.sin())
        })
        .collect()
}

fn crossings(cps: &[Checkpoint]) -> Vec<Crossing> {
    cps.iter()
        .enumerate()
        .map(|(i, cp)| Crossing {
            start: cp.lateral_point(-30.0),
            end: cp.lateral_point(30.0),
            success: i % 3 != 0,
            track: "RING".into(),
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene/build");

    for n in [16_usize, 128, 1_000] {
        let cps = ring(n);
        let path = path(n * 20);
        let crossings = crossings(&cps);
        let config = DisplayConfig {
            extended_checkpoints: (0..n as i64).step_by(4).collect(),
            ..DisplayConfig::default()
        };
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("checkpoints", n), &cps, |b, cps| {
            b.iter(|| black_box(build(cps, None, None, &config)));
        });

        group.bench_with_input(BenchmarkId::new("with_overlays", n), &cps, |b, cps| {
            b.iter(|| black_box(build(cps, Some(&path), Some(&crossings), &config)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
