// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gatemap_diagram::{Course, Diagram};
use gatemap_geometry::{Checkpoint, DisplayConfig, Vec3};
use gatemap_imaging_ref::RefBackend;
use kurbo::Size;

fn zigzag(n: usize) -> Vec<Checkpoint> {
    (0..n)
        .map(|i| {
            let z = i as f64 * 250.0;
            let x = if i % 2 == 0 { 0.0 } else { 400.0 };
            Checkpoint::new(i as i64, Vec3::new(x, 0.0, z), Vec3::new(1.0, 0.0, 0.0))
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/ops");

    for n in [32_usize, 256] {
        let cps = zigzag(n);
        let config = DisplayConfig::default();
        let mut diagram = Diagram::new(Size::new(1024.0, 768.0), config.clone());
        diagram.refresh(Some(&Course::new("ZIG", &cps)), &config);

        group.bench_with_input(BenchmarkId::new("ref_backend", n), &diagram, |b, diagram| {
            b.iter(|| {
                let mut backend = RefBackend::default();
                diagram.render(&mut backend);
                black_box(backend.ops().count());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
