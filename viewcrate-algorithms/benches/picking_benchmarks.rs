//! Benchmarks for half-float sampling and ray picking

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use half::f16;
use viewcrate_algorithms::{find_closest_to_ray, sample_half_float_points};
use viewcrate_core::{Point3d, Vector3d, DEFAULT_TARGET_SAMPLE_COUNT};

fn generate_wave_buffer(point_count: usize) -> Vec<u16> {
    let side = (point_count as f64).sqrt().ceil() as usize;
    let mut buffer = Vec::with_capacity(point_count * 3);
    for i in 0..point_count {
        let x = (i % side) as f64 * 0.01;
        let y = (i / side) as f64 * 0.01;
        let z = (x * 3.0).sin() * (y * 2.0).cos() - 5.0;
        buffer.push(f16::from_f64(x).to_bits());
        buffer.push(f16::from_f64(y).to_bits());
        buffer.push(f16::from_f64(z).to_bits());
    }
    buffer
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");

    for &count in &[10_000usize, 100_000, 1_000_000] {
        let buffer = generate_wave_buffer(count);
        group.bench_with_input(BenchmarkId::new("half_float", count), &buffer, |b, buffer| {
            b.iter(|| {
                let result = sample_half_float_points(black_box(buffer), None, DEFAULT_TARGET_SAMPLE_COUNT);
                black_box(result);
            });
        });
    }

    group.finish();
}

fn bench_picking(c: &mut Criterion) {
    let mut group = c.benchmark_group("picking");
    let origin = Point3d::new(-1.0, -1.0, 0.0);
    let direction = Vector3d::new(0.0, 0.0, -1.0);

    for &count in &[1_000usize, 18_000] {
        let buffer = generate_wave_buffer(count);
        let samples = sample_half_float_points(&buffer, None, count)
            .map(|sampled| sampled.samples)
            .unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("closest_to_ray", count), &samples, |b, samples| {
            b.iter(|| {
                let hit = find_closest_to_ray(black_box(samples), &origin, &direction, f64::INFINITY);
                black_box(hit);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sampling, bench_picking);
criterion_main!(benches);
