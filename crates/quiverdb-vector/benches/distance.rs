//! Benchmarks for the distance kernels.
//!
//! Run with: `cargo bench -p quiverdb-vector`
//!
//! Compare the default path against scalar: `cargo bench -p quiverdb-vector --features scalar`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quiverdb_core::{Complex32Value, VectorValue};
use quiverdb_vector::distance::{
    chi_squared_distance, cosine_parts, euclidean_distance_squared, hamming_distance,
    manhattan_distance,
};
use quiverdb_vector::{DistanceKernel, ExecutionPath, KernelConfig};
use rand::Rng;

/// Common embedding dimensions.
const DIMENSIONS: [usize; 4] = [128, 512, 1536, 3072];

/// Generate a random vector of the specified dimension.
fn random_vector(dim: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Benchmark the slice kernels on the preferred path.
fn bench_slice_kernels(c: &mut Criterion) {
    let kernels: [(&str, fn(&[f64], &[f64]) -> f64); 4] = [
        ("manhattan_distance", manhattan_distance),
        ("euclidean_distance_squared", euclidean_distance_squared),
        ("chi_squared_distance", chi_squared_distance),
        ("hamming_distance", hamming_distance),
    ];

    for (name, kernel) in kernels {
        let mut group = c.benchmark_group(name);

        for dim in DIMENSIONS {
            let a = random_vector(dim);
            let b = random_vector(dim);

            group.throughput(Throughput::Elements(dim as u64));
            group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |bench, _| {
                bench.iter(|| kernel(black_box(&a), black_box(&b)));
            });
        }

        group.finish();
    }
}

/// Benchmark the fused dot product and norms behind cosine.
fn bench_cosine_parts(c: &mut Criterion) {
    let mut group = c.benchmark_group("cosine_parts");

    for dim in DIMENSIONS {
        let a = random_vector(dim);
        let b = random_vector(dim);

        group.throughput(Throughput::Elements(dim as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |bench, _| {
            bench.iter(|| cosine_parts(black_box(&a), black_box(&b)));
        });
    }

    group.finish();
}

/// Benchmark both execution paths through the kernel API, including
/// promotion of float operands.
fn bench_execution_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_paths");

    for dim in [512, 1536] {
        let a = VectorValue::from(random_vector(dim).into_iter().map(|x| x as f32).collect::<Vec<_>>());
        let b = VectorValue::from(random_vector(dim).into_iter().map(|x| x as f32).collect::<Vec<_>>());

        for path in [ExecutionPath::Scalar, ExecutionPath::Vectorized] {
            let config = KernelConfig::new(path);
            for kernel in [DistanceKernel::L2, DistanceKernel::Cosine] {
                group.throughput(Throughput::Elements(dim as u64));
                group.bench_with_input(
                    BenchmarkId::new(format!("{kernel}/{path:?}"), dim),
                    &dim,
                    |bench, _| {
                        bench.iter(|| {
                            kernel.invoke_with(&config, black_box(&a), black_box(&b), None)
                        });
                    },
                );
            }
        }
    }

    group.finish();
}

/// Benchmark complex kernels.
fn bench_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("complex_kernels");

    for dim in [128, 512] {
        let random_complex = || {
            let re = random_vector(dim);
            let im = random_vector(dim);
            VectorValue::from_complex(
                re.iter().zip(&im).map(|(&r, &i)| Complex32Value::new(r as f32, i as f32)).collect(),
            )
        };
        let a = random_complex();
        let b = random_complex();

        for kernel in [DistanceKernel::L2Squared, DistanceKernel::InnerProduct] {
            group.throughput(Throughput::Elements(dim as u64));
            group.bench_with_input(BenchmarkId::new(kernel.name(), dim), &dim, |bench, _| {
                bench.iter(|| kernel.invoke(black_box(&a), black_box(&b)));
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_slice_kernels,
    bench_cosine_parts,
    bench_execution_paths,
    bench_complex,
);

criterion_main!(benches);
