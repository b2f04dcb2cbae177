use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ssz_core::{M_EARTH, Qubit, QubitPair, R_EARTH, Regime, SszModel, optimize_qubit_array};

fn bench_segment_density(c: &mut Criterion) {
    let model = SszModel::earth();
    c.bench_function("segment_density_auto", |b| {
        b.iter(|| model.segment_density_auto(black_box(R_EARTH + 1.0), black_box(M_EARTH)))
    });
}

fn bench_dilation_difference(c: &mut Criterion) {
    let model = SszModel::earth();
    c.bench_function("time_dilation_difference", |b| {
        b.iter(|| {
            model.time_dilation_difference(
                black_box(R_EARTH),
                black_box(R_EARTH + 1e-3),
                black_box(M_EARTH),
            )
        })
    });
}

fn bench_pair_mismatch(c: &mut Criterion) {
    let model = SszModel::earth();
    let a = Qubit::at_height("a", 0.0);
    let b = Qubit::at_height("b", 1e-3);
    let pair = QubitPair::new(&a, &b);
    c.bench_function("pair_segment_mismatch", |bench| {
        bench.iter(|| model.pair_segment_mismatch(black_box(&pair), M_EARTH))
    });
}

fn bench_array_uniformity(c: &mut Criterion) {
    let model = SszModel::earth();
    let qubits = optimize_qubit_array(1024, 0.0, 0.1).unwrap_or_default();
    c.bench_function("array_segment_uniformity_1024", |b| {
        b.iter(|| model.array_segment_uniformity(black_box(&qubits), M_EARTH, Regime::Weak))
    });
}

criterion_group!(
    benches,
    bench_segment_density,
    bench_dilation_difference,
    bench_pair_mismatch,
    bench_array_uniformity,
);
criterion_main!(benches);
