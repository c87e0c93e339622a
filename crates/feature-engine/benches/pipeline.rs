use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_validator::UserInputSet;
use feature_engine::{FeatureAssembler, SchemaCatalog};

fn bench_pipeline(c: &mut Criterion) {
    let catalog = Arc::new(SchemaCatalog::reference().expect("reference catalog"));
    let assembler = FeatureAssembler::new(catalog, 2020);
    let input = UserInputSet::default();

    c.bench_function("assemble", |b| {
        b.iter(|| assembler.assemble(black_box(&input)).unwrap())
    });

    c.bench_function("assemble_and_derive", |b| {
        b.iter(|| assembler.build(black_box(&input)).unwrap())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
