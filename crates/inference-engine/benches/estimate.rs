use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_validator::UserInputSet;
use feature_engine::{FeatureAssembler, SchemaCatalog};
use inference_engine::{LinearModel, PriceEngine};

const MODEL: &str = include_str!("../../../models/house_price_model.json");

fn bench_estimate(c: &mut Criterion) {
    let catalog = Arc::new(SchemaCatalog::reference().expect("reference catalog"));
    let model = LinearModel::from_json_str(MODEL, &catalog).expect("demo model");
    let engine = PriceEngine::new(FeatureAssembler::new(catalog, 2020), Arc::new(model));
    let input = UserInputSet::default();

    c.bench_function("estimate_loglinear", |b| {
        b.iter(|| engine.estimate(black_box(&input)).unwrap())
    });
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
