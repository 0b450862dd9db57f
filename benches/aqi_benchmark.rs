use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

use vayuraksha::aqi::{composite_aqi, AqiCategory, Pollutant};
use vayuraksha::predictor::{KnnRegressor, Predictor};
use vayuraksha::predictor::knn::TrainingPoint;
use vayuraksha::utils::parse_coordinate;

// Create training points spread across the Indian bounding box
fn create_training_points(count: usize) -> Vec<TrainingPoint> {
    (0..count)
        .map(|i| {
            let step = i as f64;
            TrainingPoint {
                lat: 8.0 + (step * 0.37) % 30.0,
                lon: 68.0 + (step * 0.53) % 30.0,
                value: 20.0 + (step * 1.7) % 400.0,
            }
        })
        .collect()
}

fn create_readings() -> HashMap<Pollutant, f64> {
    HashMap::from([
        (Pollutant::Pm25, 95.3),
        (Pollutant::Pm10, 210.0),
        (Pollutant::No2, 64.2),
        (Pollutant::So2, 18.5),
        (Pollutant::Co, 1.4),
        (Pollutant::O3, 82.0),
    ])
}

fn benchmark_sub_index(c: &mut Criterion) {
    let concentrations: Vec<f64> = (0..500).map(|i| i as f64 * 1.3).collect();

    c.bench_function("sub_index_all_pollutants", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for &concentration in &concentrations {
                for pollutant in Pollutant::ALL {
                    total += pollutant.sub_index(concentration);
                }
            }
            black_box(total)
        })
    });
}

fn benchmark_composite_aqi(c: &mut Criterion) {
    let readings = create_readings();

    c.bench_function("composite_aqi", |b| {
        b.iter(|| {
            let aqi = composite_aqi(black_box(&readings));
            black_box(AqiCategory::from_aqi(aqi))
        })
    });
}

fn benchmark_coordinate_parsing(c: &mut Criterion) {
    let coordinates = vec!["28.6139", "77.2090", "-0.1278", "28:36:50", "77:12:32"];

    c.bench_function("coordinate_parsing", |b| {
        b.iter(|| {
            let mut results = Vec::new();
            for coordinate in &coordinates {
                if let Ok(decimal) = parse_coordinate(coordinate) {
                    results.push(decimal);
                }
            }
            black_box(results.len())
        })
    });
}

fn benchmark_knn_prediction(c: &mut Criterion) {
    let model = KnnRegressor::fit(create_training_points(5_000), 8, 0)
        .expect("fit benchmark model");

    c.bench_function("knn_prediction", |b| {
        b.iter(|| black_box(model.predict(black_box(28.6139), black_box(77.2090))))
    });
}

fn benchmark_prediction_by_training_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_prediction_by_size");

    for &size in &[100, 1_000, 10_000, 50_000] {
        group.bench_with_input(BenchmarkId::new("points", size), &size, |b, &count| {
            let model = KnnRegressor::fit(create_training_points(count), 8, 0)
                .expect("fit benchmark model");

            b.iter(|| black_box(model.predict(black_box(22.5), black_box(80.0))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_sub_index,
    benchmark_composite_aqi,
    benchmark_coordinate_parsing,
    benchmark_knn_prediction,
    benchmark_prediction_by_training_size
);
criterion_main!(benches);
