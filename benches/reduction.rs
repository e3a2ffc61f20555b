use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fcmetrics::bounds::{Point, SelectionMode};
use fcmetrics::extrema;
use fcmetrics::metrics::Cell;
use fcmetrics::pipeline::{reduce_ecsa, EcsaInput};
use fcmetrics::series::{CvScan, IndexRange};
use fcmetrics::tafel::{fit, PolarizationPoint, TafelParams};

/// One triangular CV cycle of `2 * half` samples on a 50 cm2 electrode
fn synthetic_cycle(half: usize) -> CvScan {
    let step = 0.4 / half as f64;
    let mut volts = Vec::with_capacity(2 * half);
    let mut amps = Vec::with_capacity(2 * half);
    for i in 0..half {
        let frac = i as f64 / half as f64;
        volts.push(0.05 + i as f64 * step);
        amps.push(-0.01 - 0.02 * frac + 0.001 * (frac * 40.0).sin());
    }
    for i in 0..half {
        let frac = i as f64 / half as f64;
        volts.push(0.45 - i as f64 * step);
        amps.push(0.03 - 0.02 * frac + 0.001 * (frac * 40.0).sin());
    }
    CvScan::with_sample_interval(volts, amps, 0.01).unwrap()
}

fn picking_points() -> Vec<Point> {
    vec![
        Point::new(0.05, -0.2),
        Point::new(0.45, -0.6),
        Point::new(0.45, 0.6),
        Point::new(0.05, 0.2),
    ]
}

/// Benchmark the full ECSA reduction in both selection modes
fn bench_ecsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecsa_reduction");
    let cell = Cell::new("bench", 50.0, 0.253).unwrap();

    for half in [1_000, 5_000, 20_000] {
        let scan = synthetic_cycle(half);
        group.throughput(Throughput::Elements(scan.len() as u64));

        for (name, mode) in [
            (
                "voltage",
                SelectionMode::Voltage {
                    v_up: 0.1,
                    v_down: 0.1,
                },
            ),
            ("edge", SelectionMode::Edge),
        ] {
            let input = EcsaInput {
                label: "BOT".to_string(),
                scan: &scan,
                range: IndexRange::full(scan.len()),
                points: picking_points(),
                mode,
            };
            group.bench_with_input(
                BenchmarkId::new(name, format!("{}samples", scan.len())),
                &input,
                |b, input| {
                    b.iter(|| black_box(reduce_ecsa(black_box(input), &cell)));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark extremum location on its own
fn bench_extrema(c: &mut Criterion) {
    let mut group = c.benchmark_group("extrema");

    for half in [5_000, 20_000] {
        let scan = synthetic_cycle(half);
        group.throughput(Throughput::Elements(scan.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}samples", scan.len())),
            &scan,
            |b, scan| {
                b.iter(|| black_box(extrema::locate(black_box(scan.amps()))));
            },
        );
    }

    group.finish();
}

/// Benchmark the crossover-corrected Tafel fit
fn bench_tafel_fit(c: &mut Criterion) {
    let points: Vec<PolarizationPoint> = (0..19)
        .map(|i| {
            let log_i = -2.0 + i as f64 * 0.1;
            PolarizationPoint {
                current_density: 10f64.powf(log_i),
                load_voltage: -0.065 * log_i + 0.83,
                hfr: 0.05,
            }
        })
        .collect();
    let crossover = vec![0.001; 500];
    let params = TafelParams {
        voltage_cutoff: 0.0,
        ..TafelParams::default()
    };

    c.bench_function("tafel_fit", |b| {
        b.iter(|| black_box(fit(black_box(&points), &crossover, 50.0, &params)));
    });
}

criterion_group!(benches, bench_ecsa, bench_extrema, bench_tafel_fit);
criterion_main!(benches);
