use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use restock_replenishment::{Cell, EngineConfig, ReplenishmentEngine, RunParameters, Table};

/// Sales and stock reports with `items` rows each; every third stock item
/// has no sales row so the join exercises all cases.
fn synthetic_reports(items: usize) -> (Table, Table) {
    let mut sales = Table::new(["Item Name", "Sales Qty", "Closing Stock"]);
    let mut stock = Table::new([
        "Item Name",
        "Warehouse",
        "Shop 01",
        "Shop 02",
        "Shop 03",
        "Carton",
    ]);

    for i in 0..items {
        let name = format!("Item {i:05}");
        if i % 3 != 0 {
            sales.push_row([
                Cell::from(name.clone()),
                Cell::from((i % 17) as f64),
                Cell::from((i % 11) as f64),
            ]);
        }
        stock.push_row([
            Cell::from(name),
            Cell::from((i % 23) as f64),
            Cell::from((i % 5) as f64),
            Cell::from((i % 13) as f64),
            Cell::from((i % 7) as f64),
            Cell::from(6.0),
        ]);
    }
    (sales, stock)
}

fn bench_engine_run(c: &mut Criterion) {
    let engine = ReplenishmentEngine::new(EngineConfig {
        limits: restock_replenishment::DatasetLimits::unlimited(),
        ..EngineConfig::default()
    })
    .expect("default config is valid");
    let params = RunParameters::default();

    let mut group = c.benchmark_group("engine_run");
    for &items in &[100usize, 1_000, 2_500] {
        let (sales, stock) = synthetic_reports(items);
        group.throughput(Throughput::Elements(items as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, _| {
            b.iter(|| {
                let out = engine
                    .run(black_box(&sales), black_box(&stock), &params)
                    .expect("run succeeds");
                black_box(out.results.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine_run);
criterion_main!(benches);
