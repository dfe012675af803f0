//! Benchmarks for the exposure pipeline.
//!
//! Run with: cargo bench -p wealthlens-exposure

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use wealthlens_exposure::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

const SECTORS: [&str; 8] = [
    "Banking", "IT", "Pharma", "Auto", "FMCG", "Energy", "Metals", "Telecom",
];

fn create_test_holding(id: usize) -> NormalizedHolding {
    let value = Decimal::from(10_000 + (id as i64 * 7_919) % 990_000);
    let builder = NormalizedHolding::builder()
        .id(format!("H{id:05}"))
        .current_value(value)
        .sector(SECTORS[id % SECTORS.len()]);

    let builder = match id % 6 {
        0 | 1 => builder.name(format!("Stock {id}")).product_type("Stock"),
        2 => builder
            .name(format!("Flexi Cap Fund {id}"))
            .product_type("Mutual Fund")
            .asset_class("equity")
            .isin(format!("INF{id:09}")),
        3 => builder
            .name(format!("US Technology FOF {id}"))
            .product_type("Mutual Fund")
            .asset_class("equity")
            .isin(format!("INF{id:09}")),
        4 => builder
            .name(format!("Corporate Bond Fund {id}"))
            .product_type("Mutual Fund")
            .asset_class("debt")
            .isin(format!("INF{id:09}")),
        _ => builder.name(format!("Deposit {id}")).product_type("Fixed Deposit"),
    };
    builder.build().unwrap()
}

fn create_test_portfolio(size: usize) -> Vec<NormalizedHolding> {
    (0..size).map(create_test_holding).collect()
}

/// Factsheets for the flexi-cap funds only.
fn create_test_factsheets(size: usize) -> FactsheetBundle {
    (0..size)
        .filter(|id| id % 6 == 2)
        .fold(FactsheetBundle::new(), |bundle, id| {
            let isin = format!("INF{id:09}");
            bundle
                .with_composition(&isin, FundComposition::new(dec!(92), dec!(5), dec!(3)))
                .with_geography(&isin, GeographySplit::new(dec!(88), dec!(12)))
                .with_sector(&isin, SECTORS[id % SECTORS.len()], dec!(40_000))
                .with_sector(&isin, SECTORS[(id + 3) % SECTORS.len()], dec!(25_000))
                .with_market_cap(&isin, MarketCapBand::Large.name(), dec!(50_000))
                .with_market_cap(&isin, MarketCapBand::Mid.name(), dec!(15_000))
        })
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_classification(c: &mut Criterion) {
    let labels: Vec<&str> = ProductType::all().iter().map(ProductType::name).collect();

    c.bench_function("classify_all_products", |b| {
        b.iter(|| {
            for label in &labels {
                black_box(classify(black_box(label), None));
            }
        })
    });
}

fn bench_analyze_sequential(c: &mut Criterion) {
    let analyzer = ExposureAnalyzer::new(ExposureConfig::sequential());

    let mut group = c.benchmark_group("analyze_sequential");
    group.sample_size(50);

    for size in [100, 500, 1000].iter() {
        let holdings = create_test_portfolio(*size);
        let factsheets = create_test_factsheets(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(holdings, factsheets),
            |b, (holdings, factsheets)| {
                b.iter(|| analyzer.analyze(black_box(holdings), black_box(factsheets)))
            },
        );
    }
    group.finish();
}

fn bench_analyze_parallel(c: &mut Criterion) {
    let analyzer = ExposureAnalyzer::new(ExposureConfig::new().with_threshold(100));

    let mut group = c.benchmark_group("analyze_parallel");
    group.sample_size(50);

    for size in [100, 500, 1000].iter() {
        let holdings = create_test_portfolio(*size);
        let factsheets = create_test_factsheets(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(holdings, factsheets),
            |b, (holdings, factsheets)| {
                b.iter(|| analyzer.analyze(black_box(holdings), black_box(factsheets)))
            },
        );
    }
    group.finish();
}

fn bench_geography_detection(c: &mut Criterion) {
    let names = [
        "Motilal Oswal Nasdaq 100 Fund of Fund",
        "Parag Parikh Flexi Cap Fund",
        "ICICI Prudential Technology ETF",
        "HDFC Corporate Bond Fund",
    ];

    c.bench_function("detect_international_exposure", |b| {
        b.iter(|| {
            for name in &names {
                black_box(detect_international_exposure(black_box(name)));
            }
        })
    });
}

criterion_group!(classification, bench_classification, bench_geography_detection);

criterion_group!(pipeline, bench_analyze_sequential, bench_analyze_parallel);

criterion_main!(classification, pipeline);
