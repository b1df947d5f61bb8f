use std::fs;
use std::path::PathBuf;

use churnboard_core::{
    load_from_reader, summarize, InternetService, RecordFilter, TenureBand,
};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn summarizes_fixture_end_to_end() {
    let content = fixture("customers_mini.csv");
    let dataset = load_from_reader(content.as_bytes()).expect("fixture load failed");
    let summary = summarize(&dataset.records);

    assert_eq!(summary.kpis.total_customers, 8);
    assert!((summary.kpis.churn_rate - 0.375).abs() < 1e-12);
    assert!((summary.kpis.monthly_revenue - 462.10).abs() < 1e-9);
    assert!((summary.kpis.avg_tenure_months - 14.25).abs() < 1e-12);

    // Fiber optic leads the presentation order: 2 churned of 3.
    let internet = &summary.churn_by_internet_service;
    assert_eq!(internet.len(), 3);
    assert_eq!(internet[0].key, InternetService::FiberOptic);
    assert!((internet[0].rate - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(internet[1].key, InternetService::Dsl);
    assert!((internet[1].rate - 0.25).abs() < 1e-12);
    assert_eq!(internet[2].key, InternetService::NoService);
    assert_eq!(internet[2].rate, 0.0);

    // Fiber 0-12 cell: mean(70.70, 99.65) x mean(2, 8).
    let fiber = summary
        .ltv_by_internet_service
        .iter()
        .find(|series| series.key == InternetService::FiberOptic)
        .expect("fiber LTV series missing");
    let first_band = fiber
        .points
        .iter()
        .find(|point| point.band == TenureBand::UpToOneYear)
        .expect("fiber 0-12 cell missing");
    assert!((first_band.estimate - 85.175 * 5.0).abs() < 1e-9);

    // Only the three bands with records appear.
    let bands: Vec<TenureBand> = summary.tenure_mix.iter().map(|row| row.band).collect();
    assert_eq!(
        bands,
        vec![
            TenureBand::UpToOneYear,
            TenureBand::OneToTwoYears,
            TenureBand::TwoToFourYears
        ]
    );
    assert_eq!(summary.tenure_mix[0].churned, 3);
    assert_eq!(summary.tenure_mix[0].retained, 2);
}

#[test]
fn filtered_subset_feeds_the_same_aggregator() {
    let content = fixture("customers_mini.csv");
    let dataset = load_from_reader(content.as_bytes()).expect("fixture load failed");

    let filter = RecordFilter {
        paperless_billing: Some(true),
        ..RecordFilter::default()
    };
    let subset = filter.apply(&dataset.records);
    let summary = summarize(&subset);

    assert_eq!(summary.kpis.total_customers, 5);
    assert!((summary.kpis.churn_rate - 0.6).abs() < 1e-12);
}
