use churnboard_core::filter::RecordFilter;
use churnboard_core::model::{
    Contract, CustomerId, CustomerRecord, Gender, InternetService, MultipleLines, PaymentMethod,
};

fn record(id: &str, gender: Gender, tenure: u32, paperless: bool, dependents: bool) -> CustomerRecord {
    CustomerRecord {
        customer_id: CustomerId::new(id).unwrap(),
        gender,
        senior_citizen: false,
        partner: false,
        dependents,
        tenure_months: tenure,
        phone_service: true,
        multiple_lines: MultipleLines::No,
        internet_service: InternetService::Dsl,
        contract: Contract::MonthToMonth,
        paperless_billing: paperless,
        payment_method: PaymentMethod::MailedCheck,
        monthly_charges: 20.0,
        total_charges: 20.0 * tenure as f64,
        churned: false,
    }
}

fn sample() -> Vec<CustomerRecord> {
    vec![
        record("A", Gender::Female, 0, true, false),
        record("B", Gender::Male, 12, false, true),
        record("C", Gender::Female, 40, true, true),
        record("D", Gender::Male, 72, false, false),
    ]
}

#[test]
fn default_filter_keeps_every_record() {
    let records = sample();
    let kept = RecordFilter::default().apply(&records);
    assert_eq!(kept, records);
}

#[test]
fn tenure_bounds_are_inclusive() {
    let records = sample();
    let filter = RecordFilter {
        min_tenure_months: Some(12),
        max_tenure_months: Some(72),
        ..RecordFilter::default()
    };

    let kept = filter.apply(&records);
    let ids: Vec<&str> = kept.iter().map(|r| r.customer_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "C", "D"]);
}

#[test]
fn criteria_combine_conjunctively() {
    let records = sample();
    let filter = RecordFilter {
        gender: Some(Gender::Female),
        paperless_billing: Some(true),
        dependents: Some(true),
        ..RecordFilter::default()
    };

    let kept = filter.apply(&records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].customer_id.as_str(), "C");
}

#[test]
fn filter_may_match_nothing() {
    let records = sample();
    let filter = RecordFilter {
        min_tenure_months: Some(100),
        ..RecordFilter::default()
    };

    assert!(filter.apply(&records).is_empty());
}
