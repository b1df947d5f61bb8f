use std::fs;
use std::path::PathBuf;

use churnboard_core::loader::{load_from_reader, DropReason};
use churnboard_core::DatasetError;

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

const HEADER: &str = "customerID,gender,SeniorCitizen,Partner,Dependents,tenure,PhoneService,MultipleLines,InternetService,Contract,PaperlessBilling,PaymentMethod,MonthlyCharges,TotalCharges,Churn";

#[test]
fn loads_fixture_and_reports_dropped_rows() {
    let content = fixture("customers_mini.csv");
    let dataset = load_from_reader(content.as_bytes()).expect("fixture load failed");

    assert_eq!(dataset.report.rows_read, 12);
    assert_eq!(dataset.records.len(), 8);
    assert_eq!(dataset.report.rows_kept(), 8);
    assert_eq!(dataset.report.dropped.len(), 4);

    let lines: Vec<usize> = dataset.report.dropped.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![10, 11, 12, 13]);

    assert_eq!(
        dataset.report.dropped[0].reason,
        DropReason::MissingValue {
            column: "InternetService"
        }
    );
    assert_eq!(
        dataset.report.dropped[1].reason,
        DropReason::DuplicateCustomerId {
            customer_id: "0001-AAAA".to_string()
        }
    );
    assert_eq!(
        dataset.report.dropped[2].reason,
        DropReason::UnknownCategory {
            column: "Contract",
            value: "Biennial".to_string()
        }
    );
    assert_eq!(dataset.report.dropped[3].reason, DropReason::EmptyCustomerId);
}

#[test]
fn blank_total_charges_coerces_to_zero_and_keeps_record() {
    let content = fixture("customers_mini.csv");
    let dataset = load_from_reader(content.as_bytes()).expect("fixture load failed");

    let record = dataset
        .records
        .iter()
        .find(|r| r.customer_id.as_str() == "0008-HHHH")
        .expect("zero-tenure record missing");

    assert_eq!(record.tenure_months, 0);
    assert_eq!(record.total_charges, 0.0);
}

#[test]
fn unparseable_total_charges_coerces_to_zero() {
    let csv = format!(
        "{HEADER}\n\
         0001-AAAA,Female,0,Yes,No,0,Yes,No,DSL,Month-to-month,Yes,Mailed check,20.00,N/A,No\n"
    );
    let dataset = load_from_reader(csv.as_bytes()).expect("load failed");

    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.records[0].total_charges, 0.0);
}

#[test]
fn senior_citizen_accepts_numeric_encoding() {
    let content = fixture("customers_mini.csv");
    let dataset = load_from_reader(content.as_bytes()).expect("fixture load failed");

    let senior = dataset
        .records
        .iter()
        .find(|r| r.customer_id.as_str() == "0006-FFFF")
        .expect("senior record missing");
    assert!(senior.senior_citizen);

    let junior = dataset
        .records
        .iter()
        .find(|r| r.customer_id.as_str() == "0001-AAAA")
        .expect("junior record missing");
    assert!(!junior.senior_citizen);
}

#[test]
fn missing_required_column_is_fatal() {
    let csv = "customerID,gender,SeniorCitizen,Partner,Dependents,tenure,PhoneService,\
               MultipleLines,InternetService,Contract,PaperlessBilling,PaymentMethod,\
               MonthlyCharges,Churn\n\
               0001-AAAA,Female,0,Yes,No,1,No,No phone service,DSL,Month-to-month,Yes,\
               Electronic check,29.85,No\n";

    let err = load_from_reader(csv.as_bytes()).expect_err("expected missing-column failure");
    assert!(matches!(err, DatasetError::MissingColumn("TotalCharges")));
}

#[test]
fn header_only_input_is_empty_dataset() {
    let csv = format!("{HEADER}\n");
    let err = load_from_reader(csv.as_bytes()).expect_err("expected empty-dataset failure");
    assert!(matches!(
        err,
        DatasetError::Empty {
            rows_read: 0,
            dropped: 0
        }
    ));
}

#[test]
fn all_rows_dropped_is_empty_dataset() {
    let csv = format!(
        "{HEADER}\n\
         ,Male,0,No,No,3,Yes,No,DSL,Month-to-month,Yes,Mailed check,20.00,60.00,No\n\
         0002-BBBB,Male,0,No,No,oops,Yes,No,DSL,One year,No,Mailed check,56.95,1889.50,No\n"
    );

    let err = load_from_reader(csv.as_bytes()).expect_err("expected empty-dataset failure");
    assert!(matches!(
        err,
        DatasetError::Empty {
            rows_read: 2,
            dropped: 2
        }
    ));
}

#[test]
fn negative_monthly_charge_drops_row() {
    let csv = format!(
        "{HEADER}\n\
         0001-AAAA,Female,0,Yes,No,1,No,No phone service,DSL,Month-to-month,Yes,Electronic check,-5.00,29.85,No\n\
         0002-BBBB,Male,0,No,No,34,Yes,No,DSL,One year,No,Mailed check,56.95,1889.50,No\n"
    );
    let dataset = load_from_reader(csv.as_bytes()).expect("load failed");

    assert_eq!(dataset.records.len(), 1);
    assert_eq!(
        dataset.report.dropped[0].reason,
        DropReason::NegativeNumber {
            column: "MonthlyCharges",
            value: -5.0
        }
    );
}
