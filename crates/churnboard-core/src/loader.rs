// crates/churnboard-core/src/loader.rs

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::error::{DatasetError, Result};
use crate::model::{
    Contract, CustomerId, CustomerRecord, Gender, InternetService, MultipleLines, PaymentMethod,
};

/// A validated dataset plus the diagnostics accumulated while cleaning it.
#[derive(Debug)]
pub struct LoadedDataset {
    pub records: Vec<CustomerRecord>,
    pub report: LoadReport,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub rows_read: usize,
    pub dropped: Vec<RowDiagnostic>,
}

impl LoadReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.dropped.len()
    }
}

/// One excluded source row. Recoverable by contract: reported and counted,
/// never fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    /// 1-based line in the source file; the header occupies line 1.
    pub line: usize,
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    MissingValue { column: &'static str },
    UnknownCategory { column: &'static str, value: String },
    InvalidNumber { column: &'static str, value: String },
    NegativeNumber { column: &'static str, value: f64 },
    EmptyCustomerId,
    DuplicateCustomerId { customer_id: String },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingValue { column } => write!(f, "missing value in column '{column}'"),
            DropReason::UnknownCategory { column, value } => {
                write!(f, "unknown category '{value}' in column '{column}'")
            }
            DropReason::InvalidNumber { column, value } => {
                write!(f, "value '{value}' in column '{column}' is not a valid number")
            }
            DropReason::NegativeNumber { column, value } => {
                write!(f, "value {value} in column '{column}' is negative")
            }
            DropReason::EmptyCustomerId => write!(f, "customer id is empty"),
            DropReason::DuplicateCustomerId { customer_id } => {
                write!(f, "customer id '{customer_id}' already seen")
            }
        }
    }
}

struct ColumnIndex {
    customer_id: usize,
    gender: usize,
    senior_citizen: usize,
    partner: usize,
    dependents: usize,
    tenure: usize,
    phone_service: usize,
    multiple_lines: usize,
    internet_service: usize,
    contract: usize,
    paperless_billing: usize,
    payment_method: usize,
    monthly_charges: usize,
    total_charges: usize,
    churn: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(Self {
            customer_id: find("customerID")?,
            gender: find("gender")?,
            senior_citizen: find("SeniorCitizen")?,
            partner: find("Partner")?,
            dependents: find("Dependents")?,
            tenure: find("tenure")?,
            phone_service: find("PhoneService")?,
            multiple_lines: find("MultipleLines")?,
            internet_service: find("InternetService")?,
            contract: find("Contract")?,
            paperless_billing: find("PaperlessBilling")?,
            payment_method: find("PaymentMethod")?,
            monthly_charges: find("MonthlyCharges")?,
            total_charges: find("TotalCharges")?,
            churn: find("Churn")?,
        })
    }
}

/// Reads and cleans the customer dataset from a CSV file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<LoadedDataset> {
    let file = File::open(path.as_ref())?;
    load_from_reader(file)
}

/// Reader-based entry point for embedding and tests.
pub fn load_from_reader(reader: impl Read) -> Result<LoadedDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (row_idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let line = row_idx + 2;
        report.rows_read += 1;

        match parse_row(&row, &columns, &seen_ids) {
            Ok(record) => {
                seen_ids.insert(record.customer_id.as_str().to_string());
                records.push(record);
            }
            Err(reason) => {
                warn!("dropping row at line {line}: {reason}");
                report.dropped.push(RowDiagnostic { line, reason });
            }
        }
    }

    if records.is_empty() {
        return Err(DatasetError::Empty {
            rows_read: report.rows_read,
            dropped: report.dropped.len(),
        });
    }

    Ok(LoadedDataset { records, report })
}

fn parse_row(
    row: &StringRecord,
    columns: &ColumnIndex,
    seen_ids: &HashSet<String>,
) -> std::result::Result<CustomerRecord, DropReason> {
    let raw_id = row.get(columns.customer_id).unwrap_or("");
    let customer_id = CustomerId::new(raw_id).map_err(|_| DropReason::EmptyCustomerId)?;
    if seen_ids.contains(customer_id.as_str()) {
        return Err(DropReason::DuplicateCustomerId {
            customer_id: customer_id.as_str().to_string(),
        });
    }

    let gender = parse_category::<Gender>(row, "gender", columns.gender)?;
    let senior_citizen = parse_flag(row, "SeniorCitizen", columns.senior_citizen)?;
    let partner = parse_flag(row, "Partner", columns.partner)?;
    let dependents = parse_flag(row, "Dependents", columns.dependents)?;
    let tenure_months = parse_tenure(row, columns.tenure)?;
    let phone_service = parse_flag(row, "PhoneService", columns.phone_service)?;
    let multiple_lines = parse_category::<MultipleLines>(row, "MultipleLines", columns.multiple_lines)?;
    let internet_service =
        parse_category::<InternetService>(row, "InternetService", columns.internet_service)?;
    let contract = parse_category::<Contract>(row, "Contract", columns.contract)?;
    let paperless_billing = parse_flag(row, "PaperlessBilling", columns.paperless_billing)?;
    let payment_method =
        parse_category::<PaymentMethod>(row, "PaymentMethod", columns.payment_method)?;
    let monthly_charges = parse_charge(row, "MonthlyCharges", columns.monthly_charges)?;
    let total_charges = parse_total_charges(row, columns.total_charges)?;
    let churned = parse_flag(row, "Churn", columns.churn)?;

    Ok(CustomerRecord {
        customer_id,
        gender,
        senior_citizen,
        partner,
        dependents,
        tenure_months,
        phone_service,
        multiple_lines,
        internet_service,
        contract,
        paperless_billing,
        payment_method,
        monthly_charges,
        total_charges,
        churned,
    })
}

fn required_field<'a>(
    row: &'a StringRecord,
    column: &'static str,
    index: usize,
) -> std::result::Result<&'a str, DropReason> {
    match row.get(index).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DropReason::MissingValue { column }),
    }
}

fn parse_category<'a, T>(
    row: &'a StringRecord,
    column: &'static str,
    index: usize,
) -> std::result::Result<T, DropReason>
where
    T: TryFrom<&'a str, Error = String>,
{
    let value = required_field(row, column, index)?;
    T::try_from(value).map_err(|_| DropReason::UnknownCategory {
        column,
        value: value.to_string(),
    })
}

/// Accepts both the Yes/No spelling and the 0/1 encoding the source dataset
/// uses for the senior-citizen column.
fn parse_flag(
    row: &StringRecord,
    column: &'static str,
    index: usize,
) -> std::result::Result<bool, DropReason> {
    let value = required_field(row, column, index)?;
    match value.to_ascii_lowercase().as_str() {
        "yes" | "1" | "true" => Ok(true),
        "no" | "0" | "false" => Ok(false),
        _ => Err(DropReason::UnknownCategory {
            column,
            value: value.to_string(),
        }),
    }
}

fn parse_tenure(row: &StringRecord, index: usize) -> std::result::Result<u32, DropReason> {
    let value = required_field(row, "tenure", index)?;
    value.parse::<u32>().map_err(|_| DropReason::InvalidNumber {
        column: "tenure",
        value: value.to_string(),
    })
}

fn parse_charge(
    row: &StringRecord,
    column: &'static str,
    index: usize,
) -> std::result::Result<f64, DropReason> {
    let value = required_field(row, column, index)?;
    let parsed = value.parse::<f64>().map_err(|_| DropReason::InvalidNumber {
        column,
        value: value.to_string(),
    })?;
    if parsed < 0.0 {
        return Err(DropReason::NegativeNumber {
            column,
            value: parsed,
        });
    }
    Ok(parsed)
}

/// Total charges are blank or unparseable for brand-new customers with zero
/// tenure; those coerce to 0.0 and the record is kept. A value that parses
/// negative is still a data-quality drop.
fn parse_total_charges(row: &StringRecord, index: usize) -> std::result::Result<f64, DropReason> {
    let raw = row.get(index).unwrap_or("").trim();
    match raw.parse::<f64>() {
        Ok(value) if value < 0.0 => Err(DropReason::NegativeNumber {
            column: "TotalCharges",
            value,
        }),
        Ok(value) => Ok(value),
        Err(_) => Ok(0.0),
    }
}
