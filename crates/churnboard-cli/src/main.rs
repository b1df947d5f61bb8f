// crates/churnboard-cli/src/main.rs

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use churnboard_core::{
    load_dataset, summarize, ChurnRateRow, Gender, LtvSeries, RecordFilter, SummaryResult,
};
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// A CLI frontend for the customer-churn aggregation pipeline.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the churn summary as terminal tables.
    Report(PipelineArgs),
    /// Emit the churn summary as JSON for an external UI.
    Export {
        #[command(flatten)]
        pipeline: PipelineArgs,
        /// Write to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args, Debug)]
struct PipelineArgs {
    /// Path to the customer dataset CSV.
    #[arg(short, long)]
    data: PathBuf,

    /// Keep only customers of this gender (Male / Female).
    #[arg(long)]
    gender: Option<String>,
    #[arg(long, action = clap::ArgAction::Set)]
    paperless_billing: Option<bool>,
    #[arg(long, action = clap::ArgAction::Set)]
    phone_service: Option<bool>,
    #[arg(long, action = clap::ArgAction::Set)]
    dependents: Option<bool>,
    /// Inclusive lower tenure bound in months.
    #[arg(long)]
    min_tenure: Option<u32>,
    /// Inclusive upper tenure bound in months.
    #[arg(long)]
    max_tenure: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => {
            let summary = run_pipeline(&args)?;
            print_report(&summary);
        }
        Command::Export {
            pipeline,
            out,
            pretty,
        } => {
            let summary = run_pipeline(&pipeline)?;
            let json = if pretty {
                serde_json::to_string_pretty(&summary)?
            } else {
                serde_json::to_string(&summary)?
            };
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("wrote summary to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

/// Loads, optionally filters, and summarizes the dataset end to end. The
/// summary replaces any prior one wholesale; there is no incremental refresh.
fn run_pipeline(args: &PipelineArgs) -> Result<SummaryResult> {
    let dataset = load_dataset(&args.data)
        .with_context(|| format!("failed to load dataset from {}", args.data.display()))?;

    if !dataset.report.dropped.is_empty() {
        warn!(
            "dropped {} of {} rows during load",
            dataset.report.dropped.len(),
            dataset.report.rows_read
        );
    }
    info!("loaded {} customer records", dataset.records.len());

    let filter = build_filter(args)?;
    let records = if filter == RecordFilter::default() {
        dataset.records
    } else {
        let subset = filter.apply(&dataset.records);
        info!("{} of {} records match the filter", subset.len(), dataset.records.len());
        subset
    };

    Ok(summarize(&records))
}

fn build_filter(args: &PipelineArgs) -> Result<RecordFilter> {
    let gender = args
        .gender
        .as_deref()
        .map(Gender::try_from)
        .transpose()
        .map_err(|err| anyhow!(err))?;

    Ok(RecordFilter {
        gender,
        paperless_billing: args.paperless_billing,
        phone_service: args.phone_service,
        dependents: args.dependents,
        min_tenure_months: args.min_tenure,
        max_tenure_months: args.max_tenure,
    })
}

fn print_report(summary: &SummaryResult) {
    let mut kpis = Table::new();
    kpis.load_preset(UTF8_FULL);
    kpis.set_header(vec![
        "Total Customers",
        "Churn Rate",
        "Monthly Revenue",
        "Avg Tenure (months)",
    ]);
    kpis.add_row(vec![
        summary.kpis.total_customers.to_string(),
        format_rate(summary.kpis.churn_rate),
        format!("${:.2}", summary.kpis.monthly_revenue),
        format!("{:.1}", summary.kpis.avg_tenure_months),
    ]);
    println!("{kpis}");

    print_churn_table(
        "Churn Rate by Internet Service",
        &summary.churn_by_internet_service,
        |key| key.to_string(),
    );
    print_churn_table("Churn Rate by Contract", &summary.churn_by_contract, |key| {
        key.to_string()
    });
    print_churn_table(
        "Churn Rate by Payment Method",
        &summary.churn_by_payment_method,
        |key| key.short_label().to_string(),
    );

    let mut mix = Table::new();
    mix.load_preset(UTF8_FULL);
    mix.set_header(vec!["Tenure (months)", "Churned", "Stayed"]);
    for row in &summary.tenure_mix {
        mix.add_row(vec![
            row.band.to_string(),
            row.churned.to_string(),
            row.retained.to_string(),
        ]);
    }
    println!("\nTenure Distribution (Churned vs Stayed)");
    println!("{mix}");

    print_ltv_table(
        "Lifetime Value by Internet Service",
        &summary.ltv_by_internet_service,
    );
    print_ltv_table("Lifetime Value by Contract", &summary.ltv_by_contract);
}

fn print_churn_table<K>(title: &str, rows: &[ChurnRateRow<K>], label: impl Fn(&K) -> String) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Group", "Churned", "Total", "Churn Rate"]);
    for row in rows {
        table.add_row(vec![
            label(&row.key),
            row.churned.to_string(),
            row.total.to_string(),
            format_rate(row.rate),
        ]);
    }
    println!("\n{title}");
    println!("{table}");
}

fn print_ltv_table<K: fmt::Display>(title: &str, series: &[LtvSeries<K>]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Group", "Tenure Band", "Avg Lifetime Value"]);
    for entry in series {
        for point in &entry.points {
            table.add_row(vec![
                entry.key.to_string(),
                point.band.to_string(),
                format!("${:.2}", point.estimate),
            ]);
        }
    }
    println!("\n{title}");
    println!("{table}");
}

fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
