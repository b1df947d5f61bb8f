use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::bands::TenureBand;
use crate::model::{Contract, CustomerRecord, InternetService, PaymentMethod};

/// Scalar headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_customers: usize,
    /// Fraction in [0,1], not a percentage.
    pub churn_rate: f64,
    pub monthly_revenue: f64,
    pub avg_tenure_months: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnRateRow<K> {
    pub key: K,
    pub churned: usize,
    pub total: usize,
    pub rate: f64,
}

/// Per-band customer counts split by churn label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenureMixRow {
    pub band: TenureBand,
    pub churned: usize,
    pub retained: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LtvPoint {
    pub band: TenureBand,
    pub estimate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LtvSeries<K> {
    pub key: K,
    pub points: Vec<LtvPoint>,
}

/// The pipeline's sole output: KPIs plus chart-ready grouped tables.
/// Constructed fresh from a record collection, immutable thereafter;
/// refreshing means re-running [`summarize`] on the full dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub kpis: Kpis,
    pub churn_by_internet_service: Vec<ChurnRateRow<InternetService>>,
    pub churn_by_contract: Vec<ChurnRateRow<Contract>>,
    pub churn_by_payment_method: Vec<ChurnRateRow<PaymentMethod>>,
    pub tenure_mix: Vec<TenureMixRow>,
    pub ltv_by_internet_service: Vec<LtvSeries<InternetService>>,
    pub ltv_by_contract: Vec<LtvSeries<Contract>>,
}

#[derive(Debug, Default)]
struct ChurnCounter {
    churned: usize,
    total: usize,
}

impl ChurnCounter {
    fn observe(&mut self, churned: bool) {
        self.total += 1;
        if churned {
            self.churned += 1;
        }
    }

    /// Churned / total. An empty group reports 0, never NaN; this is the
    /// documented edge-case policy for degenerate groups.
    fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.churned as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Default)]
struct LtvCell {
    monthly_sum: f64,
    tenure_sum: f64,
    count: usize,
}

impl LtvCell {
    fn observe(&mut self, record: &CustomerRecord) {
        self.monthly_sum += record.monthly_charges;
        self.tenure_sum += record.tenure_months as f64;
        self.count += 1;
    }

    /// mean(monthly charge) x mean(tenure) over the cell. `None` for empty
    /// cells, which are omitted from series instead of plotted as zero dips.
    fn estimate(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some((self.monthly_sum / n) * (self.tenure_sum / n))
    }
}

#[derive(Debug, Default)]
struct MixCounts {
    churned: usize,
    retained: usize,
}

/// Pure aggregation over a cleaned record collection. One accumulation pass
/// into per-key running counters, one finalization pass that fixes the
/// presentation order and computes rates and means. Identical record
/// multisets yield identical output regardless of row order.
///
/// Valid input never fails here; the empty collection degrades to all-zero
/// KPIs and empty tables (filtered subsets may legitimately be empty even
/// though the loader rejects an empty dataset upstream).
pub fn summarize(records: &[CustomerRecord]) -> SummaryResult {
    let mut overall = ChurnCounter::default();
    let mut monthly_revenue = 0.0;
    let mut tenure_sum = 0.0;

    let mut by_internet: HashMap<InternetService, ChurnCounter> = HashMap::new();
    let mut by_contract: HashMap<Contract, ChurnCounter> = HashMap::new();
    let mut by_payment: HashMap<PaymentMethod, ChurnCounter> = HashMap::new();
    let mut mix: HashMap<TenureBand, MixCounts> = HashMap::new();
    let mut ltv_internet: HashMap<(InternetService, TenureBand), LtvCell> = HashMap::new();
    let mut ltv_contract: HashMap<(Contract, TenureBand), LtvCell> = HashMap::new();

    for record in records {
        overall.observe(record.churned);
        monthly_revenue += record.monthly_charges;
        tenure_sum += record.tenure_months as f64;

        let band = TenureBand::from_tenure(record.tenure_months);

        by_internet
            .entry(record.internet_service)
            .or_default()
            .observe(record.churned);
        by_contract
            .entry(record.contract)
            .or_default()
            .observe(record.churned);
        by_payment
            .entry(record.payment_method)
            .or_default()
            .observe(record.churned);

        let slot = mix.entry(band).or_default();
        if record.churned {
            slot.churned += 1;
        } else {
            slot.retained += 1;
        }

        ltv_internet
            .entry((record.internet_service, band))
            .or_default()
            .observe(record);
        ltv_contract
            .entry((record.contract, band))
            .or_default()
            .observe(record);
    }

    let total = records.len();
    let kpis = Kpis {
        total_customers: total,
        churn_rate: overall.rate(),
        monthly_revenue,
        avg_tenure_months: if total == 0 {
            0.0
        } else {
            tenure_sum / total as f64
        },
    };

    SummaryResult {
        kpis,
        churn_by_internet_service: finalize_rates(&by_internet, &InternetService::ALL),
        churn_by_contract: finalize_rates(&by_contract, &Contract::ALL),
        churn_by_payment_method: finalize_rates(&by_payment, &PaymentMethod::ALL),
        tenure_mix: finalize_mix(&mix),
        ltv_by_internet_service: finalize_ltv(&ltv_internet, &InternetService::ALL),
        ltv_by_contract: finalize_ltv(&ltv_contract, &Contract::ALL),
    }
}

/// Emits one row per key observed in the input, in presentation order.
fn finalize_rates<K>(counters: &HashMap<K, ChurnCounter>, order: &[K]) -> Vec<ChurnRateRow<K>>
where
    K: Copy + Eq + Hash,
{
    order
        .iter()
        .filter_map(|key| {
            counters.get(key).map(|counter| ChurnRateRow {
                key: *key,
                churned: counter.churned,
                total: counter.total,
                rate: counter.rate(),
            })
        })
        .collect()
}

fn finalize_mix(mix: &HashMap<TenureBand, MixCounts>) -> Vec<TenureMixRow> {
    TenureBand::ALL
        .iter()
        .filter_map(|band| {
            mix.get(band).map(|counts| TenureMixRow {
                band: *band,
                churned: counts.churned,
                retained: counts.retained,
            })
        })
        .collect()
}

fn finalize_ltv<K>(cells: &HashMap<(K, TenureBand), LtvCell>, order: &[K]) -> Vec<LtvSeries<K>>
where
    K: Copy + Eq + Hash,
{
    order
        .iter()
        .filter_map(|key| {
            let points: Vec<LtvPoint> = TenureBand::ALL
                .iter()
                .filter_map(|band| {
                    cells
                        .get(&(*key, *band))
                        .and_then(LtvCell::estimate)
                        .map(|estimate| LtvPoint {
                            band: *band,
                            estimate,
                        })
                })
                .collect();

            if points.is_empty() {
                None
            } else {
                Some(LtvSeries { key: *key, points })
            }
        })
        .collect()
}
