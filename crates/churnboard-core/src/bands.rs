use std::fmt;

use serde::Serialize;

/// Fixed contiguous tenure buckets. The boundaries are a configuration
/// constant rather than quantiles inferred from data, so chart categories
/// stay stable across dataset refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TenureBand {
    #[serde(rename = "0-12")]
    UpToOneYear,
    #[serde(rename = "12-24")]
    OneToTwoYears,
    #[serde(rename = "24-48")]
    TwoToFourYears,
    #[serde(rename = "48-72")]
    FourToSixYears,
    #[serde(rename = "72+")]
    BeyondSixYears,
}

/// Exclusive upper bounds, in months, of every band except the open-ended
/// last one. Pairs positionally with `TenureBand::ALL`.
pub const TENURE_BAND_UPPER_BOUNDS_MONTHS: [u32; 4] = [12, 24, 48, 72];

impl TenureBand {
    pub const ALL: [TenureBand; 5] = [
        TenureBand::UpToOneYear,
        TenureBand::OneToTwoYears,
        TenureBand::TwoToFourYears,
        TenureBand::FourToSixYears,
        TenureBand::BeyondSixYears,
    ];

    /// Classifies a tenure into its band. Total: every tenure lands in
    /// exactly one band.
    pub fn from_tenure(months: u32) -> TenureBand {
        TENURE_BAND_UPPER_BOUNDS_MONTHS
            .iter()
            .position(|&upper| months < upper)
            .map(|idx| TenureBand::ALL[idx])
            .unwrap_or(TenureBand::BeyondSixYears)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TenureBand::UpToOneYear => "0-12",
            TenureBand::OneToTwoYears => "12-24",
            TenureBand::TwoToFourYears => "24-48",
            TenureBand::FourToSixYears => "48-72",
            TenureBand::BeyondSixYears => "72+",
        }
    }
}

impl fmt::Display for TenureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
