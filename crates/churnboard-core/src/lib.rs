pub mod aggregate;
pub mod bands;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use aggregate::{
    summarize, ChurnRateRow, Kpis, LtvPoint, LtvSeries, SummaryResult, TenureMixRow,
};
pub use bands::{TenureBand, TENURE_BAND_UPPER_BOUNDS_MONTHS};
pub use error::{DatasetError, Result};
pub use filter::RecordFilter;
pub use loader::{
    load_dataset, load_from_reader, DropReason, LoadReport, LoadedDataset, RowDiagnostic,
};
pub use model::{
    Contract, CustomerId, CustomerRecord, Gender, InternetService, MultipleLines, PaymentMethod,
};
