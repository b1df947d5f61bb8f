// crates/churnboard-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("dataset contained no parseable customer rows ({rows_read} read, {dropped} dropped)")]
    Empty { rows_read: usize, dropped: usize },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
