use thiserror::Error;

use phyphox_rs::PhyphoxError;

/// Failure to write the collected history.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error(transparent)]
    Phyphox(#[from] PhyphoxError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
