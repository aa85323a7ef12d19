//! Module errors

use thiserror::Error;

/// Represents the different types of errors that can occur in the Phyphox library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhyphoxError {
    /// Error indicating that there was an issue building the client.
    #[error("Error building client: {0}")]
    ClientBuild(String),

    /// Error indicating that there was an issue fetching data (timeout, connection, status).
    #[error("Error fetching data: {0}")]
    FetchData(String),

    /// Error indicating that the received data format is incorrect.
    #[error("Incorrect data format: {0}")]
    IncorrectDataFormat(String),

    /// Error indicating that the service was asked to do something its current state forbids.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl PhyphoxError {
    /// True for failures to obtain a payload from the device.
    pub fn is_transport(&self) -> bool {
        matches!(self, PhyphoxError::FetchData(_))
    }
}
