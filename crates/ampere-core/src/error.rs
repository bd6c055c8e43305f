//! Error types for the Ampere core library

use lightning_invoice::ParseOrSemanticError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invoice decode error: {0}")]
    InvoiceDecode(String),

    #[error("Empty payment request")]
    EmptyPaymentRequest,

    #[error("Invalid node address: {0}")]
    InvalidNodeAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("The {0} backend cannot override the invoice amount")]
    AmountOverrideUnsupported(&'static str),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend rejected the API key")]
    Unauthorized,

    #[error("Backend endpoint not found")]
    NotFound,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseOrSemanticError> for Error {
    fn from(e: ParseOrSemanticError) -> Self {
        Error::InvoiceDecode(e.to_string())
    }
}
