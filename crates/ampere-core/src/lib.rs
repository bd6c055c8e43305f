//! Ampere Core - Payment requests, node addresses and wallet stores
//!
//! This crate holds everything the Ampere wallet screens read from or write
//! to: decoded BOLT11 payment requests, the node address heuristic used by
//! the QR intake screen, display units, settings, the store traits the
//! screens are written against, and the payment backends behind them.

pub mod backend;
pub mod error;
pub mod invoice;
pub mod node_address;
pub mod payment;
pub mod settings;
pub mod stores;
pub mod units;

pub use backend::{BackendConfig, PaymentBackend, PaymentReceipt};
pub use error::{Error, Result};
pub use invoice::PayReq;
pub use node_address::NodeAddress;
pub use payment::{PaymentDispatcher, PaymentOutcome, PaymentStatus};
pub use settings::{Settings, ThemeName};
pub use stores::{
    InvoiceStore, InvoicesStore, SettingsStore, StoreEvent, TransactionsStore, UnitStore,
    UnitsStore,
};
pub use units::{FiatRate, Units};

/// Satoshis in one bitcoin
pub const SATS_PER_BTC: u64 = 100_000_000;

/// URI scheme some wallets put in front of payment requests
pub const LIGHTNING_SCHEME: &str = "lightning:";
