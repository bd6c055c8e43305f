//! Ampere TUI Library
//!
//! Terminal screens for paying Lightning invoices and scanning node
//! addresses, written against the store traits in `ampere-core`.

pub mod app;
pub mod ui;
pub mod utils;

pub use app::App;
