//! Screen modules for different views

pub mod node_qr_scanner;
pub mod open_channel;
pub mod payment_request;
pub mod send;
pub mod sending;
