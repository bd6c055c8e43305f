//! Reusable UI components

pub mod alert;
pub mod header;
pub mod notification;
pub mod qr_scanner;
pub mod text_input;
