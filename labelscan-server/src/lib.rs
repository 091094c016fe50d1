//! # Labelscan Server
//!
//! HTTP surface of the Labelscan service. The single substantive endpoint,
//! `POST /scan`, accepts a base64-encoded photograph of a device label and
//! responds with the classified barcodes plus the device fields derived
//! from them. Everything here is thin plumbing around
//! [`labelscan_core::BarcodeScanner`].

pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use state::AppState;
