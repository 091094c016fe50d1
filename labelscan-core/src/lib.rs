//! # Labelscan Core
//!
//! Core library for the Labelscan service. Scans photographs of printed
//! device labels for 1D/2D barcodes and maps the decoded payloads onto
//! provisioning fields (WAN MAC, VOIP MAC, GPON serial, production serial).
//!
//! Label photos arrive in arbitrary orientation and lighting, so one scan
//! decodes twenty variants of the source image (four rotations crossed with
//! five photometric treatments), classifies every payload, deduplicates,
//! and aggregates the survivors into a [`ScanResult`].
#![allow(missing_docs)]

pub mod aggregate;
pub mod classify;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod variants;

pub use aggregate::EMPTY_SCAN_TEXT;
pub use error::{Result, ScanError};
pub use pipeline::{BarcodeScanner, DeviceInfoSource};
pub use variants::{ImageVariant, PreprocessMode, Rotation};

pub use labelscan_model as model;
