//! Core data model definitions shared across Labelscan crates.
#![allow(missing_docs)]

pub mod barcode;
pub mod device;
pub mod scan;

// Intentionally curated re-exports for downstream consumers.
pub use barcode::{BarcodeKind, ClassifiedBarcode, RawDetection};
pub use device::DeviceInfo;
pub use scan::ScanResult;
