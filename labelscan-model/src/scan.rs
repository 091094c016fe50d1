use crate::{ClassifiedBarcode, DeviceInfo};

/// Terminal output of one scan pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanResult {
    /// Human-readable summary, one `"{kind}: {data}"` line per barcode.
    pub text: String,
    pub device_info: DeviceInfo,
    /// Deduplicated barcodes in first-encountered order.
    pub barcodes: Vec<ClassifiedBarcode>,
}
