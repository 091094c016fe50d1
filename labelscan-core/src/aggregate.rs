//! Aggregation of classified barcodes into the final scan result.
//!
//! Every function here is total: any input sequence, including the empty
//! one, produces a well-formed [`ScanResult`].

use std::collections::HashSet;

use labelscan_model::{BarcodeKind, ClassifiedBarcode, DeviceInfo, ScanResult};
use tracing::debug;

/// Summary text used when no barcode survived the scan.
pub const EMPTY_SCAN_TEXT: &str = "No barcodes detected in image";

/// Merge the classified barcodes from all variants into one result.
///
/// Deduplicates on normalized payload (first encountered wins, regardless
/// of kind or symbology), maps the survivors onto device fields, and
/// renders the text summary.
pub fn aggregate(classified: Vec<ClassifiedBarcode>) -> ScanResult {
    let barcodes = dedup_by_data(classified);
    let device_info = map_device_fields(&barcodes);
    let text = summary_text(&barcodes);

    ScanResult {
        text,
        device_info,
        barcodes,
    }
}

/// Keep the first barcode seen for each normalized payload.
///
/// Variant order (rotation outer, treatment inner) decides "first", so the
/// result is deterministic for a given source image.
fn dedup_by_data(barcodes: Vec<ClassifiedBarcode>) -> Vec<ClassifiedBarcode> {
    let mut seen = HashSet::new();
    barcodes
        .into_iter()
        .filter(|barcode| seen.insert(barcode.data.clone()))
        .collect()
}

/// Positional mapping of the deduplicated sequence onto device fields.
///
/// Device labels print their barcodes in a conventional order, so the
/// first serial is the production serial, the first and second GPON entries
/// are the serial and its hex form, and the first and second MACs are WAN
/// and VOIP. `model`, `partNo` and `date` are never filled from barcodes.
fn map_device_fields(barcodes: &[ClassifiedBarcode]) -> DeviceInfo {
    let mut macs = Vec::new();
    let mut gpon_serials = Vec::new();
    let mut serials = Vec::new();

    for barcode in barcodes {
        match barcode.kind {
            BarcodeKind::Mac => macs.push(barcode.data.as_str()),
            BarcodeKind::GponSerial => {
                gpon_serials.push(barcode.data.as_str())
            }
            BarcodeKind::Serial => serials.push(barcode.data.as_str()),
            BarcodeKind::Unknown => {}
        }
    }

    debug!(
        macs = macs.len(),
        gpon = gpon_serials.len(),
        serials = serials.len(),
        "partitioned barcodes for device-field mapping"
    );

    DeviceInfo {
        production_sn: serials.first().map(|s| s.to_string()),
        gpon_sn: gpon_serials.first().map(|s| s.to_string()),
        gpon_sn_hex: gpon_serials.get(1).map(|s| s.to_string()),
        wan_mac: macs.first().map(|s| s.to_string()),
        voip_mac: macs.get(1).map(|s| s.to_string()),
        ..DeviceInfo::default()
    }
}

fn summary_text(barcodes: &[ClassifiedBarcode]) -> String {
    if barcodes.is_empty() {
        return EMPTY_SCAN_TEXT.to_string();
    }

    barcodes
        .iter()
        .map(|barcode| format!("{}: {}", barcode.kind, barcode.data))
        .collect::<Vec<_>>()
        .join("\n")
}
