//! Scan orchestration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use image::DynamicImage;
use labelscan_model::{DeviceInfo, ScanResult};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::aggregate::aggregate;
use crate::classify::classify;
use crate::decode::decode_variant;
use crate::error::{Result, ScanError};
use crate::variants::variants;

/// Secondary provider of device fields, e.g. an OCR line parser reading the
/// printed text next to the barcodes.
///
/// Consulted after aggregation, and only for fields the barcode path left
/// unset; a secondary source can never overwrite a barcode-derived value.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceInfoSource: Send + Sync {
    fn device_info(&self, image: &DynamicImage) -> DeviceInfo;
}

/// Scans device-label photographs for barcodes.
///
/// Holds only stateless configuration; every scan allocates its own buffers
/// and nothing carries over between invocations, so one scanner can be
/// shared across concurrent requests.
#[derive(Clone)]
pub struct BarcodeScanner {
    temp_dir: PathBuf,
    secondary: Option<Arc<dyn DeviceInfoSource>>,
}

impl fmt::Debug for BarcodeScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarcodeScanner")
            .field("temp_dir", &self.temp_dir)
            .field("has_secondary_source", &self.secondary.is_some())
            .finish()
    }
}

impl BarcodeScanner {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        let temp_dir = temp_dir.into();
        info!("using temp directory: {}", temp_dir.display());
        Self {
            temp_dir,
            secondary: None,
        }
    }

    /// Attach a secondary device-info source (see [`DeviceInfoSource`]).
    pub fn with_secondary_source(
        mut self,
        source: Arc<dyn DeviceInfoSource>,
    ) -> Self {
        self.secondary = Some(source);
        self
    }

    /// Scan raw uploaded image bytes.
    ///
    /// The payload is written to a uniquely named file under the temp
    /// directory, decoded with the image codec, scanned, and the file is
    /// removed afterward on a best-effort basis. Corrupt payloads surface
    /// as [`ScanError::ImageLoad`]; nothing downstream of a successful
    /// decode can fail the scan.
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanResult> {
        let path = self.write_temp_image(data)?;

        let outcome = match image::open(&path) {
            Ok(image) => Ok(self.scan_image(&image)),
            Err(err) => {
                warn!("failed to load image {}: {err}", path.display());
                Err(ScanError::ImageLoad(err))
            }
        };

        if let Err(err) = std::fs::remove_file(&path) {
            warn!("failed to remove temp file {}: {err}", path.display());
        }

        outcome
    }

    /// Scan a decoded image. Total: always produces a result.
    ///
    /// Walks the twenty-variant grid lazily, decodes and classifies each
    /// variant's detections in grid order, aggregates once, and finally
    /// lets the secondary source (if any) fill still-empty device fields.
    pub fn scan_image(&self, source: &DynamicImage) -> ScanResult {
        let span = info_span!(
            "barcode_scan",
            width = source.width(),
            height = source.height()
        );
        let _guard = span.enter();

        let mut classified = Vec::new();
        for variant in variants(source) {
            let detections = decode_variant(&variant);
            if !detections.is_empty() {
                debug!(
                    rotation = variant.rotation.degrees(),
                    mode = variant.mode.label(),
                    count = detections.len(),
                    "variant produced detections"
                );
            }
            classified.extend(
                detections
                    .iter()
                    .filter_map(|d| classify(&d.payload, &d.symbology)),
            );
        }

        let mut result = aggregate(classified);
        info!(unique = result.barcodes.len(), "scan complete");

        if let Some(secondary) = &self.secondary {
            result.device_info.fill_missing_from(secondary.device_info(source));
        }

        result
    }

    fn write_temp_image(&self, data: &[u8]) -> Result<PathBuf> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = self.temp_dir.join(format!(
            "barcode_scan_{timestamp}_{}.img",
            Uuid::new_v4().simple()
        ));
        std::fs::write(&path, data)?;
        debug!("saved scan payload to {}", path.display());
        Ok(path)
    }
}
