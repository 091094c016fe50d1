//! Barcode decoding for one image variant.

use image::DynamicImage;
use labelscan_model::RawDetection;
use rxing::common::GlobalHistogramBinarizer;
use rxing::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use rxing::{
    BinaryBitmap, BufferedImageLuminanceSource, DecodeHintType,
    DecodeHintValue, DecodingHintDictionary, MultiFormatReader,
};
use tracing::trace;

use crate::variants::ImageVariant;

/// Decode every barcode visible in one variant.
///
/// The decoder is defined over single-channel rasters, so multi-channel
/// variants are reduced to luma first. Any decoder failure, including the
/// ordinary "nothing found", yields an empty list; a variant can never
/// abort the scan.
pub fn decode_variant(variant: &ImageVariant) -> Vec<RawDetection> {
    let luma = variant.image.to_luma8();
    if luma.width() == 0 || luma.height() == 0 {
        return Vec::new();
    }

    let mut hints = DecodingHintDictionary::new();
    hints.insert(
        DecodeHintType::TRY_HARDER,
        DecodeHintValue::TryHarder(true),
    );

    let source =
        BufferedImageLuminanceSource::new(DynamicImage::ImageLuma8(luma));
    let mut bitmap = BinaryBitmap::new(GlobalHistogramBinarizer::new(source));
    let mut reader =
        GenericMultipleBarcodeReader::new(MultiFormatReader::default());

    match reader.decode_multiple_with_hints(&mut bitmap, &hints) {
        Ok(results) => results
            .into_iter()
            .map(|result| RawDetection {
                payload: result.getText().to_owned(),
                symbology: format!("{:?}", result.getBarcodeFormat()),
            })
            .collect(),
        Err(err) => {
            // Not-found is the overwhelmingly common case and not worth
            // more than a trace line.
            trace!(
                rotation = variant.rotation.degrees(),
                mode = variant.mode.label(),
                "no barcodes in variant: {err}"
            );
            Vec::new()
        }
    }
}
