//! Geometric and photometric variants of a source image.
//!
//! Printed labels are photographed in arbitrary orientation and lighting,
//! so every scan walks a fixed grid of variants: four rotations, each in
//! five photometric treatments, twenty in total. The rotation is the outer
//! loop and the treatment the inner loop; that order decides which
//! detection is "first" when duplicates collapse during aggregation.

use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, adaptive_threshold, threshold};

/// Global binarization cutoff, the midpoint of the intensity range.
const BINARY_THRESHOLD: u8 = 128;

/// Block radius for local-mean binarization (an 11x11 neighborhood).
const ADAPTIVE_BLOCK_RADIUS: u32 = 5;

/// Tile edge for local histogram equalization.
const EQUALIZE_TILE_SIZE: usize = 8;

/// Histogram clip limit, as a multiple of the uniform bin height.
const EQUALIZE_CLIP_LIMIT: f32 = 2.0;

/// Rotations applied to the source image, in scan order.
///
/// Right-angle rotations are exact: the output canvas swaps width and
/// height for 90/270 degrees, so no pixel content is ever clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] =
        [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            Rotation::Deg0 => image.clone(),
            Rotation::Deg90 => image.rotate90(),
            Rotation::Deg180 => image.rotate180(),
            Rotation::Deg270 => image.rotate270(),
        }
    }
}

/// Photometric treatments applied to each rotated image, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessMode {
    /// The rotated image unchanged.
    Original,
    /// Single-channel luma conversion.
    Grayscale,
    /// Fixed global binary threshold.
    Threshold,
    /// Local-mean binarization for unevenly lit labels.
    AdaptiveThreshold,
    /// Tile-based clipped histogram equalization.
    ContrastEnhanced,
}

impl PreprocessMode {
    pub const ALL: [PreprocessMode; 5] = [
        PreprocessMode::Original,
        PreprocessMode::Grayscale,
        PreprocessMode::Threshold,
        PreprocessMode::AdaptiveThreshold,
        PreprocessMode::ContrastEnhanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PreprocessMode::Original => "original",
            PreprocessMode::Grayscale => "grayscale",
            PreprocessMode::Threshold => "threshold",
            PreprocessMode::AdaptiveThreshold => "adaptive-threshold",
            PreprocessMode::ContrastEnhanced => "contrast-enhanced",
        }
    }

    pub fn apply(self, rotated: &DynamicImage) -> DynamicImage {
        match self {
            PreprocessMode::Original => rotated.clone(),
            PreprocessMode::Grayscale => {
                DynamicImage::ImageLuma8(rotated.to_luma8())
            }
            PreprocessMode::Threshold => DynamicImage::ImageLuma8(threshold(
                &rotated.to_luma8(),
                BINARY_THRESHOLD,
                ThresholdType::Binary,
            )),
            PreprocessMode::AdaptiveThreshold => DynamicImage::ImageLuma8(
                adaptive_threshold(&rotated.to_luma8(), ADAPTIVE_BLOCK_RADIUS),
            ),
            PreprocessMode::ContrastEnhanced => DynamicImage::ImageLuma8(
                equalize_tiles(&rotated.to_luma8()),
            ),
        }
    }
}

/// One entry of the variant grid.
#[derive(Debug, Clone)]
pub struct ImageVariant {
    pub image: DynamicImage,
    pub rotation: Rotation,
    pub mode: PreprocessMode,
}

/// Lazily walk the 4x5 variant grid of `source`.
///
/// The iterator is finite and restartable: iterating twice over the same
/// source yields the same sequence. Each rotation is materialized once and
/// shared by its five treatments, keeping peak memory at one rotation plus
/// one variant.
pub fn variants(
    source: &DynamicImage,
) -> impl Iterator<Item = ImageVariant> + '_ {
    Rotation::ALL.iter().flat_map(move |&rotation| {
        let rotated = rotation.apply(source);
        PreprocessMode::ALL.iter().map(move |&mode| ImageVariant {
            image: mode.apply(&rotated),
            rotation,
            mode,
        })
    })
}

/// Tile-based histogram equalization with clipping.
///
/// Splits the image into 8x8-pixel tiles, equalizes each tile's histogram
/// independently, and clips bins at `EQUALIZE_CLIP_LIMIT` times the uniform
/// height (redistributing the excess) to keep near-flat tiles from blowing
/// up noise.
fn equalize_tiles(image: &GrayImage) -> GrayImage {
    let width = image.width() as usize;
    let height = image.height() as usize;
    if width == 0 || height == 0 {
        return image.clone();
    }

    let mut result = image.clone();
    let tiles_x = width.div_ceil(EQUALIZE_TILE_SIZE);
    let tiles_y = height.div_ceil(EQUALIZE_TILE_SIZE);

    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x_start = tx * EQUALIZE_TILE_SIZE;
            let y_start = ty * EQUALIZE_TILE_SIZE;
            let x_end = (x_start + EQUALIZE_TILE_SIZE).min(width);
            let y_end = (y_start + EQUALIZE_TILE_SIZE).min(height);
            let tile_pixels = ((x_end - x_start) * (y_end - y_start)) as u32;

            let mut histogram = [0u32; 256];
            for y in y_start..y_end {
                for x in x_start..x_end {
                    let level = image.get_pixel(x as u32, y as u32)[0];
                    histogram[level as usize] += 1;
                }
            }

            // Clip and redistribute the excess uniformly.
            let clip_at =
                ((tile_pixels as f32 * EQUALIZE_CLIP_LIMIT) / 256.0) as u32;
            let clip_at = clip_at.max(1);
            let mut excess = 0u32;
            for bin in histogram.iter_mut() {
                if *bin > clip_at {
                    excess += *bin - clip_at;
                    *bin = clip_at;
                }
            }
            let bonus = excess / 256;
            for bin in histogram.iter_mut() {
                *bin += bonus;
            }

            let mut cdf = 0u32;
            let mut lookup = [0u8; 256];
            let total: u32 = histogram.iter().sum();
            for (level, bin) in histogram.iter().enumerate() {
                cdf += bin;
                lookup[level] =
                    ((cdf as f32 / total as f32) * 255.0).round() as u8;
            }

            for y in y_start..y_end {
                for x in x_start..x_end {
                    let level = image.get_pixel(x as u32, y as u32)[0];
                    result.put_pixel(
                        x as u32,
                        y as u32,
                        image::Luma([lookup[level as usize]]),
                    );
                }
            }
        }
    }

    result
}
