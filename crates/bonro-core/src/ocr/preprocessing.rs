//! Image normalization ahead of recognition.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma};
use imageproc::contrast::otsu_level;
use tempfile::TempPath;
use tracing::debug;

use crate::error::PreprocessError;
use crate::models::config::PreprocessingConfig;

/// A normalized copy of an input photograph.
///
/// The file lives in the system temp directory and is deleted when this
/// handle is dropped.
#[derive(Debug)]
pub struct NormalizedImage {
    path: TempPath,
}

impl NormalizedImage {
    /// Location of the normalized PNG.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for NormalizedImage {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Grayscale, upscale and binarize receipt photographs.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    /// Narrower images are upscaled to this width.
    min_width: u32,
    /// Extra copy of the binarized image, for debugging.
    debug_dump: Option<PathBuf>,
}

impl ImageNormalizer {
    /// Create a new normalizer with default settings.
    pub fn new() -> Self {
        Self::from_config(&PreprocessingConfig::default())
    }

    pub fn from_config(config: &PreprocessingConfig) -> Self {
        Self {
            min_width: config.min_width,
            debug_dump: config.debug_dump.clone(),
        }
    }

    /// Set the minimum image width.
    pub fn with_min_width(mut self, width: u32) -> Self {
        self.min_width = width;
        self
    }

    /// Also write each binarized image to `path`.
    pub fn with_debug_dump(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_dump = Some(path.into());
        self
    }

    /// Normalize the image at `image_path` into a temporary PNG.
    ///
    /// The input file is only read.
    pub fn normalize(&self, image_path: &Path) -> Result<NormalizedImage, PreprocessError> {
        if !image_path.exists() {
            return Err(PreprocessError::NotFound(image_path.to_path_buf()));
        }

        let image = image::open(image_path).map_err(PreprocessError::Decode)?;
        let binary = self.normalize_image(&image);

        if let Some(dump) = &self.debug_dump {
            binary
                .save_with_format(dump, ImageFormat::Png)
                .map_err(|e| PreprocessError::Write(format!("{}: {}", dump.display(), e)))?;
            debug!("Wrote debug image to {}", dump.display());
        }

        let path = tempfile::Builder::new()
            .prefix("bonro-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| PreprocessError::Write(e.to_string()))?
            .into_temp_path();

        binary
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| PreprocessError::Write(e.to_string()))?;

        Ok(NormalizedImage { path })
    }

    /// Grayscale, upscale and binarize an already decoded image.
    pub fn normalize_image(&self, image: &DynamicImage) -> GrayImage {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();
        let (new_width, new_height) = self.target_dimensions(width, height);

        let gray = if (new_width, new_height) == (width, height) {
            gray
        } else {
            debug!(
                "Upscaling {}x{} to {}x{}",
                width, height, new_width, new_height
            );
            imageops::resize(&gray, new_width, new_height, FilterType::CatmullRom)
        };

        binarize(&gray)
    }

    fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || width >= self.min_width {
            return (width, height);
        }

        let scale = self.min_width as f64 / width as f64;
        let new_height = (height as f64 * scale).round() as u32;

        (self.min_width, new_height.max(1))
    }
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Global binarization at Otsu's level: pixels above it turn white, the rest black.
fn binarize(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    debug!("Otsu level: {}", level);

    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone(width: u32, height: u32) -> DynamicImage {
        let img: GrayImage = ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 { Luma([30u8]) } else { Luma([220u8]) }
        });
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_target_dimensions() {
        let normalizer = ImageNormalizer::new();

        // Narrow image is upscaled keeping the aspect ratio
        assert_eq!(normalizer.target_dimensions(900, 2000), (1800, 4000));

        // Wide enough image is left alone
        assert_eq!(normalizer.target_dimensions(2400, 3200), (2400, 3200));
        assert_eq!(normalizer.target_dimensions(1800, 10), (1800, 10));
    }

    #[test]
    fn test_normalize_image_is_binary() {
        let normalizer = ImageNormalizer::new().with_min_width(16);
        let result = normalizer.normalize_image(&two_tone(8, 4));

        assert_eq!(result.dimensions(), (16, 8));
        assert!(result.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!(result.get_pixel(0, 0)[0], 0);
        assert_eq!(result.get_pixel(15, 0)[0], 255);
    }

    #[test]
    fn test_normalize_missing_file() {
        let err = ImageNormalizer::new()
            .normalize(Path::new("/nonexistent/receipt.jpg"))
            .unwrap_err();
        assert!(matches!(err, PreprocessError::NotFound(_)));
    }

    #[test]
    fn test_normalize_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("receipt.png");
        std::fs::write(&input, b"not an image").unwrap();

        let err = ImageNormalizer::new().normalize(&input).unwrap_err();
        assert!(matches!(err, PreprocessError::Decode(_)));
    }

    #[test]
    fn test_normalize_writes_temporary_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("receipt.png");
        let dump = dir.path().join("debug.png");
        two_tone(40, 20).save(&input).unwrap();
        let original = std::fs::read(&input).unwrap();

        let normalizer = ImageNormalizer::new().with_min_width(80).with_debug_dump(&dump);
        let normalized = normalizer.normalize(&input).unwrap();
        let artifact = normalized.path().to_path_buf();

        assert_ne!(artifact, input);
        assert_eq!(image::open(&artifact).unwrap().width(), 80);
        assert!(dump.exists());
        assert_eq!(std::fs::read(&input).unwrap(), original);

        drop(normalized);
        assert!(!artifact.exists());
    }
}
