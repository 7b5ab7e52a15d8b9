//! Image-to-text stage: normalization and the external recognition engine.

mod preprocessing;
mod tesseract;

pub use preprocessing::{ImageNormalizer, NormalizedImage};
pub use tesseract::{StaticTextRecognizer, TesseractRecognizer, TextRecognizer};
