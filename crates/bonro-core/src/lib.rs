//! Core library for Romanian receipt OCR processing.
//!
//! This crate provides:
//! - Image normalization (grayscale, upscaling, Otsu binarization)
//! - Text recognition through the Tesseract command-line engine
//! - Rule-based line-item extraction from recognized receipt text
//! - Receipt summary fields (total, VAT, date, receipt number)

pub mod error;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod receipt;

pub use error::{BonroError, PreprocessError, RecognitionError, Result};
pub use models::config::{BonroConfig, ExportConfig, PreprocessingConfig, RecognitionConfig};
pub use models::receipt::{LineItem, ReceiptScan, ReceiptSummary, ScanMetadata};
pub use ocr::{ImageNormalizer, NormalizedImage, StaticTextRecognizer, TesseractRecognizer, TextRecognizer};
pub use pipeline::ReceiptPipeline;
pub use receipt::{extract_summary, ReceiptParser};
