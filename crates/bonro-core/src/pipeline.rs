//! End-to-end receipt processing: image in, line items out.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::models::config::{BonroConfig, PreprocessingConfig};
use crate::models::receipt::{ReceiptScan, ScanMetadata};
use crate::ocr::{ImageNormalizer, TesseractRecognizer, TextRecognizer};
use crate::receipt::{extract_summary, ReceiptParser};

/// Normalizes a photograph, recognizes its text and parses the line items.
///
/// Holds no per-image state; one pipeline can serve many images at once.
#[derive(Debug, Clone)]
pub struct ReceiptPipeline<R: TextRecognizer> {
    normalizer: ImageNormalizer,
    recognizer: R,
    parser: ReceiptParser,
}

impl ReceiptPipeline<TesseractRecognizer> {
    /// Build a pipeline running Tesseract as configured.
    pub fn from_config(config: &BonroConfig) -> Self {
        Self::new(
            TesseractRecognizer::new(config.recognition.clone()),
            &config.preprocessing,
        )
    }
}

impl<R: TextRecognizer> ReceiptPipeline<R> {
    pub fn new(recognizer: R, preprocessing: &PreprocessingConfig) -> Self {
        Self {
            normalizer: ImageNormalizer::from_config(preprocessing),
            recognizer,
            parser: ReceiptParser::new(),
        }
    }

    /// Replace the image normalizer.
    pub fn with_normalizer(mut self, normalizer: ImageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Process one receipt photograph.
    pub fn process(&self, image_path: &Path) -> Result<ReceiptScan> {
        let start = Instant::now();

        let raw_text = {
            let normalized = self.normalizer.normalize(image_path)?;
            self.recognizer.recognize(normalized.path())?
        };

        let scan = self.build_scan(raw_text, Some(image_path), start);
        info!(
            "Processed {}: {} items in {}ms",
            image_path.display(),
            scan.items.len(),
            scan.metadata.processing_time_ms
        );

        Ok(scan)
    }

    /// Parse text that was already recognized, skipping the image stages.
    pub fn scan_text(&self, raw_text: impl Into<String>) -> ReceiptScan {
        self.build_scan(raw_text.into(), None, Instant::now())
    }

    fn build_scan(&self, raw_text: String, source: Option<&Path>, start: Instant) -> ReceiptScan {
        let items = self.parser.parse(&raw_text);
        let summary = extract_summary(&raw_text);

        ReceiptScan {
            items,
            summary,
            raw_text,
            metadata: ScanMetadata {
                source: source.map(Path::to_path_buf),
                language: self.recognizer.language().to_string(),
                processing_time_ms: start.elapsed().as_millis() as u64,
                processed_at: Utc::now(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BonroError, PreprocessError, RecognitionError};
    use crate::models::config::RecognitionConfig;
    use crate::models::receipt::LineItem;
    use crate::ocr::StaticTextRecognizer;
    use image::{GrayImage, Luma};
    use pretty_assertions::assert_eq;

    const RECEIPT: &str = "\
BON FISCAL NR 0042
2 BUC x 3,49 A
LAPTE ZUZU 1.5L
Paine alba 4.50
TOTAL 11,48 LEI
";

    fn small_images() -> PreprocessingConfig {
        PreprocessingConfig {
            min_width: 32,
            debug_dump: None,
        }
    }

    fn write_image(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("receipt.png");
        GrayImage::from_fn(16, 24, |x, _| Luma([if x % 2 == 0 { 20 } else { 230 }]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_process_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_image(dir.path());

        let pipeline = ReceiptPipeline::new(StaticTextRecognizer::new(RECEIPT), &Default::default())
            .with_normalizer(ImageNormalizer::new().with_min_width(32));
        let scan = pipeline.process(&image).unwrap();

        assert_eq!(
            scan.items,
            vec![
                LineItem::new("LAPTE ZUZU", "2", "3.49", ""),
                LineItem::new("Paine alba", "1", "4.50", ""),
            ]
        );
        assert_eq!(scan.summary.receipt_number.as_deref(), Some("0042"));
        assert_eq!(scan.summary.total.map(|t| t.to_string()).as_deref(), Some("11.48"));
        assert_eq!(scan.metadata.source.as_deref(), Some(image.as_path()));
        assert_eq!(scan.metadata.language, "ron");
        assert_eq!(scan.raw_text, RECEIPT);
    }

    #[test]
    fn test_missing_image_fails_before_recognition() {
        let pipeline = ReceiptPipeline::new(StaticTextRecognizer::new(RECEIPT), &small_images());
        let err = pipeline.process(Path::new("/nonexistent/receipt.jpg")).unwrap_err();
        assert!(matches!(err, BonroError::Preprocess(PreprocessError::NotFound(_))));
    }

    #[test]
    fn test_recognition_failure_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_image(dir.path());

        let recognizer = TesseractRecognizer::new(RecognitionConfig {
            binary: "/nonexistent/bin/tesseract".into(),
            ..Default::default()
        });
        let err = ReceiptPipeline::new(recognizer, &small_images())
            .process(&image)
            .unwrap_err();
        assert!(matches!(
            err,
            BonroError::Recognition(RecognitionError::EngineUnavailable { .. })
        ));
    }

    #[test]
    fn test_scan_text() {
        let pipeline = ReceiptPipeline::new(
            StaticTextRecognizer::new("").with_language("eng"),
            &PreprocessingConfig::default(),
        );
        let scan = pipeline.scan_text("DOCUMENT FISCAL");

        assert!(scan.items.is_empty());
        assert!(scan.summary.is_empty());
        assert!(scan.metadata.source.is_none());
        assert_eq!(scan.metadata.language, "eng");
    }
}
