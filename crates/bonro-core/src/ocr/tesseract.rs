//! Text recognition through the Tesseract command-line engine.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::RecognitionError;
use crate::models::config::RecognitionConfig;

/// Turns an image on disk into raw text.
pub trait TextRecognizer: Send + Sync {
    /// Recognize all text in the image at `image_path`, lines separated by `\n`.
    fn recognize(&self, image_path: &Path) -> Result<String, RecognitionError>;

    /// Language the recognizer reads.
    fn language(&self) -> &str;
}

/// Recognizer that shells out to the `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    config: RecognitionConfig,
}

impl TesseractRecognizer {
    pub fn new(config: RecognitionConfig) -> Self {
        Self { config }
    }

    fn command(&self, image_path: &Path, output_base: &Path) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.arg(image_path)
            .arg(output_base)
            .arg("-l")
            .arg(&self.config.language)
            .arg("--psm")
            .arg(self.config.page_segmentation_mode.to_string());

        if let Some(dir) = &self.config.tessdata_dir {
            cmd.arg("--tessdata-dir").arg(dir);
        }

        cmd
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new(RecognitionConfig::default())
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String, RecognitionError> {
        if !image_path.exists() {
            return Err(RecognitionError::NotFound(image_path.to_path_buf()));
        }

        // Tesseract appends `.txt` to the output base it is given.
        let workdir = tempfile::tempdir().map_err(RecognitionError::Output)?;
        let output_base = workdir.path().join("out");

        let mut cmd = self.command(image_path, &output_base);
        debug!("Running {:?}", cmd);

        let output = cmd.output().map_err(|source| RecognitionError::EngineUnavailable {
            binary: self.config.binary.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(RecognitionError::EngineInvocationFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text_path: PathBuf = output_base.with_extension("txt");
        let text = std::fs::read_to_string(&text_path).map_err(RecognitionError::Output)?;

        debug!("Recognized {} lines", text.lines().count());
        Ok(text)
    }

    fn language(&self) -> &str {
        &self.config.language
    }
}

/// Recognizer returning a fixed text for every image.
///
/// Used for text that was recognized elsewhere, and in tests.
#[derive(Debug, Clone)]
pub struct StaticTextRecognizer {
    text: String,
    language: String,
}

impl StaticTextRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: RecognitionConfig::default().language,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl TextRecognizer for StaticTextRecognizer {
    fn recognize(&self, _image_path: &Path) -> Result<String, RecognitionError> {
        Ok(self.text.clone())
    }

    fn language(&self) -> &str {
        &self.language
    }
}
