//! Configuration structures for the receipt pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BonroError, Result};

/// Main configuration for the bonro pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonroConfig {
    /// Recognition engine configuration.
    pub recognition: RecognitionConfig,

    /// Image preprocessing configuration.
    pub preprocessing: PreprocessingConfig,

    /// Tabular export configuration.
    pub export: ExportConfig,
}

/// Tesseract invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Engine binary, either a bare name resolved on `PATH` or a full path.
    pub binary: PathBuf,

    /// Tesseract language code.
    pub language: String,

    /// Page segmentation mode (`--psm`). 6 assumes a single uniform block of text.
    pub page_segmentation_mode: u8,

    /// Alternative tessdata directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "ron".to_string(),
            page_segmentation_mode: 6,
            tessdata_dir: None,
        }
    }
}

/// Image normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Images narrower than this are upscaled to this width.
    pub min_width: u32,

    /// Also write the binarized image here, for inspecting what the engine sees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_dump: Option<PathBuf>,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            min_width: 1800,
            debug_dump: None,
        }
    }
}

/// Tabular export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Emit a leading zero-based row index column.
    pub include_index: bool,

    /// Prefix for per-image output files written by batch runs.
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_index: true,
            file_prefix: "df_".to_string(),
        }
    }
}

impl BonroConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BonroError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BonroError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
