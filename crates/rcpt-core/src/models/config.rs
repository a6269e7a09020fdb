//! Configuration structures for receipt extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ExtractionError, RcptError, Result};
use crate::receipt::rules::KeywordTables;

/// Main configuration for rcpt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Input handling configuration.
    pub input: InputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Skip purchase dates that are not real calendar dates (e.g. month 13).
    pub validate_dates: bool,

    /// Brand, product and blocklist tables.
    pub keywords: KeywordTables,
}

/// Input handling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Largest OCR text accepted, in bytes.
    pub max_input_bytes: usize,

    /// File extensions picked up by batch processing.
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024,
            extensions: vec!["txt".to_string()],
        }
    }
}

impl InputConfig {
    /// Fail if the text is larger than the configured limit.
    pub fn check_size(&self, text: &str) -> std::result::Result<(), ExtractionError> {
        if text.len() > self.max_input_bytes {
            return Err(ExtractionError::InputTooLarge {
                size: text.len(),
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }

    /// Whether a path has one of the accepted extensions (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that would make extraction meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.input.max_input_bytes == 0 {
            return Err(RcptError::Config("input.max_input_bytes must be positive".to_string()));
        }
        self.extraction.keywords.validate()?;
        Ok(())
    }
}
