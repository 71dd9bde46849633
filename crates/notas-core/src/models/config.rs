//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NotasError, Result};
use super::record::OutputMode;
use crate::tax::IcmsPolicy;

/// Default namespace of NFe documents.
pub const NFE_NAMESPACE: &str = "http://www.portalfiscal.inf.br/nfe";

/// Default namespace of CTe documents.
pub const CTE_NAMESPACE: &str = "http://www.portalfiscal.inf.br/cte";

/// Main configuration for the notas pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotasConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Table output configuration.
    pub output: OutputConfig,
}

/// Which schema family a batch is read as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindSelection {
    /// Detect per document (NFe first, then CTe).
    #[default]
    Auto,
    Nfe,
    Cte,
}

/// Extraction engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Schema family selection.
    pub kind: KindSelection,

    /// Output granularity.
    pub mode: OutputMode,

    /// How sibling ICMS sub-structures of one item combine.
    pub icms_policy: IcmsPolicy,

    /// Namespace URI tried first for NFe paths.
    pub nfe_namespace: String,

    /// Namespace URI tried first for CTe paths.
    pub cte_namespace: String,

    /// Process documents of a batch in parallel.
    pub parallel: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            kind: KindSelection::Auto,
            mode: OutputMode::Item,
            icms_policy: IcmsPolicy::OverwriteIfNonzero,
            nfe_namespace: NFE_NAMESPACE.to_string(),
            cte_namespace: CTE_NAMESPACE.to_string(),
            parallel: true,
        }
    }
}

/// Serialization format of the output table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}

/// Table output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format.
    pub format: TableFormat,

    /// CSV field delimiter. Decimals use `,`, so `;` is the default.
    pub delimiter: char,

    /// Write a header row with column labels.
    pub include_header: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: TableFormat::Csv,
            delimiter: ';',
            include_header: true,
        }
    }
}

impl OutputConfig {
    /// Delimiter as a single byte, as CSV writers expect.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                NotasError::Config(format!("delimiter must be ASCII, got {:?}", self.delimiter))
            })
    }
}

impl NotasConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| NotasError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| NotasError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: NotasConfig =
            serde_json::from_str(r#"{"extraction": {"mode": "group"}}"#).unwrap();

        assert_eq!(config.extraction.mode, OutputMode::Group);
        assert_eq!(config.extraction.kind, KindSelection::Auto);
        assert_eq!(config.extraction.nfe_namespace, NFE_NAMESPACE);
        assert_eq!(config.output.delimiter, ';');
        assert!(config.output.include_header);
    }

    #[test]
    fn test_delimiter_must_be_ascii() {
        let mut output = OutputConfig::default();
        assert_eq!(output.delimiter_byte().unwrap(), b';');

        output.delimiter = 'é';
        assert!(output.delimiter_byte().is_err());
    }

    #[test]
    fn test_policy_round_trips_through_json() {
        let mut config = NotasConfig::default();
        config.extraction.icms_policy = IcmsPolicy::Sum;

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"icms_policy\":\"sum\""));

        let back: NotasConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.extraction.icms_policy, IcmsPolicy::Sum);
    }
}
