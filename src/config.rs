//! YAML Configuration File Support for blockdup
//!
//! Loads every stage configuration (ingest, canonical, shingle, matcher) plus
//! runtime settings from a single YAML file. Every key is optional; missing
//! keys take the stage defaults. Command-line flags are applied on top of the
//! loaded values by the binary.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # blockdup configuration
//! version: "1.0"
//!
//! ingest:
//!   source: "auto"          # auto | git | walk
//!   extensions: ["md", "markdown"]
//!   follow_links: false
//!   max_file_bytes: 10485760
//!
//! canonical:
//!   version: 1
//!   strip_front_matter: true
//!   strip_headings: true
//!   strip_embeds: true
//!   normalize_unicode: false
//!   min_line_chars: 0
//!
//! shingle:
//!   block_size: 3
//!   signature_size: 5
//!
//! matcher:
//!   similarity_threshold: 0.9
//!   length_ratio_tolerance: 0.3
//!
//! runtime:
//!   threads: 8
//! ```

use std::fs;
use std::path::Path;

use canonical::NormalizeConfig;
use ingest::{CorpusConfig, CorpusSource, DEFAULT_MAX_FILE_BYTES};
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use shingle::BlockConfig;
use thiserror::Error;

use crate::{DetectConfig, ScanConfig};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for a blockdup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BlockdupConfig {
    /// Configuration format version
    #[serde(default = "default_format_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub ingest: IngestYamlConfig,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub shingle: ShingleYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,

    #[serde(default)]
    pub runtime: RuntimeYamlConfig,
}

impl BlockdupConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: BlockdupConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.ingest.validate()?;
        self.canonical.validate()?;
        self.shingle.validate()?;
        self.matcher.validate()?;
        self.runtime.validate()?;

        Ok(())
    }

    /// Convert into the runtime configuration consumed by [`crate::scan_corpus`].
    pub fn to_scan_config(&self) -> Result<ScanConfig, ConfigLoadError> {
        Ok(ScanConfig {
            corpus: self.ingest.to_corpus_config()?,
            normalize: self.canonical.to_normalize_config(),
            detect: DetectConfig {
                block: self.shingle.to_block_config(),
                matcher: self.matcher.to_match_config(),
                threads: self.runtime.threads,
            },
        })
    }
}

impl Default for BlockdupConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            ingest: IngestYamlConfig::default(),
            canonical: CanonicalYamlConfig::default(),
            shingle: ShingleYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
            runtime: RuntimeYamlConfig::default(),
        }
    }
}

/// Ingest stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestYamlConfig {
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub follow_links: bool,

    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: Option<u64>,
}

impl IngestYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_corpus_config().map(|_| ())
    }

    fn to_corpus_config(&self) -> Result<CorpusConfig, ConfigLoadError> {
        let source: CorpusSource = self
            .source
            .parse()
            .map_err(|err: ingest::IngestError| ConfigLoadError::Validation(format!("ingest.source: {err}")))?;
        let cfg = CorpusConfig::default()
            .with_source(source)
            .with_extensions(self.extensions.iter().cloned())
            .with_follow_links(self.follow_links)
            .with_max_file_bytes(self.max_file_bytes);
        cfg.validate()
            .map_err(|err| ConfigLoadError::Validation(format!("ingest: {err}")))?;
        Ok(cfg)
    }
}

impl Default for IngestYamlConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            extensions: default_extensions(),
            follow_links: false,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

/// Canonicalization stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub strip_front_matter: bool,

    #[serde(default = "true_value")]
    pub strip_headings: bool,

    #[serde(default = "true_value")]
    pub strip_embeds: bool,

    #[serde(default)]
    pub normalize_unicode: bool,

    #[serde(default)]
    pub min_line_chars: usize,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            version: self.version,
            ..NormalizeConfig::default()
        }
        .with_front_matter(self.strip_front_matter)
        .with_headings(self.strip_headings)
        .with_embeds(self.strip_embeds)
        .with_unicode_normalization(self.normalize_unicode)
        .with_min_line_chars(self.min_line_chars)
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            strip_front_matter: true,
            strip_headings: true,
            strip_embeds: true,
            normalize_unicode: false,
            min_line_chars: 0,
        }
    }
}

/// Block extraction YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShingleYamlConfig {
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    #[serde(default = "default_signature_size")]
    pub signature_size: usize,
}

impl ShingleYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.block_size == 0 {
            return Err(ConfigLoadError::Validation(
                "shingle.block_size must be >= 1".to_string(),
            ));
        }
        if self.signature_size == 0 {
            return Err(ConfigLoadError::Validation(
                "shingle.signature_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_block_config(&self) -> BlockConfig {
        BlockConfig::new()
            .with_block_size(self.block_size)
            .with_signature_size(self.signature_size)
    }
}

impl Default for ShingleYamlConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            signature_size: default_signature_size(),
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,

    #[serde(default = "default_length_tolerance")]
    pub length_ratio_tolerance: f64,
}

impl MatchYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_match_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))
    }

    fn to_match_config(&self) -> MatchConfig {
        MatchConfig::new()
            .with_threshold(self.similarity_threshold)
            .with_length_tolerance(self.length_ratio_tolerance)
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_threshold(),
            length_ratio_tolerance: default_length_tolerance(),
        }
    }
}

/// Runtime YAML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeYamlConfig {
    /// Worker threads for the parallel phases; all available cores when unset.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl RuntimeYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.threads == Some(0) {
            return Err(ConfigLoadError::Validation(
                "runtime.threads must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

// Helper functions for serde defaults
fn default_format_version() -> String {
    "1.0".to_string()
}
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_source() -> String {
    "auto".to_string()
}
fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}
fn default_max_file_bytes() -> Option<u64> {
    Some(DEFAULT_MAX_FILE_BYTES)
}
fn default_block_size() -> usize {
    3
}
fn default_signature_size() -> usize {
    5
}
fn default_threshold() -> f64 {
    0.9
}
fn default_length_tolerance() -> f64 {
    0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "vault"
ingest:
  source: "walk"
shingle:
  block_size: 4
matcher:
  similarity_threshold: 0.85
"#;

        let config = BlockdupConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, Some("vault".to_string()));
        assert_eq!(config.ingest.source, "walk");
        assert_eq!(config.shingle.block_size, 4);
        assert_eq!(config.shingle.signature_size, 5);
        assert_eq!(config.matcher.similarity_threshold, 0.85);
        assert_eq!(config.matcher.length_ratio_tolerance, 0.3);
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let config = BlockdupConfig::from_yaml("{}").unwrap();
        assert_eq!(config.version, "1.0");
        let scan = config.to_scan_config().unwrap();
        assert_eq!(scan, ScanConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
runtime:
  threads: 2
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = BlockdupConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.runtime.threads, Some(2));
    }

    #[test]
    fn test_missing_file() {
        let err = BlockdupConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigLoadError::FileRead(_)));
    }

    #[test]
    fn test_unsupported_version() {
        let err = BlockdupConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = BlockdupConfig::from_yaml("shingle: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigLoadError::YamlParse(_)));
    }

    #[test]
    fn test_stage_validation() {
        let cases = [
            ("shingle:\n  block_size: 0\n", "block_size"),
            ("shingle:\n  signature_size: 0\n", "signature_size"),
            ("matcher:\n  similarity_threshold: 1.5\n", "similarity_threshold"),
            ("matcher:\n  length_ratio_tolerance: -1\n", "length_ratio_tolerance"),
            ("ingest:\n  source: \"svn\"\n", "ingest.source"),
            ("ingest:\n  extensions: []\n", "extensions"),
            ("canonical:\n  version: 0\n", "canonical.version"),
            ("runtime:\n  threads: 0\n", "runtime.threads"),
        ];
        for (yaml, needle) in cases {
            let err = BlockdupConfig::from_yaml(yaml).unwrap_err();
            assert!(matches!(err, ConfigLoadError::Validation(_)), "{yaml}");
            assert!(err.to_string().contains(needle), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_full_yaml_conversion() {
        let yaml = r#"
version: "1.0"
ingest:
  source: "git"
  extensions: ["md"]
  follow_links: true
  max_file_bytes: null
canonical:
  strip_headings: false
  normalize_unicode: true
  min_line_chars: 4
shingle:
  block_size: 2
  signature_size: 3
matcher:
  similarity_threshold: 1.0
  length_ratio_tolerance: 0.1
runtime:
  threads: 4
"#;

        let scan = BlockdupConfig::from_yaml(yaml)
            .unwrap()
            .to_scan_config()
            .unwrap();

        assert_eq!(scan.corpus.source, CorpusSource::Git);
        assert_eq!(scan.corpus.extensions, vec!["md"]);
        assert!(scan.corpus.follow_links);
        assert_eq!(scan.corpus.max_file_bytes, None);
        assert!(!scan.normalize.strip_headings);
        assert!(scan.normalize.strip_front_matter);
        assert!(scan.normalize.normalize_unicode);
        assert_eq!(scan.normalize.min_line_chars, 4);
        assert_eq!(scan.detect.block.block_size, 2);
        assert_eq!(scan.detect.block.signature_size, 3);
        assert_eq!(scan.detect.matcher.similarity_threshold, 1.0);
        assert_eq!(scan.detect.matcher.length_ratio_tolerance, 0.1);
        assert_eq!(scan.detect.threads, Some(4));
    }
}
