//! Configuration types for the line normalizer.
//!
//! [`NormalizeConfig`] controls which structural noise is removed from a note
//! before it is split into content lines.
//!
//! # Versioning
//!
//! The `version` field tracks normalization behavior. Any change that can
//! alter the produced lines (and therefore fingerprints and blocks) must be
//! accompanied by a version bump so that reports from different versions are
//! never silently compared.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.strip_front_matter);
//! assert_eq!(config.min_line_chars, 0);
//!
//! let strict = NormalizeConfig::new().with_min_line_chars(20);
//! assert_eq!(strict.min_line_chars, 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the line normalizer.
///
/// Cheap to clone and serializable so it can be embedded in a YAML config
/// file:
///
/// ```json
/// {
///   "version": 1,
///   "strip_front_matter": true,
///   "strip_headings": true,
///   "strip_embeds": true,
///   "normalize_unicode": false,
///   "min_line_chars": 0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Normalization behavior version. Must be >= 1.
    pub version: u32,

    /// Drop a leading YAML front matter block delimited by `---` lines.
    ///
    /// An unterminated block is left untouched; it is more likely to be a
    /// thematic break than metadata.
    pub strip_front_matter: bool,

    /// Remove leading heading markers (`#` through `######` followed by
    /// whitespace) and keep the heading text.
    ///
    /// `#tag` lines are not headings and are kept verbatim.
    pub strip_headings: bool,

    /// Delete `![[...]]` embeds and unwrap `[[target|alias]]` wiki links to
    /// their visible text.
    pub strip_embeds: bool,

    /// Apply Unicode NFKC normalization before any other transform.
    ///
    /// Off by default so that reported block text matches what the user
    /// sees in the note.
    pub normalize_unicode: bool,

    /// Drop content lines shorter than this many characters (after
    /// trimming). `0` keeps every non-empty line.
    pub min_line_chars: usize,
}

impl NormalizeConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_front_matter(mut self, strip: bool) -> Self {
        self.strip_front_matter = strip;
        self
    }

    pub fn with_headings(mut self, strip: bool) -> Self {
        self.strip_headings = strip;
        self
    }

    pub fn with_embeds(mut self, strip: bool) -> Self {
        self.strip_embeds = strip;
        self
    }

    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Lines with fewer characters than `min` are dropped.
    pub fn with_min_line_chars(mut self, min: usize) -> Self {
        self.min_line_chars = min;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "normalize config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = NormalizeConfig::default();
        assert_eq!(cfg.version, 1);
        assert!(cfg.strip_front_matter);
        assert!(cfg.strip_headings);
        assert!(cfg.strip_embeds);
        assert!(!cfg.normalize_unicode);
        assert_eq!(cfg.min_line_chars, 0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = NormalizeConfig::new()
            .with_front_matter(false)
            .with_headings(false)
            .with_embeds(false)
            .with_unicode_normalization(true)
            .with_min_line_chars(12);

        assert!(!cfg.strip_front_matter);
        assert!(!cfg.strip_headings);
        assert!(!cfg.strip_embeds);
        assert!(cfg.normalize_unicode);
        assert_eq!(cfg.min_line_chars, 12);
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = NormalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: NormalizeConfig = serde_json::from_str(r#"{"min_line_chars": 4}"#).unwrap();
        assert_eq!(cfg.min_line_chars, 4);
        assert_eq!(cfg.version, 1);
        assert!(cfg.strip_front_matter);
    }
}
