//! Configuration for corpus enumeration and document reading.
//!
//! [`CorpusConfig`] is cheap to clone and deserializes from YAML or JSON with
//! every field optional.
//!
//! ```rust
//! use ingest::{CorpusConfig, CorpusSource};
//!
//! let cfg = CorpusConfig::default()
//!     .with_source(CorpusSource::Walk)
//!     .with_extensions(["md", "txt"]);
//! cfg.validate().expect("valid config");
//! assert!(cfg.matches_extension("notes/readme.TXT".as_ref()));
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Default per-file size limit: 10 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Where the document list comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusSource {
    /// `Git` when the root contains a `.git` entry, `Walk` otherwise.
    #[default]
    Auto,
    /// Files tracked by git (`git ls-files`).
    Git,
    /// Recursive directory walk, skipping hidden directories.
    Walk,
}

impl std::str::FromStr for CorpusSource {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(CorpusSource::Auto),
            "git" => Ok(CorpusSource::Git),
            "walk" => Ok(CorpusSource::Walk),
            other => Err(IngestError::InvalidConfig(format!(
                "unknown corpus source '{other}' (expected auto, git or walk)"
            ))),
        }
    }
}

impl std::fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CorpusSource::Auto => "auto",
            CorpusSource::Git => "git",
            CorpusSource::Walk => "walk",
        })
    }
}

/// Runtime configuration for enumerating and reading a corpus.
///
/// # Fields
///
/// - `source`: how the document list is produced
/// - `extensions`: file extensions to keep, without the dot, matched
///   case-insensitively
/// - `follow_links`: follow symlinks while walking (walk mode only)
/// - `max_file_bytes`: files larger than this are skipped; `None` disables
///   the check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub source: CorpusSource,
    pub extensions: Vec<String>,
    pub follow_links: bool,
    pub max_file_bytes: Option<u64>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source: CorpusSource::Auto,
            extensions: vec!["md".to_string(), "markdown".to_string()],
            follow_links: false,
            max_file_bytes: Some(DEFAULT_MAX_FILE_BYTES),
        }
    }
}

impl CorpusConfig {
    pub fn with_source(mut self, source: CorpusSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_max_file_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_file_bytes = limit;
        self
    }

    /// Validate the configuration.
    ///
    /// Rejects an empty extension list, empty or dotted extensions, and a
    /// zero size limit.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.extensions.is_empty() {
            return Err(IngestError::InvalidConfig(
                "extensions must not be empty".into(),
            ));
        }
        for ext in &self.extensions {
            if ext.trim().is_empty() {
                return Err(IngestError::InvalidConfig(
                    "extensions must not contain empty entries".into(),
                ));
            }
            if ext.starts_with('.') || ext.contains(&['/', '\\', '*'][..]) {
                return Err(IngestError::InvalidConfig(format!(
                    "extension '{ext}' must be a bare name such as 'md'"
                )));
            }
        }
        if self.max_file_bytes == Some(0) {
            return Err(IngestError::InvalidConfig(
                "max_file_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Whether `path` carries one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(ext))
    }

    /// Git pathspecs for the configured extensions, e.g. `*.md`.
    pub(crate) fn pathspecs(&self) -> Vec<String> {
        self.extensions.iter().map(|ext| format!("*.{ext}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CorpusConfig::default();
        assert_eq!(cfg.source, CorpusSource::Auto);
        assert_eq!(cfg.extensions, vec!["md", "markdown"]);
        assert!(!cfg.follow_links);
        assert_eq!(cfg.max_file_bytes, Some(10 * 1024 * 1024));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let empty = CorpusConfig::default().with_extensions(Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(IngestError::InvalidConfig(_))));

        let dotted = CorpusConfig::default().with_extensions([".md"]);
        assert!(dotted.validate().is_err());

        let zero = CorpusConfig::default().with_max_file_bytes(Some(0));
        assert!(zero.validate().is_err());

        let unlimited = CorpusConfig::default().with_max_file_bytes(None);
        assert!(unlimited.validate().is_ok());
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let cfg = CorpusConfig::default();
        assert!(cfg.matches_extension(Path::new("a/b/Note.MD")));
        assert!(cfg.matches_extension(Path::new("x.markdown")));
        assert!(!cfg.matches_extension(Path::new("x.txt")));
        assert!(!cfg.matches_extension(Path::new("README")));
    }

    #[test]
    fn source_parsing() {
        assert_eq!("GIT".parse::<CorpusSource>().unwrap(), CorpusSource::Git);
        assert_eq!(" walk ".parse::<CorpusSource>().unwrap(), CorpusSource::Walk);
        assert!("svn".parse::<CorpusSource>().is_err());
        assert_eq!(CorpusSource::Auto.to_string(), "auto");
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: CorpusConfig = serde_json::from_str(r#"{"source": "walk"}"#).unwrap();
        assert_eq!(cfg.source, CorpusSource::Walk);
        assert_eq!(cfg.extensions, vec!["md", "markdown"]);
    }

    #[test]
    fn pathspecs_from_extensions() {
        assert_eq!(CorpusConfig::default().pathspecs(), vec!["*.md", "*.markdown"]);
    }
}
