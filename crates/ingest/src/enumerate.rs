//! Corpus enumeration: turn a root directory into a sorted, deduplicated list
//! of document paths.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{CorpusConfig, CorpusSource};
use crate::error::IngestError;

/// List the documents under `root`.
///
/// Returned paths are joined to `root` so they can be opened directly, sorted
/// and free of duplicates.
pub fn enumerate(root: &Path, cfg: &CorpusConfig) -> Result<Vec<PathBuf>, IngestError> {
    cfg.validate()?;
    if !root.is_dir() {
        return Err(IngestError::Enumeration(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let start = Instant::now();
    let source = resolve_source(root, cfg.source);
    let mut paths = match source {
        CorpusSource::Git => enumerate_git(root, cfg)?,
        _ => enumerate_walk(root, cfg),
    };
    paths.sort();
    paths.dedup();

    info!(
        root = %root.display(),
        source = %source,
        documents = paths.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "corpus_enumerated"
    );
    Ok(paths)
}

/// Resolve [`CorpusSource::Auto`] against the contents of `root`.
pub fn resolve_source(root: &Path, source: CorpusSource) -> CorpusSource {
    match source {
        CorpusSource::Auto if root.join(".git").exists() => CorpusSource::Git,
        CorpusSource::Auto => CorpusSource::Walk,
        explicit => explicit,
    }
}

fn enumerate_git(root: &Path, cfg: &CorpusConfig) -> Result<Vec<PathBuf>, IngestError> {
    let output = Command::new("git")
        .arg("ls-files")
        .arg("-z")
        .arg("--")
        .args(cfg.pathspecs())
        .current_dir(root)
        .output()
        .map_err(|err| IngestError::Enumeration(format!("failed to run git: {err}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IngestError::Enumeration(format!(
            "git ls-files exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let mut paths = Vec::new();
    for raw in output.stdout.split(|b| *b == 0).filter(|s| !s.is_empty()) {
        match std::str::from_utf8(raw) {
            Ok(rel) => paths.push(root.join(rel)),
            Err(_) => warn!(
                path = %String::from_utf8_lossy(raw),
                "skipping non UTF-8 path from git"
            ),
        }
    }
    Ok(paths)
}

fn enumerate_walk(root: &Path, cfg: &CorpusConfig) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(cfg.follow_links)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "walk_entry_skipped");
                continue;
            }
        };
        if entry.file_type().is_file() && cfg.matches_extension(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
