//! Scan results and their rendering.
//!
//! [`DuplicateReport`] is the single output of a run. It serializes to JSON
//! as-is and renders to a human-readable listing for the terminal.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use canonical::{DocumentId, Fingerprint};
use matcher::Cluster;
use serde::{Deserialize, Serialize};

/// Documents whose cleaned content is byte-for-byte identical.
///
/// Only the first document of a group takes part in the block pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGroup {
    pub fingerprint: Fingerprint,
    /// At least two documents, in corpus order. The first is the
    /// representative.
    pub documents: Vec<DocumentId>,
}

impl DocumentGroup {
    pub fn representative(&self) -> Option<&DocumentId> {
        self.documents.first()
    }
}

/// A document left out of the run, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub document: DocumentId,
    pub reason: String,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Documents that were read and normalized.
    pub documents: usize,
    /// Documents that went through the block pass.
    pub unique_documents: usize,
    pub blocks: usize,
    pub records: usize,
    pub clusters: usize,
    pub skipped: usize,
}

/// Everything a run found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub document_groups: Vec<DocumentGroup>,
    pub clusters: Vec<Cluster>,
    pub skipped: Vec<SkippedDocument>,
    pub stats: ScanStats,
}

/// Output format for [`DuplicateReport::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{other}' (expected text or json)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        })
    }
}

impl DuplicateReport {
    /// No duplicate documents and no clusters.
    pub fn is_empty(&self) -> bool {
        self.document_groups.is_empty() && self.clusters.is_empty()
    }

    pub fn render<W: Write>(&self, format: ReportFormat, out: &mut W) -> io::Result<()> {
        match format {
            ReportFormat::Text => self.render_text(out),
            ReportFormat::Json => self.render_json(out),
        }
    }

    fn render_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    fn render_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let stats = &self.stats;
        writeln!(
            out,
            "Scanned {} documents ({} unique, {} skipped), {} blocks.",
            stats.documents, stats.unique_documents, stats.skipped, stats.blocks
        )?;
        writeln!(out)?;

        if !self.document_groups.is_empty() {
            writeln!(
                out,
                "Found {} groups of identical documents:",
                self.document_groups.len()
            )?;
            writeln!(out)?;
            for (n, group) in self.document_groups.iter().enumerate() {
                writeln!(out, "--- Duplicate Document #{} ({}) ---", n + 1, group.fingerprint.short())?;
                for doc in &group.documents {
                    writeln!(out, "  {doc}")?;
                }
                writeln!(out)?;
            }
        }

        if self.clusters.is_empty() {
            writeln!(out, "No duplicate blocks found across different files.")?;
        } else {
            writeln!(
                out,
                "Found {} duplicate/near-duplicate blocks across files:",
                self.clusters.len()
            )?;
            writeln!(out)?;
            for (n, cluster) in self.clusters.iter().enumerate() {
                writeln!(out, "--- Duplicate Block #{} ---", n + 1)?;
                writeln!(out, "{}", cluster.text)?;
                writeln!(out, "Locations:")?;
                for loc in &cluster.locations {
                    writeln!(out, "  {}:{}", loc.doc_id, loc.line)?;
                }
                writeln!(out)?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(out, "Skipped {} documents:", self.skipped.len())?;
            for skipped in &self.skipped {
                writeln!(out, "  {}: {}", skipped.document, skipped.reason)?;
            }
        }
        Ok(())
    }
}
