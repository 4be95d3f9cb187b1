//! Workspace umbrella crate for blockdup, duplicate and near-duplicate block
//! detection across a corpus of notes.
//!
//! The stage crates each do one thing (`ingest`, `canonical`, `shingle`,
//! `index`, `matcher`). This crate runs them as one batch job:
//!
//! 1. **Phase A** (`scan.read`, parallel): read, normalize and fingerprint
//!    every document.
//! 2. Documents with equal fingerprints are grouped; only the first of each
//!    group continues.
//! 3. **Phase B** (`scan.extract`, parallel): extract blocks and compute
//!    token sets and signatures per surviving document.
//! 4. **Phase C** (`scan.cluster`, sequential): feed blocks in
//!    document-then-position order to a single [`Clusterer`], then keep the
//!    records that span more than one document.
//!
//! Parallel results are collected by input position, so the report does not
//! depend on scheduling. Phase C owns the candidate index alone and needs no
//! locking.
//!
//! ```
//! use blockdup::{find_duplicates, DetectConfig, Document};
//!
//! let a = Document::from_lines("a.md", &["alpha beta gamma", "delta epsilon zeta", "eta theta iota"]);
//! let b = Document::from_lines("b.md", &["alpha beta gamma", "delta epsilon zeta", "different tail here"]);
//!
//! let cfg = DetectConfig::default().with_block_size(2);
//! let report = find_duplicates(&[a, b], &cfg)?;
//! assert_eq!(report.clusters.len(), 1);
//! # Ok::<(), blockdup::ScanError>(())
//! ```

pub mod config;
pub mod report;

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Instant;

use rayon::ThreadPool;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

pub use canonical::{
    CanonicalError, Document, DocumentId, Fingerprint, NormalizeConfig, canonicalize,
    fingerprint, normalize_lines,
};
pub use index::{CandidateIndex, RecordId};
pub use ingest::{CorpusConfig, CorpusSource, IngestError, enumerate, read_document};
pub use matcher::{
    CanonicalRecord, Cluster, Clusterer, Location, MatchConfig, MatchError, jaccard,
};
pub use shingle::{
    Block, BlockConfig, PreparedBlock, ShingleError, Signature, TokenSet, extract_blocks,
    prepare_blocks, select_signature, tokenize,
};

pub use crate::config::{BlockdupConfig, ConfigLoadError};
pub use crate::report::{
    DocumentGroup, DuplicateReport, ReportFormat, ScanStats, SkippedDocument,
};

/// Errors that abort a run.
///
/// A single unreadable document is not one of them: it is logged and listed
/// in [`DuplicateReport::skipped`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),
    #[error("canonicalization failure: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("shingle failure: {0}")]
    Shingle(#[from] ShingleError),
    #[error("matcher failure: {0}")]
    Match(#[from] MatchError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Detection parameters for [`find_duplicates`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    pub block: BlockConfig,
    pub matcher: MatchConfig,
    /// Worker threads for phases A and B; [`default_threads`] when `None`.
    pub threads: Option<usize>,
}

impl DetectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block.block_size = block_size;
        self
    }

    pub fn with_signature_size(mut self, signature_size: usize) -> Self {
        self.block.signature_size = signature_size;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.matcher.similarity_threshold = threshold;
        self
    }

    pub fn with_length_tolerance(mut self, tolerance: f64) -> Self {
        self.matcher.length_ratio_tolerance = tolerance;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        self.block.validate()?;
        self.matcher.validate()?;
        if self.threads == Some(0) {
            return Err(ScanError::InvalidConfig("threads must be >= 1".into()));
        }
        Ok(())
    }
}

/// Everything [`scan_corpus`] needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub corpus: CorpusConfig,
    pub normalize: NormalizeConfig,
    pub detect: DetectConfig,
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ScanError> {
        self.corpus.validate()?;
        self.normalize.validate()?;
        self.detect.validate()
    }
}

/// Worker count when none is configured. Honors CPU quotas (cgroups,
/// affinity masks), not just the number of logical cores.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn build_pool(threads: Option<usize>) -> Result<ThreadPool, ScanError> {
    let threads = threads.unwrap_or_else(default_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("blockdup-worker-{i}"))
        .build()
        .map_err(|err| ScanError::ThreadPool(err.to_string()))
}

/// Find whole-document duplicates and cross-document duplicate blocks in an
/// in-memory corpus of already normalized documents.
///
/// Documents are processed in slice order. An empty slice yields an empty
/// report.
pub fn find_duplicates(
    documents: &[Document],
    cfg: &DetectConfig,
) -> Result<DuplicateReport, ScanError> {
    cfg.validate()?;
    let pool = build_pool(cfg.threads)?;

    let fingerprints: Vec<Fingerprint> = {
        let _span = info_span!("scan.read", documents = documents.len()).entered();
        pool.install(|| documents.par_iter().map(Document::fingerprint).collect())
    };

    detect(&pool, documents, &fingerprints, cfg)
}

/// Enumerate, read and normalize the corpus under `root`, then run
/// [`find_duplicates`] semantics over it.
///
/// Documents that cannot be read are skipped with a warning and listed in
/// the report. Document ids are paths relative to `root`.
pub fn scan_corpus(root: &Path, cfg: &ScanConfig) -> Result<DuplicateReport, ScanError> {
    cfg.validate()?;
    let start = Instant::now();

    let paths = enumerate(root, &cfg.corpus)?;
    let pool = build_pool(cfg.detect.threads)?;

    let loaded: Vec<Result<(Document, Fingerprint), SkippedDocument>> = {
        let _span = info_span!("scan.read", documents = paths.len()).entered();
        pool.install(|| {
            paths
                .par_iter()
                .map(|path| load_document(root, path, cfg))
                .collect()
        })
    };

    let mut documents = Vec::with_capacity(loaded.len());
    let mut fingerprints = Vec::with_capacity(loaded.len());
    let mut skipped = Vec::new();
    for item in loaded {
        match item {
            Ok((doc, fp)) => {
                documents.push(doc);
                fingerprints.push(fp);
            }
            Err(skip) => {
                warn!(document = %skip.document, reason = %skip.reason, "document_skipped");
                skipped.push(skip);
            }
        }
    }

    let mut report = detect(&pool, &documents, &fingerprints, &cfg.detect)?;
    report.stats.skipped = skipped.len();
    report.skipped = skipped;

    info!(
        root = %root.display(),
        documents = report.stats.documents,
        unique_documents = report.stats.unique_documents,
        document_groups = report.document_groups.len(),
        clusters = report.stats.clusters,
        skipped = report.stats.skipped,
        elapsed_micros = start.elapsed().as_micros(),
        "scan_complete"
    );
    Ok(report)
}

fn load_document(
    root: &Path,
    path: &Path,
    cfg: &ScanConfig,
) -> Result<(Document, Fingerprint), SkippedDocument> {
    let id = DocumentId::from(path.strip_prefix(root).unwrap_or(path));
    let skip = |reason: String| SkippedDocument {
        document: id.clone(),
        reason,
    };

    let text = read_document(path, &cfg.corpus).map_err(|err| skip(err.detail()))?;
    let doc = canonicalize(id.as_str(), &text, &cfg.normalize)
        .map_err(|err| skip(err.to_string()))?;
    let fp = doc.fingerprint();
    debug!(document = %doc.id, lines = doc.len(), fingerprint = %fp.short(), "document_loaded");
    Ok((doc, fp))
}

/// Exact-duplicate grouping followed by phases B and C.
fn detect(
    pool: &ThreadPool,
    documents: &[Document],
    fingerprints: &[Fingerprint],
    cfg: &DetectConfig,
) -> Result<DuplicateReport, ScanError> {
    // Groups in order of first appearance; members in corpus order.
    let mut groups: Vec<(Fingerprint, Vec<usize>)> = Vec::new();
    let mut group_of: HashMap<Fingerprint, usize> = HashMap::new();
    for (i, (doc, fp)) in documents.iter().zip(fingerprints).enumerate() {
        if doc.is_empty() {
            debug!(document = %doc.id, "empty_document");
            continue;
        }
        match group_of.get(fp) {
            Some(&g) => groups[g].1.push(i),
            None => {
                group_of.insert(*fp, groups.len());
                groups.push((*fp, vec![i]));
            }
        }
    }

    let representatives: Vec<usize> = groups
        .iter()
        .filter_map(|(_, members)| members.first().copied())
        .collect();
    let document_groups: Vec<DocumentGroup> = groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(fingerprint, members)| DocumentGroup {
            fingerprint,
            documents: members.iter().map(|&i| documents[i].id.clone()).collect(),
        })
        .collect();

    let prepared: Vec<Vec<PreparedBlock>> = {
        let _span = info_span!("scan.extract", documents = representatives.len()).entered();
        pool.install(|| {
            representatives
                .par_iter()
                .map(|&i| prepare_blocks(&documents[i], &cfg.block))
                .collect()
        })
    };
    let blocks: usize = prepared.iter().map(Vec::len).sum();

    let _span = info_span!("scan.cluster", blocks).entered();
    let mut clusterer = Clusterer::new(cfg.matcher.clone())?;
    for doc_blocks in prepared {
        clusterer.extend(doc_blocks);
    }
    let records = clusterer.stats().records;
    let clusters = clusterer.finish();

    let stats = ScanStats {
        documents: documents.len(),
        unique_documents: representatives.len(),
        blocks,
        records,
        clusters: clusters.len(),
        skipped: 0,
    };
    debug!(
        documents = stats.documents,
        unique_documents = stats.unique_documents,
        blocks = stats.blocks,
        records = stats.records,
        clusters = stats.clusters,
        "detection_complete"
    );

    Ok(DuplicateReport {
        document_groups,
        clusters,
        skipped: Vec::new(),
        stats,
    })
}
