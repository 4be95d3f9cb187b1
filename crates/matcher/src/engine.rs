use index::{CandidateIndex, IndexStats, RecordId};
use shingle::PreparedBlock;
use tracing::{debug, trace};

use crate::similarity::{jaccard, within_length_tolerance};
use crate::types::{
    Assignment, CanonicalRecord, Cluster, ClusterStats, Location, MatchConfig, MatchError,
};

#[cfg(test)]
mod tests;

/// Sequential first-match-wins clusterer.
///
/// Blocks must be pushed in a deterministic order; the resulting records and
/// clusters are a pure function of that order and the configuration.
#[derive(Debug, Clone)]
pub struct Clusterer {
    cfg: MatchConfig,
    records: Vec<CanonicalRecord>,
    index: CandidateIndex,
    stats: ClusterStats,
}

impl Clusterer {
    /// Build a clusterer, validating `cfg`.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            records: Vec::new(),
            index: CandidateIndex::new(),
            stats: ClusterStats::default(),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Assign one block to the first acceptable candidate record, or start a
    /// new record from it.
    pub fn push(&mut self, prepared: PreparedBlock) -> Assignment {
        self.stats.blocks += 1;
        let PreparedBlock {
            block,
            tokens,
            char_len,
            signature,
        } = prepared;
        let location = Location {
            doc_id: block.doc_id,
            line: block.line,
        };

        if let Some(id) = self.find_match(&tokens, char_len, signature.tokens()) {
            self.stats.matched += 1;
            trace!(doc_id = %location.doc_id, line = location.line, record = %id, "block_matched");
            self.records[id.get()].locations.push(location);
            return Assignment::Matched(id);
        }

        let id = RecordId::new(self.records.len());
        if signature.is_empty() {
            self.stats.unindexed += 1;
        } else {
            self.index.register(id, signature.tokens());
        }
        trace!(doc_id = %location.doc_id, line = location.line, record = %id, "record_created");
        self.records.push(CanonicalRecord {
            id,
            text: block.text,
            tokens,
            char_len,
            locations: vec![location],
        });
        self.stats.records += 1;
        Assignment::Created(id)
    }

    fn find_match(
        &mut self,
        tokens: &shingle::TokenSet,
        char_len: usize,
        signature: &[String],
    ) -> Option<RecordId> {
        if signature.is_empty() {
            return None;
        }
        let candidates = self.index.lookup(signature);
        self.stats.candidates += candidates.len();

        for id in candidates {
            let record = &self.records[id.get()];
            if !within_length_tolerance(char_len, record.char_len, self.cfg.length_ratio_tolerance)
            {
                self.stats.length_rejections += 1;
                continue;
            }
            self.stats.jaccard_comparisons += 1;
            if jaccard(tokens, &record.tokens) >= self.cfg.similarity_threshold {
                return Some(id);
            }
        }
        None
    }

    /// Push every block of `blocks` in iteration order.
    pub fn extend<I>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = PreparedBlock>,
    {
        for block in blocks {
            self.push(block);
        }
    }

    /// Records in creation order.
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn stats(&self) -> ClusterStats {
        self.stats
    }

    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Consume the clusterer and keep only records spanning more than one
    /// document, in creation order.
    pub fn finish(self) -> Vec<Cluster> {
        let index = self.index.stats();
        let clusters: Vec<Cluster> = self
            .records
            .into_iter()
            .filter(CanonicalRecord::is_cross_document)
            .map(Cluster::from)
            .collect();
        debug!(
            blocks = self.stats.blocks,
            records = self.stats.records,
            matched = self.stats.matched,
            unindexed = self.stats.unindexed,
            candidates = self.stats.candidates,
            length_rejections = self.stats.length_rejections,
            jaccard_comparisons = self.stats.jaccard_comparisons,
            index_tokens = index.tokens,
            index_entries = index.entries,
            clusters = clusters.len(),
            "clustering_complete"
        );
        clusters
    }
}

/// Cluster an ordered stream of blocks in one call.
pub fn cluster_blocks<I>(blocks: I, cfg: &MatchConfig) -> Result<Vec<Cluster>, MatchError>
where
    I: IntoIterator<Item = PreparedBlock>,
{
    let mut clusterer = Clusterer::new(cfg.clone())?;
    clusterer.extend(blocks);
    Ok(clusterer.finish())
}
