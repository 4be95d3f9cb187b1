use super::*;

use canonical::Document;
use shingle::{prepare_blocks, Block, BlockConfig};

fn prepared(doc: &str, line: usize, text: &str) -> PreparedBlock {
    let block = Block {
        doc_id: doc.into(),
        line,
        text: text.to_string(),
    };
    PreparedBlock::new(block, 5)
}

/// Space-separated distinct words `w{start}` through `w{end - 1}`.
fn words(range: std::ops::Range<usize>) -> String {
    range
        .map(|i| format!("w{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn clusterer() -> Clusterer {
    Clusterer::new(MatchConfig::default()).expect("default config is valid")
}

fn doc_lines(cluster: &Cluster) -> Vec<(String, usize)> {
    cluster
        .locations
        .iter()
        .map(|loc| (loc.doc_id.to_string(), loc.line))
        .collect()
}

#[test]
fn rejects_invalid_config() {
    let err = Clusterer::new(MatchConfig::new().with_threshold(0.0)).unwrap_err();
    assert!(matches!(err, MatchError::InvalidThreshold(_)));
}

#[test]
fn identical_blocks_in_two_documents_form_a_cluster() {
    let mut c = clusterer();
    let text = "alpha beta gamma\ndelta epsilon zeta\neta theta iota";
    assert_eq!(c.push(prepared("a.md", 1, text)), Assignment::Created(RecordId::new(0)));
    assert_eq!(c.push(prepared("b.md", 4, text)), Assignment::Matched(RecordId::new(0)));

    let clusters = c.finish();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].text, text);
    assert_eq!(clusters[0].documents, 2);
    assert_eq!(
        doc_lines(&clusters[0]),
        vec![("a.md".to_string(), 1), ("b.md".to_string(), 4)]
    );
}

#[test]
fn threshold_is_inclusive() {
    // 9 shared of 10 total tokens: exactly 0.9.
    let mut c = clusterer();
    c.push(prepared("a.md", 1, &words(0..10)));
    let assignment = c.push(prepared("b.md", 1, &words(0..9)));
    assert_eq!(assignment, Assignment::Matched(RecordId::new(0)));
}

#[test]
fn below_threshold_creates_new_record() {
    // 8 shared of 10 total tokens: 0.8.
    let mut c = clusterer();
    c.push(prepared("a.md", 1, &words(0..10)));
    let assignment = c.push(prepared("b.md", 1, &words(0..8)));
    assert_eq!(assignment, Assignment::Created(RecordId::new(1)));
    assert!(c.finish().is_empty());
}

#[test]
fn length_filter_rejects_before_jaccard() {
    let mut c = clusterer();
    let short = "alpha beta gamma";
    let long = format!("{short} {}", "-".repeat(40));
    c.push(prepared("a.md", 1, short));
    let assignment = c.push(prepared("b.md", 1, &long));

    assert_eq!(assignment, Assignment::Created(RecordId::new(1)));
    let stats = c.stats();
    assert_eq!(stats.length_rejections, 1);
    assert_eq!(stats.jaccard_comparisons, 0);
}

#[test]
fn first_acceptable_candidate_wins() {
    let cfg = MatchConfig::new().with_threshold(0.5).with_length_tolerance(1.0);
    let mut c = Clusterer::new(cfg).unwrap();

    // Two records that do not match each other (1/4 overlap).
    assert_eq!(c.push(prepared("a.md", 1, "aa bb")), Assignment::Created(RecordId::new(0)));
    assert_eq!(c.push(prepared("a.md", 2, "bb cc dd")), Assignment::Created(RecordId::new(1)));

    // 0.5 against record 0, 0.75 against record 1; record 0 is older.
    let assignment = c.push(prepared("b.md", 1, "aa bb cc dd"));
    assert_eq!(assignment, Assignment::Matched(RecordId::new(0)));
}

#[test]
fn record_tokens_are_fixed_at_creation() {
    let cfg = MatchConfig::new().with_threshold(0.8);
    let mut c = Clusterer::new(cfg).unwrap();
    c.push(prepared("a.md", 1, &words(0..10)));

    // 9/11 against the creator.
    assert_eq!(
        c.push(prepared("b.md", 1, &words(1..11))),
        Assignment::Matched(RecordId::new(0))
    );
    assert_eq!(c.records()[0].tokens.len(), 10);
    assert!(!c.records()[0].tokens.contains("w10"));
    assert_eq!(c.records()[0].text, words(0..10));

    // 9/11 against the second block but 8/12 against the creator: the chain
    // does not drift.
    assert_eq!(
        c.push(prepared("c.md", 1, &words(2..12))),
        Assignment::Created(RecordId::new(1))
    );
}

#[test]
fn empty_token_blocks_never_match() {
    let mut c = clusterer();
    assert_eq!(c.push(prepared("a.md", 1, "---\n***\n...")), Assignment::Created(RecordId::new(0)));
    assert_eq!(c.push(prepared("b.md", 1, "---\n***\n...")), Assignment::Created(RecordId::new(1)));

    let stats = c.stats();
    assert_eq!(stats.unindexed, 2);
    assert_eq!(stats.candidates, 0);
    assert_eq!(c.index_stats().entries, 0);
    assert!(c.finish().is_empty());
}

#[test]
fn repeats_within_one_document_are_not_a_cluster() {
    let mut c = clusterer();
    let text = "repeated boilerplate paragraph here";
    c.push(prepared("a.md", 1, text));
    c.push(prepared("a.md", 10, text));
    c.push(prepared("a.md", 20, text));

    assert_eq!(c.records().len(), 1);
    assert_eq!(c.records()[0].locations.len(), 3);
    assert!(c.finish().is_empty());
}

#[test]
fn cluster_keeps_same_document_locations_too() {
    let mut c = clusterer();
    let text = "shared paragraph text";
    c.push(prepared("a.md", 1, text));
    c.push(prepared("a.md", 8, text));
    c.push(prepared("b.md", 3, text));

    let clusters = c.finish();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].documents, 2);
    assert_eq!(clusters[0].locations.len(), 3);
}

#[test]
fn disjoint_signatures_are_never_compared() {
    // Signature size 1: the smallest token differs, so the blocks never meet
    // even though they share most tokens.
    let mut c = clusterer();
    let a = PreparedBlock::new(
        Block {
            doc_id: "a.md".into(),
            line: 1,
            text: "aaa shared words here".into(),
        },
        1,
    );
    let b = PreparedBlock::new(
        Block {
            doc_id: "b.md".into(),
            line: 1,
            text: "bbb shared words here".into(),
        },
        1,
    );
    c.push(a);
    assert_eq!(c.push(b), Assignment::Created(RecordId::new(1)));
    assert_eq!(c.stats().candidates, 0);
}

#[test]
fn clusters_follow_creation_order() {
    let mut c = clusterer();
    c.push(prepared("a.md", 1, "first unique block text"));
    c.push(prepared("a.md", 2, "second unique block text more"));
    c.push(prepared("b.md", 7, "second unique block text more"));
    c.push(prepared("b.md", 9, "first unique block text"));

    let clusters = c.finish();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].record, RecordId::new(0));
    assert_eq!(clusters[1].record, RecordId::new(1));
}

#[test]
fn works_with_prepared_documents() {
    let a = Document::from_lines(
        "a.md",
        &["Line one text", "Line two text", "Line three text", "Unique A"],
    );
    let b = Document::from_lines(
        "b.md",
        &["Line one text", "Line two text", "Line three text", "Unique B"],
    );
    let cfg = BlockConfig::default();
    let blocks = prepare_blocks(&a, &cfg)
        .into_iter()
        .chain(prepare_blocks(&b, &cfg));

    let clusters = cluster_blocks(blocks, &MatchConfig::default()).unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].text, "Line one text\nLine two text\nLine three text");
    assert_eq!(
        doc_lines(&clusters[0]),
        vec![("a.md".to_string(), 1), ("b.md".to_string(), 1)]
    );
}

#[test]
fn same_order_same_result() {
    let input = || {
        vec![
            prepared("a.md", 1, &words(0..10)),
            prepared("b.md", 1, &words(0..9)),
            prepared("c.md", 1, &words(20..30)),
            prepared("d.md", 2, &words(20..30)),
        ]
    };
    let first = cluster_blocks(input(), &MatchConfig::default()).unwrap();
    let second = cluster_blocks(input(), &MatchConfig::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}
