use std::fs;
use std::path::Path;
use std::process::Command;

use blockdup::{
    CorpusSource, DetectConfig, Document, ScanConfig, find_duplicates, scan_corpus,
};

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn walk_config() -> ScanConfig {
    let mut cfg = ScanConfig::default();
    cfg.corpus.source = CorpusSource::Walk;
    cfg
}

#[test]
fn two_documents_share_first_block_only() {
    let a = Document::from_lines(
        "A",
        &["alpha beta gamma", "delta epsilon zeta", "eta theta iota"],
    );
    let b = Document::from_lines(
        "B",
        &["alpha beta gamma", "delta epsilon zeta", "different tail here"],
    );
    let cfg = DetectConfig::default()
        .with_block_size(2)
        .with_threshold(0.9);

    let report = find_duplicates(&[a, b], &cfg).unwrap();

    assert!(report.document_groups.is_empty());
    assert_eq!(report.clusters.len(), 1);
    let cluster = &report.clusters[0];
    assert_eq!(cluster.text, "alpha beta gamma\ndelta epsilon zeta");
    let locations: Vec<(&str, usize)> = cluster
        .locations
        .iter()
        .map(|l| (l.doc_id.as_str(), l.line))
        .collect();
    assert_eq!(locations, vec![("A", 1), ("B", 1)]);
    assert_eq!(report.stats.blocks, 4);
    assert_eq!(report.stats.records, 3);
}

#[test]
fn block_repeated_within_one_document_is_not_reported() {
    let pattern = ["repeated line one", "repeated line two"];
    let mut lines = Vec::new();
    for i in 0..3 {
        lines.extend(pattern.iter().map(|s| s.to_string()));
        lines.push(format!("separator number {i} with filler words"));
    }
    let a = Document::new("A", lines);
    let b = Document::from_lines("B", &["completely", "different", "content"]);

    let report = find_duplicates(&[a, b], &DetectConfig::default().with_block_size(2)).unwrap();
    assert!(report.clusters.is_empty());
}

#[test]
fn scan_normalizes_markdown_before_matching() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "daily/2024-01-01.md",
        "---\ntags: [daily]\n---\n# Standup\n\nShip the release [[Release Plan|plan]] today\nReview   open pull requests\n![[diagram.png]]\nUpdate the changelog draft\n",
    );
    write(
        dir.path(),
        "projects/release.md",
        "## Checklist\nShip the release plan today\nReview open pull requests\nUpdate the changelog draft\nNotify the team channel\n",
    );
    write(dir.path(), "projects/ignored.txt", "Ship the release plan today\n");

    let report = scan_corpus(dir.path(), &walk_config()).unwrap();

    assert_eq!(report.stats.documents, 2);
    assert!(report.skipped.is_empty());
    let cluster = report
        .clusters
        .iter()
        .find(|c| c.text.starts_with("Ship the release plan today"))
        .expect("release checklist is a cross-document duplicate");
    let locations: Vec<(String, usize)> = cluster
        .locations
        .iter()
        .map(|l| (l.doc_id.as_str().replace('\\', "/"), l.line))
        .collect();
    // Cleaned line numbers: headings survive as text, front matter and blank
    // lines do not.
    assert_eq!(
        locations,
        vec![
            ("daily/2024-01-01.md".to_string(), 2),
            ("projects/release.md".to_string(), 2),
        ]
    );
}

#[test]
fn scan_reports_exact_duplicate_files() {
    let dir = tempfile::tempdir().unwrap();
    let body = "First line of the note\nSecond line of the note\nThird line of the note\n";
    write(dir.path(), "a.md", body);
    write(dir.path(), "b.md", &format!("---\nid: b\n---\n{body}"));
    write(dir.path(), "c.md", "Something else entirely\nwith its own lines\nand words\n");

    let report = scan_corpus(dir.path(), &walk_config()).unwrap();
    assert_eq!(report.document_groups.len(), 1);
    let ids: Vec<&str> = report.document_groups[0]
        .documents
        .iter()
        .map(|d| d.as_str())
        .collect();
    assert_eq!(ids, vec!["a.md", "b.md"]);
    assert!(report.clusters.is_empty());
    assert_eq!(report.stats.unique_documents, 2);
}

#[test]
fn cli_prints_json_report() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "one.md", "shared alpha line\nshared beta line\nshared gamma line\nonly in one\n");
    write(dir.path(), "two.md", "only in two\nshared alpha line\nshared beta line\nshared gamma line\n");

    let output = Command::new(env!("CARGO_BIN_EXE_blockdup"))
        .arg(dir.path())
        .args(["--source", "walk", "--format", "json", "--threads", "2"])
        .output()
        .expect("binary runs");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let clusters = value["clusters"].as_array().unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0]["text"], "shared alpha line\nshared beta line\nshared gamma line");
    assert_eq!(clusters[0]["locations"][0]["line"], 1);
    assert_eq!(clusters[0]["locations"][1]["line"], 2);
}

#[test]
fn cli_text_report_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("vault");
    write(&corpus, "x.md", "nothing\nin\ncommon\n");
    write(&corpus, "y.md", "totally\nseparate\nwords\n");
    let out = dir.path().join("report.txt");

    let status = Command::new(env!("CARGO_BIN_EXE_blockdup"))
        .arg(&corpus)
        .args(["--source", "walk", "--output"])
        .arg(&out)
        .status()
        .expect("binary runs");
    assert!(status.success());

    let text = fs::read_to_string(out).unwrap();
    assert!(text.contains("No duplicate blocks found across different files."));
}

#[test]
fn cli_rejects_invalid_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_blockdup"))
        .arg(dir.path())
        .args(["--source", "walk", "--threshold", "1.5"])
        .output()
        .expect("binary runs")
        .status;
    assert!(!status.success());
}
