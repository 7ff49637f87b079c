use fromscan::engine::{
    aggregate, build_report, distinct_values, marker_value, render_distinct_values, scan_reader,
    scan_text, value_index_json, write_value_index,
};
use fromscan::{ScanJob, ScanOutcome, ScanResult, ValueIndex};
use std::collections::{BTreeMap, HashSet};
use std::io::{BufReader, Read};
use std::path::PathBuf;

// --- marker_value ---

#[test]
fn test_marker_value_plain() {
    assert_eq!(marker_value("FROM alpine:3.18"), Some("alpine:3.18"));
}

#[test]
fn test_marker_value_trims_surrounding_whitespace() {
    assert_eq!(marker_value("   FROM node:20 AS build  \r"), Some("node:20"));
}

#[test]
fn test_marker_value_is_case_sensitive() {
    assert_eq!(marker_value("from alpine"), None);
    assert_eq!(marker_value("From alpine"), None);
}

#[test]
fn test_marker_value_single_space_split() {
    // Two spaces produce an empty second token; it is kept verbatim.
    assert_eq!(marker_value("FROM  alpine"), Some(""));
    // A tab is not a separator.
    assert_eq!(marker_value("FROM\talpine"), None);
}

#[test]
fn test_marker_value_bare_marker_and_blank_lines() {
    assert_eq!(marker_value("FROM"), None);
    assert_eq!(marker_value(""), None);
    assert_eq!(marker_value("    "), None);
}

#[test]
fn test_marker_value_not_first_token() {
    assert_eq!(marker_value("# FROM alpine"), None);
    assert_eq!(marker_value("COPY --from=build /app /app"), None);
}

#[test]
fn test_marker_value_flags_are_not_validated() {
    assert_eq!(
        marker_value("FROM --platform=linux/amd64 golang:1.22"),
        Some("--platform=linux/amd64")
    );
}

// --- scan ---

#[test]
fn test_scan_multi_stage_in_order() {
    let text = "FROM alpine:3.18\nRUN apt-get update\nFROM ubuntu:22.04\n";
    assert_eq!(
        scan_text(text),
        ScanOutcome::Found(vec!["alpine:3.18".to_string(), "ubuntu:22.04".to_string()])
    );
}

#[test]
fn test_scan_no_marker() {
    let text = "RUN make\n# FROM nothing\nCMD [\"run\"]\n";
    let outcome = scan_text(text);
    assert_eq!(outcome, ScanOutcome::NotFound);
    assert_eq!(outcome.into_parts(), (false, Vec::new()));
}

#[test]
fn test_scan_empty_body() {
    assert_eq!(scan_text(""), ScanOutcome::NotFound);
}

#[test]
fn test_scan_keeps_duplicates() {
    let text = "FROM alpine\nFROM alpine\n";
    assert_eq!(
        scan_text(text).into_parts(),
        (true, vec!["alpine".to_string(), "alpine".to_string()])
    );
}

#[test]
fn test_scan_crlf_and_no_trailing_newline() {
    let text = "FROM a:1\r\nRUN x\r\nFROM b:2";
    assert_eq!(
        scan_text(text).into_parts(),
        (true, vec!["a:1".to_string(), "b:2".to_string()])
    );
}

#[test]
fn test_scan_invalid_utf8_is_tolerated() {
    let mut body = b"FROM alpine\n".to_vec();
    body.extend_from_slice(&[0xff, 0xfe, b'\n']);
    body.extend_from_slice(b"FROM debian\n");
    assert_eq!(
        scan_reader(body.as_slice()).into_parts(),
        (true, vec!["alpine".to_string(), "debian".to_string()])
    );
}

#[test]
fn test_scan_is_idempotent() {
    let text = "FROM rust:1.80 AS build\nRUN cargo build\nFROM debian:bookworm-slim\n";
    assert_eq!(scan_text(text), scan_text(text));
}

/// Yields its data, then fails.
struct FailingAfter {
    data: &'static [u8],
    pos: usize,
}

impl Read for FailingAfter {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.pos >= self.data.len() {
            return Err(std::io::Error::other("connection reset"));
        }
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn test_scan_read_error_keeps_values_so_far() {
    let reader = BufReader::new(FailingAfter {
        data: b"FROM alpine\nRUN x\n",
        pos: 0,
    });
    assert_eq!(
        scan_reader(reader),
        ScanOutcome::Found(vec!["alpine".to_string()])
    );
}

// --- ScanResult ---

fn job(name: &str, url: &str) -> ScanJob {
    ScanJob {
        name: name.to_string(),
        url: url.to_string(),
    }
}

#[test]
fn test_result_found_carries_url() {
    let r = ScanResult::from_outcome(
        job("Dockerfile", "u1"),
        ScanOutcome::Found(vec!["x".to_string()]),
    );
    assert!(r.found);
    assert_eq!(r.url.as_deref(), Some("u1"));
    assert_eq!(r.values, vec!["x".to_string()]);
}

#[test]
fn test_result_not_found_drops_url() {
    let r = ScanResult::from_outcome(job("Dockerfile", "u1"), ScanOutcome::NotFound);
    assert!(!r.found);
    assert_eq!(r.url, None);
    assert!(r.values.is_empty());
    assert_eq!(r.name, "Dockerfile");
}

// --- aggregate ---

fn result(name: &str, url: Option<&str>, values: &[&str]) -> ScanResult {
    ScanResult {
        name: name.to_string(),
        url: url.map(str::to_string),
        found: !values.is_empty(),
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

#[test]
fn test_aggregate_scenario() {
    let results = vec![
        result("a", Some("u1"), &["x"]),
        result("b", Some("u2"), &["x", "y"]),
    ];
    let (files, values) = aggregate(&results);
    assert_eq!(values["x"], vec!["u1".to_string(), "u2".to_string()]);
    assert_eq!(values["y"], vec!["u2".to_string()]);
    assert_eq!(files["a"], vec!["x".to_string()]);
    assert_eq!(files["b"], vec!["x".to_string(), "y".to_string()]);

    let distinct: HashSet<String> = distinct_values(&values).into_iter().collect();
    let expected: HashSet<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
    assert_eq!(distinct, expected);
}

#[test]
fn test_aggregate_url_order_is_drain_order() {
    let results = vec![
        result("b", Some("u2"), &["x"]),
        result("a", Some("u1"), &["x"]),
    ];
    let (_, values) = aggregate(&results);
    assert_eq!(values["x"], vec!["u2".to_string(), "u1".to_string()]);
}

#[test]
fn test_aggregate_not_found_only_in_file_index() {
    let results = vec![result("empty", None, &[])];
    let (files, values) = aggregate(&results);
    assert_eq!(files["empty"], Vec::<String>::new());
    assert!(values.is_empty());
}

#[test]
fn test_aggregate_repeated_name_overwrites() {
    let results = vec![
        result("Dockerfile", Some("u1"), &["x"]),
        result("Dockerfile", Some("u2"), &["y"]),
    ];
    let (files, values) = aggregate(&results);
    assert_eq!(files.len(), 1);
    assert_eq!(files["Dockerfile"], vec!["y".to_string()]);
    // The value index still sees both files.
    assert_eq!(values.len(), 2);
}

#[test]
fn test_aggregate_same_value_twice_in_one_file_appends_twice() {
    let results = vec![result("a", Some("u1"), &["x", "x"])];
    let (_, values) = aggregate(&results);
    assert_eq!(values["x"], vec!["u1".to_string(), "u1".to_string()]);
}

#[test]
fn test_build_report_counts_files() {
    let results = vec![
        result("a", Some("u1"), &["x"]),
        result("b", None, &[]),
    ];
    let report = build_report(&results);
    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.distinct_values, vec!["x".to_string()]);
    assert_eq!(report.file_index.len(), 2);
}

// --- output ---

#[test]
fn test_render_distinct_values_banner_and_lines() {
    colored::control::set_override(false);
    let out = render_distinct_values(&["alpine".to_string(), "debian".to_string()]);
    assert_eq!(
        out,
        "\n\nDistinct container images:\n--------------------------\nalpine\ndebian\n"
    );
}

fn sample_index() -> ValueIndex {
    let mut idx = ValueIndex::new();
    idx.insert("y".to_string(), vec!["u2".to_string()]);
    idx.insert("x".to_string(), vec!["u1".to_string(), "u2".to_string()]);
    idx
}

#[test]
fn test_value_index_json_sorted_single_space_indent() {
    let json = String::from_utf8(value_index_json(&sample_index()).unwrap()).unwrap();
    assert_eq!(
        json,
        "{\n \"x\": [\n  \"u1\",\n  \"u2\"\n ],\n \"y\": [\n  \"u2\"\n ]\n}"
    );
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "fromscan_test_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_write_value_index_round_trip() {
    let dir = scratch_dir("write");
    let path = dir.join("containerImageFiles.json");
    write_value_index(&sample_index(), &path).unwrap();

    let parsed: BTreeMap<String, Vec<String>> =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(parsed["x"], vec!["u1".to_string(), "u2".to_string()]);
    assert_eq!(parsed["y"], vec!["u2".to_string()]);
    assert!(!dir.join("containerImageFiles.json.tmp").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_write_value_index_missing_dir_is_error() {
    let dir = scratch_dir("missing");
    let path = dir.join("no/such/dir/out.json");
    assert!(write_value_index(&sample_index(), &path).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
