//! Line scanner: pulls base-image names out of `FROM` lines.

use log::debug;
use std::io::BufRead;

use crate::ScanOutcome;
use crate::utils::config::MARKER;

/// Value declared on one line, if the line is a marker line.
///
/// The line is trimmed and split on single spaces (not arbitrary whitespace), so `FROM  img`
/// yields an empty value and `FROM\timg` is not a marker line. A bare `FROM` has no value and is ignored.
pub fn marker_value(line: &str) -> Option<&str> {
    let mut tokens = line.trim().split(' ');
    match tokens.next() {
        Some(first) if first == MARKER => tokens.next(),
        _ => None,
    }
}

/// Scan `reader` line by line, collecting every marker value in file order.
///
/// Lines are split on `\n` (a trailing `\r` is trimmed with the rest of the whitespace) and decoded lossily.
/// A read error ends the scan early and keeps whatever was found before it.
pub fn scan_reader<R: BufRead>(mut reader: R) -> ScanOutcome {
    let mut values = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if let Some(value) = marker_value(&line) {
                    values.push(value.to_string());
                }
            }
            Err(e) => {
                debug!("read stopped early: {}", e);
                break;
            }
        }
    }
    if values.is_empty() {
        ScanOutcome::NotFound
    } else {
        ScanOutcome::Found(values)
    }
}

/// Convenience over [`scan_reader`] for in-memory text.
pub fn scan_text(text: &str) -> ScanOutcome {
    scan_reader(text.as_bytes())
}
