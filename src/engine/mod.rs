//! Engine module for fetching, scanning, aggregating and reporting

pub mod aggregate;
pub mod arg_parser;
pub mod cli;
pub mod core;
pub mod fetcher;
pub mod output;
pub mod progress;
pub mod scanner;

// Re-export commonly used functions
pub use aggregate::{aggregate, build_report, distinct_values};
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use core::{collect_report, jobs_from_files};
pub use fetcher::{Fetcher, HttpFetcher, StaticFetcher, fetch_and_scan, redact_userinfo};
pub use output::{print_distinct_values, render_distinct_values, value_index_json, write_value_index};
pub use scanner::{marker_value, scan_reader, scan_text};
