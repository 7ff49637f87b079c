//! Report output: distinct values to stdout, value → files mapping to a JSON file.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::BTreeMap;
use std::path::Path;

use crate::ValueIndex;
use crate::utils::config::OutputConsts;
use crate::utils::tempfiles::write_atomic;
use crate::utils::Colors;

/// Banner, rule, then one value per line.
pub fn render_distinct_values(values: &[String]) -> String {
    let mut out = format!(
        "\n\n{}\n{}\n",
        Colors::colorize(Colors::BANNER, OutputConsts::BANNER),
        OutputConsts::RULE
    );
    for v in values {
        out.push_str(&Colors::colorize(Colors::VALUE, v).to_string());
        out.push('\n');
    }
    out
}

pub fn print_distinct_values(values: &[String]) {
    info!(
        "Printing {} distinct container image names...",
        Colors::colorize(Colors::COUNT, &values.len().to_string())
    );
    print!("{}", render_distinct_values(values));
}

/// Pretty JSON with sorted keys and a one-space indent.
pub fn value_index_json(value_index: &ValueIndex) -> Result<Vec<u8>> {
    let sorted: BTreeMap<&String, &Vec<String>> = value_index.iter().collect();
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(
        &mut buf,
        PrettyFormatter::with_indent(OutputConsts::JSON_INDENT),
    );
    sorted
        .serialize(&mut ser)
        .context("serialize value index")?;
    Ok(buf)
}

/// Write the value → files mapping to `path` atomically. Any failure is fatal to the caller.
pub fn write_value_index(value_index: &ValueIndex, path: &Path) -> Result<()> {
    info!(
        "Writing container image to file mapping to {}...",
        path.display()
    );
    let bytes = value_index_json(value_index)?;
    write_atomic(path, &bytes)
        .with_context(|| format!("write output file {}", path.display()))?;
    info!(
        "Wrote {} container images to {}",
        value_index.len(),
        path.display()
    );
    Ok(())
}
