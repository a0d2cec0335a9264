use crate::data::Dataset;
use anyhow::{Context, Result};
use std::io::{self, Read};

/// Read a CSV document (header row required) into a dataset.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(String::from)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        anyhow::bail!("CSV must have a header row");
    }

    let mut records = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse CSV record {}", idx + 1))?;
        records.push(record.iter().map(String::from).collect());
    }

    Dataset::from_records(headers, records)
}

pub fn read_csv_from_stdin() -> Result<Dataset> {
    read_csv(io::stdin().lock())
}
