//! Inspect command implementation

use anyhow::{Context, Result};
use quire_core::package::MIMETYPE_CONTENT;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::{CompressionMethod, ZipArchive};

const MIMETYPE_ENTRY: &str = "mimetype";

/// Archive inspection output
#[derive(Serialize)]
struct ArchiveReport {
    entries: Vec<EntryInfo>,
    mimetype_first: bool,
    mimetype_stored: bool,
    mimetype_valid: bool,
}

#[derive(Serialize)]
struct EntryInfo {
    name: String,
    compression: String,
    size: u64,
    compressed_size: u64,
}

/// List the entries of an EPUB archive and check its mimetype entry
pub fn inspect(input: &str, json: bool) -> Result<()> {
    let input_path = Path::new(input);

    let file =
        File::open(input_path).with_context(|| format!("Failed to open input file: {}", input))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("Failed to read archive {}", input))?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read entry {} of {}", i, input))?;
        entries.push(EntryInfo {
            name: entry.name().to_string(),
            compression: format!("{:?}", entry.compression()),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
        });
    }

    let mimetype_first = entries.first().is_some_and(|e| e.name == MIMETYPE_ENTRY);
    let mut mimetype_stored = false;
    let mut mimetype_valid = false;
    if let Ok(mut entry) = archive.by_name(MIMETYPE_ENTRY) {
        mimetype_stored = entry.compression() == CompressionMethod::Stored;
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .context("Failed to read mimetype entry")?;
        mimetype_valid = content == MIMETYPE_CONTENT;
    }

    let report = ArchiveReport {
        entries,
        mimetype_first,
        mimetype_stored,
        mimetype_valid,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.entries {
            println!(
                "{:<48} {:<10} {:>10} {:>10}",
                entry.name, entry.compression, entry.size, entry.compressed_size
            );
        }
        println!();
        println!("Entries:         {}", report.entries.len());
        println!("Mimetype first:  {}", yes_no(report.mimetype_first));
        println!("Mimetype stored: {}", yes_no(report.mimetype_stored));
        println!("Mimetype valid:  {}", yes_no(report.mimetype_valid));
    }

    if !(report.mimetype_first && report.mimetype_stored) {
        tracing::warn!("{} does not start with a stored mimetype entry", input);
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
