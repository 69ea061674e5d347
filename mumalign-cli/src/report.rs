//! Text and JSON output
//!
//! Coordinates in text output are 1-based and inclusive, the convention of
//! the MUMmer tool family. JSON output carries the 0-based offsets of the
//! library types unchanged.

use anyhow::{Context, Result};
use mumalign_core::{AlignmentResult, Seed, Sequence};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One line per seed: reference id, reference start, query id, query start, length.
pub fn write_seeds<W: Write>(
    out: &mut W,
    references: &[Sequence],
    query: &Sequence,
    seeds: &[Seed],
) -> Result<()> {
    for seed in seeds {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            references[seed.reference_id].id(),
            seed.reference_start + 1,
            query.id(),
            seed.query_start + 1,
            seed.length
        )?;
    }
    Ok(())
}

/// Coordinate table with one row per aligned segment.
pub fn write_coords<W: Write>(out: &mut W, results: &[AlignmentResult<'_>]) -> Result<()> {
    writeln!(out, "[S1]\t[E1]\t[S2]\t[E2]\t[LEN 1]\t[LEN 2]\t[% IDY]\t[SCORE]\t[REF]\t[QUERY]")?;
    for result in results {
        for segment in &result.segments {
            let len1 = segment.first_end() - segment.first_offset;
            let len2 = segment.second_end() - segment.second_offset;
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{}\t{}\t{}",
                segment.first_offset + 1,
                segment.first_end(),
                segment.second_offset + 1,
                segment.second_end(),
                len1,
                len2,
                segment.identity() * 100.0,
                segment.score,
                result.reference.id(),
                result.query.id()
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'r, 'a> {
    version: &'static str,
    preset: &'r str,
    mode: &'r str,
    results: &'r [AlignmentResult<'a>],
}

pub fn write_json(path: &Path, preset: &str, mode: &str, results: &[AlignmentResult<'_>]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let report = JsonReport {
        version: mumalign_core::VERSION,
        preset,
        mode,
        results,
    };
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &report)
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    Ok(())
}
