//! FASTA/FASTQ loading
//!
//! Reads plain or compressed files with needletail and turns every record
//! into a validated [`Sequence`] of the requested alphabet.

use anyhow::{anyhow, Context, Result};
use mumalign_core::{Alphabet, Sequence};
use needletail::{parse_fastx_file, parse_fastx_reader};
use std::path::Path;

/// Parse every record of a FASTA/FASTQ file (gzip and friends are detected automatically).
pub fn read_sequences<P: AsRef<Path>>(path: P, alphabet: Alphabet) -> Result<Vec<Sequence>> {
    let path = path.as_ref();
    let mut reader = parse_fastx_file(path)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Failed to open sequence file: {}", path.display()))?;

    let mut sequences = Vec::new();
    while let Some(record) = reader.next() {
        let record = record
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Failed to parse record in {}", path.display()))?;
        sequences.push(record_to_sequence(&record, alphabet)?);
    }

    if sequences.is_empty() {
        return Err(anyhow!("No sequences found in {}", path.display()));
    }
    log::info!(
        "Loaded {} sequences ({} symbols) from {}",
        sequences.len(),
        sequences.iter().map(Sequence::len).sum::<usize>(),
        path.display()
    );
    Ok(sequences)
}

/// Parse FASTA/FASTQ data from any readable source.
pub fn parse_reader<R: std::io::Read + Send>(reader: R, alphabet: Alphabet) -> Result<Vec<Sequence>> {
    let mut fastx_reader = parse_fastx_reader(reader).map_err(|e| anyhow!("{}", e))?;

    let mut sequences = Vec::new();
    while let Some(record) = fastx_reader.next() {
        let record = record.map_err(|e| anyhow!("{}", e))?;
        sequences.push(record_to_sequence(&record, alphabet)?);
    }
    Ok(sequences)
}

/// The record id up to the first whitespace names the sequence.
fn record_to_sequence(record: &needletail::parser::SequenceRecord, alphabet: Alphabet) -> Result<Sequence> {
    let header = String::from_utf8_lossy(record.id());
    let id = header.split_whitespace().next().unwrap_or_default().to_string();
    let sequence = Sequence::new(id, alphabet, record.seq())?;
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reader() {
        let data = b">chr1 first contig\nACGTac\ngtNN\n>chr2\nTTTT\n";
        let sequences = parse_reader(&data[..], Alphabet::Dna).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].id(), "chr1");
        assert_eq!(sequences[0].symbols(), b"ACGTACGTNN");
        assert_eq!(sequences[1].len(), 4);
    }

    #[test]
    fn test_foreign_symbols_are_rejected() {
        let data = b">p1\nMKVLA\n";
        assert!(parse_reader(&data[..], Alphabet::Dna).is_err());
        assert!(parse_reader(&data[..], Alphabet::Protein).is_ok());
    }
}
