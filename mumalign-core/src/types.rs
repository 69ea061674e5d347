use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbol used for gaps in aligned segments. Never valid inside a `Sequence`.
pub const GAP: u8 = b'-';

const DNA_SYMBOLS: &[u8] = b"ACGTNRYKMSWBDHV";
const RNA_SYMBOLS: &[u8] = b"ACGUNRYKMSWBDHV";
const PROTEIN_SYMBOLS: &[u8] = b"ACDEFGHIKLMNPQRSTVWYBZXJUO*";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid symbol '{symbol}' at position {position} in sequence '{id}' ({alphabet} alphabet)")]
    InvalidSymbol {
        id: String,
        symbol: char,
        position: usize,
        alphabet: Alphabet,
    },

    #[error("Unknown alphabet: {0}")]
    UnknownAlphabet(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    Dna,
    Rna,
    Protein,
}

impl Alphabet {
    /// Upper-case symbols accepted by this alphabet, IUPAC ambiguity codes included.
    pub fn symbols(self) -> &'static [u8] {
        match self {
            Alphabet::Dna => DNA_SYMBOLS,
            Alphabet::Rna => RNA_SYMBOLS,
            Alphabet::Protein => PROTEIN_SYMBOLS,
        }
    }

    pub fn contains(self, symbol: u8) -> bool {
        self.symbols().contains(&symbol)
    }

    pub fn is_nucleotide(self) -> bool {
        matches!(self, Alphabet::Dna | Alphabet::Rna)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alphabet::Dna => "dna",
            Alphabet::Rna => "rna",
            Alphabet::Protein => "protein",
        };
        f.write_str(name)
    }
}

impl FromStr for Alphabet {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dna" => Ok(Alphabet::Dna),
            "rna" => Ok(Alphabet::Rna),
            "protein" | "aa" => Ok(Alphabet::Protein),
            other => Err(SequenceError::UnknownAlphabet(other.to_string())),
        }
    }
}

/// An immutable, validated run of symbols with a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    id: String,
    alphabet: Alphabet,
    symbols: Vec<u8>,
}

impl Sequence {
    /// Validate `symbols` against `alphabet`. Lower-case input is normalized to upper case.
    pub fn new(
        id: impl Into<String>,
        alphabet: Alphabet,
        symbols: impl AsRef<[u8]>,
    ) -> Result<Self, SequenceError> {
        let id = id.into();
        let mut normalized = symbols.as_ref().to_ascii_uppercase();

        for (position, &symbol) in normalized.iter().enumerate() {
            if !alphabet.contains(symbol) {
                return Err(SequenceError::InvalidSymbol {
                    id,
                    symbol: char::from(symbol),
                    position,
                    alphabet,
                });
            }
        }
        normalized.shrink_to_fit();

        Ok(Self {
            id,
            alphabet,
            symbols: normalized,
        })
    }

    pub fn dna(id: impl Into<String>, symbols: impl AsRef<[u8]>) -> Result<Self, SequenceError> {
        Self::new(id, Alphabet::Dna, symbols)
    }

    pub fn rna(id: impl Into<String>, symbols: impl AsRef<[u8]>) -> Result<Self, SequenceError> {
        Self::new(id, Alphabet::Rna, symbols)
    }

    pub fn protein(id: impl Into<String>, symbols: impl AsRef<[u8]>) -> Result<Self, SequenceError> {
        Self::new(id, Alphabet::Protein, symbols)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// One exact match between an indexed reference and a query.
///
/// Offsets are local to the reference identified by `reference_id` (its
/// position in the slice the index was built from) and to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    pub reference_id: usize,
    pub reference_start: usize,
    pub query_start: usize,
    pub length: usize,
    /// Rank among the seeds of one query when sorted along the reference.
    pub reference_order: usize,
    /// Rank among the seeds of one query when sorted along the query.
    pub query_order: usize,
}

impl Seed {
    pub fn new(reference_id: usize, reference_start: usize, query_start: usize, length: usize) -> Self {
        Self {
            reference_id,
            reference_start,
            query_start,
            length,
            reference_order: 0,
            query_order: 0,
        }
    }

    /// Exclusive end on the reference.
    pub fn reference_end(&self) -> usize {
        self.reference_start + self.length
    }

    /// Exclusive end on the query.
    pub fn query_end(&self) -> usize {
        self.query_start + self.length
    }

    pub fn diagonal(&self) -> isize {
        self.reference_start as isize - self.query_start as isize
    }
}

/// Assign `reference_order` and `query_order` ranks and leave `seeds` in
/// reference order.
pub fn assign_seed_orders(seeds: &mut [Seed]) {
    seeds.sort_by_key(|s| (s.query_start, s.reference_id, s.reference_start));
    for (rank, seed) in seeds.iter_mut().enumerate() {
        seed.query_order = rank;
    }

    seeds.sort_by_key(|s| (s.reference_id, s.reference_start, s.query_start));
    for (rank, seed) in seeds.iter_mut().enumerate() {
        seed.reference_order = rank;
    }
}

/// Collinear seeds from one reference, kept in reference-then-query order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub reference_id: usize,
    pub seeds: Vec<Seed>,
    /// Sum of seed lengths.
    pub score: usize,
}

impl Cluster {
    pub fn new(reference_id: usize, seeds: Vec<Seed>) -> Self {
        let score = seeds.iter().map(|s| s.length).sum();
        Self {
            reference_id,
            seeds,
            score,
        }
    }

    /// Half-open reference interval covered by the cluster.
    pub fn reference_span(&self) -> (usize, usize) {
        span(self.seeds.iter().map(|s| (s.reference_start, s.reference_end())))
    }

    /// Half-open query interval covered by the cluster.
    pub fn query_span(&self) -> (usize, usize) {
        span(self.seeds.iter().map(|s| (s.query_start, s.query_end())))
    }
}

fn span(intervals: impl Iterator<Item = (usize, usize)>) -> (usize, usize) {
    intervals
        .fold(None, |acc: Option<(usize, usize)>, (start, end)| match acc {
            None => Some((start, end)),
            Some((lo, hi)) => Some((lo.min(start), hi.max(end))),
        })
        .unwrap_or((0, 0))
}

/// One contiguous gapped alignment block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedSegment {
    /// Reference symbols with `-` for gaps.
    pub first: String,
    /// Query symbols with `-` for gaps.
    pub second: String,
    pub consensus: String,
    pub score: i32,
    pub first_offset: usize,
    pub second_offset: usize,
}

impl AlignedSegment {
    /// Exclusive end of the segment on the reference.
    pub fn first_end(&self) -> usize {
        self.first_offset + ungapped_len(&self.first)
    }

    /// Exclusive end of the segment on the query.
    pub fn second_end(&self) -> usize {
        self.second_offset + ungapped_len(&self.second)
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Fraction of columns where both rows carry the same symbol.
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let matches = self
            .first
            .bytes()
            .zip(self.second.bytes())
            .filter(|&(a, b)| a == b && a != GAP)
            .count();
        matches as f64 / self.len() as f64
    }
}

fn ungapped_len(row: &str) -> usize {
    row.bytes().filter(|&b| b != GAP).count()
}

/// Every aligned segment found for one (reference, query) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentResult<'a> {
    #[serde(serialize_with = "serialize_sequence_id")]
    pub reference: &'a Sequence,
    #[serde(serialize_with = "serialize_sequence_id")]
    pub query: &'a Sequence,
    pub reference_index: usize,
    pub query_index: usize,
    pub segments: Vec<AlignedSegment>,
}

impl AlignmentResult<'_> {
    pub fn total_score(&self) -> i64 {
        self.segments.iter().map(|s| i64::from(s.score)).sum()
    }
}

fn serialize_sequence_id<S: Serializer>(sequence: &&Sequence, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(sequence.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_normalizes_case() {
        let seq = Sequence::dna("chr1", "acgtN").unwrap();
        assert_eq!(seq.symbols(), b"ACGTN");
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.alphabet(), Alphabet::Dna);
    }

    #[test]
    fn test_sequence_rejects_foreign_symbols() {
        let err = Sequence::dna("chr1", "ACGU").unwrap_err();
        assert!(matches!(err, SequenceError::InvalidSymbol { symbol: 'U', position: 3, .. }));

        let err = Sequence::dna("gapped", "AC-GT").unwrap_err();
        assert!(matches!(err, SequenceError::InvalidSymbol { symbol: '-', .. }));

        assert!(Sequence::rna("r", "AUGCSWRYKMBVHDN").is_ok());
        assert!(Sequence::protein("p", "MKV*").is_ok());
    }

    #[test]
    fn test_alphabet_parsing() {
        assert_eq!("DNA".parse::<Alphabet>().unwrap(), Alphabet::Dna);
        assert_eq!("protein".parse::<Alphabet>().unwrap(), Alphabet::Protein);
        assert!("binary".parse::<Alphabet>().is_err());
        assert_eq!(Alphabet::Rna.to_string(), "rna");
    }

    #[test]
    fn test_seed_geometry() {
        let seed = Seed::new(0, 8, 3, 4);
        assert_eq!(seed.reference_end(), 12);
        assert_eq!(seed.query_end(), 7);
        assert_eq!(seed.diagonal(), 5);
    }

    #[test]
    fn test_assign_seed_orders() {
        let mut seeds = vec![Seed::new(0, 8, 3, 4), Seed::new(0, 2, 5, 4), Seed::new(0, 8, 1, 5)];
        assign_seed_orders(&mut seeds);

        let starts: Vec<_> = seeds.iter().map(|s| (s.reference_start, s.query_start)).collect();
        assert_eq!(starts, vec![(2, 5), (8, 1), (8, 3)]);
        let ref_orders: Vec<_> = seeds.iter().map(|s| s.reference_order).collect();
        assert_eq!(ref_orders, vec![0, 1, 2]);
        let query_orders: Vec<_> = seeds.iter().map(|s| s.query_order).collect();
        assert_eq!(query_orders, vec![2, 0, 1]);
    }

    #[test]
    fn test_cluster_spans() {
        let cluster = Cluster::new(0, vec![Seed::new(0, 3, 1, 3), Seed::new(0, 8, 6, 5)]);
        assert_eq!(cluster.score, 8);
        assert_eq!(cluster.reference_span(), (3, 13));
        assert_eq!(cluster.query_span(), (1, 11));
    }

    #[test]
    fn test_segment_ends_skip_gaps() {
        let segment = AlignedSegment {
            first: "AC-GT".to_string(),
            second: "ACTG-".to_string(),
            consensus: "ACTGT".to_string(),
            score: 0,
            first_offset: 10,
            second_offset: 2,
        };
        assert_eq!(segment.first_end(), 14);
        assert_eq!(segment.second_end(), 6);
        assert!((segment.identity() - 0.6).abs() < 1e-9);
    }
}
