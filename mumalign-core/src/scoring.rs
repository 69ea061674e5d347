//! Substitution scores, gap costs and consensus symbols.
//!
//! Anchors, gap fills and pure insertions/deletions are all scored through
//! [`ScoringScheme`], so every segment of an alignment uses the same rules.

use crate::types::{Alphabet, GAP};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Gap penalties must not be positive: {0:?}")]
    PositiveGapPenalty(GapCost),

    #[error("Opening a gap must cost at least as much as extending it: {0:?}")]
    CheapGapOpen(GapCost),
}

pub type ScoringResult<T> = Result<T, ScoringError>;

/// Symbol-by-symbol substitution scores over byte symbols.
#[derive(Clone, PartialEq, Eq)]
pub struct SimilarityMatrix {
    table: Vec<i32>,
}

impl SimilarityMatrix {
    /// Every identical pair scores `match_score`, every other pair `mismatch_score`.
    pub fn diagonal(match_score: i32, mismatch_score: i32) -> Self {
        let mut table = vec![mismatch_score; 256 * 256];
        for symbol in 0..256 {
            table[symbol * 256 + symbol] = match_score;
        }
        Self { table }
    }

    /// Override the score of one pair, in both orders.
    pub fn with_score(mut self, a: u8, b: u8, score: i32) -> Self {
        self.table[usize::from(a) * 256 + usize::from(b)] = score;
        self.table[usize::from(b) * 256 + usize::from(a)] = score;
        self
    }

    pub fn score(&self, a: u8, b: u8) -> i32 {
        self.table[usize::from(a) * 256 + usize::from(b)]
    }
}

impl Default for SimilarityMatrix {
    fn default() -> Self {
        Self::diagonal(5, -4)
    }
}

impl std::fmt::Debug for SimilarityMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityMatrix")
            .field("A/A", &self.score(b'A', b'A'))
            .field("A/C", &self.score(b'A', b'C'))
            .finish_non_exhaustive()
    }
}

/// Cost model for runs of gap columns. Penalties are zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum GapCost {
    /// Every gap column costs `penalty`.
    Linear { penalty: i32 },
    /// The first column of a run costs `open`, each further column `extend`.
    Affine { open: i32, extend: i32 },
}

impl Default for GapCost {
    fn default() -> Self {
        GapCost::Affine { open: -13, extend: -8 }
    }
}

impl GapCost {
    pub fn validate(&self) -> ScoringResult<()> {
        let positive = match *self {
            GapCost::Linear { penalty } => penalty > 0,
            GapCost::Affine { open, extend } => open > 0 || extend > 0,
        };
        if positive {
            return Err(ScoringError::PositiveGapPenalty(*self));
        }
        if let GapCost::Affine { open, extend } = *self {
            if open > extend {
                return Err(ScoringError::CheapGapOpen(*self));
            }
        }
        Ok(())
    }

    /// Score of one run of `len` gap columns.
    pub fn run_score(&self, len: usize) -> i32 {
        if len == 0 {
            return 0;
        }
        let len = len as i32;
        match *self {
            GapCost::Linear { penalty } => len * penalty,
            GapCost::Affine { open, extend } => open + (len - 1) * extend,
        }
    }

    /// `(gap_open, gap_extend)` for aligners that charge `open + len * extend`.
    pub fn open_extend(&self) -> (i32, i32) {
        match *self {
            GapCost::Linear { penalty } => (0, penalty),
            GapCost::Affine { open, extend } => (open - extend, extend),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringScheme {
    pub matrix: SimilarityMatrix,
    pub gap_cost: GapCost,
}

impl ScoringScheme {
    pub fn new(matrix: SimilarityMatrix, gap_cost: GapCost) -> ScoringResult<Self> {
        gap_cost.validate()?;
        Ok(Self { matrix, gap_cost })
    }

    /// Score two gapped rows of equal length column by column.
    pub fn score_columns(&self, first: &[u8], second: &[u8]) -> i32 {
        let mut total = 0;
        let mut run: Option<(bool, usize)> = None;

        for (&a, &b) in first.iter().zip(second) {
            let gap_in_first = match (a == GAP, b == GAP) {
                (false, false) => {
                    if let Some((_, len)) = run.take() {
                        total += self.gap_cost.run_score(len);
                    }
                    total += self.matrix.score(a, b);
                    continue;
                }
                (true, _) => true,
                (false, true) => false,
            };

            run = match run {
                Some((side, len)) if side == gap_in_first => Some((side, len + 1)),
                Some((_, len)) => {
                    total += self.gap_cost.run_score(len);
                    Some((gap_in_first, 1))
                }
                None => Some((gap_in_first, 1)),
            };
        }

        if let Some((_, len)) = run {
            total += self.gap_cost.run_score(len);
        }
        total
    }
}

const IUPAC_BY_MASK: [u8; 16] = [
    b'N', b'A', b'C', b'M', b'G', b'R', b'S', b'V', b'T', b'W', b'Y', b'H', b'K', b'D', b'B', b'N',
];

fn base_mask(symbol: u8) -> u8 {
    match symbol {
        b'A' => 0b0001,
        b'C' => 0b0010,
        b'G' => 0b0100,
        b'T' | b'U' => 0b1000,
        b'M' => 0b0011,
        b'R' => 0b0101,
        b'W' => 0b1001,
        b'S' => 0b0110,
        b'Y' => 0b1010,
        b'K' => 0b1100,
        b'V' => 0b0111,
        b'H' => 0b1011,
        b'D' => 0b1101,
        b'B' => 0b1110,
        _ => 0b1111,
    }
}

/// Symbol standing for one alignment column.
pub fn consensus_symbol(alphabet: Alphabet, a: u8, b: u8) -> u8 {
    if a == b {
        return a;
    }
    if a == GAP {
        return b;
    }
    if b == GAP {
        return a;
    }

    match alphabet {
        Alphabet::Protein => b'X',
        Alphabet::Dna | Alphabet::Rna => {
            let code = IUPAC_BY_MASK[usize::from(base_mask(a) | base_mask(b))];
            if code == b'T' && alphabet == Alphabet::Rna {
                b'U'
            } else {
                code
            }
        }
    }
}

/// Consensus row for two gapped rows of equal length.
pub fn consensus(alphabet: Alphabet, first: &[u8], second: &[u8]) -> Vec<u8> {
    first
        .iter()
        .zip(second)
        .map(|(&a, &b)| consensus_symbol(alphabet, a, b))
        .collect()
}
