//! Pairwise alignment of the windows between anchors
//!
//! The assembler only needs one operation from a DP aligner: align two
//! short windows under a scoring scheme. [`GapAligner`] is that seam;
//! [`DpGapAligner`] implements it with `bio`'s pairwise aligner.

use crate::scoring::ScoringScheme;
use crate::types::GAP;
use bio::alignment::pairwise::{Aligner, Scoring};
use bio::alignment::AlignmentOperation;
use std::ops::Range;

/// Which window ends are pinned to the neighbouring anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapMode {
    /// Both windows are consumed end to end.
    Global,
    /// The alignment must end at the end of both windows but may start anywhere.
    OpenStart,
    /// The alignment must start at the start of both windows but may stop anywhere.
    OpenEnd,
}

/// Gapped rows covering `reference_range` and `query_range` of the windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapFill {
    pub first: Vec<u8>,
    pub second: Vec<u8>,
    pub reference_range: Range<usize>,
    pub query_range: Range<usize>,
}

impl GapFill {
    /// Fill where one window is aligned entirely against gaps.
    pub fn indel(reference: &[u8], query: &[u8]) -> Self {
        let mut first = reference.to_vec();
        first.extend(std::iter::repeat(GAP).take(query.len()));
        let mut second: Vec<u8> = std::iter::repeat(GAP).take(reference.len()).collect();
        second.extend_from_slice(query);

        Self {
            first,
            second,
            reference_range: 0..reference.len(),
            query_range: 0..query.len(),
        }
    }

    /// Fill that covers nothing, anchored at the given window positions.
    pub fn empty_at(reference_pos: usize, query_pos: usize) -> Self {
        Self {
            first: Vec::new(),
            second: Vec::new(),
            reference_range: reference_pos..reference_pos,
            query_range: query_pos..query_pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Append a fill that starts where this one ends.
    pub fn append(&mut self, next: GapFill) {
        self.first.extend(next.first);
        self.second.extend(next.second);
        self.reference_range.end += next.reference_range.len();
        self.query_range.end += next.query_range.len();
    }
}

pub trait GapAligner: Send + Sync {
    fn align_gap(&self, reference: &[u8], query: &[u8], mode: GapMode, scoring: &ScoringScheme) -> GapFill;

    fn name(&self) -> &'static str;
}

/// Needleman-Wunsch style DP with linear or affine gaps via `bio`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DpGapAligner;

impl GapAligner for DpGapAligner {
    fn align_gap(&self, reference: &[u8], query: &[u8], mode: GapMode, scoring: &ScoringScheme) -> GapFill {
        if reference.is_empty() || query.is_empty() {
            return match mode {
                GapMode::Global => GapFill::indel(reference, query),
                GapMode::OpenStart => GapFill::empty_at(reference.len(), query.len()),
                GapMode::OpenEnd => GapFill::empty_at(0, 0),
            };
        }

        let (gap_open, gap_extend) = scoring.gap_cost.open_extend();
        let matrix = &scoring.matrix;
        let score = |a: u8, b: u8| matrix.score(a, b);

        let base = Scoring::new(gap_open, gap_extend, score);
        let clipping = match mode {
            GapMode::Global => base,
            GapMode::OpenStart => base.xclip_prefix(0).yclip_prefix(0),
            GapMode::OpenEnd => base.xclip_suffix(0).yclip_suffix(0),
        };

        let mut aligner = Aligner::with_capacity_and_scoring(reference.len(), query.len(), clipping);
        let alignment = match mode {
            GapMode::Global => aligner.global(reference, query),
            GapMode::OpenStart | GapMode::OpenEnd => aligner.custom(reference, query),
        };

        let mut first = Vec::with_capacity(alignment.operations.len());
        let mut second = Vec::with_capacity(alignment.operations.len());
        let (mut x, mut y) = (alignment.xstart, alignment.ystart);
        for op in &alignment.operations {
            match op {
                AlignmentOperation::Match | AlignmentOperation::Subst => {
                    first.push(reference[x]);
                    second.push(query[y]);
                    x += 1;
                    y += 1;
                }
                AlignmentOperation::Ins => {
                    first.push(reference[x]);
                    second.push(GAP);
                    x += 1;
                }
                AlignmentOperation::Del => {
                    first.push(GAP);
                    second.push(query[y]);
                    y += 1;
                }
                AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {}
            }
        }

        GapFill {
            first,
            second,
            reference_range: alignment.xstart..x,
            query_range: alignment.ystart..y,
        }
    }

    fn name(&self) -> &'static str {
        "bio-pairwise"
    }
}
