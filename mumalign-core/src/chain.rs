//! Chain extraction for MumAlign
//!
//! Selects the best collinear subsequence of seeds (a longest increasing
//! subsequence in both coordinates, weighted by covered symbols) and trims
//! the overlaps between neighbouring seeds of the selected chain.

use crate::types::Seed;
use std::cmp::Ordering;

/// Decides between two seeds that reach the same chain score.
#[derive(Debug, Clone, Copy, Default)]
pub enum TieBreak {
    /// Keep the seed with the larger length; earlier seeds win exact ties.
    #[default]
    LongerSeed,
    /// Keep whichever seed was considered first.
    FirstSeen,
    /// `Ordering::Greater` means the candidate (first argument) replaces the incumbent.
    Custom(fn(&Seed, &Seed) -> Ordering),
}

impl TieBreak {
    fn prefers(&self, candidate: &Seed, incumbent: &Seed) -> bool {
        let ordering = match self {
            TieBreak::LongerSeed => candidate.length.cmp(&incumbent.length),
            TieBreak::FirstSeen => Ordering::Less,
            TieBreak::Custom(compare) => compare(candidate, incumbent),
        };
        ordering == Ordering::Greater
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChainExtractor {
    tie_break: TieBreak,
}

impl ChainExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Best-scoring chain of `seeds`, trimmed so that no two output seeds
    /// share a reference or query position, in increasing reference order.
    ///
    /// A seed may follow another only if it starts strictly later and ends
    /// strictly later on both axes. Its contribution is its length minus the
    /// overlap with its predecessor, and the same overlap is trimmed from
    /// its start once the chain is fixed.
    pub fn extract(&self, seeds: &[Seed]) -> Vec<Seed> {
        if seeds.is_empty() {
            return Vec::new();
        }

        let mut sorted = seeds.to_vec();
        sorted.sort_by_key(|s| (s.reference_id, s.reference_start, s.query_start));
        let n = sorted.len();

        let mut score: Vec<usize> = sorted.iter().map(|s| s.length).collect();
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut trim = vec![0usize; n];

        for i in 1..n {
            let current = sorted[i];
            for j in 0..i {
                let prev = &sorted[j];
                if !can_precede(prev, &current) {
                    continue;
                }

                let overlap = overlap(prev, &current);
                let candidate = score[j] + current.length - overlap;
                let better = match candidate.cmp(&score[i]) {
                    Ordering::Greater => true,
                    Ordering::Equal => match parent[i] {
                        Some(p) => self.tie_break.prefers(prev, &sorted[p]),
                        None => false,
                    },
                    Ordering::Less => false,
                };

                if better {
                    score[i] = candidate;
                    parent[i] = Some(j);
                    trim[i] = overlap;
                }
            }
        }

        let mut best = 0;
        for i in 1..n {
            let replace = match score[i].cmp(&score[best]) {
                Ordering::Greater => true,
                Ordering::Equal => self.tie_break.prefers(&sorted[i], &sorted[best]),
                Ordering::Less => false,
            };
            if replace {
                best = i;
            }
        }

        let mut chain = Vec::new();
        let mut current = Some(best);
        while let Some(idx) = current {
            let mut seed = sorted[idx];
            let cut = trim[idx];
            if cut < seed.length {
                seed.reference_start += cut;
                seed.query_start += cut;
                seed.length -= cut;
                chain.push(seed);
            }
            current = parent[idx];
        }
        chain.reverse();

        log::debug!(
            "Extracted chain of {} seeds from {} (score {})",
            chain.len(),
            n,
            score[best]
        );
        chain
    }
}

fn can_precede(prev: &Seed, next: &Seed) -> bool {
    prev.reference_id == next.reference_id
        && prev.reference_start < next.reference_start
        && prev.query_start < next.query_start
        && prev.reference_end() < next.reference_end()
        && prev.query_end() < next.query_end()
}

/// Symbols `next` shares with `prev` on the more overlapped axis.
fn overlap(prev: &Seed, next: &Seed) -> usize {
    let on_reference = prev.reference_end().saturating_sub(next.reference_start);
    let on_query = prev.query_end().saturating_sub(next.query_start);
    on_reference.max(on_query)
}
