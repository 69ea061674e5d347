//! MUM seeding for MumAlign
//!
//! Finds maximal exact matches between an indexed reference set and each
//! query. In the default mode only matches that are unique in the reference
//! qualify (MUMs); `MatchMode::Maximal` drops the uniqueness requirement.

use crate::chain::ChainExtractor;
use crate::index::{IndexError, SequenceIndex};
use crate::types::{assign_seed_orders, Seed, Sequence};
use rayon::prelude::*;

#[cfg(test)]
mod tests;

/// Result type for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Which maximal matches qualify as seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Matches occurring exactly once in the reference set.
    #[default]
    Unique,
    /// Every maximal match, reported at its leftmost reference occurrence.
    Maximal,
}

#[derive(Debug, Clone)]
pub struct SeedParams {
    /// Minimum seed length (k)
    pub min_mum_length: usize,
    pub mode: MatchMode,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            min_mum_length: 20,
            mode: MatchMode::Unique,
        }
    }
}

impl SeedParams {
    pub fn validate(&self) -> SeedResult<()> {
        if self.min_mum_length == 0 {
            return Err(SeedError::InvalidParams(
                "minimum MUM length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn maximum_match_enabled(&self) -> bool {
        self.mode == MatchMode::Maximal
    }
}

#[derive(Debug, Clone)]
pub struct MatchSeeder {
    params: SeedParams,
    extractor: ChainExtractor,
}

impl MatchSeeder {
    pub fn new(params: SeedParams) -> SeedResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            extractor: ChainExtractor::new(),
        })
    }

    /// Use `extractor` for [`MatchSeeder::align_with_chain`].
    pub fn with_extractor(mut self, extractor: ChainExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn params(&self) -> &SeedParams {
        &self.params
    }

    /// Raw seeds of `query` against `index`, ranked and sorted by reference position.
    pub fn find_seeds(&self, index: &SequenceIndex, query: &Sequence) -> SeedResult<Vec<Seed>> {
        let mut seeds = match self.params.mode {
            MatchMode::Unique => index.find_matches(query, self.params.min_mum_length)?,
            MatchMode::Maximal => index.find_maximal_matches(query, self.params.min_mum_length)?,
        };
        assign_seed_orders(&mut seeds);

        log::debug!(
            "Found {} seeds for query '{}' (k={}, mode={:?})",
            seeds.len(),
            query.id(),
            self.params.min_mum_length,
            self.params.mode
        );
        Ok(seeds)
    }

    /// Final seed set per query: the raw seeds reduced to their best
    /// increasing chain on each reference. Output is in query order.
    pub fn align_with_chain(&self, index: &SequenceIndex, queries: &[Sequence]) -> SeedResult<Vec<Vec<Seed>>> {
        queries
            .par_iter()
            .map(|query| {
                let seeds = self.find_seeds(index, query)?;
                Ok(self.chain_per_reference(&seeds))
            })
            .collect()
    }

    fn chain_per_reference(&self, seeds: &[Seed]) -> Vec<Seed> {
        // seeds arrive sorted by reference id
        seeds
            .chunk_by(|a, b| a.reference_id == b.reference_id)
            .flat_map(|group| self.extractor.extract(group))
            .collect()
    }
}
