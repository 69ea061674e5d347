//! Clustering module for MumAlign
//!
//! Groups seeds into collinear clusters. Seeds are first filtered for
//! same-diagonal duplicates and heavy overlaps, then joined into connected
//! components of the compatibility graph, and finally each component is
//! split into best-scoring chains by dynamic programming.

use crate::types::{assign_seed_orders, Cluster, Seed};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

pub type ClusterResult<T> = Result<T, ClusterError>;

/// Parameters for cluster construction
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Minimum sum of seed lengths for a cluster to be emitted
    pub minimum_score: usize,
    /// Diagonal drift allowed regardless of distance
    pub fixed_separation: usize,
    /// Largest gap allowed between two consecutive seeds
    pub maximum_separation: usize,
    /// Extra diagonal drift allowed per symbol of gap
    pub separation_factor: f32,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            minimum_score: 200,
            fixed_separation: 5,
            maximum_separation: 1000,
            separation_factor: 0.05,
        }
    }
}

impl ClusterParams {
    pub fn validate(&self) -> ClusterResult<()> {
        if !self.separation_factor.is_finite() || self.separation_factor < 0.0 {
            return Err(ClusterError::InvalidParams(format!(
                "separation factor must be a non-negative number, got {}",
                self.separation_factor
            )));
        }
        Ok(())
    }
}

pub struct ClusterBuilder {
    params: ClusterParams,
}

impl ClusterBuilder {
    pub fn new(params: ClusterParams) -> ClusterResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Partition `seeds` into clusters ordered by their first reference position.
    pub fn build_clusters(&self, seeds: &[Seed]) -> Vec<Cluster> {
        if seeds.is_empty() {
            return Vec::new();
        }

        // merged seeds change length, so ranks are recomputed over the survivors
        let mut filtered = filter_seeds(seeds);
        assign_seed_orders(&mut filtered);

        let mut clusters = Vec::new();
        for component in self.components(&filtered) {
            self.split_component(&filtered, component, &mut clusters);
        }

        clusters.sort_by_key(|c| {
            c.seeds
                .first()
                .map(|s| (s.reference_id, s.reference_start, s.query_start))
        });

        log::debug!(
            "Built {} clusters from {} seeds ({} after filtering)",
            clusters.len(),
            seeds.len(),
            filtered.len()
        );
        clusters
    }

    /// Whether `later` may follow `earlier` inside one cluster.
    ///
    /// Overlap is tolerated; crossing and containment are not.
    pub fn compatible(&self, earlier: &Seed, later: &Seed) -> bool {
        if earlier.reference_id != later.reference_id
            || later.reference_start <= earlier.reference_start
            || later.query_start <= earlier.query_start
            || later.reference_end() <= earlier.reference_end()
            || later.query_end() <= earlier.query_end()
        {
            return false;
        }

        let gap = gap_between(earlier, later);
        if gap > self.params.maximum_separation {
            return false;
        }

        let drift = later.diagonal().abs_diff(earlier.diagonal()) as f64;
        let tolerance =
            self.params.fixed_separation as f64 + f64::from(self.params.separation_factor) * gap as f64;
        drift <= tolerance
    }

    /// Connected components of the compatibility graph, as index lists into `seeds`.
    fn components(&self, seeds: &[Seed]) -> Vec<Vec<usize>> {
        let mut sets = DisjointSets::new(seeds.len());

        for i in 0..seeds.len() {
            for j in i + 1..seeds.len() {
                let (a, b) = (&seeds[i], &seeds[j]);
                if b.reference_id != a.reference_id {
                    break;
                }
                if b.reference_start.saturating_sub(a.reference_end()) > self.params.maximum_separation {
                    // reference starts only grow from here on
                    break;
                }
                if self.compatible(a, b) {
                    sets.union(i, j);
                }
            }
        }

        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut slot_of_root = vec![usize::MAX; seeds.len()];
        for i in 0..seeds.len() {
            let root = sets.find(i);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[slot_of_root[root]].push(i);
        }
        groups
    }

    /// Repeatedly take the best chain out of one component until it is empty.
    fn split_component(&self, seeds: &[Seed], mut remaining: Vec<usize>, out: &mut Vec<Cluster>) {
        while !remaining.is_empty() {
            let n = remaining.len();
            let mut score: Vec<usize> = remaining.iter().map(|&i| seeds[i].length).collect();
            let mut parent: Vec<Option<usize>> = vec![None; n];

            for i in 1..n {
                let current = &seeds[remaining[i]];
                for j in 0..i {
                    if !self.compatible(&seeds[remaining[j]], current) {
                        continue;
                    }
                    let candidate = score[j] + current.length;
                    if candidate > score[i] {
                        score[i] = candidate;
                        parent[i] = Some(j);
                    }
                }
            }

            let best = (0..n)
                .max_by(|&a, &b| score[a].cmp(&score[b]).then_with(|| b.cmp(&a)))
                .unwrap_or(0);

            let mut members = Vec::new();
            let mut current = Some(best);
            while let Some(idx) = current {
                members.push(idx);
                current = parent[idx];
            }
            members.reverse();

            if score[best] >= self.params.minimum_score {
                let chain: Vec<Seed> = members.iter().map(|&m| seeds[remaining[m]]).collect();
                out.push(Cluster::new(chain[0].reference_id, chain));
            }

            let mut taken = vec![false; n];
            for &m in &members {
                taken[m] = true;
            }
            remaining = remaining
                .into_iter()
                .enumerate()
                .filter_map(|(pos, idx)| (!taken[pos]).then_some(idx))
                .collect();
        }
    }
}

/// Gap between two seeds on the wider axis, zero when they overlap.
fn gap_between(earlier: &Seed, later: &Seed) -> usize {
    let on_reference = later.reference_start.saturating_sub(earlier.reference_end());
    let on_query = later.query_start.saturating_sub(earlier.query_end());
    on_reference.max(on_query)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    seed: Seed,
    good: bool,
    tentative: bool,
}

/// Drop seeds that cannot start a useful cluster.
///
/// Working in query order, a seed on the same diagonal as an earlier seed
/// it touches is absorbed into that seed (which grows to cover it). Seeds
/// that share a reference or query start with an earlier seed and overlap
/// it by at least half of the shorter one lose to the longer seed; equal
/// lengths mark the later seed tentative and drop an already-tentative
/// earlier one.
fn filter_seeds(seeds: &[Seed]) -> Vec<Seed> {
    let mut candidates: Vec<Candidate> = seeds
        .iter()
        .map(|&seed| Candidate {
            seed,
            good: true,
            tentative: false,
        })
        .collect();
    candidates.sort_by_key(|c| (c.seed.reference_id, c.seed.query_start, c.seed.reference_start));

    for i in 0..candidates.len() {
        if !candidates[i].good {
            continue;
        }
        let mut end = candidates[i].seed.query_end();

        let mut j = i + 1;
        while j < candidates.len() && candidates[j].seed.query_start <= end {
            let (first, second) = (candidates[i].seed, candidates[j].seed);
            if !candidates[j].good || first.reference_id != second.reference_id {
                j += 1;
                continue;
            }

            if first.diagonal() == second.diagonal() {
                let extent = second.query_end() - first.query_start;
                if extent > first.length {
                    candidates[i].seed.length = extent;
                    end = first.query_start + extent;
                }
                candidates[j].good = false;
            } else if first.reference_start == second.reference_start || first.query_start == second.query_start {
                let overlap = if first.reference_start == second.reference_start {
                    first.query_end() as isize - second.query_start as isize
                } else {
                    first.reference_end() as isize - second.reference_start as isize
                };

                match first.length.cmp(&second.length) {
                    Ordering::Less => {
                        if overlap >= (first.length / 2) as isize {
                            candidates[i].good = false;
                            break;
                        }
                    }
                    Ordering::Greater => {
                        if overlap >= (second.length / 2) as isize {
                            candidates[j].good = false;
                        }
                    }
                    Ordering::Equal => {
                        if overlap >= (first.length / 2) as isize {
                            candidates[j].tentative = true;
                            if candidates[i].tentative {
                                candidates[i].good = false;
                                break;
                            }
                        }
                    }
                }
            }
            j += 1;
        }
    }

    candidates.into_iter().filter(|c| c.good).map(|c| c.seed).collect()
}

/// Union-find with path halving and union by size.
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}
