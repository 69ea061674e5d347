//! Alignment assembly for MumAlign
//!
//! Runs the whole pipeline for a reference set and a query set:
//! index the references, seed every query, group seeds into clusters (NUCmer
//! mode) or chain them directly (MUMmer mode), then close the gaps around
//! and between anchors with a pairwise aligner.

use crate::chain::{ChainExtractor, TieBreak};
use crate::cluster::{ClusterBuilder, ClusterParams};
use crate::gap_align::{DpGapAligner, GapAligner, GapFill, GapMode};
use crate::index::{IndexError, SequenceIndex};
use crate::scoring::{consensus, GapCost, ScoringScheme, SimilarityMatrix};
use crate::seed::{MatchMode, MatchSeeder, SeedError, SeedParams};
use crate::types::{AlignedSegment, Alphabet, AlignmentResult, Seed, Sequence};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Alphabet mismatch: references are {reference} but query '{id}' is {query}")]
    AlphabetMismatch {
        reference: Alphabet,
        query: Alphabet,
        id: String,
    },

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

pub type AlignResult<T> = Result<T, AlignError>;

/// How seeds become anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMode {
    /// One chain over all seeds of a pair, globally aligned to the sequence ends.
    Mummer,
    /// Clusters chained separately and emitted as one segment per collinear group.
    #[default]
    Nucmer,
}

#[derive(Debug, Clone)]
pub struct AlignParams {
    pub preset: String,
    pub mode: AlignMode,
    pub seed: SeedParams,
    pub cluster: ClusterParams,
    pub scoring: ScoringScheme,
    /// Largest gap bridged between neighbouring clusters, and the reach of
    /// flank extension past the outermost anchors.
    pub break_length: usize,
    /// Longest window side handed to the DP aligner in one piece. Larger
    /// gaps are aligned next to their anchors and joined by a plain indel.
    pub max_gap_fill: usize,
    pub tie_break: TieBreak,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self::nucmer()
    }
}

impl AlignParams {
    pub fn nucmer() -> Self {
        Self {
            preset: "nucmer".to_string(),
            mode: AlignMode::Nucmer,
            seed: SeedParams::default(),
            cluster: ClusterParams::default(),
            scoring: ScoringScheme {
                matrix: SimilarityMatrix::diagonal(5, -4),
                gap_cost: GapCost::Affine { open: -13, extend: -8 },
            },
            break_length: 200,
            max_gap_fill: 2000,
            tie_break: TieBreak::LongerSeed,
        }
    }

    pub fn mummer() -> Self {
        Self {
            preset: "mummer".to_string(),
            mode: AlignMode::Mummer,
            ..Self::nucmer()
        }
    }

    /// Shorter seeds and smaller clusters for diverged sequences.
    pub fn sensitive() -> Self {
        Self {
            preset: "sensitive".to_string(),
            seed: SeedParams {
                min_mum_length: 12,
                mode: MatchMode::Unique,
            },
            cluster: ClusterParams {
                minimum_score: 65,
                fixed_separation: 10,
                maximum_separation: 1500,
                separation_factor: 0.12,
            },
            break_length: 500,
            ..Self::nucmer()
        }
    }

    pub fn from_preset(name: &str) -> Option<Self> {
        match name {
            "nucmer" => Some(Self::nucmer()),
            "mummer" => Some(Self::mummer()),
            "sensitive" => Some(Self::sensitive()),
            _ => None,
        }
    }

    pub fn presets() -> Vec<&'static str> {
        vec!["nucmer", "mummer", "sensitive"]
    }
}

pub struct AlignmentAssembler<G = DpGapAligner> {
    params: AlignParams,
    seeder: MatchSeeder,
    clusters: ClusterBuilder,
    extractor: ChainExtractor,
    gap_aligner: G,
}

impl AlignmentAssembler<DpGapAligner> {
    pub fn new(params: AlignParams) -> AlignResult<Self> {
        Self::with_gap_aligner(params, DpGapAligner)
    }
}

impl<G: GapAligner> AlignmentAssembler<G> {
    /// Fails with [`AlignError::InvalidInput`] when any parameter is out of range.
    pub fn with_gap_aligner(params: AlignParams, gap_aligner: G) -> AlignResult<Self> {
        params.scoring.gap_cost.validate().map_err(invalid_params)?;
        let extractor = ChainExtractor::with_tie_break(params.tie_break);
        let seeder = MatchSeeder::new(params.seed.clone())
            .map_err(invalid_params)?
            .with_extractor(extractor.clone());
        let clusters = ClusterBuilder::new(params.cluster.clone()).map_err(invalid_params)?;

        Ok(Self {
            params,
            seeder,
            clusters,
            extractor,
            gap_aligner,
        })
    }

    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    pub fn seeder(&self) -> &MatchSeeder {
        &self.seeder
    }

    /// Index `references` for use with [`AlignmentAssembler::align_with_index`].
    pub fn build_index(&self, references: &[Sequence]) -> AlignResult<SequenceIndex> {
        check_references(references)?;
        Ok(SequenceIndex::build(references)?)
    }

    /// Align every query against the reference set.
    ///
    /// Results come in reference-then-query order. With a single reference
    /// every query yields a result, possibly without segments; with several
    /// references only pairs that produced segments are reported.
    pub fn align<'a>(
        &self,
        references: &'a [Sequence],
        queries: &'a [Sequence],
    ) -> AlignResult<Vec<AlignmentResult<'a>>> {
        check_references(references)?;
        check_queries(references, queries)?;
        let index = SequenceIndex::build(references)?;
        self.align_with_index(&index, references, queries)
    }

    /// Same as [`AlignmentAssembler::align`] with an index built earlier from `references`.
    pub fn align_with_index<'a>(
        &self,
        index: &SequenceIndex,
        references: &'a [Sequence],
        queries: &'a [Sequence],
    ) -> AlignResult<Vec<AlignmentResult<'a>>> {
        check_references(references)?;
        check_queries(references, queries)?;
        let same_references = index.sequence_count() == references.len()
            && references
                .iter()
                .enumerate()
                .all(|(i, r)| index.sequence_id(i) == Some(r.id()) && index.sequence_len(i) == Some(r.len()));
        if !same_references {
            return Err(AlignError::InvalidInput(
                "index was built from a different reference set".to_string(),
            ));
        }

        let per_query: Vec<Vec<AlignmentResult<'a>>> = queries
            .par_iter()
            .enumerate()
            .map(|(query_index, query)| self.align_query(index, references, query_index, query))
            .collect::<AlignResult<_>>()?;

        let mut results: Vec<AlignmentResult<'a>> = per_query.into_iter().flatten().collect();
        results.sort_by_key(|r| (r.reference_index, r.query_index));

        log::info!(
            "Aligned {} queries against {} references: {} results, {} segments",
            queries.len(),
            references.len(),
            results.len(),
            results.iter().map(|r| r.segments.len()).sum::<usize>()
        );
        Ok(results)
    }

    fn align_query<'a>(
        &self,
        index: &SequenceIndex,
        references: &'a [Sequence],
        query_index: usize,
        query: &'a Sequence,
    ) -> AlignResult<Vec<AlignmentResult<'a>>> {
        if query.is_empty() {
            log::warn!("Query '{}' is empty", query.id());
        }

        let seeds = self.seeder.find_seeds(index, query)?;
        let mut segments_by_reference: Vec<Vec<AlignedSegment>> = vec![Vec::new(); references.len()];
        for group in seeds.chunk_by(|a, b| a.reference_id == b.reference_id) {
            let reference_index = group[0].reference_id;
            let reference = &references[reference_index];
            segments_by_reference[reference_index] = match self.params.mode {
                AlignMode::Mummer => self.mummer_segments(reference, query, group),
                AlignMode::Nucmer => self.nucmer_segments(reference, query, group),
            };
        }

        let single_reference = references.len() == 1;
        let results = segments_by_reference
            .into_iter()
            .enumerate()
            .filter(|(_, segments)| single_reference || !segments.is_empty())
            .map(|(reference_index, segments)| AlignmentResult {
                reference: &references[reference_index],
                query,
                reference_index,
                query_index,
                segments,
            })
            .collect();
        Ok(results)
    }

    /// Best chain over all seeds as one globally extended segment.
    fn mummer_segments(&self, reference: &Sequence, query: &Sequence, seeds: &[Seed]) -> Vec<AlignedSegment> {
        let chain = self.extractor.extract(seeds);
        if chain.is_empty() {
            return Vec::new();
        }
        vec![self.build_block(reference, query, &chain, Flanks::Global)]
    }

    /// Cluster, chain each cluster, then merge collinear neighbours into blocks.
    fn nucmer_segments(&self, reference: &Sequence, query: &Sequence, seeds: &[Seed]) -> Vec<AlignedSegment> {
        let clusters = self.clusters.build_clusters(seeds);

        let mut chains: Vec<Vec<Seed>> = clusters
            .iter()
            .map(|cluster| self.extractor.extract(&cluster.seeds))
            .filter(|chain| !chain.is_empty())
            .collect();
        chains.sort_by_key(|chain| (chain[0].reference_start, chain[0].query_start));

        let mut accepted: Vec<Vec<Seed>> = Vec::with_capacity(chains.len());
        for chain in chains {
            if accepted.iter().any(|kept| shadows(kept, &chain)) {
                log::debug!(
                    "Dropping shadowed chain at {}:{} in '{}'",
                    chain[0].reference_start,
                    chain[0].query_start,
                    query.id()
                );
                continue;
            }
            accepted.push(chain);
        }

        let mut blocks: Vec<Vec<Seed>> = Vec::new();
        for chain in accepted {
            match blocks.last_mut() {
                Some(block) if self.bridgeable(block[block.len() - 1], chain[0]) => block.extend(chain),
                _ => blocks.push(chain),
            }
        }

        log::debug!(
            "Query '{}' vs '{}': {} clusters, {} blocks",
            query.id(),
            reference.id(),
            clusters.len(),
            blocks.len()
        );

        blocks
            .iter()
            .map(|anchors| self.build_block(reference, query, anchors, Flanks::Extend))
            .collect()
    }

    /// Whether `next` can join the block ending with `last` without breaking it.
    fn bridgeable(&self, last: Seed, next: Seed) -> bool {
        next.reference_start >= last.reference_end()
            && next.query_start >= last.query_end()
            && next.reference_start - last.reference_end() <= self.params.break_length
            && next.query_start - last.query_end() <= self.params.break_length
    }

    /// One gapped segment through `anchors`, which must be non-overlapping
    /// and increasing on both axes.
    fn build_block(&self, reference: &Sequence, query: &Sequence, anchors: &[Seed], flanks: Flanks) -> AlignedSegment {
        let r = reference.symbols();
        let q = query.symbols();
        let first = anchors[0];
        let last = anchors[anchors.len() - 1];

        let mut rows = Rows::new(first.reference_start, first.query_start);

        match flanks {
            Flanks::Global => {
                let fill = self.fill_between(&r[..first.reference_start], &q[..first.query_start], Side::End);
                rows.first_offset = 0;
                rows.second_offset = 0;
                rows.push(&fill);
            }
            Flanks::Extend => {
                let r_start = first.reference_start.saturating_sub(self.params.break_length);
                let q_start = first.query_start.saturating_sub(self.params.break_length);
                let fill = self.gap_aligner.align_gap(
                    &r[r_start..first.reference_start],
                    &q[q_start..first.query_start],
                    GapMode::OpenStart,
                    &self.params.scoring,
                );
                rows.first_offset = r_start + fill.reference_range.start;
                rows.second_offset = q_start + fill.query_range.start;
                rows.push(&fill);
            }
        }

        for (i, anchor) in anchors.iter().enumerate() {
            if i > 0 {
                let prev = anchors[i - 1];
                let fill = self.fill_between(
                    &r[prev.reference_end()..anchor.reference_start],
                    &q[prev.query_end()..anchor.query_start],
                    Side::Both,
                );
                rows.push(&fill);
            }
            rows.push_anchor(&r[anchor.reference_start..anchor.reference_end()], &q[anchor.query_start..anchor.query_end()]);
        }

        match flanks {
            Flanks::Global => {
                let fill = self.fill_between(&r[last.reference_end()..], &q[last.query_end()..], Side::Start);
                rows.push(&fill);
            }
            Flanks::Extend => {
                let r_end = (last.reference_end() + self.params.break_length).min(r.len());
                let q_end = (last.query_end() + self.params.break_length).min(q.len());
                let fill = self.gap_aligner.align_gap(
                    &r[last.reference_end()..r_end],
                    &q[last.query_end()..q_end],
                    GapMode::OpenEnd,
                    &self.params.scoring,
                );
                rows.push(&fill);
            }
        }

        rows.finish(reference.alphabet(), &self.params.scoring)
    }

    /// Globally fill a window pair; one-sided windows become pure indels.
    ///
    /// Windows longer than `max_gap_fill` on either side are only aligned
    /// within `max_gap_fill` symbols of the anchors named by `anchored`; the
    /// rest is emitted as an unaligned indel.
    fn fill_between(&self, reference: &[u8], query: &[u8], anchored: Side) -> GapFill {
        let limit = self.params.max_gap_fill;
        if reference.len() <= limit && query.len() <= limit {
            return self.dp_fill(reference, query);
        }

        let (head, tail) = match anchored {
            Side::Start => (limit, 0),
            Side::End => (0, limit),
            Side::Both => (limit / 2, limit - limit / 2),
        };
        let r_head = head.min(reference.len());
        let q_head = head.min(query.len());
        let r_tail = reference.len() - tail.min(reference.len() - r_head);
        let q_tail = query.len() - tail.min(query.len() - q_head);
        log::debug!(
            "Gap of {}x{} exceeds {} symbols, aligning only near anchors",
            reference.len(),
            query.len(),
            limit
        );

        let mut fill = self.dp_fill(&reference[..r_head], &query[..q_head]);
        fill.append(GapFill::indel(&reference[r_head..r_tail], &query[q_head..q_tail]));
        fill.append(self.dp_fill(&reference[r_tail..], &query[q_tail..]));
        fill
    }

    fn dp_fill(&self, reference: &[u8], query: &[u8]) -> GapFill {
        if reference.is_empty() || query.is_empty() {
            return GapFill::indel(reference, query);
        }
        self.gap_aligner
            .align_gap(reference, query, GapMode::Global, &self.params.scoring)
    }
}

#[derive(Debug, Clone, Copy)]
enum Flanks {
    Global,
    Extend,
}

/// Which ends of a gap window touch an anchor.
#[derive(Debug, Clone, Copy)]
enum Side {
    Start,
    End,
    Both,
}

/// Whether `inner` lies within the reference and query spans of `outer`.
fn shadows(outer: &[Seed], inner: &[Seed]) -> bool {
    let span = |chain: &[Seed]| {
        let first = chain[0];
        let last = chain[chain.len() - 1];
        (
            first.reference_start,
            last.reference_end(),
            first.query_start,
            last.query_end(),
        )
    };
    let (or_start, or_end, oq_start, oq_end) = span(outer);
    let (ir_start, ir_end, iq_start, iq_end) = span(inner);
    or_start <= ir_start && ir_end <= or_end && oq_start <= iq_start && iq_end <= oq_end
}

fn invalid_params(err: impl std::fmt::Display) -> AlignError {
    AlignError::InvalidInput(err.to_string())
}

fn check_references(references: &[Sequence]) -> AlignResult<()> {
    if references.is_empty() {
        return Err(AlignError::InvalidInput("reference set is empty".to_string()));
    }
    if references.iter().all(Sequence::is_empty) {
        return Err(AlignError::InvalidInput("every reference sequence is empty".to_string()));
    }
    Ok(())
}

fn check_queries(references: &[Sequence], queries: &[Sequence]) -> AlignResult<()> {
    if queries.is_empty() {
        return Err(AlignError::InvalidInput("query set is empty".to_string()));
    }
    let alphabet = references[0].alphabet();
    if let Some(query) = queries.iter().find(|q| q.alphabet() != alphabet) {
        return Err(AlignError::AlphabetMismatch {
            reference: alphabet,
            query: query.alphabet(),
            id: query.id().to_string(),
        });
    }
    Ok(())
}

/// Gapped rows of a segment under construction.
struct Rows {
    first: Vec<u8>,
    second: Vec<u8>,
    first_offset: usize,
    second_offset: usize,
}

impl Rows {
    fn new(first_offset: usize, second_offset: usize) -> Self {
        Self {
            first: Vec::new(),
            second: Vec::new(),
            first_offset,
            second_offset,
        }
    }

    fn push(&mut self, fill: &GapFill) {
        self.first.extend_from_slice(&fill.first);
        self.second.extend_from_slice(&fill.second);
    }

    fn push_anchor(&mut self, reference: &[u8], query: &[u8]) {
        self.first.extend_from_slice(reference);
        self.second.extend_from_slice(query);
    }

    fn finish(self, alphabet: Alphabet, scoring: &ScoringScheme) -> AlignedSegment {
        let consensus_row = consensus(alphabet, &self.first, &self.second);
        AlignedSegment {
            score: scoring.score_columns(&self.first, &self.second),
            first: to_string(&self.first),
            second: to_string(&self.second),
            consensus: to_string(&consensus_row),
            first_offset: self.first_offset,
            second_offset: self.second_offset,
        }
    }
}

fn to_string(row: &[u8]) -> String {
    row.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GAP;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn dna(id: &str, s: &str) -> Sequence {
        Sequence::dna(id, s).unwrap()
    }

    fn small_params(mode: AlignMode) -> AlignParams {
        AlignParams {
            mode,
            seed: SeedParams {
                min_mum_length: 4,
                mode: MatchMode::Unique,
            },
            cluster: ClusterParams {
                minimum_score: 4,
                ..Default::default()
            },
            break_length: 20,
            ..AlignParams::nucmer()
        }
    }

    fn ungapped(row: &str) -> String {
        row.bytes().filter(|&b| b != GAP).map(char::from).collect()
    }

    #[test]
    fn test_presets() {
        for name in AlignParams::presets() {
            let params = AlignParams::from_preset(name).unwrap();
            assert_eq!(params.preset, name);
            assert!(AlignmentAssembler::new(params).is_ok());
        }
        assert!(AlignParams::from_preset("unknown").is_none());
        assert_eq!(AlignParams::mummer().mode, AlignMode::Mummer);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let mut params = AlignParams::nucmer();
        params.seed.min_mum_length = 0;
        assert!(matches!(AlignmentAssembler::new(params), Err(AlignError::InvalidInput(_))));

        let mut params = AlignParams::nucmer();
        params.scoring.gap_cost = GapCost::Linear { penalty: 3 };
        assert!(matches!(AlignmentAssembler::new(params), Err(AlignError::InvalidInput(_))));

        let mut params = AlignParams::nucmer();
        params.cluster.separation_factor = -1.0;
        let err = AlignmentAssembler::new(params).err().unwrap();
        assert!(matches!(err, AlignError::InvalidInput(_)));
        assert!(err.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn test_shadowed_chain() {
        let outer = vec![Seed::new(0, 0, 0, 10), Seed::new(0, 20, 20, 10)];
        let inner = vec![Seed::new(0, 12, 14, 5)];
        assert!(shadows(&outer, &inner));
        assert!(!shadows(&inner, &outer));
    }

    #[test]
    fn test_mummer_block_spans_whole_sequences() {
        let assembler = AlignmentAssembler::new(small_params(AlignMode::Mummer)).unwrap();
        let reference = dna("r", "GGACGTACGTTTCCAGGATTACA");
        let query = dna("q", "ACGTACGTACCAGGATTACAGG");

        let segment = assembler.build_block(
            &reference,
            &query,
            &[Seed::new(0, 2, 0, 8), Seed::new(0, 13, 10, 10)],
            Flanks::Global,
        );
        assert_eq!(segment.first_offset, 0);
        assert_eq!(segment.second_offset, 0);
        assert_eq!(ungapped(&segment.first), "GGACGTACGTTTCCAGGATTACA");
        assert_eq!(ungapped(&segment.second), "ACGTACGTACCAGGATTACAGG");
        assert_eq!(segment.first_end(), reference.len());
        assert_eq!(segment.second_end(), query.len());
    }

    /// Records the longest window side it is asked to align.
    #[derive(Default)]
    struct WidestWindow(AtomicUsize);

    impl GapAligner for WidestWindow {
        fn align_gap(&self, reference: &[u8], query: &[u8], mode: GapMode, scoring: &ScoringScheme) -> GapFill {
            self.0.fetch_max(reference.len().max(query.len()), AtomicOrdering::Relaxed);
            DpGapAligner.align_gap(reference, query, mode, scoring)
        }

        fn name(&self) -> &'static str {
            "widest-window"
        }
    }

    #[test]
    fn test_long_gaps_are_filled_in_bounded_windows() {
        let params = AlignParams {
            max_gap_fill: 50,
            ..small_params(AlignMode::Mummer)
        };
        let assembler = AlignmentAssembler::with_gap_aligner(params.clone(), WidestWindow::default()).unwrap();

        let x = "ACGTACGGTC";
        let y = "TTGCATGCAA";
        let r = format!("{}{}{}{}{}", "A".repeat(300), x, "G".repeat(400), y, "T".repeat(300));
        let q = format!("{}{}{}{}{}", "C".repeat(200), x, "T".repeat(350), y, "A".repeat(250));
        let (reference, query) = (dna("r", &r), dna("q", &q));

        let segment = assembler.build_block(
            &reference,
            &query,
            &[Seed::new(0, 300, 200, 10), Seed::new(0, 710, 560, 10)],
            Flanks::Global,
        );
        assert!(assembler.gap_aligner.0.load(AtomicOrdering::Relaxed) <= 50);
        assert_eq!((segment.first_offset, segment.second_offset), (0, 0));
        assert_eq!(ungapped(&segment.first), r);
        assert_eq!(ungapped(&segment.second), q);
        assert_eq!(
            segment.score,
            params.scoring.score_columns(segment.first.as_bytes(), segment.second.as_bytes())
        );
    }

    #[test]
    fn test_short_gaps_use_one_window() {
        let assembler =
            AlignmentAssembler::with_gap_aligner(small_params(AlignMode::Mummer), WidestWindow::default()).unwrap();
        let reference = dna("r", "GGACGTACGTTTCCAGGATTACA");
        let query = dna("q", "ACGTACGTACCAGGATTACAGG");
        assembler.build_block(
            &reference,
            &query,
            &[Seed::new(0, 2, 0, 8), Seed::new(0, 13, 10, 10)],
            Flanks::Global,
        );
        // the 3x2 gap between the anchors goes to the aligner whole
        assert_eq!(assembler.gap_aligner.0.load(AtomicOrdering::Relaxed), 3);
    }

    #[test]
    fn test_anchor_only_block_scores_length_times_match() {
        let assembler = AlignmentAssembler::new(small_params(AlignMode::Nucmer)).unwrap();
        let reference = dna("r", "ACGTACGGTC");
        let query = dna("q", "ACGTACGGTC");
        let segment = assembler.build_block(&reference, &query, &[Seed::new(0, 0, 0, 10)], Flanks::Extend);
        assert_eq!(segment.score, 10 * 5);
        assert_eq!(segment.first, "ACGTACGGTC");
        assert_eq!(segment.consensus, "ACGTACGGTC");
    }

    #[test]
    fn test_pure_indel_between_anchors() {
        let assembler = AlignmentAssembler::new(small_params(AlignMode::Nucmer)).unwrap();
        let reference = dna("r", "ACGTACGGTCTTTGCATGCAAC");
        let query = dna("q", "ACGTACGGTCGCATGCAAC");
        let segment = assembler.build_block(
            &reference,
            &query,
            &[Seed::new(0, 0, 0, 10), Seed::new(0, 13, 10, 9)],
            Flanks::Extend,
        );
        assert_eq!(segment.first, "ACGTACGGTCTTTGCATGCAAC");
        assert_eq!(segment.second, "ACGTACGGTC---GCATGCAAC");
        assert_eq!(segment.score, 19 * 5 + (-13 - 8 - 8));
    }

    #[test]
    fn test_bridgeable_respects_break_length() {
        let assembler = AlignmentAssembler::new(small_params(AlignMode::Nucmer)).unwrap();
        let last = Seed::new(0, 0, 0, 10);
        assert!(assembler.bridgeable(last, Seed::new(0, 15, 12, 5)));
        assert!(!assembler.bridgeable(last, Seed::new(0, 40, 12, 5)));
        assert!(!assembler.bridgeable(last, Seed::new(0, 8, 12, 5)));
    }
}
