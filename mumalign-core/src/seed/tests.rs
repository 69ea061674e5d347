//! Seeding tests over small reference/query pairs

use super::*;

/// Reference/query pairs with known seed sets
pub struct TestSequences;

impl TestSequences {
    /// One unique match of length 5
    pub fn single_mum() -> (Sequence, Sequence) {
        (
            Sequence::dna("ref", "TTAATTTTAG").unwrap(),
            Sequence::dna("query", "AGTTTAGAG").unwrap(),
        )
    }

    /// Shared substring that repeats in the reference
    pub fn repeated() -> (Sequence, Sequence) {
        (
            Sequence::dna("ref", "TTTTAATTTTAG").unwrap(),
            Sequence::dna("query", "ACTTTTGGA").unwrap(),
        )
    }

    /// Two overlapping seeds near the end of the reference
    pub fn overlapping() -> (Sequence, Sequence) {
        (
            Sequence::dna("ref", "ATGCGCATCCCCTT").unwrap(),
            Sequence::dna("query", "GCGCCCCCTA").unwrap(),
        )
    }

    /// RNA with ambiguity codes
    pub fn rna_ambiguous() -> (Sequence, Sequence) {
        (
            Sequence::rna("ref", "AUGCSWRYKMBVHDN").unwrap(),
            Sequence::rna("query", "UAUASWRYBB").unwrap(),
        )
    }
}

fn seeder(k: usize, mode: MatchMode) -> MatchSeeder {
    MatchSeeder::new(SeedParams { min_mum_length: k, mode }).unwrap()
}

fn coords(seeds: &[Seed]) -> Vec<(usize, usize, usize)> {
    seeds.iter().map(|s| (s.reference_start, s.query_start, s.length)).collect()
}

#[cfg(test)]
mod seeding_tests {
    use super::*;

    #[test]
    fn test_zero_length_is_rejected() {
        let err = MatchSeeder::new(SeedParams {
            min_mum_length: 0,
            mode: MatchMode::Unique,
        })
        .unwrap_err();
        assert!(matches!(err, SeedError::InvalidParams(_)));
    }

    #[test]
    fn test_single_mum() {
        let (reference, query) = TestSequences::single_mum();
        let index = SequenceIndex::build(&[reference]).unwrap();
        let seeds = seeder(3, MatchMode::Unique).find_seeds(&index, &query).unwrap();
        assert_eq!(coords(&seeds), vec![(5, 2, 5)]);
    }

    #[test]
    fn test_repeats_need_maximal_mode() {
        let (reference, query) = TestSequences::repeated();
        let index = SequenceIndex::build(&[reference]).unwrap();

        let unique = seeder(3, MatchMode::Unique).find_seeds(&index, &query).unwrap();
        assert!(unique.is_empty());

        let maximal = seeder(3, MatchMode::Maximal).find_seeds(&index, &query).unwrap();
        assert_eq!(coords(&maximal), vec![(0, 2, 4)]);
    }

    #[test]
    fn test_orders_follow_both_axes() {
        let (reference, query) = TestSequences::overlapping();
        let index = SequenceIndex::build(&[reference]).unwrap();
        let seeds = seeder(4, MatchMode::Unique).find_seeds(&index, &query).unwrap();

        assert_eq!(coords(&seeds), vec![(2, 0, 4), (8, 3, 4), (8, 4, 5)]);
        let orders: Vec<_> = seeds.iter().map(|s| (s.reference_order, s.query_order)).collect();
        assert_eq!(orders, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_align_with_chain_drops_overlap() {
        let (reference, query) = TestSequences::overlapping();
        let index = SequenceIndex::build(&[reference]).unwrap();
        let chained = seeder(4, MatchMode::Unique)
            .align_with_chain(&index, &[query])
            .unwrap();

        assert_eq!(chained.len(), 1);
        assert_eq!(coords(&chained[0]), vec![(2, 0, 4), (8, 4, 5)]);
    }

    #[test]
    fn test_rna_ambiguity_codes() {
        let (reference, query) = TestSequences::rna_ambiguous();
        let index = SequenceIndex::build(&[reference]).unwrap();
        let s = seeder(3, MatchMode::Unique);

        assert_eq!(coords(&s.find_seeds(&index, &query).unwrap()), vec![(4, 4, 4)]);
        let chained = s.align_with_chain(&index, &[query]).unwrap();
        assert_eq!(coords(&chained[0]), vec![(4, 4, 4)]);
    }

    #[test]
    fn test_oversized_k_yields_nothing() {
        let (reference, query) = TestSequences::single_mum();
        let index = SequenceIndex::build(&[reference]).unwrap();
        let seeds = seeder(50, MatchMode::Unique).find_seeds(&index, &query).unwrap();
        assert!(seeds.is_empty());
    }

    #[test]
    fn test_queries_keep_input_order() {
        let (reference, query) = TestSequences::single_mum();
        let index = SequenceIndex::build(&[reference]).unwrap();
        let other = Sequence::dna("other", "GGGGGG").unwrap();
        let empty = Sequence::dna("empty", "").unwrap();

        let chained = seeder(3, MatchMode::Unique)
            .align_with_chain(&index, &[other, query, empty])
            .unwrap();
        assert_eq!(chained.len(), 3);
        assert!(chained[0].is_empty());
        assert_eq!(coords(&chained[1]), vec![(5, 2, 5)]);
        assert!(chained[2].is_empty());
    }

    #[test]
    fn test_empty_index_error_propagates() {
        let index = SequenceIndex::build(&[]).unwrap();
        let (_, query) = TestSequences::single_mum();
        let err = seeder(3, MatchMode::Unique).find_seeds(&index, &query).unwrap_err();
        assert!(matches!(err, SeedError::Index(IndexError::EmptyIndex)));
    }

    #[test]
    fn test_chains_are_computed_per_reference() {
        let references = vec![
            Sequence::dna("r0", "ACGTTGCAAGGCTTAA").unwrap(),
            Sequence::dna("r1", "CCCCGGATATCCAGTC").unwrap(),
        ];
        let index = SequenceIndex::build(&references).unwrap();
        let query = Sequence::dna("q", "GCAAGGCTTTGGATATCCAG").unwrap();

        let chained = seeder(5, MatchMode::Unique)
            .align_with_chain(&index, &[query])
            .unwrap();
        let per_reference: Vec<_> = chained[0].iter().map(|s| s.reference_id).collect();
        assert_eq!(per_reference, vec![0, 1]);
    }
}
