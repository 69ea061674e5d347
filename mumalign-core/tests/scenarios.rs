//! Worked MUMmer/NUCmer examples through the public API

use mumalign_core::{
    AlignParams, AlignmentAssembler, ChainExtractor, ClusterBuilder, ClusterParams, IndexError, MatchMode,
    MatchSeeder, Seed, SeedError, SeedParams, Sequence, SequenceIndex,
};

fn coords(seeds: &[Seed]) -> Vec<(usize, usize, usize)> {
    seeds
        .iter()
        .map(|s| (s.reference_start, s.query_start, s.length))
        .collect()
}

fn seeder(k: usize) -> MatchSeeder {
    MatchSeeder::new(SeedParams {
        min_mum_length: k,
        mode: MatchMode::Unique,
    })
    .unwrap()
}

fn index_of(reference: &Sequence) -> SequenceIndex {
    SequenceIndex::build(std::slice::from_ref(reference)).unwrap()
}

#[test]
fn single_mum_without_chaining() {
    let reference = Sequence::dna("ref", "TTAATTTTAG").unwrap();
    let query = Sequence::dna("query", "AGTTTAGAG").unwrap();

    let seeds = seeder(3).find_seeds(&index_of(&reference), &query).unwrap();
    assert_eq!(coords(&seeds), vec![(5, 2, 5)]);
}

#[test]
fn overlapping_mums_reduce_to_two_anchors() {
    let reference = Sequence::dna("ref", "ATGCGCATCCCCTT").unwrap();
    let query = Sequence::dna("query", "GCGCCCCCTA").unwrap();
    let index = index_of(&reference);
    let seeder = seeder(4);

    let raw = seeder.find_seeds(&index, &query).unwrap();
    assert_eq!(coords(&raw), vec![(2, 0, 4), (8, 3, 4), (8, 4, 5)]);

    let chained = seeder.align_with_chain(&index, std::slice::from_ref(&query)).unwrap();
    assert_eq!(coords(&chained[0]), vec![(2, 0, 4), (8, 4, 5)]);
}

#[test]
fn overlapping_chain_seed_is_trimmed() {
    let seeds = vec![Seed::new(0, 0, 0, 4), Seed::new(0, 2, 4, 5)];
    let chain = ChainExtractor::new().extract(&seeds);
    assert_eq!(coords(&chain), vec![(0, 0, 4), (4, 6, 3)]);
}

#[test]
fn clusters_split_where_diagonals_drift() {
    let builder = ClusterBuilder::new(ClusterParams {
        minimum_score: 2,
        fixed_separation: 0,
        ..Default::default()
    })
    .unwrap();
    let seeds = vec![
        Seed::new(0, 0, 0, 4),
        Seed::new(0, 6, 6, 4),
        Seed::new(0, 20, 13, 4),
        Seed::new(0, 30, 23, 4),
    ];

    let clusters = builder.build_clusters(&seeds);
    let layout: Vec<_> = clusters.iter().map(|c| coords(&c.seeds)).collect();
    assert_eq!(
        layout,
        vec![vec![(0, 0, 4), (6, 6, 4)], vec![(20, 13, 4), (30, 23, 4)]]
    );
}

#[test]
fn unmatched_queries_give_empty_results() {
    let params = AlignParams {
        seed: SeedParams {
            min_mum_length: 4,
            mode: MatchMode::Unique,
        },
        ..AlignParams::nucmer()
    };
    let assembler = AlignmentAssembler::new(params).unwrap();
    let references = vec![Sequence::dna("ref", "ACGTACGGTCAATG").unwrap()];
    let queries = vec![
        Sequence::dna("empty", "").unwrap(),
        Sequence::dna("poly_t", "TTTTTTTTTTTT").unwrap(),
    ];

    let results = assembler.align(&references, &queries).unwrap();
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(result.segments.is_empty());
        assert_eq!(result.total_score(), 0);
    }
}

#[test]
fn oversized_k_is_not_an_error() {
    let reference = Sequence::dna("ref", "ACGTACGGTC").unwrap();
    let query = Sequence::dna("query", "ACGTACGGTC").unwrap();
    let seeds = seeder(50).find_seeds(&index_of(&reference), &query).unwrap();
    assert!(seeds.is_empty());
}

#[test]
fn empty_index_is_reported() {
    let index = SequenceIndex::build(&[]).unwrap();
    let query = Sequence::dna("query", "ACGT").unwrap();
    assert!(matches!(
        seeder(2).find_seeds(&index, &query),
        Err(SeedError::Index(IndexError::EmptyIndex))
    ));
}
