use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mumalign_core::{AlignParams, AlignmentAssembler, MatchSeeder, SeedParams, Sequence, SequenceIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_test_sequence(length: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

/// Query made of reference slices with a substitution every 250 bases.
fn mutated_copy(reference: &[u8]) -> Vec<u8> {
    let mut query = reference[reference.len() / 10..].to_vec();
    for pos in (125..query.len()).step_by(250) {
        query[pos] = if query[pos] == b'A' { b'G' } else { b'A' };
    }
    query
}

fn bench_index_build(c: &mut Criterion) {
    let reference = Sequence::dna("ref", generate_test_sequence(50_000, 1)).unwrap();
    let references = vec![reference];

    c.bench_function("index_build_50kb", |b| {
        b.iter(|| black_box(SequenceIndex::build(black_box(&references)).unwrap()))
    });
}

fn bench_seeding(c: &mut Criterion) {
    let reference = generate_test_sequence(50_000, 2);
    let query = Sequence::dna("query", mutated_copy(&reference)).unwrap();
    let index = SequenceIndex::build(&[Sequence::dna("ref", &reference).unwrap()]).unwrap();
    let seeder = MatchSeeder::new(SeedParams::default()).unwrap();

    c.bench_function("mum_seeding_50kb", |b| {
        b.iter(|| black_box(seeder.find_seeds(&index, black_box(&query)).unwrap()))
    });
}

fn bench_nucmer_pipeline(c: &mut Criterion) {
    let reference = generate_test_sequence(20_000, 3);
    let query = mutated_copy(&reference);
    let references = vec![Sequence::dna("ref", &reference).unwrap()];
    let queries = vec![Sequence::dna("query", &query).unwrap()];
    let assembler = AlignmentAssembler::new(AlignParams::nucmer()).unwrap();
    let index = assembler.build_index(&references).unwrap();

    c.bench_function("nucmer_pipeline_20kb", |b| {
        b.iter(|| {
            let results = assembler
                .align_with_index(&index, black_box(&references), black_box(&queries))
                .unwrap();
            black_box(results.len())
        })
    });
}

criterion_group!(benches, bench_index_build, bench_seeding, bench_nucmer_pipeline);
criterion_main!(benches);
