//! MumAlign Core Library
//!
//! Suffix-tree indexing, maximal unique match seeding, clustering, chain
//! extraction and gap-filled alignment assembly for whole-genome comparison.

pub mod types;
pub mod index;
pub mod seed;
pub mod cluster;
pub mod chain;
pub mod scoring;
pub mod gap_align;
pub mod align;

// Re-export commonly used types and functions
pub use types::{AlignedSegment, Alphabet, AlignmentResult, Cluster, Seed, Sequence, SequenceError, GAP};
pub use index::{IndexError, IndexResult, SequenceIndex};
pub use seed::{MatchMode, MatchSeeder, SeedError, SeedParams, SeedResult};
pub use cluster::{ClusterBuilder, ClusterError, ClusterParams};
pub use chain::{ChainExtractor, TieBreak};
pub use scoring::{GapCost, ScoringError, ScoringScheme, SimilarityMatrix};
pub use gap_align::{DpGapAligner, GapAligner, GapFill, GapMode};
pub use align::{AlignError, AlignMode, AlignParams, AlignResult, AlignmentAssembler};

/// Version information for the MumAlign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
