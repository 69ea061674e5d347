//! Support code for the `mumalign` binary: configuration, sequence loading
//! and report formatting.

pub mod config;
pub mod fasta;
pub mod report;

pub use config::Config;
