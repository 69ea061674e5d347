//! Generalized suffix tree index over one or more reference sequences.
//!
//! Sequences are concatenated into a single symbol text, each followed by a
//! sentinel (`SENTINEL_BASE + sequence id`) that occurs nowhere else, so no
//! match can run across a sequence boundary. The index is fully built by
//! [`SequenceIndex::build`] and read-only afterwards; it can be shared
//! between threads without locking.

mod matcher;
mod tree;

use crate::types::{Alphabet, Seed, Sequence};
use thiserror::Error;
use tree::SuffixTree;

/// First sentinel code. Alphabet symbols are bytes, so codes from here up never collide.
pub const SENTINEL_BASE: u32 = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Incompatible alphabets: index holds {expected} sequences but '{id}' is {found}")]
    InvalidAlphabet {
        expected: Alphabet,
        found: Alphabet,
        id: String,
    },

    #[error("Query '{id}' is {found} but the index holds {expected} sequences")]
    AlphabetMismatch {
        expected: Alphabet,
        found: Alphabet,
        id: String,
    },

    #[error("All input sequences are empty")]
    EmptyInput,

    #[error("Index was built from zero sequences")]
    EmptyIndex,

    #[error("Suffix tree would exceed {max_nodes} nodes")]
    TooLarge { max_nodes: usize },
}

pub type IndexResult<T> = Result<T, IndexError>;

#[derive(Debug, Clone)]
struct IndexedSequence {
    id: String,
    /// Offset of the first symbol inside the concatenated text.
    text_start: usize,
    len: usize,
}

#[derive(Debug, Clone)]
pub struct SequenceIndex {
    alphabet: Option<Alphabet>,
    sequences: Vec<IndexedSequence>,
    tree: Option<SuffixTree>,
}

impl SequenceIndex {
    /// Build the index over `sequences`.
    ///
    /// An empty slice yields an empty index that rejects queries with
    /// [`IndexError::EmptyIndex`].
    pub fn build(sequences: &[Sequence]) -> IndexResult<Self> {
        let Some(first) = sequences.first() else {
            return Ok(Self {
                alphabet: None,
                sequences: Vec::new(),
                tree: None,
            });
        };

        let alphabet = first.alphabet();
        if let Some(other) = sequences.iter().find(|s| s.alphabet() != alphabet) {
            return Err(IndexError::InvalidAlphabet {
                expected: alphabet,
                found: other.alphabet(),
                id: other.id().to_string(),
            });
        }
        if sequences.iter().all(Sequence::is_empty) {
            return Err(IndexError::EmptyInput);
        }

        let total: usize = sequences.iter().map(|s| s.len() + 1).sum();
        let mut text = Vec::with_capacity(total);
        let mut indexed = Vec::with_capacity(sequences.len());
        for (seq_id, sequence) in sequences.iter().enumerate() {
            indexed.push(IndexedSequence {
                id: sequence.id().to_string(),
                text_start: text.len(),
                len: sequence.len(),
            });
            text.extend(sequence.symbols().iter().map(|&b| u32::from(b)));
            text.push(SENTINEL_BASE + seq_id as u32);
        }

        let tree = SuffixTree::build(text)?;
        log::debug!(
            "Indexed {} sequences ({} symbols, {} nodes)",
            indexed.len(),
            total - indexed.len(),
            tree.node_count()
        );

        Ok(Self {
            alphabet: Some(alphabet),
            sequences: indexed,
            tree: Some(tree),
        })
    }

    pub fn alphabet(&self) -> Option<Alphabet> {
        self.alphabet
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    pub fn sequence_id(&self, seq_id: usize) -> Option<&str> {
        self.sequences.get(seq_id).map(|s| s.id.as_str())
    }

    pub fn sequence_len(&self, seq_id: usize) -> Option<usize> {
        self.sequences.get(seq_id).map(|s| s.len)
    }

    /// Every `(sequence id, offset)` at which `pattern` occurs, in text order.
    pub fn occurrences(&self, pattern: &[u8]) -> Vec<(usize, usize)> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        if pattern.is_empty() {
            return Vec::new();
        }

        let (len, locus) = matcher::longest_prefix(tree, pattern);
        if len < pattern.len() {
            return Vec::new();
        }
        tree.leaf_suffixes(locus)
            .into_iter()
            .map(|pos| self.locate(pos))
            .filter(|&(seq_id, offset)| offset + pattern.len() <= self.sequences[seq_id].len)
            .collect()
    }

    /// Length of the longest prefix of `query[position..]` that occurs in the index.
    pub fn longest_match(&self, query: &[u8], position: usize) -> usize {
        match (&self.tree, query.get(position..)) {
            (Some(tree), Some(suffix)) => matcher::longest_prefix(tree, suffix).0,
            _ => 0,
        }
    }

    /// Maximal matches of at least `min_length` symbols that occur exactly
    /// once in the indexed text, in query order.
    pub fn find_matches(&self, query: &Sequence, min_length: usize) -> IndexResult<Vec<Seed>> {
        self.collect_matches(query, min_length, true)
    }

    /// Maximal matches of at least `min_length` symbols regardless of how
    /// often they occur in the index. At most one match is reported per
    /// query start: a repeat yields its leftmost occurrence only.
    pub fn find_maximal_matches(&self, query: &Sequence, min_length: usize) -> IndexResult<Vec<Seed>> {
        self.collect_matches(query, min_length, false)
    }

    fn collect_matches(&self, query: &Sequence, min_length: usize, unique: bool) -> IndexResult<Vec<Seed>> {
        let (Some(tree), Some(alphabet)) = (&self.tree, self.alphabet) else {
            return Err(IndexError::EmptyIndex);
        };
        if query.alphabet() != alphabet {
            return Err(IndexError::AlphabetMismatch {
                expected: alphabet,
                found: query.alphabet(),
                id: query.id().to_string(),
            });
        }

        let seeds = matcher::maximal_matches(tree, query.symbols(), min_length, unique)
            .into_iter()
            .map(|m| {
                let (seq_id, offset) = self.locate(m.text_start);
                Seed::new(seq_id, offset, m.query_start, m.length)
            })
            .collect();
        Ok(seeds)
    }

    /// Map a text position to `(sequence id, offset)`.
    fn locate(&self, text_pos: usize) -> (usize, usize) {
        let seq_id = self
            .sequences
            .partition_point(|s| s.text_start <= text_pos)
            .saturating_sub(1);
        (seq_id, text_pos - self.sequences[seq_id].text_start)
    }
}
