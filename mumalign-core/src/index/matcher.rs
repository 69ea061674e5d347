//! Streaming maximal-match discovery against a built suffix tree.
//!
//! The query is matched once from left to right. After each query position
//! the current match loses its first symbol by following the suffix link of
//! the deepest explicit node on the match path, then re-descends with
//! skip/count, so total work stays proportional to the query length plus the
//! number of symbols compared.

use super::tree::{NodeId, SuffixTree, ROOT};

/// A match in global text coordinates, before it is mapped to a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawMatch {
    pub text_start: usize,
    pub query_start: usize,
    pub length: usize,
}

/// Every right-maximal, left-maximal match of at least `min_length` symbols,
/// reported once per query start and never contained in the query interval
/// of the previous report. With `unique` set, only matches occurring exactly
/// once in the text qualify; otherwise only the leftmost occurrence is
/// considered, and other occurrences of a repeat are never reported.
pub(crate) fn maximal_matches(
    tree: &SuffixTree,
    query: &[u8],
    min_length: usize,
    unique: bool,
) -> Vec<RawMatch> {
    let text = tree.text();
    let min_length = min_length.max(1);
    let mut matches = Vec::new();

    let mut node = ROOT;
    let mut depth = 0usize;
    let mut len = 0usize;
    let mut covered_to = 0usize;

    for i in 0..query.len() {
        let locus = descend(tree, query, i, &mut node, &mut depth, &mut len);

        if len >= min_length {
            let info = tree.node(locus);
            if !unique || info.leaf_count == 1 {
                let start = info.first_suffix;
                let left_maximal =
                    i == 0 || start == 0 || text[start - 1] != u32::from(query[i - 1]);
                if left_maximal && i + len > covered_to {
                    matches.push(RawMatch {
                        text_start: start,
                        query_start: i,
                        length: len,
                    });
                    covered_to = i + len;
                }
            }
        }

        if len == 0 {
            continue;
        }
        if node == ROOT {
            len -= 1;
        } else {
            node = tree.node(node).link;
            depth -= 1;
            len -= 1;
        }
        rescan(tree, query, i + 1, &mut node, &mut depth, len);
    }

    matches
}

/// Length of the longest prefix of `query` that occurs in the text, and the
/// node at or below its end.
pub(crate) fn longest_prefix(tree: &SuffixTree, query: &[u8]) -> (usize, NodeId) {
    let mut node = ROOT;
    let mut depth = 0;
    let mut len = 0;
    let locus = descend(tree, query, 0, &mut node, &mut depth, &mut len);
    (len, locus)
}

/// Extend the match of `query[start..]` as far as the tree allows.
///
/// On return `node` is the deepest explicit node on the match path
/// (`depth` is its string depth) and the returned id is the node at or
/// directly below the end of the match.
fn descend(
    tree: &SuffixTree,
    query: &[u8],
    start: usize,
    node: &mut NodeId,
    depth: &mut usize,
    len: &mut usize,
) -> NodeId {
    let text = tree.text();
    loop {
        let offset = *len - *depth;
        let branch = if offset == 0 {
            if start + *len == query.len() {
                return *node;
            }
            query[start + *len]
        } else {
            query[start + *depth]
        };

        let Some(child) = tree.child(*node, u32::from(branch)) else {
            return *node;
        };

        let edge = tree.node(child);
        let edge_len = edge.edge_len();
        let mut k = offset;
        while k < edge_len
            && start + *len < query.len()
            && text[edge.start + k] == u32::from(query[start + *len])
        {
            k += 1;
            *len += 1;
        }

        if k < edge_len {
            return if *len == *depth { *node } else { child };
        }
        *node = child;
        *depth += edge_len;
    }
}

/// Skip/count down from `node` until the explicit node path covers as much
/// of `len` as possible without walking past it.
fn rescan(tree: &SuffixTree, query: &[u8], start: usize, node: &mut NodeId, depth: &mut usize, len: usize) {
    while len > *depth {
        let Some(child) = tree.child(*node, u32::from(query[start + *depth])) else {
            return;
        };
        let edge_len = tree.node(child).edge_len();
        if len - *depth < edge_len {
            return;
        }
        *node = child;
        *depth += edge_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(reference: &str) -> SuffixTree {
        let mut text: Vec<u32> = reference.bytes().map(u32::from).collect();
        text.push(256);
        SuffixTree::build(text).unwrap()
    }

    fn brute_force_longest(reference: &[u8], query: &[u8]) -> usize {
        (0..reference.len())
            .map(|r| {
                reference[r..]
                    .iter()
                    .zip(query)
                    .take_while(|(a, b)| a == b)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_longest_prefix_matches_brute_force() {
        let reference = "ACGTTGCAACGTAGGCTA";
        let tree = tree_for(reference);
        for query in ["ACGTA", "GCAAC", "TTTT", "CTAX", "GGCTA"] {
            let (len, _) = longest_prefix(&tree, query.as_bytes());
            assert_eq!(len, brute_force_longest(reference.as_bytes(), query.as_bytes()), "{}", query);
        }
    }

    #[test]
    fn test_unique_matches() {
        let tree = tree_for("TTAATTTTAG");
        let found = maximal_matches(&tree, b"AGTTTAGAG", 3, true);
        assert_eq!(
            found,
            vec![RawMatch {
                text_start: 5,
                query_start: 2,
                length: 5
            }]
        );
    }

    #[test]
    fn test_repeats_only_reported_without_uniqueness() {
        let tree = tree_for("TTTTAATTTTAG");
        assert!(maximal_matches(&tree, b"ACTTTTGGA", 3, true).is_empty());

        let found = maximal_matches(&tree, b"ACTTTTGGA", 3, false);
        assert_eq!(
            found,
            vec![RawMatch {
                text_start: 0,
                query_start: 2,
                length: 4
            }]
        );
    }

    #[test]
    fn test_contained_matches_are_skipped() {
        let tree = tree_for("ATGCGCATCCCCTT");
        let found: Vec<_> = maximal_matches(&tree, b"GCGCCCCCTA", 4, true)
            .into_iter()
            .map(|m| (m.text_start, m.query_start, m.length))
            .collect();
        assert_eq!(found, vec![(2, 0, 4), (8, 3, 4), (8, 4, 5)]);
    }

    #[test]
    fn test_empty_query() {
        let tree = tree_for("ACGT");
        assert!(maximal_matches(&tree, b"", 1, true).is_empty());
    }
}
