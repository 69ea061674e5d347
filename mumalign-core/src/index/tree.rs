//! Arena-backed suffix tree built with Ukkonen's online algorithm.
//!
//! Nodes live in one `Vec` and refer to each other by `NodeId`. Edge labels
//! are `(start, end)` ranges into the shared text so no symbol is copied.
//! After construction every node carries the number of leaves below it and
//! the smallest suffix start among those leaves.

use super::{IndexError, IndexResult};

pub(crate) type NodeId = u32;

pub(crate) const ROOT: NodeId = 0;
const NO_NODE: NodeId = NodeId::MAX;
const OPEN_END: usize = usize::MAX;
const NO_SUFFIX: usize = usize::MAX;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) start: usize,
    /// Exclusive end of the incoming edge label.
    pub(crate) end: usize,
    pub(crate) link: NodeId,
    /// Start of the suffix spelled by the root-to-leaf path; `NO_SUFFIX` on internal nodes.
    pub(crate) suffix: usize,
    pub(crate) leaf_count: usize,
    /// Smallest suffix start among the leaves below this node.
    pub(crate) first_suffix: usize,
    children: Vec<(u32, NodeId)>,
}

impl Node {
    fn new(start: usize, end: usize, suffix: usize) -> Self {
        Self {
            start,
            end,
            link: ROOT,
            suffix,
            leaf_count: 0,
            first_suffix: usize::MAX,
            children: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.suffix != NO_SUFFIX
    }

    pub(crate) fn edge_len(&self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SuffixTree {
    text: Vec<u32>,
    nodes: Vec<Node>,
}

impl SuffixTree {
    /// Build the tree over `text`. The final symbol must occur nowhere else
    /// so that every suffix ends at a leaf.
    pub(crate) fn build(text: Vec<u32>) -> IndexResult<Self> {
        Self::build_with_limit(text, NO_NODE as usize)
    }

    /// Build with at most `max_nodes` nodes. Node ids never reach `NO_NODE`.
    fn build_with_limit(text: Vec<u32>, max_nodes: usize) -> IndexResult<Self> {
        let mut builder = Builder {
            nodes: vec![Node::new(0, 0, NO_SUFFIX)],
            max_nodes: max_nodes.min(NO_NODE as usize),
            active_node: ROOT,
            active_edge: 0,
            active_length: 0,
            remainder: 0,
        };

        for pos in 0..text.len() {
            builder.extend(&text, pos)?;
        }

        let mut nodes = builder.nodes;
        for node in nodes.iter_mut().filter(|n| n.end == OPEN_END) {
            node.end = text.len();
        }

        let mut tree = Self { text, nodes };
        tree.annotate_subtrees();
        Ok(tree)
    }

    pub(crate) fn text(&self) -> &[u32] {
        &self.text
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn child(&self, id: NodeId, symbol: u32) -> Option<NodeId> {
        self.nodes[id as usize]
            .children
            .iter()
            .find(|&&(first, _)| first == symbol)
            .map(|&(_, child)| child)
    }

    pub(crate) fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id as usize].children.iter().map(|&(_, child)| child)
    }

    /// Suffix starts of every leaf below `id`.
    pub(crate) fn leaf_suffixes(&self, id: NodeId) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.node(id).leaf_count);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current);
            if node.is_leaf() {
                out.push(node.suffix);
            } else {
                stack.extend(self.children(current));
            }
        }
        out.sort_unstable();
        out
    }

    /// Post-order pass filling `leaf_count` and `first_suffix`.
    fn annotate_subtrees(&mut self) {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id as usize].children.iter().map(|&(_, c)| c));
        }

        for &id in order.iter().rev() {
            let idx = id as usize;
            if self.nodes[idx].is_leaf() {
                self.nodes[idx].leaf_count = 1;
                self.nodes[idx].first_suffix = self.nodes[idx].suffix;
                continue;
            }

            let (count, first) = self.nodes[idx]
                .children
                .iter()
                .map(|&(_, c)| &self.nodes[c as usize])
                .fold((0, usize::MAX), |(count, first), child| {
                    (count + child.leaf_count, first.min(child.first_suffix))
                });
            self.nodes[idx].leaf_count = count;
            self.nodes[idx].first_suffix = first;
        }
    }
}

struct Builder {
    nodes: Vec<Node>,
    max_nodes: usize,
    active_node: NodeId,
    active_edge: usize,
    active_length: usize,
    remainder: usize,
}

impl Builder {
    fn push(&mut self, node: Node) -> IndexResult<NodeId> {
        let id = NodeId::try_from(self.nodes.len())
            .ok()
            .filter(|&id| (id as usize) < self.max_nodes)
            .ok_or(IndexError::TooLarge {
                max_nodes: self.max_nodes,
            })?;
        self.nodes.push(node);
        Ok(id)
    }

    fn edge_len(&self, id: NodeId, pos: usize) -> usize {
        let node = &self.nodes[id as usize];
        node.end.min(pos + 1) - node.start
    }

    fn child(&self, id: NodeId, symbol: u32) -> Option<NodeId> {
        self.nodes[id as usize]
            .children
            .iter()
            .find(|&&(first, _)| first == symbol)
            .map(|&(_, child)| child)
    }

    fn set_child(&mut self, id: NodeId, symbol: u32, child: NodeId) {
        let children = &mut self.nodes[id as usize].children;
        match children.iter_mut().find(|(first, _)| *first == symbol) {
            Some(slot) => slot.1 = child,
            None => children.push((symbol, child)),
        }
    }

    /// One Ukkonen phase: add `text[pos]` to every pending suffix.
    fn extend(&mut self, text: &[u32], pos: usize) -> IndexResult<()> {
        self.remainder += 1;
        let mut pending_link = NO_NODE;

        while self.remainder > 0 {
            if self.active_length == 0 {
                self.active_edge = pos;
            }
            let edge_symbol = text[self.active_edge];

            match self.child(self.active_node, edge_symbol) {
                None => {
                    let leaf = self.push(Node::new(pos, OPEN_END, pos + 1 - self.remainder))?;
                    self.set_child(self.active_node, edge_symbol, leaf);
                    if pending_link != NO_NODE {
                        self.nodes[pending_link as usize].link = self.active_node;
                        pending_link = NO_NODE;
                    }
                }
                Some(next) => {
                    let edge_len = self.edge_len(next, pos);
                    if self.active_length >= edge_len {
                        // walk down
                        self.active_edge += edge_len;
                        self.active_length -= edge_len;
                        self.active_node = next;
                        continue;
                    }

                    let next_start = self.nodes[next as usize].start;
                    if text[next_start + self.active_length] == text[pos] {
                        if pending_link != NO_NODE && self.active_node != ROOT {
                            self.nodes[pending_link as usize].link = self.active_node;
                        }
                        self.active_length += 1;
                        break;
                    }

                    let split = self.push(Node::new(
                        next_start,
                        next_start + self.active_length,
                        NO_SUFFIX,
                    ))?;
                    self.set_child(self.active_node, edge_symbol, split);

                    let leaf = self.push(Node::new(pos, OPEN_END, pos + 1 - self.remainder))?;
                    self.set_child(split, text[pos], leaf);

                    self.nodes[next as usize].start += self.active_length;
                    let moved_symbol = text[self.nodes[next as usize].start];
                    self.set_child(split, moved_symbol, next);

                    if pending_link != NO_NODE {
                        self.nodes[pending_link as usize].link = split;
                    }
                    pending_link = split;
                }
            }

            self.remainder -= 1;
            if self.active_node == ROOT && self.active_length > 0 {
                self.active_length -= 1;
                self.active_edge = pos + 1 - self.remainder;
            } else if self.active_node != ROOT {
                self.active_node = self.nodes[self.active_node as usize].link;
            }
        }
        Ok(())
    }
}
