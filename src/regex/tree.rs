//! The threaded syntax tree the De Simone/Aho construction walks.
//!
//! Grounded in `examples/original_source/tools/regex.py`'s `Node` and
//! `thread_tree`. The original links nodes in place with a Python
//! attribute (`node.right`); spec §9 calls out that an in-place cyclic
//! graph doesn't translate cleanly to ownership, and resolves it with an
//! arena of nodes addressed by index. `NodeId` is that index.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub usize);

/// The unique sentinel marking "end of the pattern" in the threaded tree.
pub(crate) const END_ID: NodeId = NodeId(0);

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    End,
    Terminal(char),
    /// `&`, the epsilon terminal: consumes no input, never appears in any
    /// DFA-state composition. See DESIGN.md Open Question #2.
    Epsilon,
    /// Unary: uses `left`; `right` starts empty and is filled in by
    /// threading with the in-order successor (or END).
    Star,
    Opt,
    /// Binary: `left` and `right` are both real operands, set at parse
    /// time; threading never touches them.
    Concat,
    Alt,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub kind: Kind,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// An arena of nodes, indexed by [`NodeId`]. Node 0 is always the `END`
/// sentinel.
#[derive(Clone, Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: Kind::End,
                left: None,
                right: None,
            }],
        }
    }

    pub fn push(&mut self, kind: Kind, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, left, right });
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Threads the tree rooted at `root`: an in-order traversal using an
    /// explicit stack, giving every leaf and unary node (whose `right`
    /// starts as `None`) a right pointer to the nearest still-open
    /// ancestor, or [`END_ID`] if none remains. Binary nodes already have
    /// a real right child and are left untouched.
    pub fn thread(&mut self, root: NodeId) {
        let mut stack: Vec<NodeId> = Vec::new();
        let mut current = Some(root);
        loop {
            if let Some(node) = current {
                stack.push(node);
                current = self.get(node).left;
            } else if let Some(node) = stack.pop() {
                if self.get(node).right.is_none() {
                    let successor = stack.last().copied().unwrap_or(END_ID);
                    self.get_mut(node).right = Some(successor);
                    current = None;
                } else {
                    current = self.get(node).right;
                }
            } else {
                break;
            }
        }
    }
}

/// Memoizes the `down`/`up` walks, keyed by `(node, visited set)` as
/// spec §9 requires, so repeated queries during DFA construction don't
/// re-walk shared subtrees. A fresh `Memo` must be used per compilation:
/// it is not meant to outlive one `compile` call.
#[derive(Default)]
pub(crate) struct Memo {
    down: std::collections::HashMap<(NodeId, Vec<NodeId>), std::collections::BTreeSet<NodeId>>,
    up: std::collections::HashMap<(NodeId, Vec<NodeId>), std::collections::BTreeSet<NodeId>>,
}

fn visited_key(visited: &HashSet<NodeId>) -> Vec<NodeId> {
    let mut v: Vec<NodeId> = visited.iter().copied().collect();
    v.sort_unstable();
    v
}

/// `down(n)`: the set of leaf/END nodes reachable by descending into `n`
/// without consuming a symbol yet. Operators recurse per the table in
/// spec §4.4; a leaf/END returns `{n}`; a repeated visit to an operator
/// already on the current descent path returns `∅` (a leaf repeat returns
/// `{n}`) to stop `*`/`?` cycles.
pub(crate) fn down(
    tree: &Tree,
    node: NodeId,
    visited: &HashSet<NodeId>,
    memo: &mut Memo,
) -> std::collections::BTreeSet<NodeId> {
    let key = (node, visited_key(visited));
    if let Some(cached) = memo.down.get(&key) {
        return cached.clone();
    }
    let is_leaf = matches!(tree.get(node).kind, Kind::Terminal(_) | Kind::End | Kind::Epsilon);
    let result = if visited.contains(&node) {
        if is_leaf {
            std::collections::BTreeSet::from([node])
        } else {
            std::collections::BTreeSet::new()
        }
    } else {
        let mut next_visited = visited.clone();
        next_visited.insert(node);
        match &tree.get(node).kind {
            Kind::Alt => {
                let l = down(tree, tree.get(node).left.unwrap(), &next_visited, memo);
                let r = down(tree, tree.get(node).right.unwrap(), &next_visited, memo);
                l.union(&r).copied().collect()
            }
            Kind::Concat => down(tree, tree.get(node).left.unwrap(), &next_visited, memo),
            Kind::Star | Kind::Opt => {
                let l = down(tree, tree.get(node).left.unwrap(), &next_visited, memo);
                let r = up(tree, tree.get(node).right.unwrap(), &next_visited, memo);
                l.union(&r).copied().collect()
            }
            Kind::Epsilon => up(tree, tree.get(node).right.unwrap(), &next_visited, memo),
            Kind::Terminal(_) | Kind::End => std::collections::BTreeSet::from([node]),
        }
    };
    memo.down.insert(key, result.clone());
    result
}

/// `up(n)`: the set of leaf/END nodes reachable after `n` has already
/// matched, i.e. what can follow it. Per the table in spec §4.4.
pub(crate) fn up(
    tree: &Tree,
    node: NodeId,
    visited: &HashSet<NodeId>,
    memo: &mut Memo,
) -> std::collections::BTreeSet<NodeId> {
    let key = (node, visited_key(visited));
    if let Some(cached) = memo.up.get(&key) {
        return cached.clone();
    }
    let result = match &tree.get(node).kind {
        Kind::Alt => {
            let mut cursor = tree.get(node).right.unwrap();
            loop {
                match tree.get(cursor).kind {
                    Kind::Concat | Kind::Alt => cursor = tree.get(cursor).right.unwrap(),
                    _ => break,
                }
            }
            up(tree, tree.get(cursor).right.unwrap(), visited, memo)
        }
        Kind::Concat => down(tree, tree.get(node).right.unwrap(), visited, memo),
        Kind::Star => {
            let l = down(tree, tree.get(node).left.unwrap(), visited, memo);
            let r = up(tree, tree.get(node).right.unwrap(), visited, memo);
            l.union(&r).copied().collect()
        }
        Kind::Opt | Kind::Terminal(_) | Kind::Epsilon => {
            up(tree, tree.get(node).right.unwrap(), visited, memo)
        }
        Kind::End => std::collections::BTreeSet::from([node]),
    };
    memo.up.insert(key, result.clone());
    result
}
