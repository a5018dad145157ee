// Copyright 2025 Stockyard Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Arena-backed red-black tree
//!
//! [`RedBlackTree`] is an ordered map over unique keys. Nodes live in an
//! [`Arena`] slot vector and reference each other through [`NodeId`]
//! handles, so the tree is a single allocation pool: deep copy is a clone
//! of the slot vector and teardown is a plain drop, with no pointer
//! chasing and no recursion over owned links.
//!
//! - `insert` / `remove` rebalance with the classic red-black recoloring
//!   and rotation rules; duplicates are rejected, not updated
//! - `get` / `get_mut` / `contains` are exact-match lookups; the key is
//!   never reachable mutably, so an in-place value edit cannot disturb
//!   the ordering
//! - `iter` walks in ascending key order with an explicit stack
//! - `is_valid` and `level_order` are the structural inspection surface;
//!   no node handle or raw link ever escapes the tree

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::index::arena::{Arena, NodeId};

/// Node color. Nil positions (absent children) count as black.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The position carrying the extra black during remove fix-up: either a
/// live node, or an empty child slot remembered by its parent and side.
#[derive(Clone, Copy, Debug)]
enum Deficit {
    At(NodeId),
    Gap { parent: NodeId, side: Side },
}

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// One node of a breadth-first tree snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LevelEntry<'a, K, V> {
    /// Distance from the root; the root is depth 0.
    pub depth: usize,
    pub key: &'a K,
    pub value: &'a V,
    pub color: Color,
}

/// Ordered map over unique keys, balanced as a red-black tree.
///
/// Keys carry the ordering (`K: Ord`), values carry the payload. All
/// nodes live in an internal arena; ids are stable across unrelated
/// inserts and removes, and removed slots are reused.
#[derive(Debug, Clone)]
pub struct RedBlackTree<K, V> {
    arena: Arena<Node<K, V>>,
    root: Option<NodeId>,
    len: usize,
}

impl<K, V> RedBlackTree<K, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Create an empty tree with pre-allocated node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the tree holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every entry and reset to the empty state.
    ///
    /// Safe on an already empty tree; the tree is reusable afterwards.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Height of the tree: 0 when empty, 1 for a single node, otherwise
    /// one more than the taller child subtree. Recomputed on every call.
    pub fn height(&self) -> usize {
        self.height_below(self.root)
    }

    fn height_below(&self, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => {
                let n = self.node(id);
                1 + self.height_below(n.left).max(self.height_below(n.right))
            }
        }
    }

    /// In-order iterator over `(&key, &value)` pairs, ascending by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Breadth-first snapshot of the whole tree, root first.
    ///
    /// Each entry carries its depth, key, value, and color. This is the
    /// debug and display surface; the tree never hands out node handles.
    pub fn level_order(&self) -> Vec<LevelEntry<'_, K, V>> {
        let mut out = Vec::with_capacity(self.len);
        let mut queue = VecDeque::new();
        if let Some(root) = self.root {
            queue.push_back((root, 0usize));
        }
        while let Some((id, depth)) = queue.pop_front() {
            let node = self.node(id);
            out.push(LevelEntry {
                depth,
                key: &node.key,
                value: &node.value,
                color: node.color,
            });
            if let Some(left) = node.left {
                queue.push_back((left, depth + 1));
            }
            if let Some(right) = node.right {
                queue.push_back((right, depth + 1));
            }
        }
        out
    }

    // ========================================================================
    // Node plumbing
    // ========================================================================

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, V> {
        self.arena.get(id)
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.arena.get_mut(id)
    }

    /// Color of a possibly absent node; nil counts as black.
    #[inline]
    fn color(&self, node: Option<NodeId>) -> Color {
        match node {
            Some(id) => self.node(id).color,
            None => Color::Black,
        }
    }

    #[inline]
    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.node(id);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Which child slot of `parent` holds `id`.
    fn side_of(&self, id: NodeId, parent: NodeId) -> Side {
        if self.node(parent).left == Some(id) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Rotate at `x` so that `x` sinks toward the given side and its
    /// opposite child rises into its place.
    fn rotate(&mut self, x: NodeId, toward: Side) {
        let away = toward.opposite();
        let y = self
            .child(x, away)
            .expect("rotation needs a child on the rising side");

        // y's subtree on the sinking side changes parent
        let moved = self.child(y, toward);
        self.set_child(x, away, moved);
        if let Some(m) = moved {
            self.node_mut(m).parent = Some(x);
        }

        // y replaces x under x's parent (or as root)
        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        match parent {
            None => self.root = Some(y),
            Some(p) => {
                let side = self.side_of(x, p);
                self.set_child(p, side, Some(y));
            }
        }

        self.set_child(y, toward, Some(x));
        self.node_mut(x).parent = Some(y);
    }

    /// Rightmost node of the subtree rooted at `id`.
    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// In-order predecessor: the rightmost node of the left subtree when
    /// there is one, otherwise the nearest ancestor whose right subtree
    /// contains `id`. `None` for the minimum.
    fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent;
        }
        None
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Insert a new entry. Returns `false` and leaves the tree untouched
    /// when the key is already present; the existing value is kept, not
    /// updated.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            match key.cmp(&node.key) {
                Ordering::Less => {
                    parent = Some(id);
                    side = Side::Left;
                    cursor = node.left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    side = Side::Right;
                    cursor = node.right;
                }
                Ordering::Equal => return false,
            }
        }

        let id = self.arena.alloc(Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(id),
            Some(p) => self.set_child(p, side, Some(id)),
        }
        self.len += 1;
        self.insert_fixup(id);
        true
    }

    /// Remove the entry with this key. Returns `false` when the key is
    /// absent; the tree is unchanged in that case.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.find(key) {
            Some(id) => {
                self.remove_at(id);
                true
            }
            None => false,
        }
    }

    /// True when an entry with this key exists.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Borrow the value stored under this key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.node(id).value)
    }

    /// Mutably borrow the value stored under this key.
    ///
    /// The key itself is not reachable through the returned handle, so an
    /// in-place edit cannot change the entry's position.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;
        Some(&mut self.node_mut(id).value)
    }

    /// Check every structural invariant:
    ///
    /// - the root is black and has no parent
    /// - no red node has a red child
    /// - every root-to-nil path crosses the same number of black nodes
    /// - in-order keys are strictly ascending
    /// - parent and child links agree, and the node count matches both
    ///   `len` and the arena's live-slot count
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root else {
            return self.len == 0 && self.arena.is_empty();
        };
        let root_node = self.node(root);
        if root_node.parent.is_some() || root_node.color != Color::Black {
            return false;
        }
        if self.arena.live() != self.len {
            return false;
        }

        let mut seen = 0usize;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            seen += 1;
            let node = self.node(id);
            for child in [node.left, node.right] {
                if let Some(c) = child {
                    if self.node(c).parent != Some(id) {
                        return false;
                    }
                    if node.color == Color::Red && self.node(c).color == Color::Red {
                        return false;
                    }
                    stack.push(c);
                }
            }
        }
        if seen != self.len {
            return false;
        }

        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(p) = prev {
                if p >= key {
                    return false;
                }
            }
            prev = Some(key);
        }

        self.black_height(Some(root)).is_some()
    }

    /// Black node count from here down to nil, or `None` when the two
    /// child subtrees disagree anywhere below.
    fn black_height(&self, node: Option<NodeId>) -> Option<usize> {
        match node {
            None => Some(1),
            Some(id) => {
                let n = self.node(id);
                let left = self.black_height(n.left)?;
                let right = self.black_height(n.right)?;
                if left != right {
                    return None;
                }
                Some(left + usize::from(n.color == Color::Black))
            }
        }
    }

    fn find(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    // ========================================================================
    // Rebalancing
    // ========================================================================

    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.node(node).parent {
            if self.node(parent).color == Color::Black {
                break;
            }
            // parent is red, so it is not the root and the grandparent
            // exists and is black
            let grand = self
                .node(parent)
                .parent
                .expect("red node is never the root");
            let pside = self.side_of(parent, grand);
            let uncle = self.child(grand, pside.opposite());

            if self.color(uncle) == Color::Red {
                // red uncle: push the black level down from the
                // grandparent and continue from there
                self.node_mut(parent).color = Color::Black;
                if let Some(u) = uncle {
                    self.node_mut(u).color = Color::Black;
                }
                self.node_mut(grand).color = Color::Red;
                node = grand;
            } else {
                // black uncle: straighten an inner case into the outer
                // case, then one rotation at the grandparent finishes
                let outer = if self.side_of(node, parent) != pside {
                    self.rotate(parent, pside);
                    parent
                } else {
                    node
                };
                let new_parent = self
                    .node(outer)
                    .parent
                    .expect("outer node kept a parent through the rotation");
                self.node_mut(new_parent).color = Color::Black;
                self.node_mut(grand).color = Color::Red;
                self.rotate(grand, pside.opposite());
                break;
            }
        }
        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }
    }

    fn remove_at(&mut self, mut target: NodeId) {
        // Two children: move the in-order predecessor's payload into the
        // target and splice the predecessor node instead. It sits at the
        // right edge of the left subtree and has at most one child.
        let node = self.node(target);
        if node.left.is_some() && node.right.is_some() {
            let pred = self
                .predecessor(target)
                .expect("node with a left child has a predecessor");
            let (t, p) = self.arena.get2_mut(target, pred);
            std::mem::swap(&mut t.key, &mut p.key);
            std::mem::swap(&mut t.value, &mut p.value);
            target = pred;
        }

        let node = self.node(target);
        let child = node.left.or(node.right);
        let parent = node.parent;
        let removed_color = node.color;

        // Splice the target out of the link structure. Its slot stays
        // live until fix-up is done with the neighborhood.
        let deficit = match parent {
            None => {
                self.root = child;
                child.map(Deficit::At)
            }
            Some(p) => {
                let side = self.side_of(target, p);
                self.set_child(p, side, child);
                Some(match child {
                    Some(c) => Deficit::At(c),
                    None => Deficit::Gap { parent: p, side },
                })
            }
        };
        if let Some(c) = child {
            self.node_mut(c).parent = parent;
        }

        // Splicing out a red node cannot change any black count
        if removed_color == Color::Black {
            if let Some(deficit) = deficit {
                self.remove_fixup(deficit);
            }
        }

        self.arena.release(target);
        self.len -= 1;
    }

    /// Restore the black-height invariant after a black node was spliced
    /// out. `deficit` is the position one black short.
    fn remove_fixup(&mut self, mut deficit: Deficit) {
        loop {
            let (parent, side) = match deficit {
                Deficit::At(n) => {
                    if Some(n) == self.root || self.node(n).color == Color::Red {
                        // absorbing the extra black here ends the repair
                        self.node_mut(n).color = Color::Black;
                        return;
                    }
                    let p = self.node(n).parent.expect("non-root node has a parent");
                    (p, self.side_of(n, p))
                }
                Deficit::Gap { parent, side } => (parent, side),
            };

            // The deficient subtree was one black deep at minimum, so a
            // sibling must exist in a tree that was valid before
            let Some(sibling) = self.child(parent, side.opposite()) else {
                return;
            };

            if self.node(sibling).color == Color::Red {
                // red sibling: rotate it above the parent, then retry
                // against the black sibling underneath
                self.node_mut(sibling).color = Color::Black;
                self.node_mut(parent).color = Color::Red;
                self.rotate(parent, side);
                continue;
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());

            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                // both nephews black: drop one black from the sibling
                // side and move the deficit to the parent
                self.node_mut(sibling).color = Color::Red;
                deficit = Deficit::At(parent);
                continue;
            }

            let sibling = if self.color(far) == Color::Black {
                // red near nephew only: surface the red on the far side
                let near = near.expect("near nephew is red");
                self.node_mut(near).color = Color::Black;
                self.node_mut(sibling).color = Color::Red;
                self.rotate(sibling, side.opposite());
                near
            } else {
                sibling
            };

            // red far nephew: the terminal rotation rebuilds the missing
            // black level on the deficient side
            let far = self
                .child(sibling, side.opposite())
                .expect("far nephew is red");
            self.node_mut(sibling).color = self.node(parent).color;
            self.node_mut(parent).color = Color::Black;
            self.node_mut(far).color = Color::Black;
            self.rotate(parent, side);
            return;
        }
    }
}

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a RedBlackTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator. Carries its own descent stack; it borrows the tree
/// and holds no state inside it, so a fresh call to [`RedBlackTree::iter`]
/// always restarts from the smallest key.
pub struct Iter<'a, K, V> {
    tree: &'a RedBlackTree<K, V>,
    stack: Vec<NodeId>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a RedBlackTree<K, V>) -> Self {
        let mut iter = Iter {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<NodeId>) {
        while let Some(id) = node {
            self.stack.push(id);
            node = self.tree.node(id).left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = tree.node(id);
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}
