//! Shared 32-way trie used by the vector and the hash map.
//!
//! A trie is a DAG of immutable nodes. A [`Branch`] stores only the children
//! that exist, in slot order, and records which slots are occupied in a 32-bit
//! bitmap; a leaf stores whatever payload the owning collection chooses
//! (a chunk of elements for the vector, a hash bucket for the map).
//!
//! Updates never touch an existing node. [`Branch::with_child`] and
//! [`Branch::without_child`] return a copy of one branch with one slot
//! changed, so rebuilding the branches along a root-to-leaf path yields a new
//! root that shares every untouched subtree with the old one.

use std::slice;

use arrayvec::ArrayVec;

use super::ReferenceCounter;

// =============================================================================
// Constants
// =============================================================================

/// Bits of the path consumed per level.
pub(crate) const BITS_PER_LEVEL: usize = 5;

/// Maximum number of children per branch (2^5 = 32).
pub(crate) const BRANCHING_FACTOR: usize = 1 << BITS_PER_LEVEL;

/// Mask selecting one slot from a shifted path.
const MASK: u64 = (BRANCHING_FACTOR - 1) as u64;

/// Upper bound on the number of branches between a root and a leaf.
///
/// A 64-bit path is exhausted after 13 levels.
pub(crate) const MAX_DEPTH: usize = 14;

/// Returns the slot selected by `path` at the level starting at bit `shift`.
#[inline]
pub(crate) const fn slot_at(path: u64, shift: usize) -> usize {
    debug_assert!(shift < u64::BITS as usize);
    ((path >> shift) & MASK) as usize
}

// =============================================================================
// Node Definition
// =============================================================================

/// A trie node: either a bitmap-compressed branch or a payload leaf.
pub(crate) enum Node<L> {
    Branch(Branch<L>),
    Leaf(L),
}

impl<L> Node<L> {
    #[inline]
    pub(crate) const fn as_branch(&self) -> Option<&Branch<L>> {
        match self {
            Self::Branch(branch) => Some(branch),
            Self::Leaf(_) => None,
        }
    }

    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

/// Interior node holding up to [`BRANCHING_FACTOR`] shared children.
///
/// `children[i]` belongs to the `i`-th set bit of `bitmap`.
pub(crate) struct Branch<L> {
    bitmap: u32,
    children: Box<[ReferenceCounter<Node<L>>]>,
}

impl<L> Clone for Branch<L> {
    fn clone(&self) -> Self {
        Self {
            bitmap: self.bitmap,
            children: self.children.clone(),
        }
    }
}

impl<L> Branch<L> {
    /// Creates a branch with exactly one occupied slot.
    pub(crate) fn single(slot: usize, child: ReferenceCounter<Node<L>>) -> Self {
        Self {
            bitmap: 1 << slot,
            children: Box::new([child]),
        }
    }

    #[inline]
    const fn bit(slot: usize) -> u32 {
        debug_assert!(slot < BRANCHING_FACTOR);
        1 << slot
    }

    /// Index into `children` for `slot`, whether or not the slot is occupied.
    #[inline]
    const fn position(&self, slot: usize) -> usize {
        (self.bitmap & (Self::bit(slot) - 1)).count_ones() as usize
    }

    #[inline]
    const fn occupies(&self, slot: usize) -> bool {
        self.bitmap & Self::bit(slot) != 0
    }

    /// Returns the child stored at `slot`, if any.
    #[inline]
    pub(crate) fn child(&self, slot: usize) -> Option<&ReferenceCounter<Node<L>>> {
        if self.occupies(slot) {
            self.children.get(self.position(slot))
        } else {
            None
        }
    }

    /// Returns a copy of this branch with `slot` set to `child`.
    ///
    /// Replaces an existing child or inserts a new one; siblings are shared.
    pub(crate) fn with_child(&self, slot: usize, child: ReferenceCounter<Node<L>>) -> Self {
        let position = self.position(slot);
        let children = if self.occupies(slot) {
            let mut children = self.children.to_vec();
            children[position] = child;
            children
        } else {
            let mut children = Vec::with_capacity(self.children.len() + 1);
            children.extend_from_slice(&self.children[..position]);
            children.push(child);
            children.extend_from_slice(&self.children[position..]);
            children
        };
        Self {
            bitmap: self.bitmap | Self::bit(slot),
            children: children.into_boxed_slice(),
        }
    }

    /// Returns a copy of this branch with `slot` emptied.
    pub(crate) fn without_child(&self, slot: usize) -> Self {
        if !self.occupies(slot) {
            return self.clone();
        }
        let position = self.position(slot);
        let children: Vec<_> = self.children[..position]
            .iter()
            .chain(&self.children[position + 1..])
            .cloned()
            .collect();
        Self {
            bitmap: self.bitmap & !Self::bit(slot),
            children: children.into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.bitmap == 0
    }

    /// Children in ascending slot order.
    #[inline]
    pub(crate) fn children(&self) -> &[ReferenceCounter<Node<L>>] {
        &self.children
    }

    /// Returns the only child when exactly one slot is occupied.
    #[inline]
    pub(crate) fn sole_child(&self) -> Option<&ReferenceCounter<Node<L>>> {
        match &*self.children {
            [child] => Some(child),
            _ => None,
        }
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Follows `slots` from `root` until a leaf is reached.
///
/// Returns `None` when a slot along the way is empty or the slots run out
/// before a leaf is found.
pub(crate) fn lookup<L>(root: &Node<L>, slots: impl IntoIterator<Item = usize>) -> Option<&L> {
    let mut node = root;
    let mut slots = slots.into_iter();
    loop {
        match node {
            Node::Leaf(leaf) => return Some(leaf),
            Node::Branch(branch) => node = branch.child(slots.next()?)?,
        }
    }
}

/// Depth-first iterator over the leaves of a trie, in slot order.
pub(crate) struct Leaves<'a, L> {
    pending: Option<&'a L>,
    stack: ArrayVec<slice::Iter<'a, ReferenceCounter<Node<L>>>, MAX_DEPTH>,
}

impl<'a, L> Leaves<'a, L> {
    pub(crate) fn new(root: Option<&'a Node<L>>) -> Self {
        let mut leaves = Self {
            pending: None,
            stack: ArrayVec::new(),
        };
        match root {
            Some(Node::Leaf(leaf)) => leaves.pending = Some(leaf),
            Some(Node::Branch(branch)) => leaves.stack.push(branch.children.iter()),
            None => {}
        }
        leaves
    }
}

impl<L> Clone for Leaves<'_, L> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending,
            stack: self.stack.clone(),
        }
    }
}

impl<'a, L> Iterator for Leaves<'a, L> {
    type Item = &'a L;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(leaf) = self.pending.take() {
            return Some(leaf);
        }
        loop {
            let Some(child) = self.stack.last_mut()?.next() else {
                self.stack.pop();
                continue;
            };
            match &**child {
                Node::Leaf(leaf) => return Some(leaf),
                Node::Branch(branch) => self.stack.push(branch.children.iter()),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
