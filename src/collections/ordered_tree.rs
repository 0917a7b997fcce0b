//! Red-black tree map keyed by any totally ordered key.
//!
//! Nodes live in a contiguous arena and refer to each other by index.
//! `NIL` stands in for the leaf sentinel: it is always black and never
//! dereferenced, so no shared mutable node is needed.
//!
//! # Example
//!
//! ```
//! use pdfgen_core::collections::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! tree.add(3, "c").unwrap();
//! tree.add(1, "a").unwrap();
//! tree.set(2, "b");
//!
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![1, 2, 3]);
//! assert_eq!(tree.min_key().unwrap(), &1);
//! ```

use crate::error::{Error, Result};
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;

const NIL: usize = usize::MAX;

/// Node colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node (leaves and the root are always black)
    Black,
}

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: usize,
    right: usize,
    parent: usize,
    color: Color,
}

/// Ordered map backed by a red-black tree.
#[derive(Clone)]
pub struct OrderedTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: usize,
    /// Node touched by the most recent successful lookup. Reset on every
    /// structural mutation.
    last_found: Cell<usize>,
}

impl<K, V> Default for OrderedTree<K, V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
            last_found: Cell::new(NIL),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> OrderedTree<K, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
        self.last_found.set(NIL);
    }

    /// Smallest key.
    ///
    /// Fails with [`Error::EmptyContainer`] on an empty tree.
    pub fn min_key(&self) -> Result<&K> {
        let idx = self.min_index()?;
        Ok(&self.nodes[idx].key)
    }

    /// Largest key.
    ///
    /// Fails with [`Error::EmptyContainer`] on an empty tree.
    pub fn max_key(&self) -> Result<&K> {
        let idx = self.max_index()?;
        Ok(&self.nodes[idx].key)
    }

    /// Value stored under the smallest key.
    pub fn min_value(&self) -> Result<&V> {
        let idx = self.min_index()?;
        Ok(&self.nodes[idx].value)
    }

    /// Value stored under the largest key.
    pub fn max_value(&self) -> Result<&V> {
        let idx = self.max_index()?;
        Ok(&self.nodes[idx].value)
    }

    /// Remove and return the entry with the smallest key.
    pub fn remove_min(&mut self) -> Result<(K, V)> {
        let idx = self.min_index()?;
        Ok(self.delete_node(idx))
    }

    /// Remove and return the entry with the largest key.
    pub fn remove_max(&mut self) -> Result<(K, V)> {
        let idx = self.max_index()?;
        Ok(self.delete_node(idx))
    }

    /// Ascending iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(self, true)
    }

    /// Descending iterator over `(key, value)` pairs.
    pub fn iter_desc(&self) -> Entries<'_, K, V> {
        Entries::new(self, false)
    }

    /// Enumerator in the requested direction.
    pub fn entries(&self, ascending: bool) -> Entries<'_, K, V> {
        Entries::new(self, ascending)
    }

    /// Ascending iterator over keys.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        KeysValues { fwd: self.iter(), back: self.iter_desc(), left: self.len() }.map(|(k, _)| k)
    }

    /// Ascending iterator over values.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        KeysValues { fwd: self.iter(), back: self.iter_desc(), left: self.len() }.map(|(_, v)| v)
    }

    /// Check the red-black invariants and return the black height.
    ///
    /// Fails with [`Error::InvalidState`] describing the first violation.
    pub fn verify(&self) -> Result<usize>
    where
        K: Ord,
    {
        if self.color(self.root) != Color::Black {
            return Err(Error::InvalidState("root is red".to_string()));
        }
        if self.root != NIL && self.nodes[self.root].parent != NIL {
            return Err(Error::InvalidState("root has a parent".to_string()));
        }
        let (height, count) = self.verify_subtree(self.root)?;
        if count != self.nodes.len() {
            return Err(Error::InvalidState(format!(
                "{} reachable nodes, {} allocated",
                count,
                self.nodes.len()
            )));
        }
        Ok(height)
    }

    fn verify_subtree(&self, n: usize) -> Result<(usize, usize)>
    where
        K: Ord,
    {
        if n == NIL {
            return Ok((1, 0));
        }
        let node = &self.nodes[n];
        for child in [node.left, node.right] {
            if child == NIL {
                continue;
            }
            if self.nodes[child].parent != n {
                return Err(Error::InvalidState("broken parent link".to_string()));
            }
            if node.color == Color::Red && self.nodes[child].color == Color::Red {
                return Err(Error::InvalidState("red node with red child".to_string()));
            }
        }
        if node.left != NIL && self.nodes[node.left].key >= node.key {
            return Err(Error::InvalidState("left child out of order".to_string()));
        }
        if node.right != NIL && self.nodes[node.right].key <= node.key {
            return Err(Error::InvalidState("right child out of order".to_string()));
        }
        let (lh, lc) = self.verify_subtree(node.left)?;
        let (rh, rc) = self.verify_subtree(node.right)?;
        if lh != rh {
            return Err(Error::InvalidState("unequal black height".to_string()));
        }
        let own = usize::from(node.color == Color::Black);
        Ok((lh + own, lc + rc + 1))
    }

    fn min_index(&self) -> Result<usize> {
        if self.root == NIL {
            return Err(Error::EmptyContainer);
        }
        let idx = self.leftmost(self.root);
        self.last_found.set(idx);
        Ok(idx)
    }

    fn max_index(&self) -> Result<usize> {
        if self.root == NIL {
            return Err(Error::EmptyContainer);
        }
        let idx = self.rightmost(self.root);
        self.last_found.set(idx);
        Ok(idx)
    }

    fn leftmost(&self, mut n: usize) -> usize {
        while self.nodes[n].left != NIL {
            n = self.nodes[n].left;
        }
        n
    }

    fn rightmost(&self, mut n: usize) -> usize {
        while self.nodes[n].right != NIL {
            n = self.nodes[n].right;
        }
        n
    }

    #[inline]
    fn color(&self, n: usize) -> Color {
        if n == NIL {
            Color::Black
        } else {
            self.nodes[n].color
        }
    }

    #[inline]
    fn set_color(&mut self, n: usize, color: Color) {
        if n != NIL {
            self.nodes[n].color = color;
        }
    }

    #[inline]
    fn left(&self, n: usize) -> usize {
        self.nodes[n].left
    }

    #[inline]
    fn right(&self, n: usize) -> usize {
        self.nodes[n].right
    }

    #[inline]
    fn parent(&self, n: usize) -> usize {
        self.nodes[n].parent
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.right(x);
        let y_left = self.left(y);
        self.nodes[x].right = y_left;
        if y_left != NIL {
            self.nodes[y_left].parent = x;
        }
        let xp = self.parent(x);
        self.nodes[y].parent = xp;
        if xp == NIL {
            self.root = y;
        } else if x == self.left(xp) {
            self.nodes[xp].left = y;
        } else {
            self.nodes[xp].right = y;
        }
        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, x: usize) {
        let y = self.left(x);
        let y_right = self.right(y);
        self.nodes[x].left = y_right;
        if y_right != NIL {
            self.nodes[y_right].parent = x;
        }
        let xp = self.parent(x);
        self.nodes[y].parent = xp;
        if xp == NIL {
            self.root = y;
        } else if x == self.right(xp) {
            self.nodes[xp].right = y;
        } else {
            self.nodes[xp].left = y;
        }
        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    /// Link a new red leaf under `parent` and rebalance.
    fn attach(&mut self, parent: usize, side: Ordering, key: K, value: V) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            left: NIL,
            right: NIL,
            parent,
            color: Color::Red,
        });
        if parent == NIL {
            self.root = idx;
        } else if side == Ordering::Greater {
            self.nodes[parent].right = idx;
        } else {
            self.nodes[parent].left = idx;
        }
        self.restore_after_insert(idx);
        self.last_found.set(idx);
        idx
    }

    fn restore_after_insert(&mut self, mut x: usize) {
        while x != self.root && self.color(self.parent(x)) == Color::Red {
            let p = self.parent(x);
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    x = g;
                } else {
                    if x == self.right(p) {
                        x = p;
                        self.rotate_left(x);
                    }
                    let p = self.parent(x);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    x = g;
                } else {
                    if x == self.left(p) {
                        x = p;
                        self.rotate_right(x);
                    }
                    let p = self.parent(x);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Unlink node `z` and return its entry.
    ///
    /// A node with two children takes over its successor's entry; the
    /// successor is spliced out instead.
    fn delete_node(&mut self, z: usize) -> (K, V) {
        let y = if self.left(z) == NIL || self.right(z) == NIL {
            z
        } else {
            self.leftmost(self.right(z))
        };

        let x = if self.left(y) != NIL {
            self.left(y)
        } else {
            self.right(y)
        };
        let x_parent = self.parent(y);
        if x != NIL {
            self.nodes[x].parent = x_parent;
        }
        if x_parent == NIL {
            self.root = x;
        } else if y == self.left(x_parent) {
            self.nodes[x_parent].left = x;
        } else {
            self.nodes[x_parent].right = x;
        }

        if y != z {
            let (lo, hi) = if y < z { (y, z) } else { (z, y) };
            let (head, tail) = self.nodes.split_at_mut(hi);
            let a = &mut head[lo];
            let b = &mut tail[0];
            std::mem::swap(&mut a.key, &mut b.key);
            std::mem::swap(&mut a.value, &mut b.value);
        }

        if self.color(y) == Color::Black {
            self.restore_after_delete(x, x_parent);
        }

        self.last_found.set(NIL);
        let removed = self.release_slot(y);
        (removed.key, removed.value)
    }

    fn restore_after_delete(&mut self, mut x: usize, mut xp: usize) {
        while x != self.root && self.color(x) == Color::Black {
            if x == self.left(xp) {
                let mut w = self.right(xp);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(xp, Color::Red);
                    self.rotate_left(xp);
                    w = self.right(xp);
                }
                if self.color(self.left(w)) == Color::Black
                    && self.color(self.right(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = xp;
                    xp = self.parent(x);
                } else {
                    if self.color(self.right(w)) == Color::Black {
                        let wl = self.left(w);
                        self.set_color(wl, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(xp);
                    }
                    let pc = self.color(xp);
                    self.set_color(w, pc);
                    self.set_color(xp, Color::Black);
                    let wr = self.right(w);
                    self.set_color(wr, Color::Black);
                    self.rotate_left(xp);
                    x = self.root;
                    xp = NIL;
                }
            } else {
                let mut w = self.left(xp);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(xp, Color::Red);
                    self.rotate_right(xp);
                    w = self.left(xp);
                }
                if self.color(self.right(w)) == Color::Black
                    && self.color(self.left(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = xp;
                    xp = self.parent(x);
                } else {
                    if self.color(self.left(w)) == Color::Black {
                        let wr = self.right(w);
                        self.set_color(wr, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(xp);
                    }
                    let pc = self.color(xp);
                    self.set_color(w, pc);
                    self.set_color(xp, Color::Black);
                    let wl = self.left(w);
                    self.set_color(wl, Color::Black);
                    self.rotate_right(xp);
                    x = self.root;
                    xp = NIL;
                }
            }
        }
        self.set_color(x, Color::Black);
    }

    /// Remove a detached slot from the arena, moving the last node into
    /// the hole and repointing its neighbours.
    fn release_slot(&mut self, slot: usize) -> Node<K, V> {
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(slot);
        if slot != last {
            let (parent, left, right) = {
                let moved = &self.nodes[slot];
                (moved.parent, moved.left, moved.right)
            };
            if parent == NIL {
                self.root = slot;
            } else if self.nodes[parent].left == last {
                self.nodes[parent].left = slot;
            } else {
                self.nodes[parent].right = slot;
            }
            if left != NIL {
                self.nodes[left].parent = slot;
            }
            if right != NIL {
                self.nodes[right].parent = slot;
            }
        }
        removed
    }
}

impl<K: Ord, V> OrderedTree<K, V> {
    /// Descend from the root. `Ok` holds the matching node, `Err` the
    /// parent a new key would hang from and on which side.
    fn search(&self, key: &K) -> std::result::Result<usize, (usize, Ordering)> {
        let mut parent = NIL;
        let mut side = Ordering::Equal;
        let mut n = self.root;
        while n != NIL {
            match key.cmp(&self.nodes[n].key) {
                Ordering::Equal => return Ok(n),
                Ordering::Less => {
                    parent = n;
                    side = Ordering::Less;
                    n = self.nodes[n].left;
                },
                Ordering::Greater => {
                    parent = n;
                    side = Ordering::Greater;
                    n = self.nodes[n].right;
                },
            }
        }
        Err((parent, side))
    }

    fn find(&self, key: &K) -> Option<usize> {
        let cached = self.last_found.get();
        if cached != NIL && cached < self.nodes.len() && self.nodes[cached].key == *key {
            return Some(cached);
        }
        let idx = self.search(key).ok()?;
        self.last_found.set(idx);
        Some(idx)
    }

    /// Insert a new entry.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already present;
    /// the tree is left unchanged in that case.
    pub fn add(&mut self, key: K, value: V) -> Result<()>
    where
        K: fmt::Debug,
    {
        match self.search(&key) {
            Ok(_) => Err(Error::DuplicateKey(format!("{:?}", key))),
            Err((parent, side)) => {
                self.attach(parent, side, key, value);
                Ok(())
            },
        }
    }

    /// Insert or update. Returns the previous value when the key existed.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Ok(idx) => {
                self.last_found.set(idx);
                Some(std::mem::replace(&mut self.nodes[idx].value, value))
            },
            Err((parent, side)) => {
                self.attach(parent, side, key, value);
                None
            },
        }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|idx| &self.nodes[idx].value)
    }

    /// Mutable value for `key`, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.nodes[idx].value)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.find(key)?;
        Some(self.delete_node(idx).1)
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order enumerator over a tree.
///
/// Walks lazily with an explicit stack holding the unvisited spine. It can
/// be used as an [`Iterator`] or driven by hand with [`Entries::move_next`]
/// and [`Entries::current`].
pub struct Entries<'a, K, V> {
    tree: &'a OrderedTree<K, V>,
    stack: Vec<usize>,
    ascending: bool,
    current: usize,
    remaining: usize,
}

impl<'a, K, V> Entries<'a, K, V> {
    fn new(tree: &'a OrderedTree<K, V>, ascending: bool) -> Self {
        let mut entries = Self {
            tree,
            stack: Vec::new(),
            ascending,
            current: NIL,
            remaining: tree.len(),
        };
        entries.push_spine(tree.root);
        entries
    }

    fn push_spine(&mut self, mut n: usize) {
        while n != NIL {
            self.stack.push(n);
            n = if self.ascending {
                self.tree.nodes[n].left
            } else {
                self.tree.nodes[n].right
            };
        }
    }

    /// Whether another entry remains.
    pub fn has_more(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Advance to the next entry. Returns `false` once exhausted.
    pub fn move_next(&mut self) -> bool {
        match self.stack.pop() {
            Some(n) => {
                let next = if self.ascending {
                    self.tree.nodes[n].right
                } else {
                    self.tree.nodes[n].left
                };
                self.push_spine(next);
                self.current = n;
                self.remaining -= 1;
                true
            },
            None => {
                self.current = NIL;
                false
            },
        }
    }

    /// Entry at the cursor.
    ///
    /// Fails with [`Error::InvalidState`] before the first
    /// [`move_next`](Self::move_next) or after exhaustion.
    pub fn current(&self) -> Result<(&'a K, &'a V)> {
        if self.current == NIL {
            return Err(Error::InvalidState(
                "enumerator is not positioned on an entry".to_string(),
            ));
        }
        let node = &self.tree.nodes[self.current];
        Ok((&node.key, &node.value))
    }

    /// Rewind to before the first entry.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = NIL;
        self.remaining = self.tree.len();
        self.push_spine(self.tree.root);
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.move_next() {
            self.current().ok()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

struct KeysValues<'a, K, V> {
    fwd: Entries<'a, K, V>,
    back: Entries<'a, K, V>,
    left: usize,
}

impl<'a, K, V> Iterator for KeysValues<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        self.fwd.next()
    }
}

impl<K, V> DoubleEndedIterator for KeysValues<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        self.back.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut tree = OrderedTree::new();
        tree.add(5, "five").unwrap();
        tree.add(2, "two").unwrap();
        tree.add(8, "eight").unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get(&2), Some(&"two"));
        assert_eq!(tree.get(&7), None);
        tree.verify().unwrap();
    }

    #[test]
    fn test_add_duplicate_leaves_tree_unchanged() {
        let mut tree = OrderedTree::new();
        tree.add(1, 'a').unwrap();
        tree.add(2, 'b').unwrap();

        let err = tree.add(1, 'z').unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&1), Some(&'a'));
    }

    #[test]
    fn test_set_updates_in_place() {
        let mut tree = OrderedTree::new();
        assert_eq!(tree.set("k", 1), None);
        assert_eq!(tree.set("k", 2), Some(1));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&"k"), Some(&2));
    }

    #[test]
    fn test_min_max_empty() {
        let tree: OrderedTree<i32, ()> = OrderedTree::new();
        assert!(matches!(tree.min_key(), Err(Error::EmptyContainer)));
        assert!(matches!(tree.max_key(), Err(Error::EmptyContainer)));
    }

    #[test]
    fn test_min_max() {
        let tree: OrderedTree<_, _> = [(4, ()), (9, ()), (1, ())].into_iter().collect();
        assert_eq!(tree.min_key().unwrap(), &1);
        assert_eq!(tree.max_key().unwrap(), &9);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut tree = OrderedTree::new();
        tree.add(1, 1).unwrap();
        assert_eq!(tree.remove(&2), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_two_children_keeps_order() {
        let mut tree = OrderedTree::new();
        for k in [50, 30, 70, 20, 40, 60, 80] {
            tree.add(k, k * 10).unwrap();
        }
        assert_eq!(tree.remove(&30), Some(300));
        assert_eq!(tree.remove(&50), Some(500));
        tree.verify().unwrap();

        let keys: Vec<_> = tree.keys().copied().collect();
        assert_eq!(keys, vec![20, 40, 60, 70, 80]);
        assert_eq!(tree.get(&40), Some(&400));
    }

    #[test]
    fn test_lookup_then_remove_uses_cache() {
        let mut tree = OrderedTree::new();
        for k in 0..32 {
            tree.add(k, k).unwrap();
        }
        assert!(tree.contains_key(&17));
        assert_eq!(tree.remove(&17), Some(17));
        assert!(!tree.contains_key(&17));
        assert_eq!(tree.remove(&17), None);
        tree.verify().unwrap();
    }

    #[test]
    fn test_descending_iteration() {
        let mut tree = OrderedTree::new();
        for k in [3, 1, 4, 1, 5, 9, 2, 6] {
            tree.set(k, ());
        }
        let keys: Vec<_> = tree.iter_desc().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![9, 6, 5, 4, 3, 2, 1]);
        let rev: Vec<_> = tree.keys().rev().copied().collect();
        assert_eq!(rev, keys);
    }

    #[test]
    fn test_enumerator_state() {
        let mut tree = OrderedTree::new();
        tree.add(1, "one").unwrap();

        let mut cursor = tree.entries(true);
        assert!(matches!(cursor.current(), Err(Error::InvalidState(_))));
        assert!(cursor.move_next());
        assert_eq!(cursor.current().unwrap(), (&1, &"one"));
        assert!(!cursor.move_next());
        assert!(cursor.current().is_err());

        cursor.reset();
        assert!(cursor.has_more());
    }

    #[test]
    fn test_remove_min_max() {
        let mut tree: OrderedTree<_, _> = (0..10).map(|k| (k, k)).collect();
        assert_eq!(tree.remove_min().unwrap(), (0, 0));
        assert_eq!(tree.remove_max().unwrap(), (9, 9));
        assert_eq!(tree.len(), 8);
        tree.verify().unwrap();
    }

    #[test]
    fn test_clear() {
        let mut tree: OrderedTree<_, _> = (0..5).map(|k| (k, ())).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.min_key().is_err());
    }
}
