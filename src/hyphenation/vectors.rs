//! Block-allocated primitive buffers backing the pattern store.

use std::ops::{Index, IndexMut};

/// Default growth step, in elements.
pub const DEFAULT_BLOCK_SIZE: usize = 2048;

/// Growable array that reserves storage in fixed-size blocks.
///
/// `len()` counts the elements handed out through [`alloc`](Self::alloc);
/// the backing storage (`capacity()`) is always fully initialized, so
/// indexing addresses the whole capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockVector<T> {
    block_size: usize,
    arr: Vec<T>,
    n: usize,
}

/// Byte buffer.
pub type ByteVector = BlockVector<u8>;

/// Character buffer.
pub type CharVector = BlockVector<char>;

impl<T: Copy + Default> Default for BlockVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> BlockVector<T> {
    /// Empty buffer with one default-sized block reserved.
    pub fn new() -> Self {
        Self::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    /// Empty buffer growing in steps of `block_size`.
    ///
    /// A zero block size falls back to [`DEFAULT_BLOCK_SIZE`].
    pub fn with_block_size(block_size: usize) -> Self {
        let block_size = Self::effective_block(block_size);
        Self {
            block_size,
            arr: vec![T::default(); block_size],
            n: 0,
        }
    }

    /// Take `arr` as backing storage with nothing allocated yet.
    pub fn wrap(arr: Vec<T>, block_size: usize) -> Self {
        Self {
            block_size: Self::effective_block(block_size),
            arr,
            n: 0,
        }
    }

    /// Take `arr` as backing storage with every element in use.
    pub fn from_vec(arr: Vec<T>, block_size: usize) -> Self {
        let n = arr.len();
        Self {
            block_size: Self::effective_block(block_size),
            arr,
            n,
        }
    }

    fn effective_block(block_size: usize) -> usize {
        if block_size > 0 {
            block_size
        } else {
            DEFAULT_BLOCK_SIZE
        }
    }

    /// Reserve `size` elements and return the index of the first one.
    ///
    /// Storage grows by whole blocks, only when the new length would not
    /// fit in the current capacity.
    pub fn alloc(&mut self, size: usize) -> usize {
        let index = self.n;
        let needed = self.n + size;
        if needed > self.arr.len() {
            let missing = needed - self.arr.len();
            let blocks = missing.div_ceil(self.block_size);
            let new_len = self.arr.len() + blocks * self.block_size;
            self.arr.resize(new_len, T::default());
        }
        self.n = needed;
        index
    }

    /// Append one element.
    pub fn push(&mut self, value: T) -> usize {
        let index = self.alloc(1);
        self.arr[index] = value;
        index
    }

    /// Append a run of elements, returning the start index.
    pub fn extend_from_slice(&mut self, values: &[T]) -> usize {
        let index = self.alloc(values.len());
        self.arr[index..index + values.len()].copy_from_slice(values);
        index
    }

    /// Shrink the backing storage to the allocated length.
    pub fn trim_to_size(&mut self) {
        if self.n < self.arr.len() {
            self.arr.truncate(self.n);
            self.arr.shrink_to_fit();
        }
    }

    /// Forget all allocated elements; capacity is kept.
    pub fn clear(&mut self) {
        self.n = 0;
    }

    /// Number of allocated elements.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Size of the backing storage.
    pub fn capacity(&self) -> usize {
        self.arr.len()
    }

    /// Growth step.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Whole backing storage.
    pub fn arr(&self) -> &[T] {
        &self.arr
    }

    /// Allocated prefix.
    pub fn as_slice(&self) -> &[T] {
        &self.arr[..self.n]
    }

    /// Element at `index` within capacity.
    pub fn get(&self, index: usize) -> Option<T> {
        self.arr.get(index).copied()
    }
}

impl<T> Index<usize> for BlockVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.arr[index]
    }
}

impl<T> IndexMut<usize> for BlockVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.arr[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block() {
        let v = ByteVector::new();
        assert_eq!(v.capacity(), DEFAULT_BLOCK_SIZE);
        assert_eq!(v.len(), 0);
    }

    #[test]
    fn test_zero_block_falls_back() {
        let v = CharVector::with_block_size(0);
        assert_eq!(v.block_size(), DEFAULT_BLOCK_SIZE);
    }

    #[test]
    fn test_alloc_returns_previous_length() {
        let mut v = ByteVector::with_block_size(4);
        assert_eq!(v.alloc(3), 0);
        assert_eq!(v.alloc(1), 3);
        assert_eq!(v.capacity(), 4);
        assert_eq!(v.alloc(1), 4);
        assert_eq!(v.capacity(), 8);
    }

    #[test]
    fn test_alloc_larger_than_block() {
        let mut v = ByteVector::with_block_size(4);
        v.alloc(10);
        assert_eq!(v.capacity(), 12);
        assert_eq!(v.len(), 10);
    }

    #[test]
    fn test_growth_preserves_values() {
        let mut v = ByteVector::with_block_size(2);
        for b in 0..9u8 {
            v.push(b);
        }
        assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_trim_to_size() {
        let mut v = CharVector::with_block_size(16);
        v.extend_from_slice(&['a', 'b']);
        v.trim_to_size();
        assert_eq!(v.capacity(), 2);
        assert_eq!(v[1], 'b');
    }

    #[test]
    fn test_wrap_and_from_vec() {
        let wrapped = ByteVector::wrap(vec![1, 2, 3], 0);
        assert_eq!(wrapped.len(), 0);
        assert_eq!(wrapped.capacity(), 3);

        let full = CharVector::from_vec(vec!['x', 'y'], 8);
        assert_eq!(full.len(), 2);
        let mut copy = full.clone();
        copy.clear();
        assert_eq!(copy.len(), 0);
        assert_eq!(full.len(), 2);
    }

    #[test]
    fn test_index_mut() {
        let mut v = ByteVector::with_block_size(4);
        let at = v.alloc(2);
        v[at + 1] = 7;
        assert_eq!(v.get(1), Some(7));
        assert_eq!(v.get(99), None);
    }
}
