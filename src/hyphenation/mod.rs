//! Pattern-based hyphenation.
//!
//! - [`vectors`]: block-allocated `ByteVector` / `CharVector` buffers
//! - [`Hyphenation`]: a word with its allowed break points
//! - [`HyphenationTree`]: Liang pattern and exception store

#[allow(clippy::module_inception)]
mod hyphenation;
pub mod pattern_tree;
pub mod vectors;

pub use hyphenation::Hyphenation;
pub use pattern_tree::HyphenationTree;
pub use vectors::{BlockVector, ByteVector, CharVector, DEFAULT_BLOCK_SIZE};
