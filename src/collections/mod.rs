//! Generic containers used throughout the crate.
//!
//! - [`OrderedTree`]: red-black tree map with lazy ascending/descending enumerators

pub mod ordered_tree;

pub use ordered_tree::{Color, Entries, OrderedTree};
