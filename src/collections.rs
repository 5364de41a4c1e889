//! Auxiliary container aliases, for source compatibility with the
//! indirection-using style: a program that names its containers through
//! this module advertises that it opts into the crate's checked/unchecked
//! discipline everywhere.
//!
//! Rust's standard containers are bounds-checked in every build, so unlike
//! the indirection types these aliases do not change between the fast and
//! safe builds; the mode split the original C++ needed for its debug
//! containers is already built into the language. The aliases carry no
//! design of their own. Disable the `collections` feature to compile them
//! (and this module) out entirely.

use std::collections::{BTreeMap, BTreeSet};

/// A growable array.
pub type Vector<T> = Vec<T>;

/// An ordered key-value map.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// An ordered set.
pub type OrderedSet<T> = BTreeSet<T>;

/// An owned string.
pub type Text = String;

/// A fixed-size vector of bits.
///
/// The standard library has no packed fixed bitset; a boolean array is the
/// unpacked stand-in with the same indexing surface.
pub type BitSet<const N: usize> = [bool; N];
