//! Kinetoplast Graph
//!
//! Turns a [`kinetoplast_lattice::Lattice`] into a symmetric, loop-free
//! link graph.
//!
//! # Node Ids
//!
//! [`IndexMap`] assigns dense [`NodeId`]s cell by cell and slot by slot, so
//! an id maps back to exactly one lattice point and the mapping is stable
//! for a given lattice.
//!
//! # Compilation
//!
//! [`compile`] decides links between primary nodes with either the overlap
//! model (random lattices) or exact contact (regular lattices), copies each
//! primary's links onto its stacked duplicates, and optionally forces the
//! boundary into a ring. The result is a [`NetworkTemplate`], the immutable
//! input to dissolution runs. With the `serde` feature it serializes
//! losslessly.

mod compile;
mod error;
mod graph;
mod index;
mod template;

pub use compile::{compile, CompileOptions, LinkRule};
pub use error::{Error, Result};
pub use graph::{Graph, PairRegistry};
pub use index::{IndexMap, NodeId};
pub use template::NetworkTemplate;
