//! Data model for dendrogram hierarchies.
//!
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`
//! (an explicit tag, not a "has children" convention), referenced by
//! [TreeIndex]. Leaves carry their display name directly; internal vertices
//! may carry an optional name.
//!
//! The model is built once per description string by the
//! [newick](crate::newick) parser and is never mutated afterwards: the
//! layout and selection passes return derived values instead of annotating
//! vertices.

/// Dendrogram hierarchy structure and traversal
pub mod tree;
/// Tree vertex types (root, internal, leaf)
pub mod vertex;

pub use tree::Tree;
pub use tree::TreeIndex;
pub use vertex::BranchLength;
pub use vertex::Vertex;
