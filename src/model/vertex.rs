//! Vertex types for the dendrogram hierarchy.

use crate::model::tree::TreeIndex;
use std::ops::Deref;

/// During construction, internal and leaf vertices might not have a parent set yet.
const NO_PARENT_SET: TreeIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// A vertex (node) in a dendrogram hierarchy.
///
/// A vertex can be either:
/// - **Root**: Has children, an optional name, no parent
/// - **Internal**: Has children, an optional name, might have a branch length
/// - **Leaf**: Has no children, has a name, might have a branch length
///
/// Children are ordered (document order of the parsed description).
/// Branch lengths are parsed and stored but never consulted by the layout
/// passes, which space the tree by topology alone.
///
/// # Invariants
/// - `index` is the index in the tree arena
/// - Internal and leaf vertices have `parent` set to the arena index of their
///   parent; `NO_PARENT_SET` only during construction
/// - Internal and root vertices have at least one child once construction
///   completes (checked by [Tree::is_valid](crate::model::Tree::is_valid))
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent).
    Root {
        /// Index of this vertex in the tree arena
        index: TreeIndex,
        /// Optional display name
        name: Option<String>,
        /// Parsed branch length preceding the terminator, if any (unused by layout)
        branch_length: Option<BranchLength>,
        /// Ordered indices of the child vertices
        children: Vec<TreeIndex>,
    },
    /// Internal vertex (has a parent and children).
    Internal {
        /// Index of this vertex in the tree arena
        index: TreeIndex,
        /// Index of the parent vertex
        parent: TreeIndex,
        /// Optional display name
        name: Option<String>,
        /// Distance to the parent vertex, if given
        branch_length: Option<BranchLength>,
        /// Ordered indices of the child vertices
        children: Vec<TreeIndex>,
    },
    /// Leaf vertex (has a parent and a name, no children).
    Leaf {
        /// Index of this vertex in the tree arena
        index: TreeIndex,
        /// Index of the parent vertex
        parent: TreeIndex,
        /// Display name (always present on leaves)
        name: String,
        /// Distance to the parent vertex, if given
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    pub fn new_root(
        index: TreeIndex,
        children: Vec<TreeIndex>,
        name: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Root {
            index,
            name,
            branch_length,
            children,
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    pub fn new_internal(
        index: TreeIndex,
        children: Vec<TreeIndex>,
        name: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            name,
            branch_length,
            children,
        }
    }

    /// Creates a new leaf vertex.
    pub fn new_leaf(index: TreeIndex, name: String, branch_length: Option<BranchLength>) -> Self {
        Vertex::Leaf {
            index,
            parent: NO_PARENT_SET,
            name,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> TreeIndex {
        match self {
            Vertex::Root { index, .. } => *index,
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the name of this vertex, if present.
    ///
    /// Leaves always have a name; internal and root vertices may not.
    pub fn name(&self) -> Option<&str> {
        match self {
            Vertex::Root { name, .. } | Vertex::Internal { name, .. } => name.as_deref(),
            Vertex::Leaf { name, .. } => Some(name),
        }
    }

    /// Returns the branch length if one was parsed for this vertex.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { branch_length, .. }
            | Vertex::Internal { branch_length, .. }
            | Vertex::Leaf { branch_length, .. } => *branch_length,
        }
    }

    /// Returns `true` if this vertex is a leaf (tip).
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the ordered children if this is a non-leaf vertex, else `None`.
    pub fn children(&self) -> Option<&[TreeIndex]> {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => Some(children),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Sets a new parent for a non-root vertex.
    ///
    /// # Panics
    /// Panics if called on the root.
    pub fn set_parent(&mut self, parent: TreeIndex) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set parent on root vertex"),
            Vertex::Internal { parent: p, .. } => *p = parent,
            Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of the parent if this is a non-root vertex, else `None`.
    ///
    /// Note that the parent might not be set yet during construction.
    pub fn parent_index(&self) -> Option<TreeIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                if *parent == NO_PARENT_SET {
                    None
                } else {
                    Some(*parent)
                }
            }
            Vertex::Root { .. } => None,
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                *parent != NO_PARENT_SET
            }
            Vertex::Root { .. } => false,
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length of an edge in the hierarchy, enforced finite.
///
/// The layout passes deliberately never read this value (spacing is purely
/// topological), but it is kept so callers can inspect the parsed tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is not finite. The parser rejects non-finite
    /// values before constructing one.
    pub fn new(length: f64) -> Self {
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
