//! Tree module for the dendrogram hierarchy.
//!
//! This module provides the core data structure for the parsed hierarchy:
//! - `Tree`: the hierarchy, using the arena pattern for efficient memory layout.
//! - `TreeIndex` is used to index vertices.

use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
pub type TreeIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: TreeIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted, ordered dendrogram hierarchy represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [TreeIndex],
/// avoiding reference cycles and giving cache-friendly traversals.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena
/// - The index of the root is maintained
/// - No assumption on the order of indices is made (leaves need not occupy
///   the first `n` slots)
/// - Leaves store their display name directly; internal vertices may carry
///   an optional name
/// - Branch lengths are optional and ignored by layout
///
/// # Construction
/// Trees are normally produced by [newick::parse_str](crate::newick::parse_str).
/// For hand-built trees, add leaves and internal vertices bottom-up, finish
/// with [add_root](Tree::add_root), and check the result with
/// [is_valid](Tree::is_valid).
///
/// # Example
/// ```
/// use cladeview::model::Tree;
///
/// // Build ((A,B),C) by hand
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("A".to_string(), None);
/// let b = tree.add_leaf("B".to_string(), None);
/// let c = tree.add_leaf("C".to_string(), None);
/// let inner = tree.add_internal(vec![a, b], None, None);
/// tree.add_root(vec![inner, c], None, None);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: TreeIndex,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Tree {
            vertices: Vec::new(),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Creates a new, empty tree with capacity for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        Tree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `name` - Display name of the leaf
    /// * `branch_length` - Distance to the parent, if known
    pub fn add_leaf(&mut self, name: String, branch_length: Option<BranchLength>) -> TreeIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, name, branch_length));
        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which
    /// gets returned. The children's parent references are set to the new
    /// vertex.
    ///
    /// # Arguments
    /// * `children` - Ordered indices of the child vertices (must be non-empty)
    /// * `name` - Optional display name
    /// * `branch_length` - Distance to the parent, if known
    pub fn add_internal(
        &mut self,
        children: Vec<TreeIndex>,
        name: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> TreeIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, name, branch_length));
        index
    }

    /// Adds the root to the tree, assigning a unique index, which gets
    /// returned. The children's parent references are set to the root.
    ///
    /// # Arguments
    /// * `children` - Ordered indices of the child vertices (must be non-empty)
    /// * `name` - Optional display name
    /// * `branch_length` - Parsed branch length, if given (unused by layout)
    pub fn add_root(
        &mut self,
        children: Vec<TreeIndex>,
        name: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> TreeIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_root(index, children, name, branch_length));
        self.root_index = index;
        index
    }

    /// Returns whether the root of the tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus the tree hasn't been
    /// fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the arena index of the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root_index(&self) -> TreeIndex {
        assert!(self.is_root_set(), "Tree has no root set");
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    pub fn vertex(&self, index: TreeIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root, non-leaf) vertices.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and points to a Root vertex
    /// - All vertex indices match their position in the arena
    /// - There is exactly one root
    /// - Non-leaf vertices have at least one child
    /// - All child indices are valid and point back to the correct parent
    /// - Root has no parent set, all other vertices have a valid parent that
    ///   lists them as a child
    ///
    /// Layout and selection assume a valid tree; the parser's output is
    /// valid by construction.
    ///
    /// # Returns
    /// `true` if the tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        // Check root index is set and within bounds
        if self.root_index == NO_ROOT_SET_INDEX || self.root_index >= self.vertices.len() {
            return false;
        }

        // Check root is actually a Root variant
        if !self.vertices[self.root_index].is_root() {
            return false;
        }

        let mut found_root = false;

        for (index, vertex) in self.vertices.iter().enumerate() {
            // Check vertex index matches its arena position
            if vertex.index() != index {
                return false;
            }

            // Check that there is only one root
            if vertex.is_root() {
                if found_root {
                    return false;
                }
                found_root = true;
            }

            // Check children references
            if let Some(children) = vertex.children() {
                if children.is_empty() {
                    return false;
                }
                for &child in children {
                    if child >= self.vertices.len() {
                        return false;
                    }
                    if self.vertices[child].parent_index() != Some(index) {
                        return false;
                    }
                }
            }

            // Check parent references
            if vertex.is_root() {
                if vertex.has_parent() {
                    return false;
                }
            } else {
                match vertex.parent_index() {
                    None => return false, // non-root without parent
                    Some(parent_index) => {
                        if parent_index >= self.vertices.len() {
                            return false;
                        }
                        let listed = self.vertices[parent_index]
                            .children()
                            .is_some_and(|ch| ch.contains(&index));
                        if !listed {
                            return false;
                        }
                    }
                }
            }
        }

        found_root
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Useful for aggregating data from the leaves upward, e.g. subtree
    /// leaf counts.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Useful for propagating data from the root downward.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

impl std::ops::Index<TreeIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: TreeIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<TreeIndex> for Tree {
    fn index_mut(&mut self, index: TreeIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// Stack-based, so arbitrarily deep trees don't recurse.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(TreeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            // Mark this vertex as "children will be visited"
            self.stack.push((index, true));

            // Push children in reverse, so the first child is processed first
            if let Some(children) = vertex.children() {
                for &child in children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<TreeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so the first child is processed first
        if let Some(children) = vertex.children() {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(vertex)
    }
}
