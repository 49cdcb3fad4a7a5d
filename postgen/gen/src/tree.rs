//! Hierarchical path tree.
//!
//! Compiled requests are filed into a tree of named groups keyed by URL path
//! segments. All but the last segment name groups; the last names the leaf
//! that carries the request.
//!
//! Nodes live in an arena and refer to their children by [`NodeId`]. The
//! root is always node `0`. Nodes are created on first reference and never
//! removed.
//!
//! ## Merge rules
//!
//! - Walking the group path reuses an existing **group** child with the same
//!   name, or appends a new one.
//! - Leaves are never merged: attaching the same path twice produces two
//!   sibling leaves with the same name.
//!
//! ```text
//! POST /users                 root
//! POST /users/:userId/picture ├── users            leaf: POST /users
//!                             └── users            group
//!                                 └── :userId      group
//!                                     └── picture  leaf: POST /users/:userId/picture
//! ```

use crate::request::CompiledRequest;

/// Index of a node in a [`PathTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the tree: a group when `request` is `None`, a leaf otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub name: String,
    pub children: Vec<NodeId>,
    pub request: Option<CompiledRequest>,
}

impl PathNode {
    fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            request: None,
        }
    }

    pub fn is_group(&self) -> bool {
        self.request.is_none()
    }
}

/// Arena-backed tree of groups and request leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTree {
    nodes: Vec<PathNode>,
}

impl Default for PathTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTree {
    /// A tree holding only an unnamed root group.
    pub fn new() -> Self {
        Self {
            nodes: vec![PathNode::group("")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node for `id`.
    ///
    /// ## Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    /// Iterates the children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &PathNode)> + '_ {
        self.node(id)
            .children
            .iter()
            .map(move |&child| (child, self.node(child)))
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing has been attached yet.
    pub fn is_empty(&self) -> bool {
        self.node(self.root()).children.is_empty()
    }

    /// Finds a group child of `parent` named `name`. Leaves never match.
    pub fn find_group(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .find(|(_, node)| node.is_group() && node.name == name)
            .map(|(id, _)| id)
    }

    /// Files `request` under its path segments and returns the new leaf.
    ///
    /// ## Examples
    ///
    /// ```
    /// use postgen_define::RecordShape;
    /// use postgen_gen::compiler::{PathVariablePolicy, Registration, compile};
    /// use postgen_gen::placeholder::PlaceholderDefaults;
    /// use postgen_gen::tree::PathTree;
    ///
    /// let request = compile(
    ///     &Registration::new("GET", "/users/:userId", RecordShape::builder("R").build()),
    ///     &PlaceholderDefaults::new(),
    ///     PathVariablePolicy::Literal,
    /// ).unwrap();
    ///
    /// let mut tree = PathTree::new();
    /// let leaf = tree.attach(request);
    ///
    /// let users = tree.find_group(tree.root(), "users").unwrap();
    /// assert_eq!(tree.node(users).children, vec![leaf]);
    /// assert_eq!(tree.node(leaf).name, ":userId");
    /// ```
    pub fn attach(&mut self, request: CompiledRequest) -> NodeId {
        let segments = request.path_segments();
        let groups = &segments[..segments.len().saturating_sub(1)];

        let mut current = self.root();
        for segment in groups {
            current = match self.find_group(current, segment) {
                Some(existing) => existing,
                None => self.push_child(current, PathNode::group(segment.as_str())),
            };
        }

        let leaf = PathNode {
            name: request.name.clone(),
            children: Vec::new(),
            request: Some(request),
        };
        self.push_child(current, leaf)
    }

    fn push_child(&mut self, parent: NodeId, node: PathNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }
}
