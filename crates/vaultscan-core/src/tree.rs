//! # In-Memory Content Tree
//!
//! The materialized snapshot a simulated import produces: a hierarchy of
//! named nodes with typed properties, addressed by absolute path. This is
//! the full tree-accessor capability the engine consumes — existence checks,
//! node fetch by absolute or relative path, typed property reads, exact
//! qualified-type tests, and depth-first child iteration. Nothing more: no
//! persistence, no transactions, no mutation during resolution.
//!
//! Nodes live in an arena indexed by [`NodeId`]; a [`NodeRef`] pairs an id
//! with its tree and is the cheap, copyable handle rules traverse with.
//! All paths are normalized on insertion and lookup (see [`crate::path`]),
//! so separator duplication can never split the address space.

use std::collections::{BTreeMap, HashMap};

use crate::error::{ScanError, ScanResult};
use crate::names::NT_UNSTRUCTURED;
use crate::path;

/// Handle to a node in a [`ContentTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A typed property value.
///
/// Multi-valued properties are distinct from single values of the same
/// type; a single-value read of a multi-valued property is a fatal
/// [`ScanError::ValueFormat`], mirroring the accessor contract this engine
/// was written against.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Single string value.
    String(String),
    /// Single boolean value.
    Boolean(bool),
    /// Single integer value.
    Long(i64),
    /// Multi-valued string property.
    Strings(Vec<String>),
}

impl PropertyValue {
    /// The name of this value's underlying type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) | Self::Strings(_) => "String",
            Self::Boolean(_) => "Boolean",
            Self::Long(_) => "Long",
        }
    }

    /// Whether this is a multi-valued property.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Strings(_))
    }

    /// Read as a single string, coercing scalar values to their string
    /// form. Fails on multi-valued properties.
    pub fn string(&self) -> ScanResult<String> {
        match self {
            Self::String(s) => Ok(s.clone()),
            Self::Boolean(b) => Ok(b.to_string()),
            Self::Long(n) => Ok(n.to_string()),
            Self::Strings(_) => Err(ScanError::ValueFormat {
                expected: "single",
                found: "multi-valued",
            }),
        }
    }

    /// Read as a boolean. Strings coerce by equality with `"true"`.
    /// Fails on multi-valued properties.
    pub fn boolean(&self) -> ScanResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            Self::String(s) => Ok(s == "true"),
            Self::Long(_) => Err(ScanError::ValueFormat {
                expected: "boolean",
                found: "Long",
            }),
            Self::Strings(_) => Err(ScanError::ValueFormat {
                expected: "single",
                found: "multi-valued",
            }),
        }
    }

    /// Read the values of a multi-valued string property.
    pub fn strings(&self) -> ScanResult<&[String]> {
        match self {
            Self::Strings(values) => Ok(values),
            other => Err(ScanError::ValueFormat {
                expected: "multi-valued",
                found: other.type_name(),
            }),
        }
    }
}

#[derive(Debug)]
struct NodeData {
    abs_path: String,
    name: String,
    node_type: String,
    children: Vec<NodeId>,
    properties: BTreeMap<String, PropertyValue>,
}

/// An in-memory content tree, built up by the import simulation and read
/// (never written) by the post-scan validation pass.
#[derive(Debug)]
pub struct ContentTree {
    nodes: Vec<NodeData>,
    by_path: HashMap<String, NodeId>,
}

impl Default for ContentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTree {
    /// Create a tree containing only the root node `/`.
    pub fn new() -> Self {
        let root = NodeData {
            abs_path: "/".to_string(),
            name: String::new(),
            node_type: NT_UNSTRUCTURED.to_string(),
            children: Vec::new(),
            properties: BTreeMap::new(),
        };
        let mut by_path = HashMap::new();
        by_path.insert("/".to_string(), NodeId(0));
        Self {
            nodes: vec![root],
            by_path,
        }
    }

    /// Insert a node at the given absolute path with the given qualified
    /// type, creating missing ancestors as `nt:unstructured`. Re-inserting
    /// an existing path updates its type in place.
    pub fn put_node(&mut self, abs_path: &str, node_type: &str) -> NodeId {
        let normalized = path::normalize(abs_path);
        if let Some(&id) = self.by_path.get(&normalized) {
            self.nodes[id.0].node_type = node_type.to_string();
            return id;
        }
        let mut current = NodeId(0);
        let mut current_path = String::new();
        let segment_count = path::segments(&normalized).count();
        for (index, segment) in path::segments(&normalized).enumerate() {
            current_path.push('/');
            current_path.push_str(segment);
            current = match self.by_path.get(&current_path) {
                Some(&id) => id,
                None => {
                    let leaf = index + 1 == segment_count;
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(NodeData {
                        abs_path: current_path.clone(),
                        name: segment.to_string(),
                        node_type: if leaf { node_type } else { NT_UNSTRUCTURED }.to_string(),
                        children: Vec::new(),
                        properties: BTreeMap::new(),
                    });
                    self.nodes[current.0].children.push(id);
                    self.by_path.insert(current_path.clone(), id);
                    id
                }
            };
        }
        current
    }

    /// Set a property on an existing node.
    pub fn put_property(
        &mut self,
        abs_path: &str,
        name: &str,
        value: PropertyValue,
    ) -> ScanResult<()> {
        let normalized = path::normalize(abs_path);
        let id = self
            .by_path
            .get(&normalized)
            .copied()
            .ok_or(ScanError::NodeNotFound { path: normalized })?;
        self.nodes[id.0].properties.insert(name.to_string(), value);
        Ok(())
    }

    /// Whether a node exists at the given absolute path.
    pub fn node_exists(&self, abs_path: &str) -> bool {
        self.by_path.contains_key(&path::normalize(abs_path))
    }

    /// Fetch the node at the given absolute path, if present.
    pub fn get(&self, abs_path: &str) -> Option<NodeRef<'_>> {
        let id = *self.by_path.get(&path::normalize(abs_path))?;
        Some(NodeRef { tree: self, id })
    }

    /// Fetch the node at the given absolute path, failing with
    /// [`ScanError::NodeNotFound`] if absent.
    pub fn node(&self, abs_path: &str) -> ScanResult<NodeRef<'_>> {
        self.get(abs_path).ok_or_else(|| ScanError::NodeNotFound {
            path: path::normalize(abs_path),
        })
    }

    /// The root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

/// A read-only handle to one node of a [`ContentTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t ContentTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.0]
    }

    /// The tree this node belongs to, for same-tree lookups.
    pub fn tree(&self) -> &'t ContentTree {
        self.tree
    }

    /// This node's arena handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// This node's absolute path.
    pub fn path(&self) -> &'t str {
        &self.data().abs_path
    }

    /// This node's name (last path segment; empty for the root).
    pub fn name(&self) -> &'t str {
        &self.data().name
    }

    /// Exact qualified-type test against a `{namespace-uri}LocalName`.
    pub fn is_node_type(&self, qualified: &str) -> bool {
        self.data().node_type == qualified
    }

    /// This node's qualified type name.
    pub fn node_type(&self) -> &'t str {
        &self.data().node_type
    }

    /// Whether the node carries a property with the given name.
    pub fn has_property(&self, name: &str) -> bool {
        self.data().properties.contains_key(name)
    }

    /// Fetch a property value, if present.
    pub fn get_property(&self, name: &str) -> Option<&'t PropertyValue> {
        self.data().properties.get(name)
    }

    /// Fetch a property value, failing with [`ScanError::PropertyNotFound`]
    /// if absent.
    pub fn property(&self, name: &str) -> ScanResult<&'t PropertyValue> {
        self.get_property(name)
            .ok_or_else(|| ScanError::PropertyNotFound {
                path: self.path().to_string(),
                name: name.to_string(),
            })
    }

    /// Whether a descendant exists at the given relative path. The empty
    /// relative path denotes this node itself.
    pub fn has_node(&self, rel_path: &str) -> bool {
        self.get_node(rel_path).is_some()
    }

    /// Fetch a descendant by relative path, if present.
    pub fn get_node(&self, rel_path: &str) -> Option<NodeRef<'t>> {
        self.tree.get(&path::join(self.path(), rel_path))
    }

    /// Fetch a descendant by relative path, failing with
    /// [`ScanError::NodeNotFound`] if absent.
    pub fn node(&self, rel_path: &str) -> ScanResult<NodeRef<'t>> {
        let abs = path::join(self.path(), rel_path);
        self.tree.node(&abs)
    }

    /// Whether this node has any children.
    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    /// Iterate this node's children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t>> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Depth-first pre-order traversal of the subtree rooted here,
    /// applying `visit` at every node (this one first).
    ///
    /// The tree is acyclic by construction, so the recursion depth is
    /// bounded by the tree's actual depth. Errors from `visit` abort the
    /// walk; accumulate-don't-abort policies belong in the closure.
    pub fn walk<F>(&self, visit: &mut F) -> ScanResult<()>
    where
        F: FnMut(NodeRef<'t>) -> ScanResult<()>,
    {
        visit(*self)?;
        for child in self.children() {
            child.walk(visit)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("path", &self.path())
            .field("node_type", &self.node_type())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
