//! Virtual DOM Node
//!
//! Every node kind shares the same structural slots. Physical storage
//! (`child_slots`) is append-ordered and includes async placeholders; the
//! `first_child`/`next_sibling` links mirror it as a singly linked list.
//! The logical view that hides placeholders is computed by [`VTree`].
//!
//! [`VTree`]: crate::VTree

use fos_dom::NamedNodeMap;

use crate::NodeId;
use crate::namespace;

/// Upper bound on storage reserved from a declared count. Larger counts
/// grow on demand; the arity check still enforces the declared value.
const PRESIZE_LIMIT: usize = 256;

/// Node type, numbered as in the DOM `nodeType` constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    DocumentFragment,
}

impl NodeType {
    pub fn to_u32(self) -> u32 {
        match self {
            NodeType::Element => 1,
            NodeType::Text => 3,
            NodeType::Comment => 8,
            NodeType::DocumentFragment => 11,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
    Comment(String),
    /// Async placeholder, transparent to logical traversal
    Fragment,
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag_name: String,
    pub attributes: NamedNodeMap,
    /// Concatenated text of a value-bearing element, or an explicit override
    pub value: Option<String>,
    /// Content is a scalar value instead of children
    pub value_bearing: bool,
}

impl ElementData {
    pub(crate) fn new(tag_name: &str, attr_count: Option<usize>) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attributes: attr_count
                .map(|n| NamedNodeMap::with_capacity(n.min(PRESIZE_LIMIT)))
                .unwrap_or_default(),
            value: None,
            value_bearing: namespace::is_value_bearing(tag_name),
        }
    }

    /// Local value if non-empty, else the `value` attribute
    pub fn value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .filter(|v| !v.is_empty())
            .or_else(|| self.attributes.get("value"))
    }
}

/// Virtual DOM node
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    /// Physical children in append order
    pub(crate) child_slots: Vec<NodeId>,
    pub(crate) final_child_count: Option<usize>,
    /// Appends so far; differs from `child_slots.len()` only for value-bearing elements
    pub(crate) child_count: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) namespace_uri: Option<String>,
    pub(crate) namespace_aware: bool,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, final_child_count: Option<usize>) -> Self {
        let namespace_uri = match &kind {
            NodeKind::Element(el) => namespace::implicit_namespace(&el.tag_name).map(str::to_owned),
            _ => None,
        };

        Self {
            namespace_aware: matches!(kind, NodeKind::Element(_)),
            kind,
            child_slots: final_child_count
                .map(|n| Vec::with_capacity(n.min(PRESIZE_LIMIT)))
                .unwrap_or_default(),
            final_child_count,
            child_count: 0,
            parent: None,
            first_child: None,
            next_sibling: None,
            namespace_uri,
        }
    }

    /// Copy of `other`'s own data and structure. The copy shares child ids
    /// with `other` and starts detached.
    pub(crate) fn clone_from_node(other: &Node) -> Self {
        Self {
            parent: None,
            next_sibling: None,
            ..other.clone()
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::Fragment => NodeType::DocumentFragment,
        }
    }

    #[inline]
    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, NodeKind::Fragment)
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_comment(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Comment(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn is_value_bearing(&self) -> bool {
        self.as_element().is_some_and(|e| e.value_bearing)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Physical children, placeholders included
    pub fn child_nodes(&self) -> &[NodeId] {
        &self.child_slots
    }

    /// Number of appends so far
    pub fn child_count(&self) -> usize {
        self.child_count
    }

    pub fn final_child_count(&self) -> Option<usize> {
        self.final_child_count
    }

    /// All declared children have been appended
    pub fn is_complete(&self) -> bool {
        self.final_child_count == Some(self.child_count)
    }

    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    pub fn is_namespace_aware(&self) -> bool {
        self.namespace_aware
    }
}
