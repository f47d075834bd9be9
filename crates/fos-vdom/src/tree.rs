//! Virtual tree (arena-based allocation)
//!
//! Owns every node of one build pass. Appends are O(1): the child goes into
//! the parent's next physical slot and is linked from the previous sibling.
//!
//! # Logical traversal
//!
//! [`VTree::first_child`] and [`VTree::next_sibling`] hide async
//! placeholders. A placeholder with content is replaced by its own logical
//! children; an empty one is skipped. When a node inside a placeholder has
//! no further siblings, traversal continues after the placeholder in its
//! parent. Supplying placeholder content later therefore never requires
//! relinking the nodes around it.
//!
//! # Completion
//!
//! A node with a known final child count is complete once that many
//! children were appended. [`VTree::finish_child`] walks up through
//! complete ancestors and returns the first incomplete one (or the root),
//! so builder code can keep chaining from the returned id.

use crate::node::{Node, NodeKind, NodeType};
use crate::{NodeId, Result, VDomError};

/// Tree construction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VTreeConfig {
    /// Arena slots reserved up front
    pub node_capacity: usize,
}

impl Default for VTreeConfig {
    fn default() -> Self {
        Self { node_capacity: 64 }
    }
}

/// Arena of virtual nodes
#[derive(Debug, Default, Clone)]
pub struct VTree {
    pub(crate) nodes: Vec<Node>,
}

impl VTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::with_config(VTreeConfig::default())
    }

    pub fn with_config(config: VTreeConfig) -> Self {
        Self {
            nodes: Vec::with_capacity(config.node_capacity),
        }
    }

    /// Number of nodes allocated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(VDomError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(VDomError::UnknownNode(id))
    }

    /// Ids are 32 bits wide: one tree addresses at most `u32::MAX` nodes.
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        debug_assert!(self.nodes.len() < u32::MAX as usize, "node arena exhausted");
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate an async placeholder. `None` lets it grow as needed;
    /// `Some(n)` declares exactly `n` children.
    pub fn create_node(&mut self, final_child_count: Option<usize>) -> NodeId {
        self.push(Node::new(NodeKind::Fragment, final_child_count))
    }

    pub fn create_text(&mut self, value: impl Into<String>) -> NodeId {
        self.push(Node::new(NodeKind::Text(value.into()), Some(0)))
    }

    pub fn create_comment(&mut self, value: impl Into<String>) -> NodeId {
        self.push(Node::new(NodeKind::Comment(value.into()), Some(0)))
    }

    /// Detached copy of `id` that shares its children and counts
    pub fn clone_node(&mut self, id: NodeId) -> Result<NodeId> {
        let copy = Node::clone_from_node(self.node(id)?);
        Ok(self.push(copy))
    }

    /// Append `child` as the next physical child of `parent`, returning `child`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        let child_node = self.node(child)?;
        self.check_append(parent, child_node.node_type())?;

        if child_node.parent.is_some() {
            return Err(VDomError::AlreadyAttached(child));
        }
        // Deeper cycles are not detected; appends stay O(1)
        if child == parent {
            return Err(VDomError::HierarchyRequest(child));
        }

        let parent_node = self.node(parent)?;
        if parent_node.is_value_bearing() {
            let text = child_node.as_text().unwrap_or_default().to_string();
            let parent_node = self.node_mut(parent)?;
            parent_node.child_count += 1;
            if let Some(el) = parent_node.as_element_mut() {
                match &mut el.value {
                    Some(value) => value.push_str(&text),
                    None => el.value = Some(text),
                }
            }
            return Ok(child);
        }

        let inherited = match (&parent_node.namespace_uri, child_node) {
            (Some(ns), c) if c.namespace_aware && c.namespace_uri.is_none() => Some(ns.clone()),
            _ => None,
        };
        if let Some(ns) = inherited {
            self.assign_namespace(child, &ns);
        }

        let parent_node = self.node_mut(parent)?;
        let previous = parent_node.child_slots.last().copied();
        parent_node.child_slots.push(child);
        parent_node.child_count += 1;
        if previous.is_none() {
            parent_node.first_child = Some(child);
        }

        if let Some(previous) = previous {
            self.node_mut(previous)?.next_sibling = Some(child);
        }
        self.node_mut(child)?.parent = Some(parent);

        tracing::trace!(?parent, ?child, ?previous, "appended child");
        Ok(child)
    }

    /// Fail the way appending a `child` of this type to `parent` would,
    /// without touching the tree. Shorthands call this before allocating.
    pub(crate) fn check_append(&self, parent: NodeId, child: NodeType) -> Result<()> {
        let parent_node = self.node(parent)?;
        if let Some(expected) = parent_node.final_child_count {
            if parent_node.child_count >= expected {
                tracing::warn!(?parent, expected, "append past declared child count");
                return Err(VDomError::ArityMismatch { node: parent, expected });
            }
        }
        match parent_node.as_element() {
            Some(el) if el.value_bearing && child != NodeType::Text => Err(VDomError::InvalidChild {
                tag: el.tag_name.clone(),
                child,
            }),
            _ => Ok(()),
        }
    }

    /// Append an empty placeholder with unknown final count and return it.
    /// Content may be appended to it at any later point, or never.
    pub fn begin_async(&mut self, parent: NodeId) -> Result<NodeId> {
        self.check_append(parent, NodeType::DocumentFragment)?;
        let placeholder = self.create_node(None);
        self.append_child(parent, placeholder)
    }

    /// Completion bubble: the nearest node at or above `id` that is either
    /// incomplete or the root.
    pub fn finish_child(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        loop {
            let node = self.node(current)?;
            match node.parent {
                Some(parent) if node.is_complete() => {
                    tracing::trace!(node = ?current, ?parent, "subtree complete");
                    current = parent;
                }
                _ => return Ok(current),
            }
        }
    }

    /// Reset physical storage and counts. The declared final count stays.
    /// Removed children become detached and may be appended again.
    pub fn remove_children(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        let removed = std::mem::take(&mut node.child_slots);
        node.first_child = None;
        node.child_count = 0;

        for child in removed {
            let child = self.node_mut(child)?;
            child.parent = None;
            child.next_sibling = None;
        }
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Physical children, placeholders included
    pub fn child_nodes(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.child_nodes()).unwrap_or(&[])
    }

    /// First logical child
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.first_in_chain(self.get(id)?.first_child)
    }

    /// Next logical sibling
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        if let Some(found) = self.first_in_chain(node.next_sibling) {
            return Some(found);
        }

        let parent = node.parent?;
        if self.get(parent)?.is_fragment() {
            self.next_sibling(parent)
        } else {
            None
        }
    }

    /// First non-placeholder node along a physical sibling chain, looking
    /// inside placeholders on the way. Never leaves the chain's parent.
    fn first_in_chain(&self, mut cursor: Option<NodeId>) -> Option<NodeId> {
        while let Some(id) = cursor {
            let node = self.get(id)?;
            if !node.is_fragment() {
                return Some(id);
            }
            if let Some(found) = self.first_in_chain(node.first_child) {
                return Some(found);
            }
            cursor = node.next_sibling;
        }
        None
    }

    /// Logical children of `id`, in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            scope: id,
            next: self.first_child(id),
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.parent(node) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

/// Iterator over logical children
pub struct Children<'a> {
    tree: &'a VTree,
    scope: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        // Siblings past the end of a placeholder scope belong to its parent
        self.next = self
            .tree
            .next_sibling(current)
            .filter(|&n| n != self.scope && self.tree.is_inclusive_ancestor(self.scope, n));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_links_in_order() {
        let mut tree = VTree::new();
        let root = tree.create_node(Some(3));
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        let c = tree.create_comment("c");

        for child in [a, b, c] {
            assert_eq!(tree.append_child(root, child), Ok(child));
        }

        let node = tree.get(root).unwrap();
        assert_eq!(node.child_nodes(), &[a, b, c]);
        assert_eq!(node.child_count(), 3);
        assert!(node.is_complete());
        assert_eq!(tree.first_child(root), Some(a));
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.next_sibling(c), None);
        assert_eq!(tree.parent(b), Some(root));
    }

    #[test]
    fn test_arity_mismatch_leaves_tree_unchanged() {
        let mut tree = VTree::new();
        let root = tree.create_node(Some(1));
        let a = tree.create_text("a");
        let b = tree.create_text("b");

        tree.append_child(root, a).unwrap();
        assert_eq!(
            tree.append_child(root, b),
            Err(VDomError::ArityMismatch { node: root, expected: 1 })
        );
        assert_eq!(tree.child_nodes(root), &[a]);
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.next_sibling(a), None);
    }

    #[test]
    fn test_empty_placeholder_skipped() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        let a = tree.create_text("a");
        tree.append_child(root, a).unwrap();
        let placeholder = tree.begin_async(root).unwrap();
        let b = tree.create_text("b");
        tree.append_child(root, b).unwrap();

        assert_eq!(tree.child_nodes(root), &[a, placeholder, b]);
        assert_eq!(tree.first_child(root), Some(a));
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_leading_empty_placeholder_skipped() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        tree.begin_async(root).unwrap();
        let b = tree.create_text("b");
        tree.append_child(root, b).unwrap();

        assert_eq!(tree.first_child(root), Some(b));
    }

    #[test]
    fn test_late_placeholder_content_visible() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        let a = tree.create_text("a");
        tree.append_child(root, a).unwrap();
        let placeholder = tree.begin_async(root).unwrap();
        let b = tree.create_text("b");
        tree.append_child(root, b).unwrap();

        let x = tree.create_text("x");
        let y = tree.create_text("y");
        tree.append_child(placeholder, x).unwrap();
        tree.append_child(placeholder, y).unwrap();

        assert_eq!(tree.next_sibling(a), Some(x));
        assert_eq!(tree.next_sibling(x), Some(y));
        assert_eq!(tree.next_sibling(y), Some(b));
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![a, x, y, b]);
        assert_eq!(tree.children(placeholder).collect::<Vec<_>>(), vec![x, y]);
    }

    #[test]
    fn test_nested_placeholders() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        let outer = tree.begin_async(root).unwrap();
        let inner = tree.begin_async(outer).unwrap();
        let tail = tree.create_text("tail");
        tree.append_child(root, tail).unwrap();

        assert_eq!(tree.first_child(root), Some(tail));
        assert_eq!(tree.first_child(outer), None);

        let deep = tree.create_text("deep");
        tree.append_child(inner, deep).unwrap();
        assert_eq!(tree.first_child(root), Some(deep));
        assert_eq!(tree.next_sibling(deep), Some(tail));
        assert_eq!(tree.children(outer).collect::<Vec<_>>(), vec![deep]);
    }

    #[test]
    fn test_finish_child_bubbles() {
        let mut tree = VTree::new();
        let root = tree.create_node(Some(1));
        let mid = tree.create_node(Some(1));
        let leaf_parent = tree.create_node(Some(2));
        tree.append_child(root, mid).unwrap();
        tree.append_child(mid, leaf_parent).unwrap();

        let a = tree.create_text("a");
        tree.append_child(leaf_parent, a).unwrap();
        assert_eq!(tree.finish_child(leaf_parent), Ok(leaf_parent));

        let b = tree.create_text("b");
        tree.append_child(leaf_parent, b).unwrap();
        assert_eq!(tree.finish_child(leaf_parent), Ok(root));
    }

    #[test]
    fn test_finish_child_stops_at_open_parent() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        let child = tree.create_node(Some(1));
        tree.append_child(root, child).unwrap();
        let t = tree.create_text("t");
        tree.append_child(child, t).unwrap();

        assert_eq!(tree.finish_child(child), Ok(root));
        assert_eq!(tree.finish_child(root), Ok(root));
    }

    #[test]
    fn test_remove_children_keeps_final_count() {
        let mut tree = VTree::new();
        let root = tree.create_node(Some(2));
        let a = tree.create_text("a");
        tree.append_child(root, a).unwrap();

        tree.remove_children(root).unwrap();
        let node = tree.get(root).unwrap();
        assert!(node.child_nodes().is_empty());
        assert_eq!(node.child_count(), 0);
        assert_eq!(node.final_child_count(), Some(2));
        assert_eq!(tree.first_child(root), None);
    }

    #[test]
    fn test_clone_shares_structure() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        let original = tree.create_node(Some(1));
        let t = tree.create_text("t");
        tree.append_child(original, t).unwrap();
        tree.append_child(root, original).unwrap();

        let copy = tree.clone_node(original).unwrap();
        let node = tree.get(copy).unwrap();
        assert_eq!(node.child_nodes(), &[t]);
        assert_eq!(node.child_count(), 1);
        assert_eq!(node.parent(), None);
        assert_eq!(tree.first_child(copy), Some(t));
    }

    #[test]
    fn test_attach_errors() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        let child = tree.create_node(None);
        tree.append_child(root, child).unwrap();

        assert_eq!(tree.append_child(root, child), Err(VDomError::AlreadyAttached(child)));
        assert_eq!(tree.append_child(root, root), Err(VDomError::HierarchyRequest(root)));

        let ghost = NodeId(999);
        assert_eq!(tree.append_child(root, ghost), Err(VDomError::UnknownNode(ghost)));
    }

    #[test]
    fn test_begin_async_on_full_parent_allocates_nothing() {
        let mut tree = VTree::new();
        let root = tree.create_node(Some(0));
        let before = tree.len();

        assert_eq!(
            tree.begin_async(root),
            Err(VDomError::ArityMismatch { node: root, expected: 0 })
        );
        assert_eq!(tree.len(), before);
    }

    #[test]
    fn test_deep_chain_appends() {
        let mut tree = VTree::new();
        let root = tree.create_element("div", None, None);
        let mut parent = root;
        for _ in 0..20_000 {
            let child = tree.create_element("div", None, None);
            assert_eq!(tree.append_child(parent, child), Ok(child));
            parent = child;
        }

        assert_eq!(tree.len(), 20_001);
        assert_eq!(tree.parent(parent), Some(NodeId(19_999)));
        assert_eq!(tree.first_child(root), Some(NodeId(1)));
    }

    #[test]
    fn test_removed_children_are_detached() {
        let mut tree = VTree::new();
        let root = tree.create_node(None);
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();

        tree.remove_children(root).unwrap();
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.next_sibling(a), None);

        let other = tree.create_node(None);
        assert_eq!(tree.append_child(other, b), Ok(b));
        assert_eq!(tree.append_child(other, a), Ok(a));
        assert_eq!(tree.children(other).collect::<Vec<_>>(), vec![b, a]);
        assert_eq!(tree.first_child(root), None);
    }
}
