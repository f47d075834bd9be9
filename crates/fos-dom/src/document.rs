//! Document - High-level document API
//!
//! Arena-backed live document. Nodes are created detached and linked with
//! [`Document::append_child`], which follows DOM semantics: appending an
//! attached node moves it, appending a fragment moves the fragment's
//! children.

use crate::error::validate_name;
use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Live document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Document URL
    url: String,
}

impl Document {
    /// Create a new empty document
    pub fn new(url: &str) -> Self {
        Self {
            nodes: Vec::new(),
            url: url.to_string(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of nodes ever created in this document
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

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(DomError::NotFound(id))
    }

    fn element_mut(&mut self, id: NodeId, op: &'static str) -> DomResult<&mut ElementData> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(op))
    }

    /// Ids are 32 bits wide: one document addresses at most `u32::MAX` nodes.
    fn push(&mut self, data: NodeData) -> NodeId {
        debug_assert!(self.nodes.len() < u32::MAX as usize, "node arena exhausted");
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create an element in no namespace
    pub fn create_element(&mut self, tag_name: &str) -> DomResult<NodeId> {
        validate_name(tag_name)?;
        Ok(self.push(NodeData::Element(ElementData::new(tag_name, None))))
    }

    /// Create an element in the given namespace
    pub fn create_element_ns(&mut self, namespace: &str, tag_name: &str) -> DomResult<NodeId> {
        validate_name(tag_name)?;
        let ns = (!namespace.is_empty()).then_some(namespace);
        Ok(self.push(NodeData::Element(ElementData::new(tag_name, ns))))
    }

    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.push(NodeData::Text(data.to_string()))
    }

    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.push(NodeData::Comment(data.to_string()))
    }

    pub fn create_document_fragment(&mut self) -> NodeId {
        self.push(NodeData::DocumentFragment)
    }

    /// Set an unqualified attribute
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        validate_name(name)?;
        self.element_mut(element, "setAttribute")?
            .attrs
            .add(name, value, None);
        Ok(())
    }

    /// Set a namespace-qualified attribute
    pub fn set_attribute_ns(
        &mut self,
        element: NodeId,
        namespace: &str,
        name: &str,
        value: &str,
    ) -> DomResult<()> {
        validate_name(name)?;
        let ns = (!namespace.is_empty()).then_some(namespace);
        self.element_mut(element, "setAttributeNS")?
            .attrs
            .add(name, value, ns);
        Ok(())
    }

    /// Assign a form control's value
    pub fn set_value(&mut self, element: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(element, "value")?.value = Some(value.to_string());
        Ok(())
    }

    /// Append `child` to `parent`, returning `child`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest("node is an ancestor of the parent"));
        }

        if matches!(self.node(child)?.data, NodeData::DocumentFragment) {
            let moved = std::mem::take(&mut self.node_mut(child)?.children);
            tracing::trace!(?parent, count = moved.len(), "moving fragment children");
            for &grandchild in &moved {
                self.node_mut(grandchild)?.parent = Some(parent);
            }
            self.node_mut(parent)?.children.extend(moved);
            return Ok(child);
        }

        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(child)
    }

    /// Remove a node from its parent, if any
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        if let Some(parent) = self.node_mut(id)?.parent.take() {
            self.node_mut(parent)?.children.retain(|&c| c != id);
        }
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.get(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Child nodes in order (empty for leaves and unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Element data if `id` is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Child elements only, in order
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.element(c).is_some())
            .collect()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        if let Some(text) = node.as_text() {
            out.push_str(text);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
