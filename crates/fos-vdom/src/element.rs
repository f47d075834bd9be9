//! Element nodes
//!
//! Attribute access and the shorthand builders used by compiled template
//! code. The shorthands return the id the builder should continue from:
//! either the new element (while it still expects content) or the result
//! of the completion bubble.

use fos_dom::NamedNodeMap;

use crate::node::{ElementData, Node, NodeKind, NodeType};
use crate::{NodeId, Result, VDomError, VTree};

impl VTree {
    /// Allocate a detached element. `None` arities mean "not known".
    pub fn create_element(
        &mut self,
        tag_name: &str,
        attr_count: Option<usize>,
        child_count: Option<usize>,
    ) -> NodeId {
        let data = ElementData::new(tag_name, attr_count);
        self.push(Node::new(NodeKind::Element(data), child_count))
    }

    /// Element data for `id`
    pub fn element(&self, id: NodeId) -> Result<&ElementData> {
        self.node(id)?.as_element().ok_or(VDomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(VDomError::NotAnElement(id))
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag_name.as_str())
    }

    pub fn attributes(&self, id: NodeId) -> Option<&NamedNodeMap> {
        self.get(id)?.as_element().map(|e| &e.attributes)
    }

    /// Set one attribute; returns `id` for chaining
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
        namespace: Option<&str>,
    ) -> Result<NodeId> {
        self.element_mut(id)?.attributes.add(name, value, namespace);
        Ok(id)
    }

    /// Set unqualified attributes in iteration order; returns `id`
    pub fn set_attributes<I, K, V>(&mut self, id: NodeId, attrs: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.element_mut(id)?.attributes.add_all(attrs);
        Ok(id)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attributes(id).is_some_and(|a| a.has(name))
    }

    /// Same as [`VTree::has_attribute`]: attribute names are unique per
    /// element regardless of namespace.
    pub fn has_attribute_ns(&self, id: NodeId, _namespace: Option<&str>, name: &str) -> bool {
        self.has_attribute(id, name)
    }

    pub fn checked(&self, id: NodeId) -> bool {
        self.has_attribute(id, "checked")
    }

    pub fn selected(&self, id: NodeId) -> bool {
        self.has_attribute(id, "selected")
    }

    pub fn disabled(&self, id: NodeId) -> bool {
        self.has_attribute(id, "disabled")
    }

    /// Appended text if any, else the `value` attribute
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element()?.value()
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<()> {
        self.element_mut(id)?.value = Some(value.into());
        Ok(())
    }

    /// Create and append an element.
    ///
    /// Returns the new element, unless both arities are zero: such an
    /// element can take no more content, so the completion bubble of
    /// `parent` is returned instead.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attr_count: Option<usize>,
        child_count: Option<usize>,
    ) -> Result<NodeId> {
        self.check_append(parent, NodeType::Element)?;
        let child = self.create_element(tag_name, attr_count, child_count);
        self.append_child(parent, child)?;

        if attr_count == Some(0) && child_count == Some(0) {
            self.finish_child(parent)
        } else {
            Ok(child)
        }
    }

    /// Append a text node; returns the completion bubble of `parent`
    pub fn append_text(&mut self, parent: NodeId, value: impl Into<String>) -> Result<NodeId> {
        self.check_append(parent, NodeType::Text)?;
        let text = self.create_text(value);
        self.append_child(parent, text)?;
        self.finish_child(parent)
    }

    /// Append a comment node; returns the completion bubble of `parent`
    pub fn append_comment(&mut self, parent: NodeId, value: impl Into<String>) -> Result<NodeId> {
        self.check_append(parent, NodeType::Comment)?;
        let comment = self.create_comment(value);
        self.append_child(parent, comment)?;
        self.finish_child(parent)
    }

    /// Append a shallow clone of a static node; returns the completion
    /// bubble of `parent`. The static node itself is never linked.
    pub fn append_static_clone(&mut self, parent: NodeId, node: NodeId) -> Result<NodeId> {
        let node_type = self.node(node)?.node_type();
        self.check_append(parent, node_type)?;
        let copy = self.clone_node(node)?;
        self.append_child(parent, copy)?;
        self.finish_child(parent)
    }
}
