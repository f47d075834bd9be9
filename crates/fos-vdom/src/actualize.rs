//! Actualization
//!
//! Converts a virtual subtree into platform nodes through a
//! [`DocumentFactory`]. Children are emitted in physical order. Async
//! placeholders contribute their content directly to the enclosing
//! platform element, so an empty placeholder contributes nothing.

use fos_dom::{Document, DomError};

use crate::node::{Node, NodeKind};
use crate::{NodeId, VDomError, VTree};

/// Platform document operations used by [`VTree::actualize`]
pub trait DocumentFactory {
    type Node;
    type Error;

    fn create_element(&mut self, tag_name: &str) -> Result<Self::Node, Self::Error>;

    fn create_element_ns(
        &mut self,
        namespace: &str,
        tag_name: &str,
    ) -> Result<Self::Node, Self::Error>;

    fn create_text_node(&mut self, data: &str) -> Result<Self::Node, Self::Error>;

    fn create_comment(&mut self, data: &str) -> Result<Self::Node, Self::Error>;

    fn create_document_fragment(&mut self) -> Result<Self::Node, Self::Error>;

    fn set_attribute(
        &mut self,
        element: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn set_attribute_ns(
        &mut self,
        element: &Self::Node,
        namespace: &str,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    /// Assign a form control's value slot
    fn set_value(&mut self, element: &Self::Node, value: &str) -> Result<(), Self::Error>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;
}

/// Actualization failure
#[derive(Debug, thiserror::Error)]
pub enum ActualizeError<E> {
    /// The id does not belong to this tree
    #[error(transparent)]
    Tree(#[from] VDomError),

    /// Error returned by the document factory, as is
    #[error("document rejected operation: {0}")]
    Document(#[source] E),
}

impl VTree {
    /// Build the platform subtree for `id`. A placeholder root becomes a
    /// platform document fragment.
    pub fn actualize<F: DocumentFactory>(
        &self,
        id: NodeId,
        document: &mut F,
    ) -> Result<F::Node, ActualizeError<F::Error>> {
        tracing::debug!(?id, "actualizing subtree");
        self.actualize_node(self.node(id)?, document)
    }

    fn actualize_node<F: DocumentFactory>(
        &self,
        node: &Node,
        document: &mut F,
    ) -> Result<F::Node, ActualizeError<F::Error>> {
        let el = match &node.kind {
            NodeKind::Text(text) => {
                return document.create_text_node(text).map_err(ActualizeError::Document);
            }
            NodeKind::Comment(comment) => {
                return document.create_comment(comment).map_err(ActualizeError::Document);
            }
            NodeKind::Fragment => {
                let fragment = document
                    .create_document_fragment()
                    .map_err(ActualizeError::Document)?;
                self.actualize_children(node, &fragment, document)?;
                return Ok(fragment);
            }
            NodeKind::Element(el) => el,
        };

        let platform = match node.namespace_uri() {
            Some(ns) => document.create_element_ns(ns, &el.tag_name),
            None => document.create_element(&el.tag_name),
        }
        .map_err(ActualizeError::Document)?;

        for attr in el.attributes.iter() {
            let set = match attr.namespace.as_deref() {
                Some(ns) => document.set_attribute_ns(&platform, ns, &attr.name, &attr.value),
                None => document.set_attribute(&platform, &attr.name, &attr.value),
            };
            set.map_err(ActualizeError::Document)?;
        }

        if el.value_bearing {
            if let Some(value) = el.value() {
                document
                    .set_value(&platform, value)
                    .map_err(ActualizeError::Document)?;
            }
        } else {
            self.actualize_children(node, &platform, document)?;
        }

        Ok(platform)
    }

    fn actualize_children<F: DocumentFactory>(
        &self,
        node: &Node,
        target: &F::Node,
        document: &mut F,
    ) -> Result<(), ActualizeError<F::Error>> {
        for &child_id in node.child_nodes() {
            let child = self.node(child_id)?;
            if child.is_fragment() {
                self.actualize_children(child, target, document)?;
                continue;
            }
            let platform = self.actualize_node(child, document)?;
            document
                .append_child(target, &platform)
                .map_err(ActualizeError::Document)?;
        }
        Ok(())
    }
}

impl DocumentFactory for Document {
    type Node = fos_dom::NodeId;
    type Error = DomError;

    fn create_element(&mut self, tag_name: &str) -> Result<Self::Node, DomError> {
        Document::create_element(self, tag_name)
    }

    fn create_element_ns(&mut self, namespace: &str, tag_name: &str) -> Result<Self::Node, DomError> {
        Document::create_element_ns(self, namespace, tag_name)
    }

    fn create_text_node(&mut self, data: &str) -> Result<Self::Node, DomError> {
        Ok(Document::create_text_node(self, data))
    }

    fn create_comment(&mut self, data: &str) -> Result<Self::Node, DomError> {
        Ok(Document::create_comment(self, data))
    }

    fn create_document_fragment(&mut self) -> Result<Self::Node, DomError> {
        Ok(Document::create_document_fragment(self))
    }

    fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str) -> Result<(), DomError> {
        Document::set_attribute(self, *element, name, value)
    }

    fn set_attribute_ns(
        &mut self,
        element: &Self::Node,
        namespace: &str,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        Document::set_attribute_ns(self, *element, namespace, name, value)
    }

    fn set_value(&mut self, element: &Self::Node, value: &str) -> Result<(), DomError> {
        Document::set_value(self, *element, value)
    }

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError> {
        Document::append_child(self, *parent, *child).map(|_| ())
    }
}
