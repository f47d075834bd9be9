//! fOS VDOM - Template virtual DOM
//!
//! In-memory tree built by compiled template code before it is attached
//! to a live document.
//!
//! Builders declare how many children a node will get, then append them
//! one by one. Appends return the id to continue from, so nested markup
//! can be built without explicit close calls. Content that is not
//! available yet is represented by an async placeholder, which is
//! invisible to logical traversal and can be filled in at any later point.
//!
//! ```
//! use fos_vdom::VTree;
//!
//! let mut tree = VTree::new();
//! let root = tree.create_element("ul", Some(0), Some(2));
//! let first = tree.append_element(root, "li", Some(0), Some(1)).unwrap();
//! assert_eq!(tree.append_text(first, "one").unwrap(), root);
//!
//! let pending = tree.begin_async(root).unwrap();
//! assert_eq!(tree.first_child(root), Some(first));
//! assert_eq!(tree.next_sibling(first), None);
//!
//! let late = tree.append_element(pending, "li", Some(0), None).unwrap();
//! assert_eq!(tree.next_sibling(first), Some(late));
//!
//! let mut doc = fos_dom::Document::default();
//! let ul = tree.actualize(root, &mut doc).unwrap();
//! assert_eq!(doc.children(ul).len(), 2);
//! ```

mod actualize;
mod element;
mod error;
pub mod namespace;
mod node;
mod tree;

pub use actualize::{ActualizeError, DocumentFactory};
pub use error::{Result, VDomError};
pub use node::{ElementData, Node, NodeKind, NodeType};
pub use tree::{Children, VTree, VTreeConfig};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
