//! fOS DOM - Document Object Model
//!
//! Arena-backed live document tree. This is the platform side that
//! virtual trees are actualized into.

mod attributes;
mod document;
mod error;
mod node;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use error::{DomError, DomResult};
pub use node::{ElementData, Node, NodeData, NodeType};

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
