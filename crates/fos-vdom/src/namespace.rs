//! Namespace table and propagation

use crate::{NodeId, VTree};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Namespace implied by a tag name alone
pub fn implicit_namespace(tag_name: &str) -> Option<&'static str> {
    match tag_name {
        "svg" => Some(SVG_NAMESPACE),
        "math" => Some(MATHML_NAMESPACE),
        _ => None,
    }
}

/// Elements whose content is a scalar value rather than children
pub fn is_value_bearing(tag_name: &str) -> bool {
    matches!(tag_name, "textarea" | "TEXTAREA")
}

impl VTree {
    /// Give `root` and its namespace-aware descendants `namespace`.
    ///
    /// Descent stops at non-namespace-aware nodes and at descendants that
    /// already carry a namespace of their own.
    pub(crate) fn assign_namespace(&mut self, root: NodeId, namespace: &str) {
        tracing::debug!(?root, namespace, "propagating namespace");

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id.index()) else {
                continue;
            };
            node.namespace_uri = Some(namespace.to_string());
            let children = node.child_slots.clone();

            for &child in children.iter().rev() {
                let inherits = self
                    .nodes
                    .get(child.index())
                    .is_some_and(|c| c.namespace_aware && c.namespace_uri.is_none());
                if inherits {
                    stack.push(child);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_table() {
        assert_eq!(implicit_namespace("svg"), Some(SVG_NAMESPACE));
        assert_eq!(implicit_namespace("math"), Some(MATHML_NAMESPACE));
        assert_eq!(implicit_namespace("SVG"), None);
        assert_eq!(implicit_namespace("div"), None);
    }

    #[test]
    fn test_value_bearing_tags() {
        assert!(is_value_bearing("textarea"));
        assert!(is_value_bearing("TEXTAREA"));
        assert!(!is_value_bearing("input"));
    }

    #[test]
    fn test_assign_namespace_twice_is_stable() {
        let mut tree = VTree::new();
        let root = tree.create_element("g", None, None);
        let path = tree.append_element(root, "path", Some(0), None).unwrap();
        let math = tree.append_element(root, "math", None, None).unwrap();
        let slot = tree.begin_async(root).unwrap();

        tree.assign_namespace(root, SVG_NAMESPACE);
        let first: Vec<_> = tree.nodes.iter().map(|n| n.namespace_uri.clone()).collect();
        tree.assign_namespace(root, SVG_NAMESPACE);
        let second: Vec<_> = tree.nodes.iter().map(|n| n.namespace_uri.clone()).collect();

        assert_eq!(first, second);
        assert_eq!(tree.get(path).unwrap().namespace_uri(), Some(SVG_NAMESPACE));
        assert_eq!(tree.get(math).unwrap().namespace_uri(), Some(MATHML_NAMESPACE));
        assert_eq!(tree.get(slot).unwrap().namespace_uri(), None);
        assert_eq!(tree.child_nodes(root), &[path, math, slot]);
    }
}
