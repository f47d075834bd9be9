//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor, appending to a leaf)
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(&'static str),

    /// Name that is not a valid element or attribute name
    #[error("Invalid character in name: {0:?}")]
    InvalidCharacter(String),

    /// Operation not supported by this node type
    #[error("Invalid node type for {0}")]
    InvalidNodeType(&'static str),
}

/// Check an element or attribute name.
///
/// Loose compared to the XML `Name` production: rejects empty names,
/// whitespace, markup delimiters and a leading digit, hyphen or dot.
pub(crate) fn validate_name(name: &str) -> DomResult<()> {
    let Some(first) = name.chars().next() else {
        return Err(DomError::InvalidCharacter(name.to_string()));
    };

    if first.is_ascii_digit() || first == '-' || first == '.' {
        return Err(DomError::InvalidCharacter(name.to_string()));
    }

    let bad = name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '/' | '=' | '"' | '\''));
    if bad {
        return Err(DomError::InvalidCharacter(name.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["div", "my-element", "svg:rect", "xlink:href", "data-x", "_private"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "1div", "-x", "a b", "a<b", "a/b", "a=b", "tab\there"] {
            assert_eq!(
                validate_name(name),
                Err(DomError::InvalidCharacter(name.to_string())),
                "{name:?} should be rejected"
            );
        }
    }
}
