//! Element Attributes
//!
//! Ordered attribute storage with by-name lookup. Lookups ignore the
//! namespace: an element never carries two attributes with the same name
//! in different namespaces.

use std::collections::HashMap;

/// Named node map (attribute collection)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
    pub namespace: Option<String>,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
        }
    }

    /// Attribute qualified by a namespace URI
    pub fn with_namespace(
        name: impl Into<String>,
        value: impl Into<String>,
        namespace: Option<&str>,
    ) -> Self {
        Self {
            namespace: namespace.map(str::to_owned),
            ..Self::new(name, value)
        }
    }
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for a known attribute count
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attributes: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
        }
    }

    /// Get number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute by index
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    /// Get attribute by name
    pub fn get_named_item(&self, name: &str) -> Option<&Attr> {
        self.by_name.get(name).and_then(|&i| self.attributes.get(i))
    }

    /// Get attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_named_item(name).map(|a| a.value.as_str())
    }

    /// Check if attribute exists
    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Set attribute, replacing any attribute with the same name in place
    pub fn set_named_item(&mut self, attr: Attr) -> Option<Attr> {
        if let Some(&index) = self.by_name.get(&attr.name) {
            Some(std::mem::replace(&mut self.attributes[index], attr))
        } else {
            self.by_name.insert(attr.name.clone(), self.attributes.len());
            self.attributes.push(attr);
            None
        }
    }

    /// Add an attribute by name/value with an optional namespace
    pub fn add(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        namespace: Option<&str>,
    ) -> Option<Attr> {
        self.set_named_item(Attr::with_namespace(name, value, namespace))
    }

    /// Add every unqualified name/value pair, in iteration order
    pub fn add_all<I, K, V>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in attrs {
            self.add(name, value, None);
        }
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for NamedNodeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.add_all(iter);
        map
    }
}
