//! Ordered attribute storage shared by tag tokens and elements.

use serde::Serialize;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Attributes in source order, unique by name.
///
/// Insertion keeps the first value seen for a name: later duplicates are
/// rejected, which is the tokenizer's duplicate-attribute rule and also the
/// rule for merging attributes onto an existing `<html>` or `<body>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributesMap(Vec<Attribute>);

impl AttributesMap {
    /// An empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Look up an attribute value by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether an attribute with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|attr| attr.name == name)
    }

    /// Add an attribute unless one with the same name is already present.
    ///
    /// Returns `false` when the attribute was dropped as a duplicate.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        if self.contains(&attribute.name) {
            return false;
        }
        self.0.push(attribute);
        true
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate attributes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Mutable access for in-place renames (foreign attribute adjustment).
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attribute> {
        self.0.iter_mut()
    }

    /// Order-insensitive comparison of names and values.
    ///
    /// Used by the "Noah's Ark" clause, which compares attribute sets rather
    /// than their source order.
    #[must_use]
    pub fn same_set(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .all(|attr| other.get(&attr.name) == Some(attr.value.as_str()))
    }
}

impl FromIterator<Attribute> for AttributesMap {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut map = Self::new();
        for attribute in iter {
            let _ = map.insert(attribute);
        }
        map
    }
}

impl<'a> IntoIterator for &'a AttributesMap {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
