//! Consuming view over the attributes of one element

use crate::xml::XmlElement;

/// Attributes not yet claimed by an element variant.
///
/// Each successful [`pop_value`](Self::pop_value) removes the attribute, so
/// whatever is left after an element has parsed its known attributes is by
/// definition unknown to it.
#[derive(Debug, Clone, Default)]
pub struct AttributesHelper {
    remaining: Vec<(String, String)>,
}

impl AttributesHelper {
    pub fn new(attributes: Vec<(String, String)>) -> Self {
        Self { remaining: attributes }
    }

    pub fn from_element(element: &XmlElement) -> Self {
        Self::new(element.attributes.clone())
    }

    /// Remove and return the value of `name`.
    pub fn pop_value(&mut self, name: &str) -> Option<String> {
        let index = self.remaining.iter().position(|(key, _)| key == name)?;
        Some(self.remaining.remove(index).1)
    }

    /// Value of `name` without consuming it
    pub fn peek_value(&self, name: &str) -> Option<&str> {
        self.remaining
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.peek_value(name).is_some()
    }

    /// Attributes nobody consumed, in document order
    pub fn remaining(&self) -> impl Iterator<Item = (&str, &str)> {
        self.remaining.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }
}
