//! Renderer-facing object model
//!
//! Element variants project themselves into this small generic tree. It
//! knows nothing about payload XML and nothing about any particular renderer.

use crate::types::AttributeEnum;
use serde_json::{Map, Number};

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i32),
    Double(f64),
    /// Object model name of an enum member
    Enum(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    String(String),
    Object(ObjectNode),
}

impl Value {
    pub fn enumeration<E: AttributeEnum>(value: E) -> Self {
        Value::Scalar(Scalar::Enum(value.object_name()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Scalar(Scalar::Enum(name)) => Some(name),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Value::Object(node) => Some(node),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            Value::Scalar(Scalar::Int(i)) => serde_json::Value::Number((*i).into()),
            Value::Scalar(Scalar::Double(d)) => Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Scalar(Scalar::Enum(name)) => serde_json::Value::String((*name).to_string()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Object(node) => node.to_json(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Double(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<ObjectNode> for Value {
    fn from(value: ObjectNode) -> Self {
        Value::Object(value)
    }
}

/// What an element reports for one of its properties.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Emitted into the object
    Literal(Value),
    /// Filled in by the renderer at display time; never emitted as a value
    Placeholder(String),
}

impl PropertyValue {
    pub fn literal(value: impl Into<Value>) -> Option<Self> {
        Some(PropertyValue::Literal(value.into()))
    }

    pub fn optional<T: Into<Value>>(value: Option<T>) -> Option<Self> {
        value.map(|v| PropertyValue::Literal(v.into()))
    }

    pub fn optional_str(value: Option<&String>) -> Option<Self> {
        value.map(|v| PropertyValue::Literal(Value::String(v.clone())))
    }

    pub fn enumeration<E: AttributeEnum>(value: Option<E>) -> Option<Self> {
        value.map(|v| PropertyValue::Literal(Value::enumeration(v)))
    }

    /// An enum property that is left out while it holds its default
    pub fn unless_default<E: AttributeEnum + Default>(value: E) -> Option<Self> {
        if value == E::default() {
            None
        } else {
            Some(PropertyValue::Literal(Value::enumeration(value)))
        }
    }

    /// A placeholder, when present, replaces the literal.
    pub fn bindable(literal: Option<&str>, placeholder: Option<&str>) -> Option<Self> {
        match (placeholder, literal) {
            (Some(name), _) => Some(PropertyValue::Placeholder(name.to_string())),
            (None, Some(text)) => Some(PropertyValue::Literal(Value::String(text.to_string()))),
            (None, None) => None,
        }
    }
}

/// Named object with ordered properties, placeholder bindings and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    pub name: String,
    properties: Vec<(String, Value)>,
    bindings: Vec<(String, String)>,
    children: Vec<Value>,
}

impl ObjectNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a node from `(name, value)` pairs. `None` entries are skipped and
    /// placeholders are routed into the binding list.
    pub fn from_properties(
        name: impl Into<String>,
        properties: impl IntoIterator<Item = (&'static str, Option<PropertyValue>)>,
    ) -> Self {
        let mut node = Self::new(name);
        for (key, value) in properties {
            match value {
                Some(PropertyValue::Literal(value)) => node.set(key, value),
                Some(PropertyValue::Placeholder(placeholder)) => node.bind(key, placeholder),
                None => {}
            }
        }
        node
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        self.bindings.retain(|(k, _)| *k != key);
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn bind(&mut self, key: impl Into<String>, placeholder: impl Into<String>) {
        let key = key.into();
        self.properties.retain(|(k, _)| *k != key);
        let placeholder = placeholder.into();
        match self.bindings.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = placeholder,
            None => self.bindings.push((key, placeholder)),
        }
    }

    pub fn push_child(&mut self, child: impl Into<Value>) {
        self.children.push(child.into());
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn binding(&self, key: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn properties(&self) -> &[(String, Value)] {
        &self.properties
    }

    pub fn bindings(&self) -> &[(String, String)] {
        &self.bindings
    }

    pub fn children(&self) -> &[Value] {
        &self.children
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut out = Map::new();
        out.insert("type".to_string(), serde_json::Value::String(self.name.clone()));

        if !self.properties.is_empty() {
            let properties: Map<String, serde_json::Value> = self
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect();
            out.insert("properties".to_string(), properties.into());
        }

        if !self.bindings.is_empty() {
            let bindings: Map<String, serde_json::Value> = self
                .bindings
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            out.insert("bindings".to_string(), bindings.into());
        }

        if !self.children.is_empty() {
            let children = self.children.iter().map(Value::to_json).collect();
            out.insert("children".to_string(), serde_json::Value::Array(children));
        }

        serde_json::Value::Object(out)
    }
}
