// crates/langflow-mcp/src/graph.rs
// ============================================================================
// Module: Shared Value Graph
// Description: JSON-like values whose containers may be shared or cyclic.
// Purpose: Give the sanitizer an input model where node identity is observable.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`serde_json::Value`] is a tree, so it can never contain a cycle. Values
//! handed to the sanitizer can come from sources that alias nodes, so this
//! module models containers as reference-counted cells. Two containers are the
//! same node exactly when they share an allocation; structural equality plays
//! no part in identity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Graph Values
// ============================================================================

/// A JSON-like value whose arrays and objects are shared nodes.
#[derive(Debug, Clone)]
pub enum GraphValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string.
    String(String),
    /// Shared array node.
    Array(SharedArray),
    /// Shared object node.
    Object(SharedObject),
}

/// Identity of a container node for the lifetime of its allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Object node with insertion-ordered entries.
#[derive(Debug, Clone, Default)]
pub struct SharedObject(Rc<RefCell<Vec<(String, GraphValue)>>>);

impl SharedObject {
    /// Creates an empty object node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<GraphValue>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.0.borrow_mut();
        if let Some(slot) = entries.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = value;
        } else {
            entries.push((key, value));
        }
    }

    /// Returns this node's identity.
    #[must_use]
    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.0).cast::<()>().addr())
    }

    /// Returns a snapshot of the entries.
    ///
    /// Children are cloned handles, so the snapshot shares nodes with `self`.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, GraphValue)> {
        self.0.borrow().clone()
    }
}

/// Array node.
#[derive(Debug, Clone, Default)]
pub struct SharedArray(Rc<RefCell<Vec<GraphValue>>>);

impl SharedArray {
    /// Creates an empty array node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element.
    pub fn push(&self, value: impl Into<GraphValue>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Returns this node's identity.
    #[must_use]
    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.0).cast::<()>().addr())
    }

    /// Returns a snapshot of the elements.
    #[must_use]
    pub fn items(&self) -> Vec<GraphValue> {
        self.0.borrow().clone()
    }
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<&Value> for GraphValue {
    /// Lifts a tree into a graph; every container becomes a distinct node.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => Self::Number(number.clone()),
            Value::String(text) => Self::String(text.clone()),
            Value::Array(items) => {
                let array = SharedArray::new();
                for item in items {
                    array.push(Self::from(item));
                }
                Self::Array(array)
            }
            Value::Object(map) => {
                let object = SharedObject::new();
                for (key, item) in map {
                    object.insert(key.clone(), Self::from(item));
                }
                Self::Object(object)
            }
        }
    }
}

impl From<SharedObject> for GraphValue {
    fn from(object: SharedObject) -> Self {
        Self::Object(object)
    }
}

impl From<SharedArray> for GraphValue {
    fn from(array: SharedArray) -> Self {
        Self::Array(array)
    }
}

impl From<&str> for GraphValue {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for GraphValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for GraphValue {
    fn from(number: i64) -> Self {
        Self::Number(Number::from(number))
    }
}
