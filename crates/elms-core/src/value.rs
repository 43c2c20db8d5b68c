//! Typed value tree for form data.
//!
//! A [`Value`] is the in-memory shape of everything a user enters into a form:
//! scalars, ordered sequences, and nested mappings. Containers are held behind
//! [`Arc`] so that cloning a tree is cheap and a write through
//! [`Value::set`] only copies the branch it touches. Older snapshots stay valid
//! for whoever still holds them.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::path::{FieldPath, parse_index};

/// Insertion-ordered mapping from field name to value.
pub type Map = IndexMap<String, Value>;

/// One node of the value tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Arc<Vec<Value>>),
    Map(Arc<Map>),
}

/// Runtime variant of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    Text,
    List,
    Map,
}

impl ValueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Text => "string",
            Self::List => "array",
            Self::Map => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// An empty mapping, the starting state of every form session.
    #[must_use]
    pub fn empty_map() -> Self {
        Self::Map(Arc::default())
    }

    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(Arc::new(items))
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value counts as "filled in".
    ///
    /// Null, `false`, zero, NaN and the empty string are falsy. Containers are
    /// always truthy, even when empty.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Integer(number) => *number != 0,
            Self::Float(number) => *number != 0.0 && !number.is_nan(),
            Self::Text(text) => !text.is_empty(),
            Self::List(_) | Self::Map(_) => true,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric reading of the value. Numbers are taken as-is and strings are
    /// parsed after trimming, so `"2020"` reads as `2020.0`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Self::Integer(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Bool(_) | Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Text form of a scalar, used when a rule needs to read a value as a
    /// string regardless of how it was stored.
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Integer(number) => Some(number.to_string()),
            Self::Float(number) => Some(number.to_string()),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Look up the value at `path`.
    ///
    /// Returns `None` as soon as an intermediate value is absent or is not a
    /// container. Numeric segments index into sequences.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.child(segment))
    }

    fn child(&self, segment: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.get(segment),
            Self::List(items) => parse_index(segment).and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Write `value` at `path`, creating intermediate mappings as needed.
    ///
    /// Any intermediate value that is not a container is replaced by an empty
    /// mapping. A sequence is kept when the segment indexes into it or sits
    /// just past its end (an append). An index further out leaves the tree
    /// unchanged.
    pub fn set(&mut self, path: &FieldPath, value: Self) {
        assign(self, path.segments(), value);
    }

    /// Copy-on-write variant of [`Value::set`]. `self` is left untouched and
    /// the returned tree shares every branch outside `path` with it.
    #[must_use]
    pub fn with(&self, path: &FieldPath, value: Self) -> Self {
        let mut next = self.clone();
        next.set(path, value);
        next
    }
}

fn assign(target: &mut Value, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    if let (Value::List(items), Some(index)) = (&mut *target, parse_index(head)) {
        if index > items.len() {
            return;
        }
        let items = Arc::make_mut(items);
        if index == items.len() {
            items.push(Value::Null);
        }
        assign(&mut items[index], rest, value);
        return;
    }

    if !matches!(target, Value::Map(_)) {
        *target = Value::empty_map();
    }
    if let Value::Map(entries) = target {
        let slot = Arc::make_mut(entries)
            .entry(head.clone())
            .or_insert(Value::Null);
        assign(slot, rest, value);
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map_or_else(|| Self::Float(number.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::list(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(Arc::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            )),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Integer(number) => Self::from(*number),
            Value::Float(number) => serde_json::Number::from_f64(*number).map_or(Self::Null, Self::Number),
            Value::Text(text) => Self::String(text.clone()),
            Value::List(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Map(entries) => Self::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}
