//! Free-form attribute bags for game-specific properties.
//!
//! Players, pieces, zones and dice carry attributes like "amount", "rank",
//! "folded". The engine doesn't interpret them - except for the integer
//! counters touched by `ops::increment_piece_attr`.
//!
//! ## AttributeValue Types
//!
//! - `Int`: Numbers (pot amount, stack size)
//! - `Bool`: Flags (folded, revealed)
//! - `Text`: Strings (rank, suit, short names)
//! - `IntList`: Number lists
//! - `TextList`: String lists

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// Key for accessing attributes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    /// Create a new attribute key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttributeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Value for an attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Integer value (counters, amounts).
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Text value.
    Text(String),
    /// List of integers.
    IntList(Vec<i64>),
    /// List of strings.
    TextList(Vec<String>),
}

impl AttributeValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as int list reference if this is an IntList value.
    #[must_use]
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            AttributeValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    /// Get as text list reference if this is a TextList value.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::TextList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(i64::from(v))
    }
}

impl From<u32> for AttributeValue {
    fn from(v: u32) -> Self {
        AttributeValue::Int(i64::from(v))
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl From<Vec<i64>> for AttributeValue {
    fn from(v: Vec<i64>) -> Self {
        AttributeValue::IntList(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        AttributeValue::TextList(v)
    }
}

/// Collection of attributes.
///
/// Ordered so that equal bags always serialize identically.
pub type Attributes = OrdMap<AttributeKey, AttributeValue>;
