//! Dice and faces.
//!
//! A die without faces rolls uniformly over `1..=sides`. A die with faces
//! rolls by cumulative weight over the face list, which covers loaded dice
//! and labeled dice ("Wood", "Brick", ...).

use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::piece::SkinRef;
use crate::core::{DieId, PlayerId};

/// Resolved value of a face.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceValue {
    Num(i64),
    Label(String),
}

impl FaceValue {
    /// Numeric value, if any.
    #[must_use]
    pub fn as_num(&self) -> Option<i64> {
        match self {
            FaceValue::Num(n) => Some(*n),
            FaceValue::Label(_) => None,
        }
    }
}

impl From<i64> for FaceValue {
    fn from(v: i64) -> Self {
        FaceValue::Num(v)
    }
}

impl From<i32> for FaceValue {
    fn from(v: i32) -> Self {
        FaceValue::Num(i64::from(v))
    }
}

impl From<&str> for FaceValue {
    fn from(v: &str) -> Self {
        FaceValue::Label(v.to_string())
    }
}

/// One face of a weighted or labeled die.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieFace {
    /// Face value; defaults to the 1-based face index.
    pub value: Option<FaceValue>,
    /// Relative weight; defaults to 1.
    pub weight: Option<u32>,
    #[serde(default)]
    pub attrs: Attributes,
}

impl DieFace {
    /// A face with a value and default weight.
    pub fn new(value: impl Into<FaceValue>) -> Self {
        Self {
            value: Some(value.into()),
            weight: None,
            attrs: Attributes::new(),
        }
    }

    /// Set the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Effective weight.
    #[must_use]
    pub fn effective_weight(&self) -> u32 {
        self.weight.unwrap_or(1)
    }
}

/// A die in a match. Static once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub id: DieId,
    pub name: String,
    /// Kind tag used by kind-based rolls ("D6", "D20", "ResourceDie").
    pub kind: String,
    pub sides: u32,
    #[serde(default)]
    pub faces: Vec<DieFace>,
    pub owner: Option<PlayerId>,
    #[serde(default)]
    pub skin: Option<SkinRef>,
    #[serde(default)]
    pub attrs: Attributes,
}

impl Die {
    /// Create a uniform die named after its kind.
    pub fn new(id: DieId, kind: impl Into<String>, sides: u32) -> Self {
        let kind = kind.into();
        Self {
            id,
            name: kind.clone(),
            kind,
            sides,
            faces: Vec::new(),
            owner: None,
            skin: None,
            attrs: Attributes::new(),
        }
    }

    /// Set explicit faces.
    #[must_use]
    pub fn with_faces(mut self, faces: Vec<DieFace>) -> Self {
        self.faces = faces;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: Option<PlayerId>) -> Self {
        self.owner = owner;
        self
    }

    /// Does this die roll over explicit faces?
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        !self.faces.is_empty()
    }
}
