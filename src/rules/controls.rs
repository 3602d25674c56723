//! UI-facing action descriptors.
//!
//! A control tells a generic client which move to send and how to collect
//! its input. Controls are advisory: the move's `validate` is the only
//! legality gate.

use serde::{Deserialize, Serialize};

use super::definition::MoveArgs;
use crate::pieces::AttributeValue;

/// A labeled choice for `ControlInput::Select`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: AttributeValue,
}

/// How a client collects extra input for a control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlInput {
    /// Plain button.
    #[default]
    None,
    /// Bounded number (slider, spinner).
    Number {
        min: i64,
        max: i64,
        step: Option<i64>,
        default: Option<i64>,
    },
    /// One of a fixed set of values.
    Select {
        options: Vec<SelectOption>,
        default: Option<AttributeValue>,
    },
}

/// A currently offered action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Stable key ("c4:drop-3", "poker:bet").
    pub id: String,
    pub label: String,
    /// Move to invoke.
    #[serde(rename = "move")]
    pub move_name: String,
    /// Static args sent with the move.
    pub args: Option<MoveArgs>,
    pub input: ControlInput,
    pub disabled: bool,
    pub disabled_reason: Option<String>,
    /// Grouping hint ("betting", "utility").
    pub group: Option<String>,
}

impl Control {
    /// An enabled plain button.
    pub fn new(id: impl Into<String>, label: impl Into<String>, move_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            move_name: move_name.into(),
            args: None,
            input: ControlInput::None,
            disabled: false,
            disabled_reason: None,
            group: None,
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: MoveArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Ask for a number in `min..=max`.
    #[must_use]
    pub fn with_number(mut self, min: i64, max: i64, step: Option<i64>, default: Option<i64>) -> Self {
        self.input = ControlInput::Number { min, max, step, default };
        self
    }

    #[must_use]
    pub fn with_select(mut self, options: Vec<SelectOption>, default: Option<AttributeValue>) -> Self {
        self.input = ControlInput::Select { options, default };
        self
    }

    /// Disable with a reason when `reason` is `Some`.
    #[must_use]
    pub fn disabled_if(mut self, reason: Option<impl Into<String>>) -> Self {
        if let Some(reason) = reason {
            self.disabled = true;
            self.disabled_reason = Some(reason.into());
        }
        self
    }

    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}
