//! Zone values: boards and stacks.
//!
//! A zone is either a 2-D board of cells or an ordered stack (hand, bag,
//! discard, pool, area). Both carry an optional insertion rule and optional
//! renderer layout; the engine enforces the rule and ignores the layout.

use serde::{Deserialize, Serialize};

use crate::core::{PieceId, PlayerId, ZoneId};
use crate::pieces::Attributes;

/// Visibility metadata. Not enforced by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneVisibility {
    /// Everyone sees the contents.
    #[default]
    Public,
    /// Only the zone owner sees the contents.
    OwnerOnly,
    /// Nobody sees the contents.
    Hidden,
}

/// Insertion rule for a zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRule {
    /// Allowed piece kinds. `None` allows every kind.
    pub allow_kinds: Option<Vec<String>>,
    /// Capacity. `None` for unlimited.
    pub max_items: Option<usize>,
    #[serde(default)]
    pub visibility: ZoneVisibility,
}

impl ZoneRule {
    /// A rule that allows everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given kinds.
    #[must_use]
    pub fn allow_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_kinds = Some(kinds.into_iter().map(Into::into).collect());
        self
    }

    /// Set the capacity.
    #[must_use]
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Set visibility to owner-only (like a hand).
    #[must_use]
    pub fn owner_only(mut self) -> Self {
        self.visibility = ZoneVisibility::OwnerOnly;
        self
    }

    /// Set visibility to hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = ZoneVisibility::Hidden;
        self
    }

    /// Does the rule admit this kind?
    #[must_use]
    pub fn admits(&self, kind: &str) -> bool {
        self.allow_kinds
            .as_ref()
            .map_or(true, |kinds| kinds.iter().any(|k| k == kind))
    }

    /// Is a zone holding `current` items at capacity?
    #[must_use]
    pub fn is_full(&self, current: usize) -> bool {
        self.max_items.is_some_and(|max| current >= max)
    }
}

/// Screen anchor for renderer layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Center,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Renderer-only layout hints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiLayout {
    pub anchor: Anchor,
    pub order: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub offset: Option<(i32, i32)>,
}

impl UiLayout {
    /// Layout at an anchor with no other hints.
    #[must_use]
    pub fn at(anchor: Anchor) -> Self {
        Self {
            anchor,
            order: None,
            width: None,
            height: None,
            offset: None,
        }
    }
}

/// Flavor of a stack zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackKind {
    Stack,
    Hand,
    Bag,
    Discard,
    Pool,
    Area,
}

/// Zone contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneShape {
    /// Row-major grid; `cells.len() == rows * cols`.
    Board {
        rows: usize,
        cols: usize,
        cells: Vec<Option<PieceId>>,
    },
    /// Ordered list; the top is the end.
    Stack { kind: StackKind, order: Vec<PieceId> },
}

/// A zone in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub owner: Option<PlayerId>,
    pub rule: Option<ZoneRule>,
    pub ui: Option<UiLayout>,
    #[serde(default)]
    pub attrs: Attributes,
    pub shape: ZoneShape,
}

impl Zone {
    /// Create an empty board.
    pub fn board(id: ZoneId, name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            id,
            name: name.into(),
            owner: None,
            rule: None,
            ui: None,
            attrs: Attributes::new(),
            shape: ZoneShape::Board {
                rows,
                cols,
                cells: vec![None; rows * cols],
            },
        }
    }

    /// Create an empty stack zone.
    pub fn stack(id: ZoneId, name: impl Into<String>, kind: StackKind) -> Self {
        Self {
            id,
            name: name.into(),
            owner: None,
            rule: None,
            ui: None,
            attrs: Attributes::new(),
            shape: ZoneShape::Stack {
                kind,
                order: Vec::new(),
            },
        }
    }

    /// Set the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: Option<PlayerId>) -> Self {
        self.owner = owner;
        self
    }

    /// Set the insertion rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ZoneRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Set renderer layout.
    #[must_use]
    pub fn at(mut self, layout: UiLayout) -> Self {
        self.ui = Some(layout);
        self
    }

    /// Is this a board?
    #[must_use]
    pub fn is_board(&self) -> bool {
        matches!(self.shape, ZoneShape::Board { .. })
    }

    /// Board cells, or `None` for stacks.
    #[must_use]
    pub fn cells(&self) -> Option<&[Option<PieceId>]> {
        match &self.shape {
            ZoneShape::Board { cells, .. } => Some(cells),
            ZoneShape::Stack { .. } => None,
        }
    }

    /// Board dimensions as `(rows, cols)`, or `None` for stacks.
    #[must_use]
    pub fn dims(&self) -> Option<(usize, usize)> {
        match &self.shape {
            ZoneShape::Board { rows, cols, .. } => Some((*rows, *cols)),
            ZoneShape::Stack { .. } => None,
        }
    }

    /// Stack order, or `None` for boards.
    #[must_use]
    pub fn order(&self) -> Option<&[PieceId]> {
        match &self.shape {
            ZoneShape::Board { .. } => None,
            ZoneShape::Stack { order, .. } => Some(order),
        }
    }

    /// Number of pieces held (occupied cells for boards).
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.shape {
            ZoneShape::Board { cells, .. } => cells.iter().filter(|c| c.is_some()).count(),
            ZoneShape::Stack { order, .. } => order.len(),
        }
    }

    /// Does the zone hold no pieces?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every piece, keeping dimensions and metadata.
    pub fn clear_all(&mut self) {
        match &mut self.shape {
            ZoneShape::Board { cells, .. } => cells.iter_mut().for_each(|c| *c = None),
            ZoneShape::Stack { order, .. } => order.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_starts_empty() {
        let board = Zone::board(ZoneId(0), "Board", 6, 7);
        assert!(board.is_board());
        assert_eq!(board.dims(), Some((6, 7)));
        assert_eq!(board.cells().map(<[_]>::len), Some(42));
        assert!(board.is_empty());
        assert!(board.order().is_none());
    }

    #[test]
    fn test_stack_zone() {
        let hand = Zone::stack(ZoneId(1), "Hand", StackKind::Hand)
            .with_owner(Some(PlayerId::new("p1")))
            .with_rule(ZoneRule::new().allow_kinds(["card"]).with_max_items(2).owner_only());

        assert!(!hand.is_board());
        assert_eq!(hand.order(), Some(&[][..]));
        let rule = hand.rule.as_ref().unwrap();
        assert_eq!(rule.visibility, ZoneVisibility::OwnerOnly);
        assert!(rule.admits("card"));
        assert!(!rule.admits("chip"));
        assert!(!rule.is_full(1));
        assert!(rule.is_full(2));
    }

    #[test]
    fn test_open_rule() {
        let rule = ZoneRule::new();
        assert!(rule.admits("anything"));
        assert!(!rule.is_full(10_000));
    }

    #[test]
    fn test_clear_all() {
        let mut board = Zone::board(ZoneId(0), "Board", 1, 2);
        if let ZoneShape::Board { cells, .. } = &mut board.shape {
            cells[1] = Some(PieceId(9));
        }
        assert_eq!(board.len(), 1);
        board.clear_all();
        assert!(board.is_empty());
        assert_eq!(board.dims(), Some((1, 2)));
    }
}
