//! Zone system for piece locations.
//!
//! Zones are **box-declared**, not hardcoded. Games declare their boards and
//! stacks (community cards, hands, pot) in a `GameBox`.
//!
//! ## Key Types
//!
//! - `Zone`: id, name, owner, rule, layout, and a `ZoneShape`
//! - `ZoneShape`: `Board` (grid of optional cells) or `Stack` (ordered list)
//! - `ZoneRule`: `allow_kinds` / `max_items`, enforced on insertion
//! - `UiLayout`: renderer metadata, ignored by engine logic

pub mod zone;

pub use zone::{Anchor, StackKind, UiLayout, Zone, ZoneRule, ZoneShape, ZoneVisibility};
