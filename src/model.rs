use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::layout::geometry::Rect;

/// A single weighted entry handed to the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    /// Opaque identifier (ticker symbol, fund code, ...)
    pub id: CompactString,
    /// Drives the cell area. Must be > 0 unless the config floors it.
    pub weight: f64,
}

impl WeightedItem {
    pub fn new(id: impl Into<CompactString>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// A weighted item after layout: its id and weight plus the cell it occupies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    pub id: CompactString,
    /// Weight actually used for layout (after any floor substitution)
    pub weight: f64,
    /// Cell in absolute coordinates, padding already applied
    pub rect: Rect,
}

/// A named set of members laid out as one cell, then subdivided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: CompactString,
    pub members: Vec<WeightedItem>,
}

impl Group {
    pub fn new(name: impl Into<CompactString>, members: Vec<WeightedItem>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Sum of member weights. Always recomputed, never cached.
    pub fn total_weight(&self) -> f64 {
        self.members.iter().map(|m| m.weight).sum()
    }
}

/// One group's outer cell, its reserved header strip, and its placed members.
///
/// All rectangles are in the same absolute coordinate space as the bounds
/// passed to `layout_grouped`; no group-local offsets are involved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPlacement {
    pub name: CompactString,
    /// Total the group was laid out with: member weights after the weight
    /// policy is applied. Under `WeightPolicy::Floor` this can differ from
    /// `Group::total_weight()` on the input (floored members, or the floor
    /// itself for an empty group). Infinite if the members sum past `f64::MAX`.
    pub total_weight: f64,
    /// Outer cell of the group
    pub rect: Rect,
    /// Header strip at the top of `rect` (may be shorter than requested if the cell is small)
    pub header: Rect,
    pub members: Vec<PlacedItem>,
}

impl GroupPlacement {
    /// Member whose cell contains the point, if any.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<&PlacedItem> {
        self.members.iter().find(|m| m.rect.contains(px, py))
    }

    /// Area available to members below the header strip.
    pub fn body(&self) -> Rect {
        Rect::new(
            self.rect.x,
            self.header.bottom(),
            self.rect.width,
            (self.rect.bottom() - self.header.bottom()).max(0.0),
        )
    }
}

/// Find a member by id across all groups, returning its group name as well.
pub fn find_member<'a>(
    placements: &'a [GroupPlacement],
    id: &str,
) -> Option<(&'a str, &'a PlacedItem)> {
    placements.iter().find_map(|g| {
        g.members
            .iter()
            .find(|m| m.id == id)
            .map(|m| (g.name.as_str(), m))
    })
}
