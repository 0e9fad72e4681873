use crate::Vec2;
use serde::{Deserialize, Serialize};

/// Sizes and gaps used to place nodes, every field resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Node width, also the width of one horizontal slot
    pub width: f32,
    pub height: f32,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    /// Extra vertical offset per sibling index when routing edges
    pub edge_padding: f32,
}

impl LayoutConfig {
    pub const DEFAULT: Self = Self {
        width: 100.0,
        height: 50.0,
        horizontal_gap: 25.0,
        vertical_gap: 50.0,
        edge_padding: 3.0,
    };

    /// Default size of a node
    pub fn node_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Horizontal distance covered by one slot of a row
    pub fn slot_width(&self) -> f32 {
        self.width + self.horizontal_gap
    }

    /// Vertical distance between two consecutive rows
    pub fn row_height(&self) -> f32 {
        self.height + self.vertical_gap
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A configuration where every field may be missing
///
/// Missing (or `null`) fields fall back to [`LayoutConfig::DEFAULT`] when
/// resolved. Unknown fields are ignored when deserializing so configurations
/// carrying renderer options can be read as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialLayoutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_padding: Option<f32>,
}

impl PartialLayoutConfig {
    /// Overlay `other` on top of `self`, fields set in `other` win
    pub fn merge(self, other: Self) -> Self {
        Self {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            horizontal_gap: other.horizontal_gap.or(self.horizontal_gap),
            vertical_gap: other.vertical_gap.or(self.vertical_gap),
            edge_padding: other.edge_padding.or(self.edge_padding),
        }
    }

    /// Fill the missing fields with the defaults
    pub fn resolve(&self) -> LayoutConfig {
        let default = LayoutConfig::DEFAULT;
        LayoutConfig {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
            horizontal_gap: self.horizontal_gap.unwrap_or(default.horizontal_gap),
            vertical_gap: self.vertical_gap.unwrap_or(default.vertical_gap),
            edge_padding: self.edge_padding.unwrap_or(default.edge_padding),
        }
    }
}

impl From<PartialLayoutConfig> for LayoutConfig {
    fn from(partial: PartialLayoutConfig) -> Self {
        partial.resolve()
    }
}

impl From<LayoutConfig> for PartialLayoutConfig {
    fn from(config: LayoutConfig) -> Self {
        Self {
            width: Some(config.width),
            height: Some(config.height),
            horizontal_gap: Some(config.horizontal_gap),
            vertical_gap: Some(config.vertical_gap),
            edge_padding: Some(config.edge_padding),
        }
    }
}
