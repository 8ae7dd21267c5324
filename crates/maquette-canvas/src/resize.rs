//! Resize Controller
//!
//! Translates a pointer drag starting at one of eight anchor handles into
//! updated width/height style fields and, for handles on the top/left
//! side, an updated position that keeps the opposite edge anchored.
//!
//! The controller never touches canvas state itself: each pointer move
//! yields an [`ElementUpdate`] that the caller commits through the canvas
//! model (latest wins, no history).

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind, ElementUpdate, Position};
use crate::error::{Error, Result};
use crate::geometry::PointerPosition;

/// Width/height used when an element has no parseable size in its style
const FALLBACK_WIDTH: i32 = 200;
/// Fallback height counterpart
const FALLBACK_HEIGHT: i32 = 100;

/// One of the eight resize anchor handles on an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    /// Top edge
    #[serde(rename = "n")]
    North,
    /// Bottom edge
    #[serde(rename = "s")]
    South,
    /// Right edge
    #[serde(rename = "e")]
    East,
    /// Left edge
    #[serde(rename = "w")]
    West,
    /// Top-left corner
    #[serde(rename = "nw")]
    NorthWest,
    /// Top-right corner
    #[serde(rename = "ne")]
    NorthEast,
    /// Bottom-left corner
    #[serde(rename = "sw")]
    SouthWest,
    /// Bottom-right corner
    #[serde(rename = "se")]
    SouthEast,
}

impl ResizeHandle {
    /// Get the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthWest => "nw",
            Self::NorthEast => "ne",
            Self::SouthWest => "sw",
            Self::SouthEast => "se",
        }
    }

    /// Handle drags the left (leading) edge: width grows against the
    /// pointer and position shifts to anchor the right edge.
    #[must_use]
    pub fn moves_left_edge(&self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    /// Handle drags the top (leading) edge.
    #[must_use]
    pub fn moves_top_edge(&self) -> bool {
        matches!(self, Self::North | Self::NorthWest | Self::NorthEast)
    }

    /// Handle changes width at all.
    #[must_use]
    pub fn resizes_width(&self) -> bool {
        !matches!(self, Self::North | Self::South)
    }

    /// Handle changes height at all.
    #[must_use]
    pub fn resizes_height(&self) -> bool {
        !matches!(self, Self::East | Self::West)
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-kind minimum dimensions a resize may never go below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConstraints {
    /// Minimum width in pixels
    pub min_width: i32,
    /// Minimum height in pixels
    pub min_height: i32,
}

impl SizeConstraints {
    /// Constraints for an element kind
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Image => Self {
                min_width: 50,
                min_height: 50,
            },
            ElementKind::Divider => Self {
                min_width: 50,
                min_height: 1,
            },
            _ => Self {
                min_width: 30,
                min_height: 20,
            },
        }
    }
}

impl Default for SizeConstraints {
    fn default() -> Self {
        Self {
            min_width: 50,
            min_height: 50,
        }
    }
}

/// Parse a pixel style value ("240px", "240"). Percentages and other
/// units have no fixed pixel size and fall back to the default.
fn parse_px(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
    digits.trim().parse::<f64>().ok().map(|v| v.round() as i32)
}

/// An in-progress resize drag for one element.
///
/// Captures the element's effective size, position, and full style at
/// drag start; every [`update`](Self::update) computes the new geometry
/// from the total pointer delta since the start point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeSession {
    element_id: uuid::Uuid,
    handle: ResizeHandle,
    origin: PointerPosition,
    start_width: i32,
    start_height: i32,
    start_position: Position,
    start_style: crate::element::StyleMap,
    constraints: SizeConstraints,
}

impl ResizeSession {
    /// Begin a resize drag. Fails when the element is locked.
    pub fn begin(element: &Element, handle: ResizeHandle, origin: PointerPosition) -> Result<Self> {
        if element.locked {
            return Err(Error::ElementLocked(element.id));
        }

        let constraints = SizeConstraints::for_kind(element.kind);
        let start_width = element
            .style
            .get("width")
            .and_then(|v| parse_px(v))
            .unwrap_or(FALLBACK_WIDTH)
            .max(constraints.min_width);
        let start_height = element
            .style
            .get("height")
            .and_then(|v| parse_px(v))
            .unwrap_or(FALLBACK_HEIGHT)
            .max(constraints.min_height);

        Ok(Self {
            element_id: element.id,
            handle,
            origin,
            start_width,
            start_height,
            start_position: element.position,
            start_style: element.style.clone(),
            constraints,
        })
    }

    /// The element being resized
    #[must_use]
    pub fn element_id(&self) -> uuid::Uuid {
        self.element_id
    }

    /// The active handle
    #[must_use]
    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    /// Compute the committed update for the current pointer position.
    ///
    /// Trailing handles only change the dragged dimension. Leading
    /// handles apply the inverse delta and shift position by the amount
    /// the dimension actually changed (after the minimum clamp), so the
    /// opposite edge keeps its absolute coordinate even at the minimum.
    #[must_use]
    pub fn update(&self, pointer: PointerPosition) -> ElementUpdate {
        let delta_x = (pointer.x - self.origin.x).round() as i32;
        let delta_y = (pointer.y - self.origin.y).round() as i32;

        let mut width = self.start_width;
        let mut height = self.start_height;

        if self.handle.resizes_width() {
            let stretched = if self.handle.moves_left_edge() {
                self.start_width - delta_x
            } else {
                self.start_width + delta_x
            };
            width = stretched.max(self.constraints.min_width);
        }
        if self.handle.resizes_height() {
            let stretched = if self.handle.moves_top_edge() {
                self.start_height - delta_y
            } else {
                self.start_height + delta_y
            };
            height = stretched.max(self.constraints.min_height);
        }

        let mut style = self.start_style.clone();
        style.insert("width".to_string(), format!("{width}px"));
        style.insert("height".to_string(), format!("{height}px"));

        let mut update = ElementUpdate::style(style);
        if self.handle.moves_left_edge() || self.handle.moves_top_edge() {
            let mut position = self.start_position;
            if self.handle.moves_left_edge() {
                position.x = self.start_position.x + (self.start_width - width);
            }
            if self.handle.moves_top_edge() {
                position.y = self.start_position.y + (self.start_height - height);
            }
            update = update.and_position(position);
        }
        update
    }
}
