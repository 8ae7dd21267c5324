//! Drop Geometry
//!
//! Shared coordinate policy for drop and move input: raw pointer
//! coordinates are translated into canvas-local space (canvas origin,
//! scroll offset, and the fixed content inset subtracted), snapped to the
//! grid, and clamped to stay non-negative.

use serde::{Deserialize, Serialize};

use crate::element::{Element, Position};

/// Grid snapping increment, in pixels
pub const GRID_UNIT: i32 = 10;

/// Canvas content inset subtracted from raw pointer coordinates, in pixels
pub const CANVAS_INSET: i32 = 32;

/// Per-axis proximity threshold for treating a drop/move as overlapping a
/// locked element, in pixels
pub const LOCK_PROXIMITY: i32 = 100;

/// Raw pointer coordinates in client space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    /// Horizontal client coordinate
    pub x: f64,
    /// Vertical client coordinate
    pub y: f64,
}

impl PointerPosition {
    /// Create a pointer position
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The canvas viewport at the time of a pointer event: where the canvas
/// sits in client space and how far it is scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasViewport {
    /// Canvas origin in client space (left edge)
    #[serde(default)]
    pub origin_x: f64,
    /// Canvas origin in client space (top edge)
    #[serde(default)]
    pub origin_y: f64,
    /// Horizontal scroll offset
    #[serde(default)]
    pub scroll_x: f64,
    /// Vertical scroll offset
    #[serde(default)]
    pub scroll_y: f64,
}

impl CanvasViewport {
    /// A viewport with the canvas at the given client origin, unscrolled
    #[must_use]
    pub fn at(origin_x: f64, origin_y: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// Snap a canvas-local coordinate to the nearest grid line.
#[must_use]
pub fn snap(value: f64) -> i32 {
    let unit = f64::from(GRID_UNIT);
    ((value / unit).round() * unit) as i32
}

/// Map a raw pointer position to a grid-snapped, non-negative canvas
/// position.
#[must_use]
pub fn drop_position(pointer: PointerPosition, viewport: CanvasViewport) -> Position {
    let local_x = pointer.x - viewport.origin_x + viewport.scroll_x - f64::from(CANVAS_INSET);
    let local_y = pointer.y - viewport.origin_y + viewport.scroll_y - f64::from(CANVAS_INSET);
    Position {
        x: snap(local_x).max(0),
        y: snap(local_y).max(0),
    }
}

/// Per-axis proximity test between a candidate position and a placed
/// element. This is deliberately a fixed threshold on position deltas, not
/// a bounding-box intersection.
#[must_use]
pub fn near(position: Position, element: &Element) -> bool {
    (element.position.x - position.x).abs() < LOCK_PROXIMITY
        && (element.position.y - position.y).abs() < LOCK_PROXIMITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_snap_rounds_to_nearest_unit() {
        assert_eq!(snap(0.0), 0);
        assert_eq!(snap(4.9), 0);
        assert_eq!(snap(5.0), 10);
        assert_eq!(snap(14.0), 10);
        assert_eq!(snap(16.0), 20);
        assert_eq!(snap(123.0), 120);
    }

    #[test]
    fn test_drop_position_subtracts_origin_scroll_and_inset() {
        let pointer = PointerPosition::new(200.0, 150.0);
        let viewport = CanvasViewport {
            origin_x: 20.0,
            origin_y: 20.0,
            scroll_x: 40.0,
            scroll_y: 0.0,
        };
        // x: 200 - 20 + 40 - 32 = 188 -> 190; y: 150 - 20 + 0 - 32 = 98 -> 100
        assert_eq!(
            drop_position(pointer, viewport),
            Position::new(190, 100)
        );
    }

    #[test]
    fn test_drop_position_clamps_negative() {
        let pointer = PointerPosition::new(25.0, 10.0);
        let viewport = CanvasViewport::at(20.0, 20.0);
        let position = drop_position(pointer, viewport);
        assert_eq!(position, Position::new(0, 0));
    }

    #[test]
    fn test_drop_position_matches_reference_math() {
        // raw (123, 47), origin (20, 20), no scroll
        let position = drop_position(
            PointerPosition::new(123.0, 47.0),
            CanvasViewport::at(20.0, 20.0),
        );
        // x: round((123-20-32)/10)*10 = 70; y snaps below zero and clamps to 0
        assert_eq!(position, Position::new(70, 0));
    }

    #[test]
    fn test_near_is_per_axis() {
        let locked = Element::new(ElementKind::Card, Position::new(100, 100));
        assert!(near(Position::new(110, 105), &locked));
        assert!(near(Position::new(199, 1), &locked));
        assert!(!near(Position::new(200, 100), &locked));
        assert!(!near(Position::new(100, 200), &locked));
    }
}
