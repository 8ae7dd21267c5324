//! Maquette Canvas - Page Builder Interaction Model
//!
//! This crate provides the canvas engine for Maquette:
//! - Element: Placed element types and update merging
//! - Catalog: The palette of droppable element kinds with their defaults
//! - Geometry: Pointer-to-canvas mapping, grid snapping, proximity tests
//! - Canvas: The authoritative element collection and all structural mutations
//! - Resize: Handle-anchored interactive resize geometry
//! - Properties: Per-kind editable field schemas and the buffered editor
//! - Session: Builder sessions and the session manager
//! - Protocol: WebSocket client/server message types
//! - Error: Error types for canvas operations
//!
//! ## Usage
//!
//! ```
//! use maquette_canvas::{Canvas, ElementKind, Position, catalog};
//!
//! let mut canvas = Canvas::new();
//! let entry = catalog::entry(ElementKind::Button).unwrap();
//! let id = canvas.add_element(entry, Position::new(40, 120));
//! assert_eq!(canvas.len(), 1);
//! assert!(canvas.get(id).is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod canvas;
pub mod catalog;
pub mod element;
pub mod error;
pub mod geometry;
pub mod properties;
pub mod protocol;
pub mod resize;
pub mod session;

// Re-export main types
pub use canvas::Canvas;
pub use catalog::CatalogEntry;
pub use element::{Element, ElementKind, ElementUpdate, Position};
pub use error::{Error, Result};
pub use geometry::{CanvasViewport, PointerPosition, GRID_UNIT, LOCK_PROXIMITY};
pub use properties::{Control, Field, PropertyEditor};
pub use protocol::{ClientMessage, CodeSource, ServerMessage};
pub use resize::{ResizeHandle, ResizeSession, SizeConstraints};
pub use session::{BuilderSession, SessionManager};
