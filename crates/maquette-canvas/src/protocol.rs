//! WebSocket Protocol Messages
//!
//! Client/server message types for the builder WebSocket API. One
//! connection drives one session; messages are applied in arrival order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, ElementKind, ElementUpdate};
use crate::geometry::{CanvasViewport, PointerPosition};
use crate::resize::ResizeHandle;

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Drop a new element from the palette at a raw pointer position
    DropElement {
        /// Kind to create
        kind: ElementKind,
        /// Raw pointer coordinates at drop time
        pointer: PointerPosition,
        /// Canvas origin and scroll at drop time
        #[serde(default)]
        viewport: CanvasViewport,
    },

    /// Move an existing element (drag-drop) to a raw pointer position
    MoveElement {
        /// Element to move
        id: Uuid,
        /// Raw pointer coordinates at drop time
        pointer: PointerPosition,
        /// Canvas origin and scroll at drop time
        #[serde(default)]
        viewport: CanvasViewport,
    },

    /// Change the selection (None clears it)
    SelectElement {
        /// Element to select, or null to deselect
        id: Option<Uuid>,
    },

    /// Shallow-merge a partial update into an element
    UpdateElement {
        /// Target element
        id: Uuid,
        /// Fields to merge
        update: ElementUpdate,
    },

    /// Edit one prop of the selected element through the property editor
    SetProperty {
        /// Prop key
        key: String,
        /// New value
        value: serde_json::Value,
    },

    /// Edit one style field of the selected element
    SetStyle {
        /// Style key (camelCase)
        key: String,
        /// New value
        value: String,
    },

    /// Flip an element's lock state
    ToggleLock {
        /// Target element
        id: Uuid,
    },

    /// Delete an element
    DeleteElement {
        /// Target element
        id: Uuid,
    },

    /// Clear the canvas; ignored unless the user confirmed
    ClearCanvas {
        /// User confirmation from the dialog
        #[serde(default)]
        confirmed: bool,
    },

    /// Begin a resize drag on the selected handle
    ResizeStart {
        /// Element being resized
        id: Uuid,
        /// Anchor handle under the pointer
        handle: ResizeHandle,
        /// Pointer position at drag start
        pointer: PointerPosition,
    },

    /// Pointer moved during an active resize drag (latest wins)
    ResizeMove {
        /// Current pointer position
        pointer: PointerPosition,
    },

    /// Resize drag ended
    ResizeEnd,

    /// Generate the HTML/CSS/JS export
    ExportCode {
        /// Prefer the generative backend over local templates
        #[serde(default)]
        use_ai: bool,
    },

    /// Ping to keep connection alive
    Ping,
}

/// Where a generated export came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeSource {
    /// Local string templates
    Templates,
    /// Generative backend
    Gemini,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Welcome message with session state
    Welcome {
        /// Session ID
        session_id: Uuid,
        /// Elements in insertion order
        elements: Vec<Element>,
    },

    /// Full canvas sync, sent after mutations that can touch several
    /// elements at once (z-order demotion)
    CanvasState {
        /// Elements in insertion order
        elements: Vec<Element>,
    },

    /// A new element was dropped
    ElementAdded {
        /// The created element
        element: Element,
    },

    /// An element changed
    ElementUpdated {
        /// The element after the change
        element: Element,
    },

    /// An element was deleted
    ElementDeleted {
        /// Removed element id
        id: Uuid,
    },

    /// The canvas was cleared
    CanvasCleared,

    /// The selection changed
    SelectionChanged {
        /// Newly selected element, or null
        id: Option<Uuid>,
    },

    /// A code export finished
    CodeGenerated {
        /// Markup document
        html: String,
        /// Stylesheet
        css: String,
        /// Behavior script
        js: String,
        /// Which path produced the artifacts
        source: CodeSource,
        /// Present when the AI path failed and the local templates were
        /// used instead; a categorized human-readable reason
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_reason: Option<String>,
    },

    /// An error occurred
    Error {
        /// Stable error code
        code: String,
        /// Human-readable message
        message: String,
    },

    /// Pong response
    Pong,
}

impl ServerMessage {
    /// Create a welcome message
    #[must_use]
    pub fn welcome(session_id: Uuid, elements: Vec<Element>) -> Self {
        Self::Welcome {
            session_id,
            elements,
        }
    }

    /// Create an error message
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}
