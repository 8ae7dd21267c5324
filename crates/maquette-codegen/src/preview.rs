//! Design-Time Preview Rendering
//!
//! Maps one element's (kind, props, style) tuple to the mock HTML shown
//! on the canvas. A pure function over the shared markup dispatch; all
//! interactive semantics are suppressed so the canvas stays a design-time
//! mock, not a live page.

use maquette_canvas::element::{Element, ElementKind};
use serde::Serialize;

use crate::markup::{markup_for, MarkupMode};

/// Renderer for canvas previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewRenderer;

impl PreviewRenderer {
    /// Create a renderer
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render one element to its preview representation.
    #[must_use]
    pub fn render_element(&self, element: &Element) -> RenderedElement {
        RenderedElement {
            html: markup_for(element, MarkupMode::Preview),
            kind: element.kind,
            locked: element.locked,
        }
    }

    /// Render a whole canvas in paint order (ascending z-index slice as
    /// produced by the canvas model).
    #[must_use]
    pub fn render_all(&self, elements: &[&Element]) -> Vec<RenderedElement> {
        elements.iter().map(|e| self.render_element(e)).collect()
    }
}

/// Rendered preview output for one element.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedElement {
    /// Preview HTML fragment
    pub html: String,
    /// Element kind
    pub kind: ElementKind,
    /// Locked elements render with reduced interaction affordance
    pub locked: bool,
}
