//! Maquette Codegen - Markup Generation
//!
//! This crate turns canvas elements into text:
//! - Markup: The single per-kind dispatch shared by preview and export
//! - Preview: Design-time mock HTML for the in-canvas display
//! - Export: Standalone HTML/CSS/JS artifacts with per-element anchors
//! - Style: camelCase/kebab-case conversion and stylesheet block parsing
//!
//! The preview suppresses all interactive semantics (readonly inputs,
//! disabled selects, inert links); the export bakes absolute positioning
//! and z-order into the stylesheet so the page matches the canvas.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod export;
pub mod markup;
pub mod preview;
pub mod style;

// Re-export main types
pub use export::{export, export_css, export_html, export_js, GeneratedCode};
pub use markup::{markup_for, MarkupMode};
pub use preview::{PreviewRenderer, RenderedElement};
pub use style::{camel_to_kebab, kebab_to_camel, parse_element_block, ElementBlock};
