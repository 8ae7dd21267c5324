//! Maquette LLM - Generative Code Export
//!
//! The optional Gemini-backed export path:
//! - Gemini: reqwest client for the `generateContent` API
//! - Exporter: canvas snapshot + instruction prompt, response parsing
//!   with fenced-block stripping and best-effort fragment salvage
//! - Error: failure taxonomy mapping every transport/parse problem to
//!   one of the fixed user-facing categories
//!
//! Nothing in this crate touches canvas state; callers fall back to the
//! local templates in `maquette-codegen` on any error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod exporter;
pub mod gemini;
pub mod util;

// Re-export main types
pub use error::{Error, FailureCategory, Result};
pub use exporter::{canvas_snapshot, generate_page, parse_generated, GenerativeBackend};
pub use gemini::{GeminiClient, GeminiConfig};
