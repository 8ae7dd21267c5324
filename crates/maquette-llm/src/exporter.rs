//! AI Code Exporter
//!
//! Serializes the canvas into a snapshot, asks the generative backend
//! for the three export artifacts, and parses the answer. The response
//! may arrive as plain JSON, JSON wrapped in a fenced code block, or
//! free-form text with embedded fragments; parsing degrades through
//! those shapes before giving up.

use std::sync::LazyLock;

use async_trait::async_trait;
use maquette_canvas::element::Element;
use maquette_codegen::GeneratedCode;
use regex::Regex;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::gemini::GeminiClient;

/// A text-generation backend the exporter can delegate to.
///
/// The seam exists so the export orchestration can be exercised without
/// network access; [`GeminiClient`] is the production implementation.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate a text completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        GeminiClient::generate(self, prompt).await
    }
}

/// Serialize every element for the instruction prompt. Key casing
/// matches the editing surface (`zIndex`), not the wire protocol.
#[must_use]
pub fn canvas_snapshot(elements: &[&Element]) -> Value {
    Value::Array(
        elements
            .iter()
            .map(|element| {
                json!({
                    "id": element.id,
                    "type": element.kind.as_str(),
                    "position": { "x": element.position.x, "y": element.position.y },
                    "zIndex": element.z_index,
                    "style": element.style,
                    "props": element.props,
                    "locked": element.locked,
                })
            })
            .collect(),
    )
}

/// Build the instruction prompt for a canvas snapshot.
#[must_use]
pub fn build_prompt(snapshot: &Value) -> String {
    format!(
        "You are generating code for a visual page builder export.\n\
         Given the following canvas elements as JSON, produce a complete static page.\n\
         Each element must keep its absolute position (left/top from \"position\", \
         z-index from \"zIndex\") and its style fields converted to CSS.\n\
         Respond with a single JSON object with exactly these string fields: \
         \"html\", \"css\", \"js\". Do not include any other text.\n\n\
         Canvas elements:\n{snapshot}"
    )
}

/// Ask the backend for the export of the given (paint-ordered) elements.
pub async fn generate_page<B: GenerativeBackend + ?Sized>(
    backend: &B,
    elements: &[&Element],
) -> Result<GeneratedCode> {
    let snapshot = canvas_snapshot(elements);
    let prompt = build_prompt(&snapshot);
    let text = backend.generate(&prompt).await?;
    debug!(response_len = text.len(), "parsing generated export");
    parse_generated(&text)
}

/// Parse a backend response into the three artifacts.
///
/// Accepts plain JSON, a fenced ```json block, or (best effort)
/// free-form text containing fenced html/css/js fragments.
pub fn parse_generated(text: &str) -> Result<GeneratedCode> {
    let stripped = strip_code_fence(text);
    if let Ok(code) = serde_json::from_str::<GeneratedCode>(stripped) {
        return Ok(code);
    }
    if let Some(code) = scrape_fragments(text) {
        return Ok(code);
    }
    Err(Error::InvalidResponse(
        "response is not the expected {html, css, js} object".to_string(),
    ))
}

/// Strip one optional fenced code block (```json ... ```), returning the
/// inner text. Input without a fence is returned unchanged.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the language tag line, then the closing fence
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return trimmed,
    };
    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

static HTML_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```html\s*(.*?)```").unwrap()
});
static CSS_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```css\s*(.*?)```").unwrap()
});
static JS_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:js|javascript)\s*(.*?)```").unwrap()
});
static HTML_DOC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!DOCTYPE html>.*</html>").unwrap()
});

/// Best-effort extraction of html/css/js fragments from free-form text.
/// Returns None when nothing recognizable is found.
fn scrape_fragments(text: &str) -> Option<GeneratedCode> {
    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    };

    let html = capture(&HTML_FENCE)
        .or_else(|| HTML_DOC.find(text).map(|m| m.as_str().to_string()));
    let css = capture(&CSS_FENCE);
    let js = capture(&JS_FENCE);

    if html.is_none() && css.is_none() && js.is_none() {
        return None;
    }
    Some(GeneratedCode {
        html: html.unwrap_or_default(),
        css: css.unwrap_or_default(),
        js: js.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_canvas::element::{ElementKind, Position};

    struct StubBackend(String);

    #[async_trait]
    impl GenerativeBackend for StubBackend {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingBackend(fn() -> Error);

    #[async_trait]
    impl GenerativeBackend for FailingBackend {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err((self.0)())
        }
    }

    #[test]
    fn test_snapshot_shape() {
        let mut element = Element::new(ElementKind::Button, Position::new(40, 120));
        element.z_index = 3;
        element.locked = true;
        let snapshot = canvas_snapshot(&[&element]);

        let first = &snapshot[0];
        assert_eq!(first["type"], "button");
        assert_eq!(first["position"]["x"], 40);
        assert_eq!(first["zIndex"], 3);
        assert_eq!(first["locked"], true);
    }

    #[test]
    fn test_prompt_carries_snapshot_and_contract() {
        let element = Element::new(ElementKind::Span, Position::new(0, 0));
        let prompt = build_prompt(&canvas_snapshot(&[&element]));
        assert!(prompt.contains("\"html\", \"css\", \"js\""));
        assert!(prompt.contains("\"type\":\"span\""));
    }

    #[test]
    fn test_parse_plain_json() {
        let code = parse_generated(r#"{"html": "<p>hi</p>", "css": "p{}", "js": ""}"#).unwrap();
        assert_eq!(code.html, "<p>hi</p>");
        assert_eq!(code.css, "p{}");
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"html\": \"<div></div>\", \"css\": \"\", \"js\": \"x()\"}\n```";
        let code = parse_generated(text).unwrap();
        assert_eq!(code.html, "<div></div>");
        assert_eq!(code.js, "x()");
    }

    #[test]
    fn test_parse_scrapes_fragments() {
        let text = "Here is your page:\n```html\n<main>ok</main>\n```\nand the styles\n```css\nmain { color: red; }\n```";
        let code = parse_generated(text).unwrap();
        assert_eq!(code.html, "<main>ok</main>");
        assert_eq!(code.css, "main { color: red; }");
        assert!(code.js.is_empty());
    }

    #[test]
    fn test_parse_scrapes_bare_document() {
        let text = "Sure!\n<!DOCTYPE html>\n<html><body>x</body></html>\nEnjoy.";
        let code = parse_generated(text).unwrap();
        assert!(code.html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let error = parse_generated("I can't help with that.").unwrap_err();
        assert!(matches!(error, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_page_round_trip() {
        let backend = StubBackend(
            r#"{"html": "<p>generated</p>", "css": "", "js": ""}"#.to_string(),
        );
        let element = Element::new(ElementKind::Paragraph, Position::new(0, 0));
        let code = generate_page(&backend, &[&element]).await.unwrap();
        assert_eq!(code.html, "<p>generated</p>");
    }

    #[tokio::test]
    async fn test_generate_page_propagates_backend_failure() {
        let backend = FailingBackend(|| Error::RateLimited);
        let element = Element::new(ElementKind::Paragraph, Position::new(0, 0));
        let error = generate_page(&backend, &[&element]).await.unwrap_err();
        assert!(matches!(error, Error::RateLimited));
    }
}
