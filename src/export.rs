//! Export Orchestration
//!
//! One entry point for both export paths. The generative backend is
//! tried first when requested and available; every failure funnels into
//! the deterministic local-template export plus a categorized reason.
//! Nothing here can fail the caller.

use maquette_canvas::element::Element;
use maquette_canvas::protocol::CodeSource;
use maquette_codegen::GeneratedCode;
use maquette_llm::{generate_page, FailureCategory, GenerativeBackend};
use tracing::{info, warn};

/// The result of one export request.
pub struct ExportOutcome {
    /// The three artifacts
    pub code: GeneratedCode,
    /// Which path produced them
    pub source: CodeSource,
    /// Present when the AI path was requested but fell back
    pub failure: Option<FailureCategory>,
}

/// Generate the export for a paint-ordered element list.
///
/// `use_ai` is the effective request (client wish AND session flag).
pub async fn generate_export(
    backend: Option<&dyn GenerativeBackend>,
    use_ai: bool,
    elements: &[&Element],
) -> ExportOutcome {
    if use_ai {
        match backend {
            Some(backend) => match generate_page(backend, elements).await {
                Ok(code) => {
                    info!(count = elements.len(), "export generated by backend");
                    return ExportOutcome {
                        code,
                        source: CodeSource::Gemini,
                        failure: None,
                    };
                }
                Err(error) => {
                    let category = error.category();
                    warn!(%error, category = %category, "generative export failed, using local templates");
                    return ExportOutcome {
                        code: maquette_codegen::export(elements),
                        source: CodeSource::Templates,
                        failure: Some(category),
                    };
                }
            },
            // requested but no credential was ever configured
            None => {
                return ExportOutcome {
                    code: maquette_codegen::export(elements),
                    source: CodeSource::Templates,
                    failure: Some(FailureCategory::InvalidCredential),
                };
            }
        }
    }

    ExportOutcome {
        code: maquette_codegen::export(elements),
        source: CodeSource::Templates,
        failure: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use maquette_canvas::element::{ElementKind, Position};
    use maquette_llm::Error;

    struct FailingBackend(fn() -> Error);

    #[async_trait]
    impl GenerativeBackend for FailingBackend {
        async fn generate(&self, _prompt: &str) -> maquette_llm::Result<String> {
            Err((self.0)())
        }
    }

    struct EchoBackend;

    #[async_trait]
    impl GenerativeBackend for EchoBackend {
        async fn generate(&self, _prompt: &str) -> maquette_llm::Result<String> {
            Ok(r#"{"html": "<p>ai</p>", "css": "", "js": ""}"#.to_string())
        }
    }

    fn elements() -> Vec<Element> {
        vec![Element::new(ElementKind::Paragraph, Position::new(0, 0))]
    }

    #[tokio::test]
    async fn test_local_path() {
        let elements = elements();
        let refs: Vec<&Element> = elements.iter().collect();
        let outcome = generate_export(None, false, &refs).await;
        assert_eq!(outcome.source, CodeSource::Templates);
        assert!(outcome.failure.is_none());
        assert!(outcome.code.html.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_ai_path() {
        let elements = elements();
        let refs: Vec<&Element> = elements.iter().collect();
        let outcome = generate_export(Some(&EchoBackend), true, &refs).await;
        assert_eq!(outcome.source, CodeSource::Gemini);
        assert_eq!(outcome.code.html, "<p>ai</p>");
    }

    #[tokio::test]
    async fn test_fallback_matches_local_output() {
        let elements = elements();
        let refs: Vec<&Element> = elements.iter().collect();
        let backend = FailingBackend(|| Error::RateLimited);

        let outcome = generate_export(Some(&backend), true, &refs).await;
        assert_eq!(outcome.source, CodeSource::Templates);
        assert_eq!(outcome.failure, Some(FailureCategory::Quota));
        assert_eq!(outcome.code, maquette_codegen::export(&refs));
    }

    #[tokio::test]
    async fn test_missing_backend_reports_credential() {
        let elements = elements();
        let refs: Vec<&Element> = elements.iter().collect();
        let outcome = generate_export(None, true, &refs).await;
        assert_eq!(outcome.failure, Some(FailureCategory::InvalidCredential));
        assert_eq!(outcome.source, CodeSource::Templates);
    }
}
