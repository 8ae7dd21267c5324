//! Shared helpers for the Gemini client

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Mask an API key for safe display in logs.
///
/// Shows the first and last 4 characters for keys longer than 8
/// characters, otherwise "****".
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    if key.len() <= MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY {
        return "****".to_string();
    }
    format!(
        "{}...{}",
        &key[..KEY_MASK_VISIBLE_CHARS],
        &key[key.len() - KEY_MASK_VISIBLE_CHARS..]
    )
}

/// Sanitize a Gemini API error message before it reaches logs or users:
/// no authentication details, no quota internals, no multi-kilobyte
/// bodies.
#[must_use]
pub fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
        || lower.contains("permission denied")
    {
        return "API authentication error. Check your API key configuration.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") || lower.contains("resource_exhausted")
    {
        return "API rate limit exceeded. Try again later.".to_string();
    }

    if lower.contains("internal") || lower.contains("server error") {
        return "API server error. Try again later.".to_string();
    }

    if error.len() > 300 {
        let mut cut = 300;
        while !error.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...(truncated)", &error[..cut])
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-1...cdef");
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn test_sanitize_hides_auth_details() {
        let sanitized = sanitize_api_error("API key not valid. Please pass a valid API key.");
        assert!(!sanitized.contains("API key not valid"));
        assert!(sanitized.contains("authentication"));
    }

    #[test]
    fn test_sanitize_hides_quota_details() {
        let sanitized = sanitize_api_error("RESOURCE_EXHAUSTED: quota exceeded for project 12345");
        assert!(!sanitized.contains("12345"));
        assert!(sanitized.contains("rate limit"));
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let long = "x".repeat(1000);
        let sanitized = sanitize_api_error(&long);
        assert!(sanitized.len() < 400);
        assert!(sanitized.ends_with("(truncated)"));
    }

    #[test]
    fn test_sanitize_passes_safe_messages() {
        assert_eq!(sanitize_api_error("connection reset"), "connection reset");
    }
}
