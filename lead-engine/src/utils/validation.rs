//! Input validation helpers
//!
//! The engine only enforces non-blank required fields. Length limits are a
//! presentation concern; the constants live here so every screen agrees.

use crate::engine::{EngineError, EngineResult};

// ── Text length limits ──────────────────────────────────────────────

/// Feedback note typed after a call
pub const MAX_FEEDBACK_LEN: usize = 150;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty after trimming.
pub fn validate_required_text(value: &str, field: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate that an optional replacement, if present, is non-empty.
pub fn validate_optional_text(value: &Option<String>, field: &str) -> EngineResult<()> {
    if let Some(v) = value
        && v.trim().is_empty()
    {
        return Err(EngineError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate a feedback note against [`MAX_FEEDBACK_LEN`] (in characters).
pub fn validate_feedback_text(text: &str) -> EngineResult<()> {
    let len = text.chars().count();
    if len > MAX_FEEDBACK_LEN {
        return Err(EngineError::validation(format!(
            "feedback is too long ({len} chars, max {MAX_FEEDBACK_LEN})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("John", "name").is_ok());
        let err = validate_required_text(" \t", "name").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: name must not be empty");
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "email").is_ok());
        assert!(validate_optional_text(&Some("a@b.c".into()), "email").is_ok());
        assert!(validate_optional_text(&Some("".into()), "email").is_err());
    }

    #[test]
    fn test_feedback_length_counts_chars() {
        assert!(validate_feedback_text(&"a".repeat(MAX_FEEDBACK_LEN)).is_ok());
        assert!(validate_feedback_text(&"a".repeat(MAX_FEEDBACK_LEN + 1)).is_err());
        // multi-byte characters count once
        assert!(validate_feedback_text(&"é".repeat(MAX_FEEDBACK_LEN)).is_ok());
    }
}
