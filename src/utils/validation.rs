//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MAX_SUBMISSION_ID_LENGTH;

static SUBMISSION_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("submission id pattern is valid")
});

/// Why a submission identifier was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionIdError {
    /// No identifier was given at all
    #[error("Missing submissionId")]
    Missing,

    /// Too long or outside the id alphabet, so it can never have been issued
    #[error("Submission not found")]
    Malformed,
}

/// Validate a submission identifier
///
/// Ids are opaque to the client but must be short URL-safe tokens.
pub fn validate_submission_id(id: &str) -> Result<(), SubmissionIdError> {
    if id.is_empty() {
        return Err(SubmissionIdError::Missing);
    }
    if id.len() > MAX_SUBMISSION_ID_LENGTH || !SUBMISSION_ID_PATTERN.is_match(id) {
        return Err(SubmissionIdError::Malformed);
    }
    Ok(())
}

/// Validate email format (basic validation)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err("Invalid email format");
    }
    if parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format");
    }
    if !parts[1].contains('.') {
        return Err("Invalid email domain");
    }
    Ok(())
}

/// Validate submitted source code
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Source code cannot be empty");
    }
    Ok(())
}

/// Strip comment-only and blank lines, leaving the executable part of a snippet
pub fn meaningful_lines(code: &str) -> impl Iterator<Item = &str> {
    code.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//") && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_submission_id() {
        assert!(validate_submission_id("abc123").is_ok());
        assert!(validate_submission_id("3f2a_b-9").is_ok());
        assert_eq!(validate_submission_id(""), Err(SubmissionIdError::Missing));
        assert_eq!(
            validate_submission_id("../etc/passwd"),
            Err(SubmissionIdError::Malformed)
        );
        assert_eq!(validate_submission_id("has space"), Err(SubmissionIdError::Malformed));
        assert_eq!(validate_submission_id("a.b"), Err(SubmissionIdError::Malformed));
        assert_eq!(
            validate_submission_id(&"x".repeat(65)),
            Err(SubmissionIdError::Malformed)
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@localhost").is_err());
    }

    #[test]
    fn test_meaningful_lines() {
        let code = "// Write your code here\n\n# note\nreturn 1;\n";
        assert_eq!(meaningful_lines(code).collect::<Vec<_>>(), vec!["return 1;"]);
        assert_eq!(meaningful_lines("// only a comment").count(), 0);
    }
}
