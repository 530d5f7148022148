//! Error types
//!
//! Hard failures (unreadable files, broken JSON) come back as `Err`.
//! Soft conditions (a rule that failed to compile, an unterminated delimiter
//! region) are collected next to the result they affected and never abort
//! tokenization or rendering.

use thiserror::Error;

/// Errors raised while building rule sets or tokenizing
#[derive(Debug, Error)]
pub enum LighterError {
    /// A rule's pattern did not compile; the rule is dropped.
    #[error("malformed rule `{rule}`: {source}")]
    MalformedRule {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A delimiter-start marker without a matching end; scanning stopped here.
    #[error("unterminated delimiter region starting at byte {offset}")]
    UnterminatedDelimiter { offset: usize },

    /// No built-in fuel with this name
    #[error("unknown fuel: {0}")]
    UnknownFuel(String),

    /// A definition parsed but is structurally unusable
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LighterError {
    /// Stable machine-readable code for output formats
    pub fn code(&self) -> &'static str {
        match self {
            LighterError::MalformedRule { .. } => "MALFORMED_RULE",
            LighterError::UnterminatedDelimiter { .. } => "UNTERMINATED_DELIMITER",
            LighterError::UnknownFuel(_) => "UNKNOWN_FUEL",
            LighterError::InvalidDefinition(_) => "INVALID_DEFINITION",
            LighterError::Io(_) => "IO_ERROR",
            LighterError::Json(_) => "JSON_ERROR",
        }
    }

    /// Whether processing continued past this condition
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            LighterError::MalformedRule { .. } | LighterError::UnterminatedDelimiter { .. }
        )
    }
}

pub type Result<T, E = LighterError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_rule_message() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = LighterError::MalformedRule {
            rule: "broken".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("malformed rule `broken`"));
        assert_eq!(err.code(), "MALFORMED_RULE");
        assert!(err.is_soft());
    }

    #[test]
    fn test_unterminated_is_soft() {
        let err = LighterError::UnterminatedDelimiter { offset: 12 };
        assert!(err.is_soft());
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_unknown_fuel_is_hard() {
        let err = LighterError::UnknownFuel("cobol".to_string());
        assert!(!err.is_soft());
        assert_eq!(err.code(), "UNKNOWN_FUEL");
    }
}
