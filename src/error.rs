//! Error taxonomy for the scoring engine.
//!
//! Every fallible operation returns [`EngineError`]. Nothing inside the engine
//! recovers from these: lookup failures and configuration defects propagate to
//! the caller unchanged, and answer errors stop the submission before any
//! [`ScoringResult`](crate::engine::ScoringResult) is produced.

use alloc::string::String;

use thiserror::Error;

/// Errors produced by the catalog, scorer and zone classifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No definition is registered under this test id.
    #[error("test definition '{test_id}' not found")]
    NotFound {
        /// The requested test id.
        test_id: String,
    },

    /// The test id exists but not at this version.
    #[error("test definition '{test_id}' version {version} not found")]
    VersionNotFound {
        /// The requested test id.
        test_id: String,
        /// The requested version.
        version: u32,
    },

    /// A test definition is malformed: bands with gaps or overlaps, unknown
    /// axes, duplicate ids, or a bad scale.
    ///
    /// This is an authoring defect, not a user-facing error.
    #[error("invalid test definition '{test_id}': {reason}")]
    Configuration {
        /// Id of the offending definition.
        test_id: String,
        /// Human-readable description of the defect.
        reason: String,
    },

    /// An answer lies outside the scale's legal range.
    #[error("answer {value} for question '{question_id}' is outside the scale [{min}, {max}]")]
    InvalidAnswer {
        /// Question the answer was given for.
        question_id: String,
        /// The raw value submitted.
        value: i32,
        /// Scale minimum.
        min: i32,
        /// Scale maximum.
        max: i32,
    },

    /// A question was left unanswered under the strict missing-answer policy.
    #[error("question '{question_id}' was not answered")]
    MissingAnswer {
        /// The unanswered question.
        question_id: String,
    },

    /// An answer was keyed by an id the definition does not contain.
    #[error("answer given for unknown question '{question_id}'")]
    UnknownQuestion {
        /// The unrecognised id.
        question_id: String,
    },

    /// Catalog configuration could not be parsed.
    #[cfg(feature = "serde")]
    #[error("failed to parse test catalog: {0}")]
    Parse(String),
}

impl EngineError {
    /// True for both lookup failures ([`NotFound`](Self::NotFound) and
    /// [`VersionNotFound`](Self::VersionNotFound)).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::NotFound { .. } | EngineError::VersionNotFound { .. }
        )
    }

    /// True when the error points at a malformed definition rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::Configuration { .. })
    }

    pub(crate) fn configuration(test_id: &str, reason: impl Into<String>) -> Self {
        EngineError::Configuration {
            test_id: test_id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_not_found_message_names_the_test() {
        let err = EngineError::NotFound {
            test_id: "nonexistent-id".into(),
        };
        assert_eq!(err.to_string(), "test definition 'nonexistent-id' not found");
        assert!(err.is_not_found());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_version_not_found_is_not_found() {
        let err = EngineError::VersionNotFound {
            test_id: "clarity".into(),
            version: 7,
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("version 7"));
    }

    #[test]
    fn test_invalid_answer_message_includes_range() {
        let err = EngineError::InvalidAnswer {
            question_id: "q1".into(),
            value: 9,
            min: 0,
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "answer 9 for question 'q1' is outside the scale [0, 4]"
        );
    }

    #[test]
    fn test_configuration_helper() {
        let err = EngineError::configuration("t", "gap between 5 and 7");
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "invalid test definition 't': gap between 5 and 7");
    }
}
