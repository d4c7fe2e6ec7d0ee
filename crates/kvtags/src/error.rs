//! Error types for the key-value type engine.
//!
//! Ordinary parse failures are not errors: parsing and validation return
//! `None` for input that cannot be interpreted. The variants here cover
//! contract violations and invalid configuration.

use thiserror::Error;

/// A specialized Result type for key-value operations.
pub type KeyValueResult<T> = Result<T, KeyValueError>;

/// Errors raised by the key-value type engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyValueError {
    /// An operator token outside the known enumeration was supplied.
    #[error("'{operator}' is not a valid operator")]
    InvalidOperator {
        /// The rejected operator token.
        operator: String,
    },

    /// A rounding mode outside `not`, `up`, `down` and `math` was supplied.
    #[error("'{mode}' is not a valid round mode (expected not, up, down or math)")]
    InvalidRoundMode {
        /// The rejected mode.
        mode: String,
    },

    /// A type was configured with invalid settings.
    #[error("invalid configuration for type '{type_id}': {message}")]
    InvalidConfig {
        /// The id of the type being configured.
        type_id: String,
        /// What was wrong with the configuration.
        message: String,
    },

    /// No type matches the given key.
    #[error("unknown type '{key}'{}", did_you_mean(suggestion.as_deref()))]
    UnknownType {
        /// The key that did not match any type.
        key: String,
        /// The closest known alias, if one is near enough.
        suggestion: Option<String>,
    },
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion
        .map(|s| format!(". Did you mean '{s}'?"))
        .unwrap_or_default()
}

impl KeyValueError {
    /// Creates an invalid operator error.
    pub fn invalid_operator(operator: impl Into<String>) -> Self {
        KeyValueError::InvalidOperator {
            operator: operator.into(),
        }
    }

    /// Creates an invalid round mode error.
    pub fn invalid_round_mode(mode: impl Into<String>) -> Self {
        KeyValueError::InvalidRoundMode { mode: mode.into() }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(type_id: impl Into<String>, message: impl Into<String>) -> Self {
        KeyValueError::InvalidConfig {
            type_id: type_id.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown type error with an optional suggestion.
    pub fn unknown_type(key: impl Into<String>, suggestion: Option<String>) -> Self {
        KeyValueError::UnknownType {
            key: key.into(),
            suggestion,
        }
    }

    /// Attributes a configuration error to the given type id.
    ///
    /// Other variants are returned unchanged.
    pub fn with_type_id(self, id: impl Into<String>) -> Self {
        match self {
            KeyValueError::InvalidConfig { message, .. } => KeyValueError::InvalidConfig {
                type_id: id.into(),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_operator_message() {
        let error = KeyValueError::invalid_operator("%");
        assert_eq!(error.to_string(), "'%' is not a valid operator");
    }

    #[test]
    fn test_unknown_type_with_suggestion() {
        let error = KeyValueError::unknown_type("dat", Some("date".to_string()));
        assert_eq!(error.to_string(), "unknown type 'dat'. Did you mean 'date'?");
    }

    #[test]
    fn test_unknown_type_without_suggestion() {
        let error = KeyValueError::unknown_type("zzz", None);
        assert_eq!(error.to_string(), "unknown type 'zzz'");
    }

    #[test]
    fn test_invalid_config_message() {
        let error = KeyValueError::invalid_config("num", "decimal delimiter is empty");
        assert_eq!(
            error.to_string(),
            "invalid configuration for type 'num': decimal delimiter is empty"
        );
    }

    #[test]
    fn test_with_type_id_renames_config_errors_only() {
        let error = KeyValueError::invalid_config("number", "bad").with_type_id("price");
        assert_eq!(error, KeyValueError::invalid_config("price", "bad"));

        let error = KeyValueError::invalid_operator("%").with_type_id("price");
        assert_eq!(error, KeyValueError::invalid_operator("%"));
    }
}
