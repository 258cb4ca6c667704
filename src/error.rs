//! Error types for preference encoding and decoding.

use core::fmt;

/// Structured error for preferences serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreferencesError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional 1-based line of the offending JSON input.
    pub line: Option<usize>,
    /// Optional 1-based column of the offending JSON input.
    pub column: Option<usize>,
}

impl PreferencesError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            line: None,
            column: None,
        }
    }

    fn with_position(mut self, line: usize, column: usize) -> Self {
        // serde_json reports 0:0 for errors without a source position.
        if line > 0 {
            self.line = Some(line);
            self.column = Some(column);
        }
        self
    }

    pub(crate) fn json_decode(err: serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        Self::new("PREFERENCES_JSON_DECODE", err.to_string()).with_position(line, column)
    }

    pub(crate) fn json_encode(err: serde_json::Error) -> Self {
        Self::new("PREFERENCES_JSON_ENCODE", err.to_string())
    }
}

impl fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " [line={} column={}]", line, column)?;
        }
        Ok(())
    }
}

impl std::error::Error for PreferencesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_carries_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let err = PreferencesError::json_decode(err);
        assert_eq!(err.code, "PREFERENCES_JSON_DECODE");
        assert_eq!(err.line, Some(2));
        assert!(err.to_string().starts_with("PREFERENCES_JSON_DECODE: "));
        assert!(err.to_string().contains("[line=2 column="));
    }

    #[test]
    fn display_omits_missing_position() {
        let err = PreferencesError::new("PREFERENCES_JSON_ENCODE", "boom");
        assert_eq!(err.to_string(), "PREFERENCES_JSON_ENCODE: boom");
    }
}
