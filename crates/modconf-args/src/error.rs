//! Errors raised while parsing override text.

/// Errors that can occur while turning override text into arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// A quoted section was never closed.
    #[error("unterminated {quote} quote in arguments")]
    UnterminatedQuote {
        /// The opening quote character.
        quote: char,
    },

    /// A value-taking flag appeared last with nothing after it.
    #[error("flag {flag} requires a value")]
    MissingValue {
        /// The flag as written.
        flag: String,
    },

    /// A switch was given an inline `=value`.
    #[error("flag {flag} does not take a value")]
    UnexpectedValue {
        /// The flag as written.
        flag: String,
    },
}

/// Result type alias for argument operations.
pub type Result<T> = std::result::Result<T, ArgumentError>;
