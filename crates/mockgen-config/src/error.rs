use thiserror::Error;

/// A setting could not be resolved.
///
/// Both variants are fatal; callers print the message and stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No source in the precedence chain produced a value.
    #[error("option {option} requires a value")]
    MissingValue { option: String },

    /// A value was supplied but failed validation.
    #[error("{reason} for argument {argument}")]
    InvalidValue { argument: String, reason: String },
}

impl ResolveError {
    pub fn missing(option: impl Into<String>) -> Self {
        Self::MissingValue {
            option: option.into(),
        }
    }

    pub fn invalid(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}
