//! Unified outcome type for data operations.
//!
//! # Invariants
//! - Exactly one variant is active; consumers match exhaustively.
//! - `Loading` is only ever an initial placeholder for streams that have
//!   not produced a value yet; one-shot operations resolve straight to
//!   `Success` or `Error`.

/// Tagged outcome of a data operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultState<T> {
    Success(T),
    Error(Option<String>),
    Loading,
}

impl<T> ResultState<T> {
    /// Returns the success payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Error(_) | Self::Loading => None,
        }
    }

    /// Consumes the state and returns the success payload, if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Error(_) | Self::Loading => None,
        }
    }

    /// Returns the error message, if this is an `Error` carrying one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => message.as_deref(),
            Self::Success(_) | Self::Loading => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Maps the success payload, leaving the other variants untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultState<U> {
        match self {
            Self::Success(data) => ResultState::Success(f(data)),
            Self::Error(message) => ResultState::Error(message),
            Self::Loading => ResultState::Loading,
        }
    }

    /// Stable variant label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error(_) => "error",
            Self::Loading => "loading",
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for ResultState<T> {
    /// Converts a fallible outcome, stringifying the fault message.
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(Some(err.to_string())),
        }
    }
}
