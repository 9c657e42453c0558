//! Failure taxonomy for a single feed source attempt.

use thiserror::Error;

/// Why a single source attempt produced no usable records.
///
/// Every variant is recovered the same way: the fetcher moves on to the next
/// source, and after the last one the fallback list is used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Network error or non-2xx response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Body does not match the declared format or failed to parse.
    #[error("format failure: {0}")]
    Format(String),

    /// Body parsed but yielded too few records.
    #[error("no usable records (found {found}, need {required})")]
    Empty { found: usize, required: usize },
}

impl FetchFailure {
    /// Create a transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        FetchFailure::Transport(message.into())
    }

    /// Create a format failure.
    pub fn format(message: impl Into<String>) -> Self {
        FetchFailure::Format(message.into())
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::Transport(_) => "transport",
            FetchFailure::Format(_) => "format",
            FetchFailure::Empty { .. } => "empty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            FetchFailure::transport("HTTP 503").to_string(),
            "transport failure: HTTP 503"
        );
        assert_eq!(
            FetchFailure::format("XML parse error").to_string(),
            "format failure: XML parse error"
        );
        assert_eq!(
            FetchFailure::Empty {
                found: 0,
                required: 1
            }
            .to_string(),
            "no usable records (found 0, need 1)"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(FetchFailure::transport("x").kind(), "transport");
        assert_eq!(FetchFailure::format("x").kind(), "format");
        assert_eq!(
            FetchFailure::Empty {
                found: 2,
                required: 3
            }
            .kind(),
            "empty"
        );
    }
}
