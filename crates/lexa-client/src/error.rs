//! Request issuer error types.

use lexa_core::CoreError;
use reqwest::StatusCode;
use thiserror::Error;

/// Longest server body echoed back to the user.
const MAX_BODY_CHARS: usize = 300;

/// Errors raised while issuing an analysis request.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Analysis service returned {status}: {body}")]
    Server { status: StatusCode, body: String },

    #[error("No response from the analysis service within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Could not reach the analysis service at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid analysis response: {0}")]
    Decode(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for request issuer operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// One-line, session-level description of the failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("Server error: {}", status)
                } else {
                    format!("Server error: {} - {}", status, truncate(body, MAX_BODY_CHARS))
                }
            }
            Self::Timeout { seconds } => format!(
                "The analysis service did not answer within {} seconds. Try again.",
                seconds
            ),
            Self::Transport { url, .. } => format!(
                "Could not connect to the analysis service at {}. Make sure it is running.",
                url
            ),
            Self::Decode(reason) => format!("The analysis service sent an unreadable response ({})", reason),
            Self::Core(e) => e.to_string(),
        }
    }

    /// Whether this failure belongs to the transport/server class.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Core(_))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
