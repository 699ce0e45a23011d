//! Status resolution.

use serde::Serialize;

use crate::analysis::model::RawAnalysis;
use crate::profile::Profile;

/// Label used when a required status is missing from the payload.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Overall verdict of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Correct,
    Warning,
    Error,
    /// Anything outside the closed set.
    Unknown,
}

impl Status {
    /// Parse a wire value. Accepts the Spanish names the command service
    /// sends as well as the English ones.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "correcto" | "correct" => Self::Correct,
            "advertencia" | "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            Self::Correct => Some("✅"),
            Self::Warning => Some("⚠️"),
            Self::Error => Some("❌"),
            Self::Unknown => None,
        }
    }
}

/// Render-ready status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub status: Status,
    /// The status text as received, or [`UNKNOWN_LABEL`] when absent.
    pub label: String,
    pub icon: Option<&'static str>,
    /// The `errorType` qualifier; shown next to the status, never instead of it.
    pub badge: Option<String>,
}

/// Resolve the status line for a payload.
///
/// Returns `None` only when the profile does not require a status and the
/// payload carries neither a status nor an error type.
pub fn resolve_status(raw: &RawAnalysis, profile: &Profile) -> Option<StatusView> {
    let badge = raw.error_type.clone();

    let (status, label) = match &raw.status {
        Some(text) => (Status::parse(text), text.trim().to_string()),
        None if profile.status_required || badge.is_some() => {
            (Status::Unknown, UNKNOWN_LABEL.to_string())
        }
        None => return None,
    };

    Some(StatusView {
        status,
        label,
        icon: status.icon(),
        badge,
    })
}
