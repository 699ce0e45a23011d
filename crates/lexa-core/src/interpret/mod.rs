//! Result interpretation.
//!
//! `interpret` is a pure mapping from a raw analysis payload to the
//! render-ready [`DisplayState`]. Status resolution, token classification and
//! error partitioning run independently of each other; the presentation layer
//! only draws what comes out of here.

pub mod errors;
pub mod status;
pub mod tokens;

use serde::Serialize;
use tracing::debug;

use crate::analysis::model::RawAnalysis;
use crate::profile::Profile;
use errors::{partition_errors, ErrorView};
use status::{resolve_status, Status, StatusView};
use tokens::{classify_tokens, TokenTable};

/// Everything the presentation layer needs for one analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub profile: String,
    pub status: Option<StatusView>,
    pub message: Option<String>,
    /// `None` when the payload had no tokens.
    pub tokens: Option<TokenTable>,
    /// `None` when the profile has no error taxonomy and nothing was reported.
    pub errors: Option<ErrorView>,
}

impl DisplayState {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(ErrorView::has_errors)
    }

    pub fn status(&self) -> Option<Status> {
        self.status.as_ref().map(|s| s.status)
    }

    /// True when the analysis reported nothing wrong.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && self.status() != Some(Status::Error)
    }
}

/// Interpret a payload against a profile.
pub fn interpret(raw: &RawAnalysis, profile: &Profile) -> DisplayState {
    let status = resolve_status(raw, profile);
    let tokens = classify_tokens(&raw.tokens, raw.counts.as_ref(), profile);

    let errors = match partition_errors(raw, profile) {
        ErrorView::Clean if !profile.reports_error_lists => None,
        view => Some(view),
    };

    debug!(
        profile = %profile.name,
        status = ?status.as_ref().map(|s| s.status),
        tokens = tokens.as_ref().map_or(0, TokenTable::len),
        has_errors = errors.as_ref().is_some_and(ErrorView::has_errors),
        "Interpreted analysis result"
    );

    DisplayState {
        profile: profile.name.clone(),
        status,
        message: raw.message.clone(),
        tokens,
        errors,
    }
}
