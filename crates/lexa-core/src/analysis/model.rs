//! Analysis wire models.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};

/// The JSON field a request body carries its text under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestField {
    Command,
    Code,
}

impl RequestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Code => "code",
        }
    }
}

/// A single submission to the analysis service.
///
/// Serializes as `{ "command": text }` or `{ "code": text }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    field: RequestField,
    text: String,
}

impl AnalysisRequest {
    /// Build a request from raw user input.
    ///
    /// The text is trimmed; blank input is rejected before any call is made.
    pub fn new(field: RequestField, text: &str) -> CoreResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyInput);
        }

        Ok(Self {
            field,
            text: trimmed.to_string(),
        })
    }

    pub fn field(&self) -> RequestField {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Serialize for AnalysisRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field.as_str(), &self.text)?;
        map.end()
    }
}

/// Token discriminator as sent by the service.
///
/// The command service sends integer codes, the language service sends names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenKind {
    Code(i64),
    Name(String),
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A classified lexical unit, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub lexeme: String,
    /// `None` when the entry carried no usable `type`.
    pub kind: Option<TokenKind>,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: Option<TokenKind>) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
        }
    }

    pub fn coded(lexeme: impl Into<String>, code: i64) -> Self {
        Self::new(lexeme, Some(TokenKind::Code(code)))
    }

    pub fn named(lexeme: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(lexeme, Some(TokenKind::Name(name.into())))
    }
}

/// An analysis response after per-field defaulting.
///
/// Every field is optional on the wire; see [`RawAnalysis::from_value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawAnalysis {
    pub status: Option<String>,
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub tokens: Vec<Token>,
    /// Pre-aggregated counts; `None` when the service sent none.
    pub counts: Option<BTreeMap<String, u64>>,
    pub lexical_errors: Vec<String>,
    pub syntax_errors: Vec<String>,
    pub semantic_errors: Vec<String>,
}
