//! Lenient decoding of analysis payloads.
//!
//! The service contract makes almost every field optional, and a malformed
//! field must never take the whole result down with it. Decoding therefore
//! goes through `serde_json::Value` and defaults each field on its own.

pub mod model;

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::CoreResult;
use model::{RawAnalysis, Token, TokenKind};

impl RawAnalysis {
    /// Parse a response body.
    ///
    /// Fails only when the body is not JSON at all.
    pub fn from_json(body: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(&value))
    }

    /// Build from an already parsed document. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            debug!("Analysis payload is not an object, treating every field as absent");
            return Self::default();
        };

        Self {
            status: text_field(obj, &["status"]),
            error_type: text_field(obj, &["errorType", "error_type"]),
            message: text_field(obj, &["message"]),
            tokens: tokens_field(obj),
            counts: counts_field(obj),
            lexical_errors: messages_field(obj, &["lexicalErrors", "lexical_errors"]),
            syntax_errors: messages_field(obj, &["syntaxErrors", "syntax_errors"]),
            semantic_errors: messages_field(obj, &["semanticErrors", "semantic_errors"]),
        }
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Blank strings count as absent, the same as a missing key.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    lookup(obj, keys)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn tokens_field(obj: &Map<String, Value>) -> Vec<Token> {
    match lookup(obj, &["tokens"]) {
        Some(Value::Array(entries)) => entries.iter().map(token_entry).collect(),
        Some(other) => {
            debug!(kind = %json_kind(other), "Ignoring non-array tokens field");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn token_entry(entry: &Value) -> Token {
    let Some(obj) = entry.as_object() else {
        // Keep the entry so the row count still matches what the service sent.
        let lexeme = entry
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| entry.to_string());
        return Token::new(lexeme, None);
    };

    let lexeme = match lookup(obj, &["value", "lexeme"]) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let kind = match lookup(obj, &["type", "kind"]) {
        Some(Value::Number(n)) => n.as_i64().map(TokenKind::Code),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(TokenKind::Name(s.trim().to_string())),
        _ => None,
    };

    Token::new(lexeme, kind)
}

fn counts_field(obj: &Map<String, Value>) -> Option<BTreeMap<String, u64>> {
    let counts = lookup(obj, &["counts"])?.as_object()?;

    Some(
        counts
            .iter()
            .filter_map(|(name, value)| value.as_u64().map(|n| (name.clone(), n)))
            .collect(),
    )
}

fn messages_field(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    match lookup(obj, keys) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|entry| !entry.is_null())
            .map(|entry| match entry {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        // A lone string is one message.
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
