//! Analysis profiles.
//!
//! A profile is the category-set configuration the interpreter runs against:
//! which request field to send, which token categories make up the header,
//! how tokens are laid out and what the error sections are called. The two
//! analysis services are two profile instances over the same interpreter.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::analysis::model::{RequestField, TokenKind};
use crate::error::{CoreError, CoreResult};

/// Names of the built-in profiles.
pub const BUILTIN_PROFILES: &[&str] = &["git", "java"];

/// Visual style key for a token category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStyle {
    Command,
    Flag,
    Param,
    Keyword,
    Identifier,
    Literal,
    Symbol,
    #[default]
    Plain,
    /// Tokens that matched no category.
    Unknown,
}

/// How the token view is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLayout {
    /// Lexemes in one colored line, as they appeared in the input.
    Inline,
    /// One row per token with a marked category column and a totals row.
    #[default]
    Table,
}

/// A token category (one header column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Integer discriminators that belong to this category.
    #[serde(default)]
    pub codes: Vec<i64>,
    /// Extra string discriminators, compared case-insensitively.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub style: TokenStyle,
}

impl Category {
    pub fn new(name: &str, label: &str, codes: &[i64], style: TokenStyle) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
            codes: codes.to_vec(),
            aliases: Vec::new(),
            style,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Human label, falling back to the header name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn matches(&self, kind: &TokenKind) -> bool {
        match kind {
            TokenKind::Code(code) => self.codes.contains(code),
            TokenKind::Name(name) => {
                self.name.eq_ignore_ascii_case(name)
                    || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
            }
        }
    }
}

/// Display labels for the three error sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLabels {
    pub lexical: String,
    pub syntax: String,
    pub semantic: String,
}

impl Default for ErrorLabels {
    fn default() -> Self {
        Self {
            lexical: "Lexical errors".to_string(),
            syntax: "Syntax errors".to_string(),
            semantic: "Semantic errors".to_string(),
        }
    }
}

/// Category-set configuration for the result interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub request_field: RequestField,
    #[serde(default)]
    pub token_layout: TokenLayout,
    /// When false, an absent status renders nothing instead of the unknown sentinel.
    #[serde(default)]
    pub status_required: bool,
    /// Whether the service reports lexical/syntax/semantic error lists.
    #[serde(default = "default_true")]
    pub reports_error_lists: bool,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub error_labels: ErrorLabels,
}

fn default_true() -> bool {
    true
}

impl Profile {
    /// Git command analysis: integer token codes, inline token view.
    pub fn git() -> Self {
        Self {
            name: "git".to_string(),
            title: "Git command analyzer".to_string(),
            request_field: RequestField::Command,
            categories: vec![
                Category::new("Command", "Command", &[1], TokenStyle::Command),
                Category::new("Flag", "Flag", &[2], TokenStyle::Flag),
                Category::new("Param", "Parameter", &[3], TokenStyle::Param)
                    .with_aliases(&["Parameter"]),
            ],
            token_layout: TokenLayout::Inline,
            status_required: true,
            reports_error_lists: false,
            error_labels: ErrorLabels::default(),
        }
    }

    /// Java-subset analysis: named token types, table token view.
    pub fn java() -> Self {
        Self {
            name: "java".to_string(),
            title: "Java subset analyzer".to_string(),
            request_field: RequestField::Code,
            categories: vec![
                Category::new("PR", "Reserved word", &[], TokenStyle::Keyword)
                    .with_aliases(&["Reserved", "Keyword"]),
                Category::new("ID", "Identifier", &[], TokenStyle::Identifier)
                    .with_aliases(&["Identifier"]),
                Category::new("Number", "Number", &[], TokenStyle::Literal),
                Category::new("Symbol", "Symbol", &[], TokenStyle::Symbol),
                Category::new("String", "String", &[], TokenStyle::Literal),
            ],
            token_layout: TokenLayout::Table,
            status_required: false,
            reports_error_lists: true,
            error_labels: ErrorLabels::default(),
        }
    }

    /// Look up a built-in profile by name.
    pub fn builtin(name: &str) -> CoreResult<Self> {
        match name.to_lowercase().as_str() {
            "git" | "command" => Ok(Self::git()),
            "java" | "code" => Ok(Self::java()),
            other => Err(CoreError::UnknownProfile(other.to_string())),
        }
    }

    /// All built-in profiles.
    pub fn builtins() -> Vec<Self> {
        vec![Self::git(), Self::java()]
    }

    /// Parse and validate a profile from TOML.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let profile: Self = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), profile = %profile.name, "Loaded profile file");
        Ok(profile)
    }

    /// Reject profiles the interpreter cannot render meaningfully.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid_profile("profile name is empty"));
        }
        if self.categories.is_empty() {
            return Err(CoreError::invalid_profile(format!(
                "profile '{}' defines no token categories",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(CoreError::invalid_profile(format!(
                    "profile '{}' has a category with an empty name",
                    self.name
                )));
            }
            if !seen.insert(category.name.to_lowercase()) {
                return Err(CoreError::invalid_profile(format!(
                    "profile '{}' declares category '{}' twice",
                    self.name, category.name
                )));
            }
        }

        Ok(())
    }

    /// Index of the first category (in header order) matching `kind`.
    pub fn category_for(&self, kind: &TokenKind) -> Option<usize> {
        self.categories.iter().position(|c| c.matches(kind))
    }
}
