//! Token classification and count synthesis.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::analysis::model::{Token, TokenKind};
use crate::profile::{Category, Profile, TokenLayout, TokenStyle};

/// One token, one row. Exactly one cell is marked, or none for unclassified tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRow {
    pub lexeme: String,
    pub kind: Option<TokenKind>,
    /// Index into [`TokenTable::headers`].
    pub category: Option<usize>,
    pub style: TokenStyle,
    pub cells: Vec<bool>,
}

/// Where a category total came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountSource {
    /// Taken from the service's `counts` map.
    Reported,
    /// Tallied from the token list.
    Tallied,
}

/// Total for one header column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: u64,
    pub source: CountSource,
    /// Local tally, kept even when the reported count wins.
    pub tallied: u64,
}

impl CategoryTotal {
    pub fn is_consistent(&self) -> bool {
        self.count == self.tallied
    }
}

/// Token classification view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenTable {
    pub layout: TokenLayout,
    pub headers: Vec<String>,
    pub rows: Vec<TokenRow>,
    pub totals: Vec<CategoryTotal>,
    /// Rows whose type matched no header.
    pub unclassified: usize,
}

impl TokenTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reported totals that disagree with the local tally.
    pub fn count_mismatches(&self) -> Vec<&CategoryTotal> {
        self.totals.iter().filter(|t| !t.is_consistent()).collect()
    }
}

/// Build the token view. `None` when there are no tokens: the view is
/// omitted rather than rendered empty.
pub fn classify_tokens(
    tokens: &[Token],
    counts: Option<&BTreeMap<String, u64>>,
    profile: &Profile,
) -> Option<TokenTable> {
    if tokens.is_empty() {
        return None;
    }

    let width = profile.categories.len();
    let mut tallies = vec![0u64; width];
    let mut unclassified = 0;

    let rows: Vec<TokenRow> = tokens
        .iter()
        .map(|token| {
            let category = token.kind.as_ref().and_then(|k| profile.category_for(k));
            let mut cells = vec![false; width];
            let style = match category {
                Some(idx) => {
                    cells[idx] = true;
                    tallies[idx] += 1;
                    profile.categories[idx].style
                }
                None => {
                    unclassified += 1;
                    TokenStyle::Unknown
                }
            };

            TokenRow {
                lexeme: token.lexeme.clone(),
                kind: token.kind.clone(),
                category,
                style,
                cells,
            }
        })
        .collect();

    let totals: Vec<CategoryTotal> = profile
        .categories
        .iter()
        .zip(&tallies)
        .map(|(category, &tallied)| {
            let reported = counts.and_then(|map| reported_count(map, category));

            match reported {
                Some(count) => {
                    if count != tallied {
                        warn!(
                            category = %category.name,
                            reported = count,
                            tallied,
                            "Reported token count disagrees with token list"
                        );
                    }
                    CategoryTotal {
                        category: category.name.clone(),
                        count,
                        source: CountSource::Reported,
                        tallied,
                    }
                }
                None => CategoryTotal {
                    category: category.name.clone(),
                    count: tallied,
                    source: CountSource::Tallied,
                    tallied,
                },
            }
        })
        .collect();

    if let Some(map) = counts {
        for (key, count) in map {
            let kind = TokenKind::Name(key.clone());
            if !profile.categories.iter().any(|c| c.matches(&kind)) {
                debug!(
                    profile = %profile.name,
                    key = %key,
                    count,
                    "Reported count has no matching category"
                );
            }
        }
    }

    Some(TokenTable {
        layout: profile.token_layout,
        headers: profile.categories.iter().map(|c| c.name.clone()).collect(),
        rows,
        totals,
        unclassified,
    })
}

/// The service's count for `category`. A key equal to the category name
/// wins over keys that only match one of its aliases.
fn reported_count(counts: &BTreeMap<String, u64>, category: &Category) -> Option<u64> {
    counts
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(&category.name))
        .or_else(|| {
            counts
                .iter()
                .find(|(key, _)| category.matches(&TokenKind::Name((*key).clone())))
        })
        .map(|(_, &n)| n)
}
