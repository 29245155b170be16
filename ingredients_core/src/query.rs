use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Order of query results by ingredient name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub(crate) fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            SortOrder::Ascending => a.cmp(b),
            SortOrder::Descending => b.cmp(a),
        }
    }
}

/// Upper-case the first letter of every word, lower-case the rest
pub fn to_title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            word_start = true;
            result.push(c);
        } else if word_start {
            result.extend(c.to_uppercase());
            word_start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}
