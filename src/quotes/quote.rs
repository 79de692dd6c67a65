//! Quote records and raw-row normalization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A raw tabular row: header name → field value.
pub type RawRow = HashMap<String, String>;

pub const RESPONSE_TEXT_COLUMN: &str = "ResponseText";
pub const SENTIMENT_COLUMN: &str = "Sentiment";
pub const QUESTION_ID_COLUMN: &str = "Question ID";
pub const PARTICIPANT_ID_COLUMN: &str = "Participant ID";

/// Tag columns are `Tag 1` through `Tag 13`.
pub const MAX_TAG_COLUMNS: usize = 13;

/// Rows whose trimmed text is this many characters or fewer are dropped.
pub const MIN_TEXT_EXCLUSIVE: usize = 10;

/// Sentiment stored when the source field is empty or missing.
pub const DEFAULT_SENTIMENT: &str = "neutral";

/// One normalized survey response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Trimmed response text, longer than [`MIN_TEXT_EXCLUSIVE`] characters.
    pub text: String,
    /// Stored as read; only lower-cased when filtering.
    pub sentiment: String,
    #[serde(default)]
    pub question_id: String,
    #[serde(default)]
    pub participant_id: String,
    pub tags: Vec<String>,
    /// 1-based position among emitted quotes.
    pub id: u64,
}

impl Quote {
    /// Case-insensitive exact sentiment match.
    pub fn has_sentiment(&self, sentiment: &str) -> bool {
        self.sentiment.to_lowercase() == sentiment.to_lowercase()
    }

    /// Case-insensitive substring match against any tag.
    pub fn has_tag_like(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

fn field<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(String::as_str)
}

/// Non-empty trimmed values of `Tag 1..=Tag 13`, in column order.
pub fn extract_tags(row: &RawRow) -> Vec<String> {
    (1..=MAX_TAG_COLUMNS)
        .filter_map(|i| field(row, &format!("Tag {}", i)))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a raw row, or `None` when its text fails the length filter.
pub fn parse_row(row: &RawRow, id: u64) -> Option<Quote> {
    let text = field(row, RESPONSE_TEXT_COLUMN)?.trim();
    if text.chars().count() <= MIN_TEXT_EXCLUSIVE {
        return None;
    }

    let sentiment = match field(row, SENTIMENT_COLUMN) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_SENTIMENT.to_string(),
    };

    Some(Quote {
        text: text.to_string(),
        sentiment,
        question_id: field(row, QUESTION_ID_COLUMN).unwrap_or_default().to_string(),
        participant_id: field(row, PARTICIPANT_ID_COLUMN)
            .unwrap_or_default()
            .to_string(),
        tags: extract_tags(row),
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_length_boundary() {
        let ten = row(&[(RESPONSE_TEXT_COLUMN, "  abcdefghij  ")]);
        assert!(parse_row(&ten, 1).is_none());

        let eleven = row(&[(RESPONSE_TEXT_COLUMN, "abcdefghijk")]);
        let quote = parse_row(&eleven, 1).unwrap();
        assert_eq!(quote.text, "abcdefghijk");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 10 characters, 20 bytes.
        let r = row(&[(RESPONSE_TEXT_COLUMN, "éééééééééé")]);
        assert!(parse_row(&r, 1).is_none());
    }

    #[test]
    fn test_missing_text_dropped() {
        assert!(parse_row(&row(&[(SENTIMENT_COLUMN, "positive")]), 1).is_none());
    }

    #[test]
    fn test_sentiment_default_and_preserved_case() {
        let r = row(&[(RESPONSE_TEXT_COLUMN, "A long enough response"), (SENTIMENT_COLUMN, "")]);
        assert_eq!(parse_row(&r, 1).unwrap().sentiment, "neutral");

        let r = row(&[(RESPONSE_TEXT_COLUMN, "A long enough response")]);
        assert_eq!(parse_row(&r, 1).unwrap().sentiment, "neutral");

        let r = row(&[
            (RESPONSE_TEXT_COLUMN, "A long enough response"),
            (SENTIMENT_COLUMN, "Mixed"),
        ]);
        assert_eq!(parse_row(&r, 1).unwrap().sentiment, "Mixed");
    }

    #[test]
    fn test_tags_in_column_order_skipping_blanks() {
        let r = row(&[
            (RESPONSE_TEXT_COLUMN, "A long enough response"),
            ("Tag 1", " jobs "),
            ("Tag 2", "   "),
            ("Tag 3", "privacy"),
            ("Tag 13", "jobs"),
            ("Tag 14", "ignored"),
        ]);
        let quote = parse_row(&r, 7).unwrap();
        assert_eq!(quote.tags, vec!["jobs", "privacy", "jobs"]);
        assert_eq!(quote.id, 7);
    }

    #[test]
    fn test_matchers() {
        let r = row(&[
            (RESPONSE_TEXT_COLUMN, "A long enough response"),
            (SENTIMENT_COLUMN, "Positive"),
            ("Tag 1", "Remote-Work"),
        ]);
        let quote = parse_row(&r, 1).unwrap();
        assert!(quote.has_sentiment("positive"));
        assert!(!quote.has_sentiment("pos"));
        assert!(quote.has_tag_like("remote"));
        assert!(!quote.has_tag_like("office"));
    }
}
