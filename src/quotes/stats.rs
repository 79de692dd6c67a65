//! Corpus-wide quote statistics.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::quote::Quote;

/// Number of tags reported in [`QuoteStats::top_tags`].
pub const TOP_TAG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Aggregates over a full quote collection, recomputed on demand.
///
/// Sentiment buckets are keyed by the stored value, so values outside
/// positive/negative/neutral get their own bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStats {
    pub sentiments: BTreeMap<String, usize>,
    /// Most frequent tags, count descending, ties in first-seen order.
    pub top_tags: Vec<TagCount>,
    pub question_counts: BTreeMap<String, usize>,
    /// Distinct non-empty participant ids.
    pub unique_participants: usize,
    pub average_tags_per_quote: f64,
}

/// Tag frequencies that remember first-encounter order.
#[derive(Debug, Default)]
struct TagTally {
    index: HashMap<String, usize>,
    counts: Vec<TagCount>,
}

impl TagTally {
    fn add(&mut self, tag: &str) {
        match self.index.get(tag) {
            Some(&i) => self.counts[i].count += 1,
            None => {
                self.index.insert(tag.to_string(), self.counts.len());
                self.counts.push(TagCount {
                    tag: tag.to_string(),
                    count: 1,
                });
            }
        }
    }

    fn top(mut self, limit: usize) -> Vec<TagCount> {
        // Stable sort keeps first-seen order among equal counts.
        self.counts.sort_by(|a, b| b.count.cmp(&a.count));
        self.counts.truncate(limit);
        self.counts
    }
}

pub fn compute_stats(quotes: &[Quote]) -> QuoteStats {
    if quotes.is_empty() {
        return QuoteStats::default();
    }

    let mut sentiments: BTreeMap<String, usize> = BTreeMap::new();
    let mut question_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut participants: HashSet<&str> = HashSet::new();
    let mut tags = TagTally::default();
    let mut total_tags = 0usize;

    for quote in quotes {
        if !quote.sentiment.is_empty() {
            *sentiments.entry(quote.sentiment.clone()).or_insert(0) += 1;
        }
        for tag in &quote.tags {
            tags.add(tag);
        }
        total_tags += quote.tags.len();
        if !quote.question_id.is_empty() {
            *question_counts.entry(quote.question_id.clone()).or_insert(0) += 1;
        }
        if !quote.participant_id.is_empty() {
            participants.insert(&quote.participant_id);
        }
    }

    QuoteStats {
        sentiments,
        top_tags: tags.top(TOP_TAG_LIMIT),
        question_counts,
        unique_participants: participants.len(),
        average_tags_per_quote: total_tags as f64 / quotes.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::source::sample_quotes;

    fn quote(id: u64, sentiment: &str, participant: &str, tags: &[&str]) -> Quote {
        Quote {
            text: format!("quote number {}", id),
            sentiment: sentiment.to_string(),
            question_id: format!("Q{}", id % 2),
            participant_id: participant.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            id,
        }
    }

    #[test]
    fn test_sample_stats() {
        let stats = compute_stats(&sample_quotes());
        assert_eq!(stats.sentiments.len(), 3);
        assert_eq!(stats.sentiments["positive"], 3);
        assert_eq!(stats.sentiments["negative"], 1);
        assert_eq!(stats.sentiments["neutral"], 1);
        assert_eq!(stats.unique_participants, 5);
        assert_eq!(stats.question_counts.len(), 5);
        assert_eq!(stats.average_tags_per_quote, 3.0);
        assert_eq!(
            stats.top_tags[0],
            TagCount {
                tag: "technology".into(),
                count: 2
            }
        );
        assert_eq!(stats.top_tags.len(), 10);
        // Ties keep first-seen order: "environment" precedes "optimism".
        assert_eq!(stats.top_tags[1].tag, "environment");
        assert_eq!(stats.top_tags[2].tag, "optimism");
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_stats(&[]);
        assert!(stats.sentiments.is_empty());
        assert!(stats.top_tags.is_empty());
        assert!(stats.question_counts.is_empty());
        assert_eq!(stats.unique_participants, 0);
        assert_eq!(stats.average_tags_per_quote, 0.0);
    }

    #[test]
    fn test_unrecognized_sentiment_gets_own_bucket() {
        let quotes = vec![
            quote(1, "Positive", "P1", &[]),
            quote(2, "positive", "P1", &[]),
            quote(3, "mixed", "", &["a"]),
        ];
        let stats = compute_stats(&quotes);
        assert_eq!(stats.sentiments["Positive"], 1);
        assert_eq!(stats.sentiments["positive"], 1);
        assert_eq!(stats.sentiments["mixed"], 1);
        assert_eq!(stats.unique_participants, 1);
        assert!((stats.average_tags_per_quote - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_tags_limit_and_duplicates() {
        let many: Vec<String> = (0..15).map(|i| format!("t{}", i)).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let quotes = vec![
            quote(1, "neutral", "P1", &many),
            quote(2, "neutral", "P2", &["t14", "t14"]),
        ];
        let stats = compute_stats(&quotes);
        assert_eq!(stats.top_tags.len(), TOP_TAG_LIMIT);
        assert_eq!(stats.top_tags[0].tag, "t14");
        assert_eq!(stats.top_tags[0].count, 3);
        assert_eq!(stats.top_tags[1].tag, "t0");
        assert_eq!(stats.average_tags_per_quote, 8.5);
    }

    #[test]
    fn test_stats_serialization_keys() {
        let json = serde_json::to_value(compute_stats(&sample_quotes())).unwrap();
        assert_eq!(json["uniqueParticipants"], 5);
        assert_eq!(json["questionCounts"]["Q3"], 1);
        assert_eq!(json["topTags"][0]["tag"], "technology");
    }
}
