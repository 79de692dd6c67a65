//! Quote aggregation - ingestion with fallback, statistics and sampling.
//!
//! Data-source failures never reach the caller.  A missing source yields
//! the built-in sample set; a read error mid-stream is handled according to
//! the configured [`ReadErrorPolicy`].  Both are logged.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::quote::{parse_row, Quote};
use super::source::{sample_quotes, RowSource};
use super::stats::{compute_stats, QuoteStats};
use crate::error::SourceError;

/// Sample size used when none (or zero) is requested.
pub const DEFAULT_SAMPLE_COUNT: usize = 10;

// ============================================================================
// Ingestion
// ============================================================================

/// What to do when the source breaks partway through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadErrorPolicy {
    /// Discard what was read and serve the sample set.
    #[default]
    Sample,
    /// Keep the quotes collected before the error.
    Partial,
}

impl FromStr for ReadErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "partial" => Ok(Self::Partial),
            other => Err(format!("Unknown read error policy '{}'", other)),
        }
    }
}

/// Where an ingested corpus came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrigin {
    /// Read in full from the primary source.
    #[serde(rename = "csv")]
    Primary,
    /// Primary source missing; sample set served.
    Sample,
    /// Primary source failed mid-read; sample set served.
    Fallback,
    /// Primary source failed mid-read; rows before the failure kept.
    Partial,
}

impl fmt::Display for QuoteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Primary => "csv",
            Self::Sample => "sample",
            Self::Fallback => "fallback",
            Self::Partial => "partial",
        };
        f.write_str(s)
    }
}

/// Result of one ingestion pass.
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub quotes: Vec<Quote>,
    pub origin: QuoteOrigin,
    /// The read error that triggered a fallback, if any.
    pub error: Option<String>,
}

/// Quotes plus their statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSnapshot {
    pub quotes: Vec<Quote>,
    pub stats: QuoteStats,
    pub source: QuoteOrigin,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Filtering & sampling
// ============================================================================

/// Optional sampling filters; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFilter {
    pub sentiment: Option<String>,
    pub tag: Option<String>,
}

impl QuoteFilter {
    pub fn sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    fn sentiment_value(&self) -> Option<&str> {
        self.sentiment.as_deref().filter(|s| !s.is_empty())
    }

    fn tag_value(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.sentiment_value().is_none() && self.tag_value().is_none()
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        self.sentiment_value().map_or(true, |s| quote.has_sentiment(s))
            && self.tag_value().map_or(true, |t| quote.has_tag_like(t))
    }
}

/// A random draw plus the counts it was drawn from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomSample {
    pub quotes: Vec<Quote>,
    pub total_available: usize,
    pub filtered_available: usize,
    pub requested: usize,
    /// False when no filter was given or it matched nothing.
    pub filter_applied: bool,
    pub filters: QuoteFilter,
}

/// All quotes whose sentiment equals `sentiment`, ignoring case.
pub fn filter_by_sentiment(quotes: &[Quote], sentiment: &str) -> Vec<Quote> {
    quotes
        .iter()
        .filter(|q| q.has_sentiment(sentiment))
        .cloned()
        .collect()
}

/// All quotes with a tag containing `tag`, ignoring case.
pub fn filter_by_tag(quotes: &[Quote], tag: &str) -> Vec<Quote> {
    quotes.iter().filter(|q| q.has_tag_like(tag)).cloned().collect()
}

/// Shuffle-then-take sampling.
///
/// A filter that matches nothing is ignored and the draw comes from the
/// whole corpus.
pub fn sample_random<R: Rng + ?Sized>(
    quotes: &[Quote],
    count: Option<usize>,
    filter: &QuoteFilter,
    rng: &mut R,
) -> RandomSample {
    let requested = count.filter(|&c| c > 0).unwrap_or(DEFAULT_SAMPLE_COUNT);

    let mut pool: Vec<&Quote> = quotes.iter().filter(|q| filter.matches(q)).collect();
    let filtered_available = pool.len();
    let filter_applied = !filter.is_empty() && !pool.is_empty();
    if pool.is_empty() {
        pool = quotes.iter().collect();
    }

    pool.shuffle(rng);
    RandomSample {
        quotes: pool.into_iter().take(requested).cloned().collect(),
        total_available: quotes.len(),
        filtered_available,
        requested,
        filter_applied,
        filters: filter.clone(),
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Quote engine over a single row source.
///
/// Holds no corpus state: every operation re-reads the source.
#[derive(Clone)]
pub struct QuoteAggregator {
    source: Arc<dyn RowSource>,
    on_read_error: ReadErrorPolicy,
}

impl fmt::Debug for QuoteAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteAggregator")
            .field("source", &self.source.source_name())
            .field("on_read_error", &self.on_read_error)
            .finish()
    }
}

impl QuoteAggregator {
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self {
            source,
            on_read_error: ReadErrorPolicy::default(),
        }
    }

    /// Builder: set the mid-stream read error policy.
    pub fn with_read_error_policy(mut self, policy: ReadErrorPolicy) -> Self {
        self.on_read_error = policy;
        self
    }

    pub fn read_error_policy(&self) -> ReadErrorPolicy {
        self.on_read_error
    }

    /// Read and normalize every row of the source.
    pub fn ingest(&self) -> Ingestion {
        let rows = match self.source.open() {
            Ok(rows) => rows,
            Err(SourceError::Unavailable { source_name }) => {
                log::warn!("Quote source '{}' not found, using sample quotes", source_name);
                return Ingestion {
                    quotes: sample_quotes(),
                    origin: QuoteOrigin::Sample,
                    error: None,
                };
            }
            Err(e) => return self.recover(Vec::new(), e),
        };

        let mut quotes = Vec::new();
        for row in rows {
            match row {
                Ok(row) => {
                    let next_id = quotes.len() as u64 + 1;
                    if let Some(quote) = parse_row(&row, next_id) {
                        quotes.push(quote);
                    }
                }
                Err(e) => return self.recover(quotes, e),
            }
        }

        log::info!(
            "Loaded {} quotes from {}",
            quotes.len(),
            self.source.source_name()
        );
        Ingestion {
            quotes,
            origin: QuoteOrigin::Primary,
            error: None,
        }
    }

    fn recover(&self, collected: Vec<Quote>, error: SourceError) -> Ingestion {
        log::error!("Error reading quotes: {}", error);
        match self.on_read_error {
            ReadErrorPolicy::Sample => Ingestion {
                quotes: sample_quotes(),
                origin: QuoteOrigin::Fallback,
                error: Some(error.to_string()),
            },
            ReadErrorPolicy::Partial => Ingestion {
                quotes: collected,
                origin: QuoteOrigin::Partial,
                error: Some(error.to_string()),
            },
        }
    }

    /// Ingested quotes only.
    pub fn quotes(&self) -> Vec<Quote> {
        self.ingest().quotes
    }

    pub fn ingest_and_stats(&self) -> CorpusSnapshot {
        let Ingestion {
            quotes,
            origin,
            error,
        } = self.ingest();
        CorpusSnapshot {
            stats: compute_stats(&quotes),
            total: quotes.len(),
            quotes,
            source: origin,
            error,
        }
    }

    /// Random sample over a fresh ingestion, using the thread-local RNG.
    pub fn sample_random(&self, count: Option<usize>, filter: &QuoteFilter) -> RandomSample {
        let quotes = self.quotes();
        sample_random(&quotes, count, filter, &mut rand::thread_rng())
    }
}

// ============================================================================
// Tests
// ============================================================================
