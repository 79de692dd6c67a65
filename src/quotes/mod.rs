//! Survey quote corpus - ingestion, statistics and random sampling.
//!
//! ```text
//! RowSource (CSV file / in-memory)
//!   ↓  header-keyed RawRow
//! parse_row  (length filter, sentiment default, Tag 1..13)
//!   ↓
//! Vec<Quote> ──→ compute_stats → QuoteStats
//!            └─→ sample_random → RandomSample
//! ```

pub mod aggregator;
pub mod quote;
pub mod source;
pub mod stats;

// Re-exports
pub use aggregator::{
    filter_by_sentiment, filter_by_tag, sample_random, CorpusSnapshot, Ingestion, QuoteAggregator,
    QuoteFilter, QuoteOrigin, RandomSample, ReadErrorPolicy,
};
pub use quote::{parse_row, Quote, RawRow};
pub use source::{sample_quotes, CsvFileSource, InMemorySource, RowSource};
pub use stats::{compute_stats, QuoteStats, TagCount};
