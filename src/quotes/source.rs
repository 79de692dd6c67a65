//! Tabular row sources for quote ingestion.
//!
//! A [`RowSource`] yields header-keyed rows.  Opening a source distinguishes
//! "not there" ([`SourceError::Unavailable`]) from "broken while reading"
//! ([`SourceError::Read`]); the aggregator recovers from both.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use super::quote::{Quote, RawRow};
use crate::error::SourceError;

/// Iterator over the rows of an opened source.
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<RawRow, SourceError>> + Send + 'a>;

/// A restartable, row-oriented tabular source.
///
/// Every call to [`RowSource::open`] starts reading from the beginning.
pub trait RowSource: Send + Sync {
    /// Human-readable name of this source (for logging).
    fn source_name(&self) -> String;

    /// Open the source for a fresh pass over its rows.
    fn open(&self) -> Result<RowIter<'_>, SourceError>;
}

// ---------------------------------------------------------------------------
// CSV file
// ---------------------------------------------------------------------------

/// CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for CsvFileSource {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<RowIter<'_>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::unavailable(self.source_name()));
        }

        let name = self.source_name();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| SourceError::read(&name, e))?;
        let headers = reader
            .headers()
            .map_err(|e| SourceError::read(&name, e))?
            .clone();

        let rows = reader.into_records().map(move |record| -> Result<RawRow, SourceError> {
            let record = record.map_err(|e| SourceError::read(&name, e))?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect())
        });
        Ok(Box::new(rows))
    }
}

// ---------------------------------------------------------------------------
// In-memory rows
// ---------------------------------------------------------------------------

/// Rows held in memory, optionally failing after a given number of rows.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<RawRow>,
    fail_after: Option<usize>,
}

impl InMemorySource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            fail_after: None,
        }
    }

    /// Builder: yield a read error once `n` rows have been produced.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }
}

impl RowSource for InMemorySource {
    fn source_name(&self) -> String {
        "in-memory".to_string()
    }

    fn open(&self) -> Result<RowIter<'_>, SourceError> {
        let limit = self.fail_after.unwrap_or(usize::MAX);
        let rows = self
            .rows
            .iter()
            .take(limit)
            .cloned()
            .map(Ok::<RawRow, SourceError>);
        match self.fail_after {
            Some(n) => Ok(Box::new(rows.chain(std::iter::once(Err(SourceError::read(
                "in-memory",
                format!("simulated failure after {} rows", n),
            )))))),
            None => Ok(Box::new(rows)),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in sample set
// ---------------------------------------------------------------------------

/// The five quotes served whenever the primary source cannot be used.
pub fn sample_quotes() -> Vec<Quote> {
    const SAMPLES: [(&str, &str, &str, &str, [&str; 3]); 5] = [
        (
            "AI will help us solve climate change faster than we could alone.",
            "positive",
            "Q1",
            "P001",
            ["environment", "optimism", "technology"],
        ),
        (
            "I worry that AI will make human creativity obsolete.",
            "negative",
            "Q2",
            "P002",
            ["creativity", "concern", "replacement"],
        ),
        (
            "Machine learning should be taught in elementary schools.",
            "positive",
            "Q3",
            "P003",
            ["education", "early-learning", "technology"],
        ),
        (
            "AI assistants make me feel less lonely when I work from home.",
            "positive",
            "Q4",
            "P004",
            ["companionship", "remote-work", "emotional"],
        ),
        (
            "We need global regulations for AI before it's too late.",
            "neutral",
            "Q5",
            "P005",
            ["regulation", "safety", "governance"],
        ),
    ];

    SAMPLES
        .iter()
        .zip(1..)
        .map(|(&(text, sentiment, question_id, participant_id, tags), id)| Quote {
            text: text.to_string(),
            sentiment: sentiment.to_string(),
            question_id: question_id.to_string(),
            participant_id: participant_id.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = CsvFileSource::new("/nonexistent/all_thought_labels.csv");
        assert!(matches!(
            source.open().err(),
            Some(SourceError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_csv_rows_keyed_by_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ResponseText,Sentiment,Question ID,Participant ID,Tag 1").unwrap();
        writeln!(file, "\"Hello, world of AI\",positive,Q1,P1,greeting").unwrap();
        writeln!(file, "short,negative,Q2,P2,").unwrap();

        let source = CsvFileSource::new(file.path());
        let rows: Vec<RawRow> = source.open().unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["ResponseText"], "Hello, world of AI");
        assert_eq!(rows[0]["Question ID"], "Q1");
        assert_eq!(rows[1]["Tag 1"], "");

        // Restartable: a second pass sees the same rows.
        assert_eq!(source.open().unwrap().count(), 2);
    }

    #[test]
    fn test_csv_invalid_utf8_is_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ResponseText,Sentiment\n").unwrap();
        file.write_all(b"A perfectly fine row,positive\n").unwrap();
        file.write_all(b"\xff\xfe broken bytes here,negative\n").unwrap();

        let source = CsvFileSource::new(file.path());
        let results: Vec<_> = source.open().unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SourceError::Read { .. })));
    }

    #[test]
    fn test_in_memory_failure_injection() {
        let rows = vec![RawRow::new(), RawRow::new(), RawRow::new()];
        let source = InMemorySource::new(rows).failing_after(2);
        let results: Vec<_> = source.open().unwrap().collect();
        assert_eq!(results.len(), 3);
        assert!(results[2].is_err());
    }

    #[test]
    fn test_sample_quotes() {
        let samples = sample_quotes();
        assert_eq!(samples.len(), 5);
        assert_eq!(
            samples[0].text,
            "AI will help us solve climate change faster than we could alone."
        );
        assert_eq!(
            samples.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }
}
