//! # ai-persona
//!
//! Classifies survey respondents into one of five AI-attitude personas from
//! their quiz answers, and aggregates free-text survey responses into
//! corpus statistics.
//!
//! Two independent engines:
//!
//! - [`persona`] - a deterministic weighted classifier over five answers.
//! - [`quotes`] - CSV ingestion with sample fallback, statistics and
//!   filtered random sampling.
//!
//! [`server`] exposes both over HTTP.

pub mod config;
pub mod error;
pub mod persona;
pub mod quiz;
pub mod quotes;
pub mod server;

pub use error::{CatalogError, ClassifyError, SourceError};
pub use persona::{ClassificationResult, PersonaCatalog, PersonaClassifier, PersonaName};
pub use quotes::{Quote, QuoteAggregator, QuoteStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
