//! Persona system - classifying quiz respondents into AI-attitude personas.
//!
//! # Architecture
//!
//! ```text
//! [i64; 5] answers
//!   ↓  validate
//! AnswerVector
//!   ↓  QUESTION_WEIGHTS (static, per question/option)
//! ScoreMap (5 personas, canonical order)
//!   ↓  rank, clamp confidence
//! ClassificationResult { persona_name, confidence, scores, alternatives }
//!   ↓  optional, with PersonaCatalog
//! PersonaReport { persona, insights, recommendations, similar_users }
//! ```
//!
//! The [`PersonaCatalog`] is reference data built once at startup and
//! injected into [`PersonaClassifier`]; nothing here holds global state.

pub mod catalog;
pub mod classifier;
pub mod report;
pub mod weights;

// Re-exports
pub use catalog::{FearCategory, FearProfile, Persona, PersonaCatalog, PersonaInsights, PersonaName};
pub use classifier::{
    AnswerVector, Alternative, ClassificationResult, PersonaClassifier, ScoreMap,
    MAX_CONFIDENCE, MIN_CONFIDENCE,
};
pub use report::{PersonaReport, SimilarUsers};
pub use weights::QUESTION_WEIGHTS;
