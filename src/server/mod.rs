//! HTTP server exposing the persona classifier and the quote engine.
//!
//! # Endpoints
//!
//! - `GET  /api/health`       - Liveness probe
//! - `GET  /api/personas/...` - Persona reference data
//! - `POST /api/quiz/...`     - Quiz classification
//! - `GET  /api/quotes/...`   - Quote corpus, stats and sampling
//!
//! See [`routes`] for the full list.

pub mod routes;

pub use routes::{app_router, AppState};
