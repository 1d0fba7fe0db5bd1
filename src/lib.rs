//! Mentor Match - compatibility scoring for mentor/mentee matching
//!
//! This library scores a mentee's survey answers against a pool of mentors
//! and returns the best-ranked matches. Scoring is pure and synchronous; the
//! HTTP layer only decodes records and hands them to the [`Matcher`].

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{score, top_matches, CompatibilityTable, MatchError, Matcher, DEFAULT_TOP_K};
pub use models::{Candidate, LifestyleAnswers, PersonalityType, PreferenceSet, ScoredCandidate, ScoringWeights};
pub use services::SurveyRow;
