// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    round_score, Candidate, LifestyleAnswers, PersonalityType, PreferenceSet, ProfileError,
    ScoreBreakdown, ScoredCandidate, ScoringWeights, LIFESTYLE_QUESTIONS, MAX_ANSWER, MIN_ANSWER,
};
pub use requests::{ScoreRequest, SurveyMatchRequest, TopMatchesRequest};
pub use responses::{ErrorResponse, HealthResponse, TopMatchesResponse};
