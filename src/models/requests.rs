use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Candidate;
use crate::services::SurveyRow;

/// Request to score a single subject/candidate pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(nested)]
    pub subject: Candidate,
    pub candidate: Candidate,
}

/// Request to rank a pool of candidates for a subject
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TopMatchesRequest {
    #[validate(nested)]
    pub subject: Candidate,
    #[serde(default)]
    pub pool: Vec<Candidate>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank mentors for a mentee from raw survey rows
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SurveyMatchRequest {
    pub mentee: SurveyRow,
    #[serde(default)]
    pub mentors: Vec<SurveyRow>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}
