use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use validator::Validate;

/// Number of lifestyle questions in the survey
pub const LIFESTYLE_QUESTIONS: usize = 8;

/// Lowest valid lifestyle answer
pub const MIN_ANSWER: u8 = 1;

/// Highest valid lifestyle answer
pub const MAX_ANSWER: u8 = 5;

/// Errors raised while building profile values at the input boundary
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid personality type {0}: expected 1-9")]
    InvalidPersonality(u8),
}

/// Personality category, labelled 1 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PersonalityType(u8);

impl PersonalityType {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;
}

impl TryFrom<u8> for PersonalityType {
    type Error = ProfileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ProfileError::InvalidPersonality(value))
        }
    }
}

impl From<PersonalityType> for u8 {
    fn from(value: PersonalityType) -> Self {
        value.0
    }
}

impl std::fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered lifestyle answers, one per survey question, each on a 1-5 scale
///
/// Entries are kept exactly as received. Positions that are missing or hold a
/// value outside the 1-5 scale read back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifestyleAnswers(Vec<u8>);

impl LifestyleAnswers {
    pub fn new(answers: Vec<u8>) -> Self {
        Self(answers)
    }

    /// Answer at `index` if present and on the 1-5 scale
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0
            .get(index)
            .copied()
            .filter(|answer| (MIN_ANSWER..=MAX_ANSWER).contains(answer))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of valid answers among the declared questions
    pub fn answered(&self) -> usize {
        (0..LIFESTYLE_QUESTIONS)
            .filter(|&i| self.get(i).is_some())
            .count()
    }
}

impl From<Vec<u8>> for LifestyleAnswers {
    fn from(answers: Vec<u8>) -> Self {
        Self(answers)
    }
}

/// Activity, goal and transplant preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(rename = "sportsInterests", default)]
    pub sports_interests: BTreeSet<String>,
    #[serde(rename = "supportGoals", default)]
    pub support_goals: BTreeSet<String>,
    #[serde(rename = "transplantType", default)]
    pub transplant_type: Option<String>,
}

impl PreferenceSet {
    /// Transplant type with blank values treated as absent
    pub fn transplant(&self) -> Option<&str> {
        self.transplant_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A mentor or mentee as seen by the scoring engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Candidate {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub personality: Option<PersonalityType>,
    #[serde(default)]
    pub lifestyle: LifestyleAnswers,
    #[serde(default)]
    pub preferences: PreferenceSet,
}

impl Candidate {
    /// Whether the record carries anything the scorer can compare
    pub fn has_profile_data(&self) -> bool {
        self.personality.is_some()
            || self.lifestyle.answered() > 0
            || !self.preferences.sports_interests.is_empty()
            || !self.preferences.support_goals.is_empty()
            || self.preferences.transplant().is_some()
    }
}

/// Weighted contribution of each sub-score, in points out of 100
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub personality: f64,
    pub lifestyle: f64,
    pub sports: f64,
    pub goals: f64,
    pub transplant: f64,
}

impl ScoreBreakdown {
    /// Sum of the contributions, clamped to [0, 100] and rounded to two places
    pub fn total(&self) -> f64 {
        let sum = self.personality + self.lifestyle + self.sports + self.goals + self.transplant;
        round_score(sum.clamp(0.0, 100.0))
    }
}

/// Round a score to two decimal places
#[inline]
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scored pool entry returned by the ranking driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "sharedSports")]
    pub shared_sports: Vec<String>,
    #[serde(rename = "sharedGoals")]
    pub shared_goals: Vec<String>,
}

/// Scoring weights, one per sub-score; they must sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub personality: f64,
    pub lifestyle: f64,
    pub sports: f64,
    pub goals: f64,
    pub transplant: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.personality + self.lifestyle + self.sports + self.goals + self.transplant
    }

    /// All weights finite and non-negative, summing to 1.0
    pub fn is_normalized(&self) -> bool {
        let all = [
            self.personality,
            self.lifestyle,
            self.sports,
            self.goals,
            self.transplant,
        ];
        all.iter().all(|w| w.is_finite() && *w >= 0.0) && (self.sum() - 1.0).abs() < 1e-6
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            personality: 0.50,
            lifestyle: 0.20,
            sports: 0.15,
            goals: 0.10,
            transplant: 0.05,
        }
    }
}
