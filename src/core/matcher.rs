use crate::models::{Candidate, ScoredCandidate, ScoringWeights};
use crate::core::{personality::CompatibilityTable, scoring::calculate_compatibility};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Number of matches returned when the caller does not ask for a limit
pub const DEFAULT_TOP_K: usize = 3;

/// Errors surfaced by the checked ranking entry point
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("subject {0} has no profile data to compare")]
    IncompleteSubject(String),
}

/// Ranking driver - scores a candidate pool against one subject
///
/// Holds only immutable data, so one instance can be shared by every worker.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    table: Arc<CompatibilityTable>,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self::with_table(weights, CompatibilityTable::default())
    }

    pub fn with_table(weights: ScoringWeights, table: CompatibilityTable) -> Self {
        Self {
            weights,
            table: Arc::new(table),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single candidate against the subject
    pub fn score_pair(&self, subject: &Candidate, candidate: &Candidate) -> ScoredCandidate {
        let result = calculate_compatibility(subject, candidate, &self.table, &self.weights);

        ScoredCandidate {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            score: result.score(),
            breakdown: result.breakdown,
            shared_sports: result.shared_sports,
            shared_goals: result.shared_goals,
        }
    }

    /// Score the whole pool and order it by descending score
    ///
    /// Candidates with equal scores keep their pool order.
    pub fn rank(&self, subject: &Candidate, pool: &[Candidate]) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = pool
            .iter()
            .map(|candidate| self.score_pair(subject, candidate))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        scored
    }

    /// Best `k` candidates for the subject, highest score first
    ///
    /// Returns fewer than `k` entries when the pool is smaller, and an empty
    /// list for an empty pool.
    pub fn top_matches(
        &self,
        subject: &Candidate,
        pool: &[Candidate],
        k: usize,
    ) -> Vec<ScoredCandidate> {
        if k == 0 || pool.is_empty() {
            return Vec::new();
        }

        let mut ranked = self.rank(subject, pool);
        ranked.truncate(k);

        tracing::debug!(
            "Ranked {} candidates for subject {}, keeping {}",
            pool.len(),
            subject.id,
            ranked.len()
        );

        ranked
    }

    /// Like [`Matcher::top_matches`], but refuses a subject with no profile data
    pub fn try_top_matches(
        &self,
        subject: &Candidate,
        pool: &[Candidate],
        k: usize,
    ) -> Result<Vec<ScoredCandidate>, MatchError> {
        if !subject.has_profile_data() {
            return Err(MatchError::IncompleteSubject(subject.id.clone()));
        }

        Ok(self.top_matches(subject, pool, k))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Top `k` matches using the default weights and compatibility table
pub fn top_matches(subject: &Candidate, pool: &[Candidate], k: usize) -> Vec<ScoredCandidate> {
    static DEFAULT: OnceLock<Matcher> = OnceLock::new();
    DEFAULT
        .get_or_init(Matcher::default)
        .top_matches(subject, pool, k)
}
