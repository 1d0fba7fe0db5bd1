use crate::models::{Candidate, ScoreBreakdown, ScoringWeights};
use crate::core::{
    personality::{personality_similarity, CompatibilityTable},
    similarity::{lifestyle_similarity, overlap_similarity, transplant_similarity},
};

/// Full result of comparing a subject with one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct Compatibility {
    pub breakdown: ScoreBreakdown,
    pub shared_sports: Vec<String>,
    pub shared_goals: Vec<String>,
}

impl Compatibility {
    /// Final score (0-100), rounded to two places
    pub fn score(&self) -> f64 {
        self.breakdown.total()
    }
}

/// Compare a subject with a candidate across the five sub-scores
///
/// Scoring formula:
/// score = (
///     personality * 0.50 +   # exact type 100, compatible type 80
///     lifestyle * 0.20 +     # mean per-question closeness
///     sports * 0.15 +        # share of subject's sports the candidate shares
///     goals * 0.10 +         # share of subject's goals the candidate shares
///     transplant * 0.05      # same type 100, different type 50
/// )
///
/// Every sub-score degrades to zero on missing data instead of failing.
pub fn calculate_compatibility(
    subject: &Candidate,
    candidate: &Candidate,
    table: &CompatibilityTable,
    weights: &ScoringWeights,
) -> Compatibility {
    let personality = personality_similarity(table, subject.personality, candidate.personality);

    let lifestyle = lifestyle_similarity(&subject.lifestyle, &candidate.lifestyle);

    let (sports, shared_sports) = overlap_similarity(
        &subject.preferences.sports_interests,
        &candidate.preferences.sports_interests,
    );

    let (goals, shared_goals) = overlap_similarity(
        &subject.preferences.support_goals,
        &candidate.preferences.support_goals,
    );

    let transplant = transplant_similarity(
        subject.preferences.transplant(),
        candidate.preferences.transplant(),
    );

    let breakdown = ScoreBreakdown {
        personality: personality * weights.personality,
        lifestyle: lifestyle * weights.lifestyle,
        sports: sports * weights.sports,
        goals: goals * weights.goals,
        transplant: transplant * weights.transplant,
    };

    Compatibility {
        breakdown,
        shared_sports,
        shared_goals,
    }
}

/// Compatibility score (0-100) with the default weights and table
pub fn score(subject: &Candidate, candidate: &Candidate) -> f64 {
    calculate_compatibility(
        subject,
        candidate,
        CompatibilityTable::standard(),
        &ScoringWeights::default(),
    )
    .score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LifestyleAnswers, PersonalityType, PreferenceSet};

    fn create_candidate(
        id: &str,
        personality: u8,
        lifestyle: Vec<u8>,
        sports: &[&str],
        goals: &[&str],
        transplant: Option<&str>,
    ) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: Some(format!("User {}", id)),
            email: None,
            personality: PersonalityType::try_from(personality).ok(),
            lifestyle: LifestyleAnswers::new(lifestyle),
            preferences: PreferenceSet {
                sports_interests: sports.iter().map(|s| s.to_string()).collect(),
                support_goals: goals.iter().map(|s| s.to_string()).collect(),
                transplant_type: transplant.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_perfect_match_scores_100() {
        let subject = create_candidate("s", 5, vec![2; 8], &["Yoga"], &["Diet"], Some("Liver"));
        let twin = Candidate {
            id: "twin".to_string(),
            ..subject.clone()
        };
        assert_eq!(score(&subject, &twin), 100.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let subject = create_candidate("s", 2, vec![1; 8], &["Running"], &["Diet"], Some("Kidney"));
        let candidate = create_candidate("c", 9, vec![5; 8], &["Chess"], &["Career"], None);
        assert_eq!(score(&subject, &candidate), 0.0);
    }

    #[test]
    fn test_breakdown_components() {
        let subject = create_candidate("s", 2, vec![3; 8], &["Running"], &["Peer Support"], Some("Kidney"));
        let candidate = create_candidate("c", 8, vec![1; 8], &[], &["Peer Support"], None);

        let result = calculate_compatibility(
            &subject,
            &candidate,
            CompatibilityTable::standard(),
            &ScoringWeights::default(),
        );

        assert_eq!(result.breakdown.personality, 40.0);
        assert_eq!(result.breakdown.lifestyle, 10.0);
        assert_eq!(result.breakdown.sports, 0.0);
        assert_eq!(result.breakdown.goals, 10.0);
        assert_eq!(result.breakdown.transplant, 0.0);
        assert_eq!(result.shared_goals, vec!["Peer Support"]);
        assert_eq!(result.score(), 60.0);
    }

    #[test]
    fn test_different_transplant_gets_partial_credit() {
        let subject = create_candidate("s", 1, vec![], &[], &[], Some("Kidney"));
        let candidate = create_candidate("c", 6, vec![], &[], &[], Some("Heart"));
        assert_eq!(score(&subject, &candidate), 2.5);
    }

    #[test]
    fn test_missing_personality_only_drops_that_component() {
        let mut subject = create_candidate("s", 3, vec![4; 8], &["Hiking"], &[], None);
        subject.personality = None;
        let candidate = create_candidate("c", 3, vec![4; 8], &["Hiking"], &[], None);
        assert_eq!(score(&subject, &candidate), 35.0);
    }

    #[test]
    fn test_custom_weights_change_score() {
        let subject = create_candidate("s", 4, vec![3; 8], &[], &[], None);
        let candidate = create_candidate("c", 4, vec![3; 8], &[], &[], None);

        let weights = ScoringWeights {
            personality: 0.2,
            lifestyle: 0.8,
            sports: 0.0,
            goals: 0.0,
            transplant: 0.0,
        };
        let result = calculate_compatibility(&subject, &candidate, CompatibilityTable::standard(), &weights);
        assert_eq!(result.score(), 100.0);
    }
}
