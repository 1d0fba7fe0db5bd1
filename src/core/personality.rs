use crate::models::PersonalityType;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Similarity when both parties share the same personality type
pub const EXACT_MATCH_SIMILARITY: f64 = 100.0;

/// Similarity when the candidate's type is in the subject's compatibility set
pub const COMPATIBLE_SIMILARITY: f64 = 80.0;

/// Default compatibility set for each personality type
pub const DEFAULT_COMPATIBILITY: [(u8, &[u8]); 9] = [
    (1, &[2, 4, 7]),
    (2, &[3, 4, 8]),
    (3, &[6, 7, 9]),
    (4, &[1, 2, 5]),
    (5, &[4, 8, 9]),
    (6, &[3, 8, 9]),
    (7, &[1, 3, 9]),
    (8, &[2, 5, 6]),
    (9, &[3, 5, 7]),
];

/// Per-type sets of near-match personality types
///
/// The relation is directional: `is_compatible(a, b)` says nothing about
/// `is_compatible(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityTable {
    entries: HashMap<PersonalityType, BTreeSet<PersonalityType>>,
}

impl CompatibilityTable {
    /// Build a table from `(type, compatible types)` pairs
    ///
    /// Labels outside 1-9 and self references are dropped.
    pub fn from_pairs(pairs: &[(u8, &[u8])]) -> Self {
        let mut entries: HashMap<PersonalityType, BTreeSet<PersonalityType>> = HashMap::new();

        for (source, targets) in pairs {
            let Ok(source) = PersonalityType::try_from(*source) else {
                tracing::warn!("Skipping compatibility entry for invalid type {}", source);
                continue;
            };

            let set = entries.entry(source).or_default();
            set.extend(
                targets
                    .iter()
                    .filter_map(|t| PersonalityType::try_from(*t).ok())
                    .filter(|t| *t != source),
            );
        }

        Self { entries }
    }

    /// The shared default table, built on first use
    pub fn standard() -> &'static CompatibilityTable {
        static STANDARD: OnceLock<CompatibilityTable> = OnceLock::new();
        STANDARD.get_or_init(CompatibilityTable::default)
    }

    #[inline]
    pub fn is_compatible(&self, from: PersonalityType, to: PersonalityType) -> bool {
        self.entries
            .get(&from)
            .is_some_and(|set| set.contains(&to))
    }

    /// Compatible types for `from`, in ascending order
    pub fn compatible_with(&self, from: PersonalityType) -> impl Iterator<Item = PersonalityType> + '_ {
        self.entries.get(&from).into_iter().flatten().copied()
    }
}

impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::from_pairs(&DEFAULT_COMPATIBILITY)
    }
}

/// Personality similarity (0-100) of `candidate` as seen from `subject`
///
/// Exact type match beats a compatible type; anything else, or a missing
/// type on either side, scores zero.
#[inline]
pub fn personality_similarity(
    table: &CompatibilityTable,
    subject: Option<PersonalityType>,
    candidate: Option<PersonalityType>,
) -> f64 {
    match (subject, candidate) {
        (Some(s), Some(c)) if s == c => EXACT_MATCH_SIMILARITY,
        (Some(s), Some(c)) if table.is_compatible(s, c) => COMPATIBLE_SIMILARITY,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(value: u8) -> PersonalityType {
        PersonalityType::try_from(value).unwrap()
    }

    #[test]
    fn test_default_table_entries() {
        let table = CompatibilityTable::default();
        let two: Vec<u8> = table.compatible_with(p(2)).map(u8::from).collect();
        assert_eq!(two, vec![3, 4, 8]);

        for value in 1..=9 {
            assert_eq!(table.compatible_with(p(value)).count(), 3);
        }
    }

    #[test]
    fn test_table_is_asymmetric() {
        let table = CompatibilityTable::default();
        assert!(table.is_compatible(p(2), p(3)));
        assert!(!table.is_compatible(p(3), p(2)));
    }

    #[test]
    fn test_from_pairs_drops_invalid_labels() {
        let table = CompatibilityTable::from_pairs(&[(0, &[1]), (1, &[1, 2, 12])]);
        let one: Vec<u8> = table.compatible_with(p(1)).map(u8::from).collect();
        assert_eq!(one, vec![2]);
        assert_eq!(table.compatible_with(p(5)).count(), 0);
    }

    #[test]
    fn test_personality_similarity() {
        let table = CompatibilityTable::standard();
        assert_eq!(personality_similarity(table, Some(p(2)), Some(p(2))), 100.0);
        assert_eq!(personality_similarity(table, Some(p(2)), Some(p(8))), 80.0);
        assert_eq!(personality_similarity(table, Some(p(2)), Some(p(9))), 0.0);
        assert_eq!(personality_similarity(table, None, Some(p(2))), 0.0);
        assert_eq!(personality_similarity(table, Some(p(2)), None), 0.0);
    }
}
