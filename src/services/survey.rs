use crate::models::{Candidate, LifestyleAnswers, PersonalityType, PreferenceSet};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Transplant type the survey stores when the user has none
pub const NOT_APPLICABLE: &str = "Not Applicable";

/// One joined survey row as stored by the platform
///
/// Set-valued answers arrive as JSON text (`"[\"Running\",\"Yoga\"]"`) or as
/// already-decoded JSON values; both shapes are accepted. Lifestyle answers
/// are flat `q1`..`q8` columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyRow {
    #[serde(alias = "user_id", alias = "id", rename = "userId", deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(alias = "first_name", rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(alias = "last_name", rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(alias = "top_type", rename = "topType", default)]
    pub top_type: Option<Value>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q1: Option<u8>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q2: Option<u8>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q3: Option<u8>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q4: Option<u8>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q5: Option<u8>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q6: Option<u8>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q7: Option<u8>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q8: Option<u8>,
    #[serde(alias = "sports_activities", rename = "sportsActivities", default)]
    pub sports_activities: Option<Value>,
    #[serde(default)]
    pub goals: Option<Value>,
    #[serde(alias = "transplant_type", rename = "transplantType", default)]
    pub transplant_type: Option<Value>,
}

impl SurveyRow {
    /// Decode the row into a scoring record
    ///
    /// Never fails: malformed columns decode to their empty value.
    pub fn into_candidate(self) -> Candidate {
        let name = display_name(self.first_name.as_deref(), self.last_name.as_deref());

        // Missing answers become 0, which the scorer reads as unanswered
        let lifestyle = [
            self.q1, self.q2, self.q3, self.q4, self.q5, self.q6, self.q7, self.q8,
        ]
        .into_iter()
        .map(|answer| answer.unwrap_or(0))
        .collect::<Vec<u8>>();

        let personality = self.top_type.as_ref().and_then(decode_personality);
        if personality.is_none() && self.top_type.is_some() {
            tracing::debug!("No valid personality type for survey row {}", self.user_id);
        }

        Candidate {
            id: self.user_id,
            name,
            email: self.email,
            personality,
            lifestyle: LifestyleAnswers::new(lifestyle),
            preferences: PreferenceSet {
                sports_interests: decode_tag_set(self.sports_activities.as_ref()),
                support_goals: decode_tag_set(self.goals.as_ref()),
                transplant_type: decode_transplant(self.transplant_type.as_ref()),
            },
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Read a lifestyle answer stored as a number or numeric string
///
/// Anything else, including values that do not fit in a `u8`, reads as unanswered.
fn lenient_answer<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let answer = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u8>().ok(),
        _ => None,
    };
    Ok(answer)
}

fn display_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""));
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse JSON text stored in a string column, leaving other values as they are
fn unwrap_json_text(value: &Value) -> Option<Value> {
    match value {
        Value::String(text) => serde_json::from_str(text).ok(),
        other => Some(other.clone()),
    }
}

/// Decode a set-valued column; anything but an array of strings yields an empty set
pub fn decode_tag_set(value: Option<&Value>) -> BTreeSet<String> {
    let Some(value) = value else {
        return BTreeSet::new();
    };

    match unwrap_json_text(value) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(tag) if !tag.trim().is_empty() => Some(tag.trim().to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::Null) | None => BTreeSet::new(),
        Some(other) => {
            tracing::debug!("Ignoring non-array set column: {}", other);
            BTreeSet::new()
        }
    }
}

/// Decode the transplant column to its first selected value
///
/// Blank values and the "Not Applicable" option mean no transplant type.
pub fn decode_transplant(value: Option<&Value>) -> Option<String> {
    let raw = match value? {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => first_string(&items),
            Ok(Value::String(inner)) => Some(inner),
            Ok(_) => None,
            // bare, unencoded value
            Err(_) => Some(text.clone()),
        },
        Value::Array(items) => first_string(items),
        _ => None,
    }?;

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_APPLICABLE) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn first_string(items: &[Value]) -> Option<String> {
    items.iter().find_map(|item| item.as_str().map(str::to_string))
}

/// Decode the stored personality result to its primary type
///
/// Accepts a number, a numeric string, or an array of either (JSON text or
/// decoded). The first valid label wins.
pub fn decode_personality(value: &Value) -> Option<PersonalityType> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(|n| PersonalityType::try_from(n).ok()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(label) = text.parse::<u8>() {
                return PersonalityType::try_from(label).ok();
            }
            match serde_json::from_str::<Value>(text) {
                Ok(Value::String(_)) | Err(_) => None,
                Ok(inner) => decode_personality(&inner),
            }
        }
        Value::Array(items) => items.iter().find_map(decode_personality),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_row() -> SurveyRow {
        SurveyRow {
            user_id: "42".to_string(),
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            email: Some("grace@example.org".to_string()),
            top_type: Some(json!("[\"2\",\"7\"]")),
            q1: Some(3),
            q2: Some(4),
            q3: Some(5),
            q4: Some(1),
            q5: Some(2),
            q6: Some(3),
            q7: Some(4),
            q8: Some(5),
            sports_activities: Some(json!("[\"Running\",\"Yoga\"]")),
            goals: Some(json!("[\"Peer Support\"]")),
            transplant_type: Some(json!("[\"Kidney\",\"Liver\"]")),
        }
    }

    #[test]
    fn test_into_candidate() {
        let candidate = create_row().into_candidate();

        assert_eq!(candidate.id, "42");
        assert_eq!(candidate.name.as_deref(), Some("Grace Hopper"));
        assert_eq!(candidate.personality.map(u8::from), Some(2));
        assert_eq!(candidate.lifestyle.as_slice(), &[3, 4, 5, 1, 2, 3, 4, 5]);
        assert_eq!(candidate.preferences.sports_interests.len(), 2);
        assert!(candidate.preferences.support_goals.contains("Peer Support"));
        assert_eq!(candidate.preferences.transplant_type.as_deref(), Some("Kidney"));
    }

    #[test]
    fn test_missing_lifestyle_columns_keep_positions() {
        let row = SurveyRow {
            q2: None,
            q8: None,
            ..create_row()
        };
        let candidate = row.into_candidate();

        assert_eq!(candidate.lifestyle.get(0), Some(3));
        assert_eq!(candidate.lifestyle.get(1), None);
        assert_eq!(candidate.lifestyle.get(2), Some(5));
        assert_eq!(candidate.lifestyle.get(7), None);
        assert_eq!(candidate.lifestyle.answered(), 6);
    }

    #[test]
    fn test_malformed_set_column_is_empty() {
        assert!(decode_tag_set(Some(&json!("not json"))).is_empty());
        assert!(decode_tag_set(Some(&json!("{\"a\":1}"))).is_empty());
        assert!(decode_tag_set(None).is_empty());

        let mixed = decode_tag_set(Some(&json!(["Running", 3, null, " "])));
        assert_eq!(mixed.into_iter().collect::<Vec<_>>(), vec!["Running"]);
    }

    #[test]
    fn test_transplant_not_applicable_is_absent() {
        assert_eq!(decode_transplant(Some(&json!("[\"Not Applicable\"]"))), None);
        assert_eq!(decode_transplant(Some(&json!("[]"))), None);
        assert_eq!(decode_transplant(Some(&json!("Heart"))), Some("Heart".to_string()));
        assert_eq!(decode_transplant(Some(&json!(["Lung"]))), Some("Lung".to_string()));
        assert_eq!(decode_transplant(None), None);
    }

    #[test]
    fn test_decode_personality_shapes() {
        assert_eq!(decode_personality(&json!(5)).map(u8::from), Some(5));
        assert_eq!(decode_personality(&json!("8")).map(u8::from), Some(8));
        assert_eq!(decode_personality(&json!([0, "3"])).map(u8::from), Some(3));
        assert_eq!(decode_personality(&json!("[\"9\"]")).map(u8::from), Some(9));
        assert_eq!(decode_personality(&json!("Type Nine")), None);
        assert_eq!(decode_personality(&json!(12)), None);
    }

    #[test]
    fn test_deserialize_snake_case_row_with_numeric_id() {
        let json = r#"{
            "id": 7,
            "first_name": "Alan",
            "top_type": "[\"4\"]",
            "q1": 2,
            "sports_activities": "[\"Chess\"]",
            "goals": null,
            "transplant_type": "[\"Not Applicable\"]"
        }"#;
        let row: SurveyRow = serde_json::from_str(json).unwrap();
        let candidate = row.into_candidate();

        assert_eq!(candidate.id, "7");
        assert_eq!(candidate.name.as_deref(), Some("Alan"));
        assert_eq!(candidate.personality.map(u8::from), Some(4));
        assert!(candidate.preferences.support_goals.is_empty());
        assert_eq!(candidate.preferences.transplant(), None);
    }

    #[test]
    fn test_malformed_answers_read_as_unanswered() {
        let row: SurveyRow = serde_json::from_value(json!({
            "user_id": 1,
            "q1": "3",
            "q2": -1,
            "q3": 300,
            "q4": "often",
            "q5": 2.5,
            "q6": null,
            "q7": 4
        }))
        .unwrap();

        assert_eq!(row.q1, Some(3));
        assert_eq!(row.q2, None);
        assert_eq!(row.q3, None);
        assert_eq!(row.q4, None);
        assert_eq!(row.q5, None);
        assert_eq!(row.q6, None);
        assert_eq!(row.q8, None);

        let candidate = row.into_candidate();
        assert_eq!(candidate.lifestyle.as_slice(), &[3, 0, 0, 0, 0, 0, 4, 0]);
        assert_eq!(candidate.lifestyle.answered(), 2);
    }
}
