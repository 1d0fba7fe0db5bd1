// Service exports
pub mod survey;

pub use survey::{decode_personality, decode_tag_set, decode_transplant, SurveyRow, NOT_APPLICABLE};
