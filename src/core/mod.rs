// Core algorithm exports
pub mod matcher;
pub mod personality;
pub mod scoring;
pub mod similarity;

pub use matcher::{top_matches, MatchError, Matcher, DEFAULT_TOP_K};
pub use personality::{personality_similarity, CompatibilityTable};
pub use scoring::{calculate_compatibility, score, Compatibility};
pub use similarity::{answer_similarity, lifestyle_similarity, overlap_similarity, transplant_similarity};
