//! Services layered over the repositories.

pub mod multi_grade;
pub mod related_word;

pub use multi_grade::{cache_key, MultiGradeService};
pub use related_word::{RelatedWordQuery, RelatedWordService, DEFAULT_CANDIDATE_LIMIT};
