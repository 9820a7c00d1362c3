//! Club name normalization and fuzzy matching against directory records.
//!
//! Everything here is pure and synchronous; the variation table is built once and shared
//! read-only, so the functions can be called from concurrent request handlers without locking.

mod candidate;
mod finder;
mod normalizer;
mod similarity;
mod variations;

pub use candidate::{ClubCandidate, ClubId};
pub use finder::{
    find_best_match, find_matches, MatchResult, DEFAULT_BEST_MATCH_THRESHOLD,
    DEFAULT_MATCH_THRESHOLD,
};
pub use normalizer::normalize;
pub use similarity::{normalized_similarity, similarity, EXACT_SCORE};
pub use variations::{are_variations, variations_of};
