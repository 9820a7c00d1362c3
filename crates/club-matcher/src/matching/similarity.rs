use super::normalizer::normalize;
use super::variations::are_variations;

pub const EXACT_SCORE: f64 = 1.0;
const CONTAINMENT_CEILING: f64 = 0.95;
const TOKEN_OVERLAP_CEILING: f64 = 0.9;
const VARIATION_CREDIT: f64 = 0.8;

/// Similarity in `[0, 1]` between two raw club names.
///
/// Rules are tried in order: exact normalized match, substring containment, then token overlap
/// with variation-table credit. Scores are directional: tokens of `name1` are looked up in
/// `name2`, so swapping arguments can change the result when a name repeats a token.
pub fn similarity(name1: &str, name2: &str) -> f64 {
    let left = normalize(name1);
    let right = normalize(name2);
    normalized_similarity(&left, &right)
}

/// Same as [`similarity`] for names that already went through [`normalize`].
pub fn normalized_similarity(left: &str, right: &str) -> f64 {
    if left == right {
        return EXACT_SCORE;
    }

    if let Some(score) = containment_score(left, right) {
        return score;
    }

    token_overlap_score(left, right)
}

fn containment_score(left: &str, right: &str) -> Option<f64> {
    let (shorter, longer) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    if !longer.contains(shorter) {
        return None;
    }

    let ratio = shorter.chars().count() as f64 / longer.chars().count() as f64;
    Some((ratio * CONTAINMENT_CEILING).clamp(0.0, 1.0))
}

fn token_overlap_score(left: &str, right: &str) -> f64 {
    let left_tokens: Vec<&str> = left.split(' ').collect();
    let right_tokens: Vec<&str> = right.split(' ').collect();

    let matching: f64 = left_tokens
        .iter()
        .map(|token| token_credit(token, &right_tokens))
        .sum();

    let longest = left_tokens.len().max(right_tokens.len()) as f64;
    ((matching / longest) * TOKEN_OVERLAP_CEILING).clamp(0.0, 1.0)
}

// An identical token anywhere in `candidates` outranks a variation seen earlier in the list.
fn token_credit(token: &str, candidates: &[&str]) -> f64 {
    if candidates.contains(&token) {
        return EXACT_SCORE;
    }

    if candidates
        .iter()
        .any(|candidate| are_variations(token, candidate))
    {
        return VARIATION_CREDIT;
    }

    0.0
}
