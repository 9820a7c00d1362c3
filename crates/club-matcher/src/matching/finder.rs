use serde::{Deserialize, Serialize};

use super::candidate::{ClubCandidate, ClubId};
use super::normalizer::normalize;
use super::similarity::normalized_similarity;

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.3;
pub const DEFAULT_BEST_MATCH_THRESHOLD: f64 = 0.5;

/// A directory club scored against a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: ClubId,
    pub name: String,
    pub short_name: Option<String>,
    pub logo: Option<String>,
    pub similarity: f64,
}

impl MatchResult {
    fn scored(candidate: &ClubCandidate, similarity: f64) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            short_name: candidate.short_name.clone(),
            logo: candidate.logo.clone(),
            similarity,
        }
    }
}

/// Candidates scoring at least `threshold`, best first. Queries that normalize to
/// nothing (blank or punctuation only) match nothing.
pub fn find_matches(query: &str, candidates: &[ClubCandidate], threshold: f64) -> Vec<MatchResult> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<MatchResult> = candidates
        .iter()
        .filter_map(|candidate| {
            let score = candidate_score(&query, candidate);
            (score >= threshold).then(|| MatchResult::scored(candidate, score))
        })
        .collect();

    // Stable, so equal scores keep directory order.
    matches.sort_by(|left, right| right.similarity.total_cmp(&left.similarity));
    matches
}

/// Highest-scoring candidate at or above `min_threshold`.
pub fn find_best_match(
    query: &str,
    candidates: &[ClubCandidate],
    min_threshold: f64,
) -> Option<MatchResult> {
    find_matches(query, candidates, min_threshold)
        .into_iter()
        .next()
}

fn candidate_score(normalized_query: &str, candidate: &ClubCandidate) -> f64 {
    let by_name = normalized_similarity(normalized_query, &normalize(&candidate.name));
    // A short name with nothing left after normalization counts as absent.
    match candidate
        .short_name
        .as_deref()
        .map(normalize)
        .filter(|short_name| !short_name.is_empty())
    {
        Some(short_name) => by_name.max(normalized_similarity(normalized_query, &short_name)),
        None => by_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(id: &str, name: &str, short_name: Option<&str>) -> ClubCandidate {
        ClubCandidate {
            id: ClubId(id.to_string()),
            name: name.to_string(),
            short_name: short_name.map(str::to_string),
            logo: None,
        }
    }

    fn directory() -> Vec<ClubCandidate> {
        vec![
            club("c1", "VBC Genève", None),
            club("c2", "Volleyball Club Amriswil", Some("VBC Amriswil")),
            club("c3", "Volley Luzern", None),
            club("c4", "Volero Zürich", None),
        ]
    }

    #[test]
    fn blank_queries_return_no_matches() {
        let clubs = directory();
        assert!(find_matches("", &clubs, 0.0).is_empty());
        assert!(find_matches("   \t", &clubs, 0.0).is_empty());
        assert!(find_best_match(" ", &clubs, 0.0).is_none());
    }

    #[test]
    fn punctuation_only_queries_return_no_matches() {
        let clubs = directory();
        assert!(find_matches(".", &clubs, 0.0).is_empty());
        assert!(find_best_match("' - .", &clubs, 0.0).is_none());
    }

    #[test]
    fn empty_short_names_are_ignored() {
        let clubs = vec![
            club("c1", "VBC Genève", Some("")),
            club("c2", "Volley Luzern", Some(" ' ")),
        ];

        assert!(find_best_match("'", &clubs, DEFAULT_BEST_MATCH_THRESHOLD).is_none());
        assert!(find_matches(".", &clubs, 0.0).is_empty());

        let best = find_best_match("VBC Geneve", &clubs, DEFAULT_BEST_MATCH_THRESHOLD)
            .expect("main name still matches");
        assert_eq!(best.id, ClubId("c1".into()));
        assert_eq!(best.similarity, 1.0);

        let partial = find_matches("Luzern", &clubs, 0.0);
        assert_eq!(partial.len(), 1);
        assert!(partial[0].similarity < 1.0);
    }

    #[test]
    fn empty_candidate_list_returns_no_matches() {
        assert!(find_matches("Volley Luzern", &[], DEFAULT_MATCH_THRESHOLD).is_empty());
        assert!(find_best_match("Volley Luzern", &[], DEFAULT_BEST_MATCH_THRESHOLD).is_none());
    }

    #[test]
    fn exact_name_ranks_first_with_full_score() {
        let clubs = directory();
        let matches = find_matches("Volley Luzern", &clubs, DEFAULT_MATCH_THRESHOLD);
        let first = matches.first().expect("at least one match");
        assert_eq!(first.id, ClubId("c3".into()));
        assert_eq!(first.similarity, 1.0);
    }

    #[test]
    fn short_name_is_scored_alongside_main_name() {
        let clubs = directory();
        let best = find_best_match("vbc amriswil", &clubs, DEFAULT_BEST_MATCH_THRESHOLD)
            .expect("short name matches");
        assert_eq!(best.id, ClubId("c2".into()));
        assert_eq!(best.similarity, 1.0);
        assert_eq!(best.short_name.as_deref(), Some("VBC Amriswil"));
    }

    #[test]
    fn results_are_sorted_and_thresholded() {
        let clubs = directory();
        let matches = find_matches("Genf Volleyball", &clubs, DEFAULT_MATCH_THRESHOLD);
        assert!(!matches.is_empty());
        assert_eq!(matches[0].id, ClubId("c1".into()));
        assert!(matches
            .windows(2)
            .all(|pair| pair[0].similarity >= pair[1].similarity));
        assert!(matches
            .iter()
            .all(|result| result.similarity >= DEFAULT_MATCH_THRESHOLD));
        assert!(matches.iter().all(|result| result.id != ClubId("c4".into())));
    }

    #[test]
    fn best_match_respects_minimum_threshold() {
        let clubs = directory();
        assert!(find_best_match("Genf Volleyball", &clubs, 0.8).is_none());
        let best = find_best_match("Genf Volleyball", &clubs, DEFAULT_BEST_MATCH_THRESHOLD)
            .expect("variation match above default threshold");
        assert_eq!(best.id, ClubId("c1".into()));
    }

    #[test]
    fn ties_keep_candidate_order() {
        let clubs = vec![
            club("first", "Volley Bern", None),
            club("second", "Volley Bern", None),
        ];
        let matches = find_matches("Bern Volley", &clubs, 0.0);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].similarity, matches[1].similarity);
        assert_eq!(matches[0].id, ClubId("first".into()));
    }

    #[test]
    fn candidates_are_left_untouched() {
        let clubs = directory();
        let before = clubs.clone();
        let _ = find_matches("Volley", &clubs, 0.0);
        assert_eq!(clubs, before);
    }
}
