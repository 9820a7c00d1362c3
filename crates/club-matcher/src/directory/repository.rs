use std::collections::HashMap;

use crate::matching::{find_best_match, find_matches, ClubCandidate, ClubId, MatchResult};

/// Read access to the club directory so matching can run against any backing store.
pub trait ClubDirectory: Send + Sync {
    fn all(&self) -> Result<Vec<ClubCandidate>, DirectoryError>;
    fn get(&self, id: &ClubId) -> Result<Option<ClubCandidate>, DirectoryError>;

    /// Ranked matches for `query`, capped at `limit` results.
    fn search(
        &self,
        query: &str,
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<MatchResult>, DirectoryError> {
        let clubs = self.all()?;
        let mut matches = find_matches(query, &clubs, threshold);
        matches.truncate(limit);
        Ok(matches)
    }

    fn best_match(
        &self,
        query: &str,
        min_threshold: f64,
    ) -> Result<Option<MatchResult>, DirectoryError> {
        let clubs = self.all()?;
        Ok(find_best_match(query, &clubs, min_threshold))
    }
}

/// Error enumeration for directory lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("club not found")]
    NotFound,
    #[error("club directory unavailable: {0}")]
    Unavailable(String),
}

/// Directory snapshot held in memory, typically seeded from a CSV export.
#[derive(Debug, Default, Clone)]
pub struct InMemoryClubDirectory {
    clubs: Vec<ClubCandidate>,
    index: HashMap<ClubId, usize>,
}

impl InMemoryClubDirectory {
    /// Builds the snapshot. When ids repeat, the first record wins.
    pub fn new(candidates: Vec<ClubCandidate>) -> Self {
        let mut clubs = Vec::with_capacity(candidates.len());
        let mut index = HashMap::with_capacity(candidates.len());

        for candidate in candidates {
            if index.contains_key(&candidate.id) {
                continue;
            }
            index.insert(candidate.id.clone(), clubs.len());
            clubs.push(candidate);
        }

        Self { clubs, index }
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    pub fn clubs(&self) -> &[ClubCandidate] {
        &self.clubs
    }
}

impl ClubDirectory for InMemoryClubDirectory {
    fn all(&self) -> Result<Vec<ClubCandidate>, DirectoryError> {
        Ok(self.clubs.clone())
    }

    fn get(&self, id: &ClubId) -> Result<Option<ClubCandidate>, DirectoryError> {
        Ok(self.index.get(id).map(|&position| self.clubs[position].clone()))
    }

    fn search(
        &self,
        query: &str,
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<MatchResult>, DirectoryError> {
        let mut matches = find_matches(query, &self.clubs, threshold);
        matches.truncate(limit);
        Ok(matches)
    }

    fn best_match(
        &self,
        query: &str,
        min_threshold: f64,
    ) -> Result<Option<MatchResult>, DirectoryError> {
        Ok(find_best_match(query, &self.clubs, min_threshold))
    }
}
