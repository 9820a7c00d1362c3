//! Club directory access, CSV imports, and the club-history linking job.

mod history;
mod importer;
pub mod linker;
pub mod repository;
pub mod router;

use std::io::Read;
use std::path::Path;

pub use history::ClubHistoryEntry;
pub use linker::{
    HistoryLinker, LinkOutcome, LinkReport, LinkTotals, LinkedEntry, LinkerError, LinkerOptions,
};
pub use repository::{ClubDirectory, DirectoryError, InMemoryClubDirectory};
pub use router::{club_router, ClubRouterState};

use crate::matching::ClubCandidate;

#[derive(Debug)]
pub enum DirectoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for DirectoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryImportError::Io(err) => write!(f, "failed to read club export: {}", err),
            DirectoryImportError::Csv(err) => write!(f, "invalid club CSV data: {}", err),
        }
    }
}

impl std::error::Error for DirectoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryImportError::Io(err) => Some(err),
            DirectoryImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for DirectoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DirectoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads directory clubs from an `id,name,short_name,logo_url` export.
pub struct ClubCatalogImporter;

impl ClubCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ClubCandidate>, DirectoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ClubCandidate>, DirectoryImportError> {
        Ok(importer::parse_clubs(reader)?)
    }
}

/// Loads club-history rows from an `entry_id,player_id,club_name,season,club_id` export.
pub struct ClubHistoryImporter;

impl ClubHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ClubHistoryEntry>, DirectoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ClubHistoryEntry>, DirectoryImportError> {
        Ok(history::parse_entries(reader)?)
    }
}
