use super::importer::empty_string_as_none;
use crate::matching::ClubId;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A club a player lists in their history, as typed or imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubHistoryEntry {
    pub entry_id: String,
    #[serde(default)]
    pub player_id: Option<String>,
    pub club_name: String,
    #[serde(default)]
    pub season: Option<String>,
    /// Directory club this entry already points at, if any.
    #[serde(default)]
    pub club_id: Option<ClubId>,
}

pub(crate) fn parse_entries<R: Read>(reader: R) -> Result<Vec<ClubHistoryEntry>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for record in csv_reader.deserialize::<HistoryRow>() {
        let row = record?;
        entries.push(ClubHistoryEntry {
            entry_id: row.entry_id,
            player_id: row.player_id,
            club_name: row.club_name,
            season: row.season,
            club_id: row.club_id.map(ClubId),
        });
    }

    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    entry_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    player_id: Option<String>,
    #[serde(default)]
    club_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    season: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    club_id: Option<String>,
}
