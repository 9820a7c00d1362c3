use crate::matching::{ClubCandidate, ClubId};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

pub(crate) fn parse_clubs<R: Read>(reader: R) -> Result<Vec<ClubCandidate>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut clubs = Vec::new();

    for (index, record) in csv_reader.deserialize::<ClubRow>().enumerate() {
        let row = record?;
        if row.id.is_empty() || row.name.is_empty() {
            warn!(row = index + 1, "skipping club row without id or name");
            continue;
        }

        clubs.push(ClubCandidate {
            id: ClubId(row.id),
            name: row.name,
            short_name: row.short_name,
            logo: row.logo_url,
        });
    }

    Ok(clubs)
}

#[derive(Debug, Deserialize)]
struct ClubRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    short_name: Option<String>,
    #[serde(default, alias = "logo", deserialize_with = "empty_string_as_none")]
    logo_url: Option<String>,
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
