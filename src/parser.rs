use csv::{Reader, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::ImportError;
use crate::roster::{League, Player};

/// Column positions located from the header row
struct RosterColumns {
    id: usize,
    name: usize,
    faction: Option<usize>,
    rating: Option<usize>,
    location: Option<usize>,
}

impl RosterColumns {
    fn locate(headers: &StringRecord) -> Result<Self, ImportError> {
        let find = |needle: &str| {
            headers
                .iter()
                .position(|h| h.trim().to_lowercase().contains(needle))
        };

        // "id" also matches headers like "player id"; take the name column
        // as the first header mentioning name that is not the id column.
        let id = find("id").ok_or_else(|| ImportError::MissingColumn("id".to_string()))?;
        let name = headers
            .iter()
            .enumerate()
            .position(|(i, h)| i != id && h.trim().to_lowercase().contains("name"))
            .ok_or_else(|| ImportError::MissingColumn("name".to_string()))?;

        Ok(Self {
            id,
            name,
            faction: find("faction"),
            rating: find("rating"),
            location: find("location"),
        })
    }
}

fn field<'a>(record: &'a StringRecord, col: Option<usize>) -> &'a str {
    col.and_then(|c| record.get(c)).unwrap_or("").trim()
}

/// Parses a rating, returning None if empty or invalid
fn parse_rating(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

/// Reads roster rows from any CSV source with a header row.
///
/// Rows without an id or name are skipped. A repeated id replaces the
/// earlier row in place, so the roster stays unique by id and keeps its
/// original order.
pub fn parse_roster<R: Read>(source: R) -> Result<Vec<Player>, ImportError> {
    let mut reader = Reader::from_reader(source);
    let columns = RosterColumns::locate(reader.headers()?)?;

    let mut players: Vec<Player> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for result in reader.records() {
        let record = result?;

        let id = field(&record, Some(columns.id)).to_string();
        let name = field(&record, Some(columns.name)).to_string();

        // Skip if essential fields are missing
        if id.is_empty() || name.is_empty() {
            continue;
        }

        let faction = field(&record, columns.faction);
        let location = field(&record, columns.location);
        let player = Player {
            id: id.clone(),
            name,
            faction: (!faction.is_empty()).then(|| faction.to_string()),
            rating: parse_rating(field(&record, columns.rating)),
            location: (!location.is_empty()).then(|| location.to_string()),
        };

        match index_by_id.get(&id) {
            Some(&existing) => players[existing] = player,
            None => {
                index_by_id.insert(id, players.len());
                players.push(player);
            }
        }
    }

    if players.is_empty() {
        return Err(ImportError::Empty);
    }

    Ok(players)
}

/// Loads a roster CSV into a league snapshot for `event_id`.
pub fn load_roster<P: AsRef<Path>>(
    csv_path: P,
    event_id: &str,
    league_name: &str,
) -> Result<League, ImportError> {
    let path = csv_path.as_ref();
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let players = parse_roster(file)?;

    debug!(path = %path.display(), players = players.len(), "roster loaded");

    let mut league = League::new(event_id, league_name, players);
    league.url = path.display().to_string();
    Ok(league)
}
