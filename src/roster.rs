use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered league player. `id` is the only key used for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            faction: None,
            rating: None,
            location: None,
        }
    }

    pub fn with_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = Some(faction.into());
        self
    }

    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Name shown in listings and stored on matches, e.g. `Alice #17`.
    pub fn display_name(&self) -> String {
        format!("{} #{}", self.name, self.id)
    }
}

/// Roster snapshot for one event, as produced by the import collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub event_id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub players: Vec<Player>,
    pub last_updated: DateTime<Utc>,
}

impl League {
    pub fn new(event_id: impl Into<String>, name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            event_id: event_id.into(),
            name: name.into(),
            url: String::new(),
            players,
            last_updated: Utc::now(),
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Finds a player by name, ignoring case. Display lookups only.
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.trim().to_lowercase();
        self.players
            .iter()
            .find(|p| p.name.trim().to_lowercase() == wanted)
    }

    /// Resolves a player given either an id or a name.
    pub fn resolve(&self, key: &str) -> Option<&Player> {
        self.player(key.trim()).or_else(|| self.find_by_name(key))
    }

    /// Display name for an id, falling back to the raw id for players no
    /// longer on the roster.
    pub fn display_name_of(&self, id: &str) -> String {
        self.player(id)
            .map(Player::display_name)
            .unwrap_or_else(|| id.to_string())
    }
}

/// Builds the id -> player map used to join ids with display data.
pub fn player_lookup(players: &[Player]) -> HashMap<&str, &Player> {
    players.iter().map(|p| (p.id.as_str(), p)).collect()
}
