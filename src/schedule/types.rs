use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roster::Player;

/// A single game between two players of the same pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub player1_id: String,
    pub player2_id: String,
    pub player1_name: String,
    pub player2_name: String,
}

impl Match {
    pub fn between(p1: &Player, p2: &Player) -> Self {
        Self {
            player1_id: p1.id.clone(),
            player2_id: p2.id.clone(),
            player1_name: p1.display_name(),
            player2_name: p2.display_name(),
        }
    }

    pub fn involves(&self, player_id: &str) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }

    /// Same unordered pair, regardless of which side each id is stored on
    pub fn is_pair(&self, a: &str, b: &str) -> bool {
        self.involves(a) && self.involves(b)
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.player1_name, self.player2_name)
    }
}

/// A group of players meeting each other in one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub pod_id: u32,
    pub is_overflow: bool,
    pub player_ids: Vec<String>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Pod {
    pub fn new(player_ids: Vec<String>, is_overflow: bool) -> Self {
        Self {
            pod_id: 0,
            is_overflow,
            player_ids,
            matches: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.player_ids.len()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }

    /// Games each member plays in this pod's match list
    pub fn games_for(&self, player_id: &str) -> usize {
        self.matches.iter().filter(|m| m.involves(player_id)).count()
    }
}

/// Emitted when an overflow pod could not give a member its full game count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWarning {
    pub pod_id: u32,
    pub player_id: String,
    pub games: usize,
    pub target: usize,
}

impl std::fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pod {}: player {} has {} of {} games",
            self.pod_id, self.player_id, self.games, self.target
        )
    }
}

/// Pods and matches generated for one period. This is the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    #[serde(default)]
    pub event_id: String,
    pub month: String,
    #[serde(rename = "podSize")]
    pub target_pod_size: usize,
    pub generated_at: DateTime<Utc>,
    pub pods: Vec<Pod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScheduleWarning>,
}

impl AssignmentResult {
    pub fn total_matches(&self) -> usize {
        self.pods.iter().map(|p| p.matches.len()).sum()
    }

    pub fn total_players(&self) -> usize {
        self.pods.iter().map(|p| p.size()).sum()
    }

    pub fn pod_of(&self, player_id: &str) -> Option<&Pod> {
        self.pods.iter().find(|p| p.contains(player_id))
    }

    /// player id -> games scheduled this period
    pub fn games_per_player(&self) -> HashMap<&str, usize> {
        let mut games: HashMap<&str, usize> = HashMap::new();
        for pod in &self.pods {
            for id in &pod.player_ids {
                games.entry(id.as_str()).or_insert(0);
            }
            for m in &pod.matches {
                *games.entry(m.player1_id.as_str()).or_insert(0) += 1;
                *games.entry(m.player2_id.as_str()).or_insert(0) += 1;
            }
        }
        games
    }
}
