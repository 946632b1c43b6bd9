use serde::{Deserialize, Serialize};

/// One recorded meeting between two players in a given period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPairing {
    pub player1_id: String,
    pub player2_id: String,
    pub month: String,
}

impl HistoricalPairing {
    pub fn involves(&self, player_id: &str) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }

    /// True when this pairing is between `a` and `b`, in either order.
    pub fn is_pairing(&self, a: &str, b: &str) -> bool {
        (self.player1_id == a && self.player2_id == b)
            || (self.player1_id == b && self.player2_id == a)
    }

    fn opponent_of(&self, player_id: &str) -> &str {
        if self.player1_id == player_id {
            &self.player2_id
        } else {
            &self.player1_id
        }
    }
}

/// Append-only ledger of who has played whom, scoped to one event.
///
/// All pair queries are symmetric. `add_pairing` appends unconditionally;
/// callers merging a period back in use [`MatchHistory::contains`] to skip
/// triples already recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistory {
    pub event_id: String,
    #[serde(default)]
    pub pairings: Vec<HistoricalPairing>,
}

impl MatchHistory {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            pairings: Vec::new(),
        }
    }

    pub fn have_played(&self, a: &str, b: &str) -> bool {
        self.pairings.iter().any(|p| p.is_pairing(a, b))
    }

    pub fn times_played(&self, a: &str, b: &str) -> u32 {
        self.pairings.iter().filter(|p| p.is_pairing(a, b)).count() as u32
    }

    /// Distinct opponents of `player_id`, in the order first recorded.
    pub fn previous_opponents(&self, player_id: &str) -> Vec<String> {
        let mut opponents: Vec<String> = Vec::new();
        for pairing in self.pairings.iter().filter(|p| p.involves(player_id)) {
            let opponent = pairing.opponent_of(player_id);
            if !opponents.iter().any(|o| o == opponent) {
                opponents.push(opponent.to_string());
            }
        }
        opponents
    }

    /// Whether the exact `(a, b, month)` triple is already on the ledger.
    pub fn contains(&self, a: &str, b: &str, month: &str) -> bool {
        self.pairings
            .iter()
            .any(|p| p.month == month && p.is_pairing(a, b))
    }

    pub fn add_pairing(&mut self, a: impl Into<String>, b: impl Into<String>, month: impl Into<String>) {
        self.pairings.push(HistoricalPairing {
            player1_id: a.into(),
            player2_id: b.into(),
            month: month.into(),
        });
    }

    /// Distinct period labels, in the order first recorded.
    pub fn periods(&self) -> Vec<&str> {
        let mut periods: Vec<&str> = Vec::new();
        for pairing in &self.pairings {
            if !periods.contains(&pairing.month.as_str()) {
                periods.push(&pairing.month);
            }
        }
        periods
    }

    /// Whether any pairing is recorded under `month`, ignoring case.
    pub fn has_period(&self, month: &str) -> bool {
        self.pairings.iter().any(|p| p.month.eq_ignore_ascii_case(month))
    }

    pub fn pairings_in<'a>(&'a self, month: &'a str) -> impl Iterator<Item = &'a HistoricalPairing> + 'a {
        self.pairings.iter().filter(move |p| p.month == month)
    }
}
