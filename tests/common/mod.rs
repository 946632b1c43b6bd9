#![allow(dead_code)]

use std::collections::HashSet;

use league_pods::{AssignmentResult, League, MatchHistory, Player};

pub fn league(count: usize) -> League {
    League::new(
        "test-event",
        "Test League",
        (1..=count)
            .map(|i| {
                let faction = if i % 2 == 0 { "Rebels" } else { "Empire" };
                Player::new(i.to_string(), format!("Player{i}")).with_faction(faction)
            })
            .collect(),
    )
}

pub fn history_with(pairings: &[(&str, &str, &str)]) -> MatchHistory {
    let mut history = MatchHistory::new("test-event");
    for (a, b, month) in pairings {
        history.add_pairing(*a, *b, *month);
    }
    history
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Every roster player in exactly one pod and nobody else.
pub fn assert_all_players_in_exactly_one_pod(result: &AssignmentResult, league: &League) {
    let roster: HashSet<&str> = league.players.iter().map(|p| p.id.as_str()).collect();
    let mut assigned: HashSet<&str> = HashSet::new();
    for pod in &result.pods {
        for id in &pod.player_ids {
            assert!(assigned.insert(id), "player {id} appears in multiple pods");
        }
    }
    assert_eq!(assigned, roster);
}

pub fn assert_no_self_or_duplicate_matches(result: &AssignmentResult) {
    for pod in &result.pods {
        let mut seen = HashSet::new();
        for m in &pod.matches {
            assert_ne!(m.player1_id, m.player2_id, "self-match in pod {}", pod.pod_id);
            assert!(pod.contains(&m.player1_id) && pod.contains(&m.player2_id));
            let key = if m.player1_id < m.player2_id {
                (m.player1_id.as_str(), m.player2_id.as_str())
            } else {
                (m.player2_id.as_str(), m.player1_id.as_str())
            };
            assert!(seen.insert(key), "duplicate match in pod {}: {m}", pod.pod_id);
        }
    }
}

pub fn assert_standard_pods_round_robin(result: &AssignmentResult) {
    for pod in result.pods.iter().filter(|p| !p.is_overflow) {
        let n = pod.size();
        assert_eq!(pod.matches.len(), n * (n - 1) / 2, "pod {}", pod.pod_id);
    }
}

pub fn assert_everyone_plays(result: &AssignmentResult) {
    let games = result.games_per_player();
    assert_eq!(games.len(), result.total_players());
    for pod in &result.pods {
        for id in &pod.player_ids {
            assert_eq!(games[id.as_str()], pod.games_for(id));
            assert!(games[id.as_str()] > 0, "player {id} in pod {} has no matches", pod.pod_id);
        }
    }
}

pub fn assert_valid(result: &AssignmentResult, league: &League) {
    assert_all_players_in_exactly_one_pod(result, league);
    assert_no_self_or_duplicate_matches(result);
    assert_standard_pods_round_robin(result);
    assert_everyone_plays(result);
}
