//! Match generation for a single pod.
//!
//! Standard pods play a full round-robin. Overflow pods are too large for
//! that, so each member gets `n - 2` games, picked by a two-phase greedy pass
//! over candidate pairs weighted by how often the pair has met before.

use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, warn};

use crate::history::MatchHistory;
use crate::roster::Player;
use super::types::{Match, Pod, ScheduleWarning};

/// Weight added per previous meeting. Dominates any jitter.
pub const HISTORY_PENALTY: u32 = 1000;

/// Jitter is drawn from `0..MAX_JITTER`.
pub const MAX_JITTER: u32 = 10;

/// A possible game inside an overflow pod, by member index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePair {
    pub first: usize,
    pub second: usize,
    pub weight: u32,
}

pub fn pair_weight(times_played: u32, jitter: u32) -> u32 {
    times_played * HISTORY_PENALTY + jitter
}

/// Games each member of an overflow pod of `size` should get.
pub fn overflow_game_target(size: usize) -> usize {
    size.saturating_sub(2).max(1)
}

/// Fills `pod.matches` and returns any players left short of their target.
pub fn schedule_pod<R: Rng + ?Sized>(
    pod: &mut Pod,
    lookup: &HashMap<&str, &Player>,
    history: &MatchHistory,
    rng: &mut R,
) -> Vec<ScheduleWarning> {
    if !pod.is_overflow {
        pod.matches = round_robin(&pod.player_ids, lookup);
        return Vec::new();
    }

    let target = overflow_game_target(pod.size());
    let candidates = weighted_candidates(&pod.player_ids, history, rng);
    let (accepted, games) = select_matches(&candidates, pod.size(), target);

    pod.matches = accepted
        .iter()
        .map(|c| make_match(&pod.player_ids[c.first], &pod.player_ids[c.second], lookup))
        .collect();

    let warnings: Vec<ScheduleWarning> = pod
        .player_ids
        .iter()
        .zip(&games)
        .filter(|(_, &count)| count < target)
        .map(|(id, &count)| ScheduleWarning {
            pod_id: pod.pod_id,
            player_id: id.clone(),
            games: count,
            target,
        })
        .collect();

    for warning in &warnings {
        warn!(
            pod_id = warning.pod_id,
            player_id = %warning.player_id,
            games = warning.games,
            target = warning.target,
            "overflow pod player short of target games"
        );
    }

    warnings
}

/// Every unordered pair of members once, in member order.
pub fn round_robin(player_ids: &[String], lookup: &HashMap<&str, &Player>) -> Vec<Match> {
    let n = player_ids.len();
    let mut matches = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            matches.push(make_match(&player_ids[i], &player_ids[j], lookup));
        }
    }
    matches
}

/// All member pairs, sorted ascending by weight. Ties keep enumeration order.
pub fn weighted_candidates<R: Rng + ?Sized>(
    player_ids: &[String],
    history: &MatchHistory,
    rng: &mut R,
) -> Vec<CandidatePair> {
    let n = player_ids.len();
    let mut candidates = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for first in 0..n {
        for second in (first + 1)..n {
            let times = history.times_played(&player_ids[first], &player_ids[second]);
            let jitter = rng.gen_range(0..MAX_JITTER);
            candidates.push(CandidatePair {
                first,
                second,
                weight: pair_weight(times, jitter),
            });
        }
    }
    candidates.sort_by_key(|c| c.weight);
    candidates
}

/// Runs the preference pass then, if anyone is still short, the repair pass.
/// Returns accepted pairs in acceptance order and per-member game counts.
pub fn select_matches(
    candidates: &[CandidatePair],
    member_count: usize,
    target: usize,
) -> (Vec<CandidatePair>, Vec<usize>) {
    let mut games = vec![0usize; member_count];
    let mut accepted = greedy_pass(candidates, &mut games, target);

    if games.iter().any(|&g| g < target) {
        debug!(target, "greedy pass left players short, running repair pass");
        repair_pass(candidates, &mut accepted, &mut games, target);
    }

    (accepted, games)
}

/// Accepts pairs in weight order while both sides still need games.
fn greedy_pass(candidates: &[CandidatePair], games: &mut [usize], target: usize) -> Vec<CandidatePair> {
    let mut accepted = Vec::new();
    for candidate in candidates {
        if games[candidate.first] < target && games[candidate.second] < target {
            games[candidate.first] += 1;
            games[candidate.second] += 1;
            accepted.push(*candidate);
        }
    }
    accepted
}

/// Accepts unused pairs with at least one side short, until nobody is short.
/// This can push the other side past its target.
fn repair_pass(
    candidates: &[CandidatePair],
    accepted: &mut Vec<CandidatePair>,
    games: &mut [usize],
    target: usize,
) {
    for candidate in candidates {
        if games[candidate.first] >= target && games[candidate.second] >= target {
            continue;
        }
        let already = accepted
            .iter()
            .any(|a| a.first == candidate.first && a.second == candidate.second);
        if already {
            continue;
        }
        games[candidate.first] += 1;
        games[candidate.second] += 1;
        accepted.push(*candidate);

        if games.iter().all(|&g| g >= target) {
            break;
        }
    }
}

fn make_match(a: &str, b: &str, lookup: &HashMap<&str, &Player>) -> Match {
    match (lookup.get(a), lookup.get(b)) {
        (Some(p1), Some(p2)) => Match::between(p1, p2),
        (p1, p2) => Match {
            player1_id: a.to_string(),
            player2_id: b.to_string(),
            player1_name: p1.map(|p| p.display_name()).unwrap_or_else(|| a.to_string()),
            player2_name: p2.map(|p| p.display_name()).unwrap_or_else(|| b.to_string()),
        },
    }
}
