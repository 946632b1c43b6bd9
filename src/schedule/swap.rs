use tracing::info;

use crate::error::{PodError, PodResult};
use crate::history::MatchHistory;
use crate::roster::{player_lookup, League};
use super::generate::make_rng;
use super::matching::schedule_pod;
use super::types::AssignmentResult;

fn pod_index(result: &AssignmentResult, player_id: &str) -> PodResult<usize> {
    result
        .pods
        .iter()
        .position(|p| p.contains(player_id))
        .ok_or_else(|| PodError::PlayerNotFound(player_id.to_string()))
}

/// Exchanges two players between their pods and reschedules just those pods.
///
/// Each player takes the other's position in the member list. Overflow flags
/// are recomputed against the result's target size. The input is left as is;
/// a new result with the two pods replaced is returned.
pub fn swap_players(
    result: &AssignmentResult,
    league: &League,
    history: &MatchHistory,
    player1: &str,
    player2: &str,
    seed: Option<u64>,
) -> PodResult<AssignmentResult> {
    let first = pod_index(result, player1)?;
    let second = pod_index(result, player2)?;

    if first == second {
        return Err(PodError::SamePod {
            pod_id: result.pods[first].pod_id,
            player1: player1.to_string(),
            player2: player2.to_string(),
        });
    }

    let mut swapped = result.clone();
    for (index, from, to) in [(first, player1, player2), (second, player2, player1)] {
        let pod = &mut swapped.pods[index];
        if let Some(slot) = pod.player_ids.iter_mut().find(|id| id.as_str() == from) {
            *slot = to.to_string();
        }
        pod.is_overflow = pod.size() > result.target_pod_size;
    }

    let affected = [swapped.pods[first].pod_id, swapped.pods[second].pod_id];
    swapped.warnings.retain(|w| !affected.contains(&w.pod_id));

    let lookup = player_lookup(&league.players);
    let mut rng = make_rng(seed);
    for index in [first, second] {
        let warnings = schedule_pod(&mut swapped.pods[index], &lookup, history, &mut rng);
        swapped.warnings.extend(warnings);
    }

    info!(
        %player1,
        %player2,
        from_pod = affected[0],
        to_pod = affected[1],
        "players swapped, affected pods rescheduled"
    );

    Ok(swapped)
}
