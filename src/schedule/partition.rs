use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{PodError, PodResult};
use crate::roster::Player;
use super::types::Pod;

/// Checks caller-pinned pods against the roster before anything is built.
///
/// Every id must be on the roster, every pod needs at least two distinct
/// members, and no id may be pinned into two pods.
pub fn validate_fixed_pods(players: &[Player], fixed_pods: &[Vec<String>]) -> PodResult<()> {
    let roster_ids: HashSet<&str> = players.iter().map(|p| p.id.as_str()).collect();
    let mut pinned: HashSet<&str> = HashSet::new();

    for (index, group) in fixed_pods.iter().enumerate() {
        let mut members: HashSet<&str> = HashSet::new();
        for id in group {
            if !roster_ids.contains(id.as_str()) {
                return Err(PodError::UnknownPlayer(id.clone()));
            }
            if pinned.contains(id.as_str()) {
                return Err(PodError::DuplicateAssignment(id.clone()));
            }
            members.insert(id);
        }
        if members.len() < 2 {
            return Err(PodError::FixedPodTooSmall {
                index: index + 1,
                size: members.len(),
            });
        }
        pinned.extend(members);
    }

    Ok(())
}

/// Splits the roster into pods close to `target_size`.
///
/// Fixed pods come first, verbatim and in the order given. The remaining
/// players are shuffled with `rng` and spread so that pods hold either
/// `target_size` or `target_size + 1` players. Pod ids run 1..N over the
/// whole list. Matches are left empty.
pub fn partition_players<R: Rng + ?Sized>(
    players: &[Player],
    target_size: usize,
    fixed_pods: &[Vec<String>],
    rng: &mut R,
) -> PodResult<Vec<Pod>> {
    validate_fixed_pods(players, fixed_pods)?;

    let mut pods: Vec<Pod> = Vec::new();
    let mut pinned: HashSet<&str> = HashSet::new();

    for group in fixed_pods {
        let mut members: Vec<String> = Vec::with_capacity(group.len());
        for id in group {
            if pinned.insert(id.as_str()) {
                members.push(id.clone());
            }
        }
        let is_overflow = members.len() > target_size;
        pods.push(Pod::new(members, is_overflow));
    }

    let mut remaining: Vec<String> = players
        .iter()
        .filter(|p| !pinned.contains(p.id.as_str()))
        .map(|p| p.id.clone())
        .collect();

    if !remaining.is_empty() {
        remaining.shuffle(rng);
        pods.extend(distribute_into_pods(remaining, target_size));
    }

    for (index, pod) in pods.iter_mut().enumerate() {
        pod.pod_id = index as u32 + 1;
    }

    debug!(
        pods = pods.len(),
        fixed = fixed_pods.len(),
        overflow = pods.iter().filter(|p| p.is_overflow).count(),
        "players partitioned"
    );

    Ok(pods)
}

/// Fills pods in list order: standard pods first, then overflow pods.
///
/// 14 players at size 3 gives two pods of 3 and two overflow pods of 4.
fn distribute_into_pods(players: Vec<String>, target_size: usize) -> Vec<Pod> {
    let count = players.len();
    let overflow_size = target_size.saturating_add(1);

    if count <= overflow_size {
        return vec![Pod::new(players, count > target_size)];
    }

    let full_pods = count / target_size;
    let remainder = count % target_size;

    let (standard_count, overflow_count) = if remainder > full_pods {
        (0, full_pods)
    } else {
        (full_pods - remainder, remainder)
    };

    let mut pods = Vec::with_capacity(standard_count + overflow_count);
    let mut players = players.into_iter().peekable();

    for _ in 0..standard_count {
        let members: Vec<String> = players.by_ref().take(target_size).collect();
        pods.push(Pod::new(members, false));
    }
    for _ in 0..overflow_count {
        let members: Vec<String> = players.by_ref().take(overflow_size).collect();
        pods.push(Pod::new(members, true));
    }

    // Only reachable when the remainder outnumbers the full pods.
    if players.peek().is_some() {
        if let Some(last) = pods.last_mut() {
            last.player_ids.extend(players);
            last.is_overflow = true;
        }
    }

    pods
}
