use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::{PodError, PodResult};
use crate::history::MatchHistory;
use crate::roster::{player_lookup, League};
use super::matching::schedule_pod;
use super::partition::partition_players;
use super::types::AssignmentResult;

/// Inputs for one period's generation beyond the roster and history.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Player-id groups pinned together, emitted first and in this order.
    pub fixed_pods: Vec<Vec<String>>,
    /// Same seed, same pods and matches. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl GenerateOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fixed_pods(mut self, fixed_pods: Vec<Vec<String>>) -> Self {
        self.fixed_pods = fixed_pods;
        self
    }
}

/// The random source threaded through shuffle and jitter.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds the pods and matches for `month`.
///
/// Validation happens before anything is built, so an error never leaves a
/// partial result behind. The history is only read; folding the new matches
/// back into the ledger is up to the caller.
pub fn generate_pods(
    league: &League,
    pod_size: usize,
    history: &MatchHistory,
    month: &str,
    options: &GenerateOptions,
) -> PodResult<AssignmentResult> {
    if pod_size < 2 {
        return Err(PodError::InvalidPodSize(pod_size));
    }
    if league.players.len() < 2 {
        return Err(PodError::InsufficientPlayers(league.players.len()));
    }

    let mut rng = make_rng(options.seed);
    let lookup = player_lookup(&league.players);

    let mut pods = partition_players(&league.players, pod_size, &options.fixed_pods, &mut rng)?;

    let mut warnings = Vec::new();
    for pod in pods.iter_mut() {
        warnings.extend(schedule_pod(pod, &lookup, history, &mut rng));
    }

    let result = AssignmentResult {
        event_id: league.event_id.clone(),
        month: month.to_string(),
        target_pod_size: pod_size,
        generated_at: Utc::now(),
        pods,
        warnings,
    };

    info!(
        event_id = %league.event_id,
        %month,
        pods = result.pods.len(),
        matches = result.total_matches(),
        players = result.total_players(),
        "pods generated"
    );

    Ok(result)
}
