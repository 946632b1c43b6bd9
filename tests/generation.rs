//! End-to-end properties of pod generation.

mod common;

use common::{assert_valid, history_with, ids, league};
use league_pods::schedule::matching::{weighted_candidates, HISTORY_PENALTY};
use league_pods::schedule::make_rng;
use league_pods::{generate_pods, GenerateOptions, MatchHistory, PodError};

fn seeded(seed: u64) -> GenerateOptions {
    GenerateOptions::default().with_seed(seed)
}

#[test]
fn fourteen_players_size_three_gives_two_standard_and_two_overflow() {
    let league = league(14);
    let result = generate_pods(&league, 3, &MatchHistory::default(), "February", &seeded(42)).unwrap();

    assert_eq!(result.pods.len(), 4);
    assert_eq!(result.total_players(), 14);

    let standard: Vec<_> = result.pods.iter().filter(|p| !p.is_overflow).collect();
    let overflow: Vec<_> = result.pods.iter().filter(|p| p.is_overflow).collect();
    assert_eq!(standard.len(), 2);
    assert_eq!(overflow.len(), 2);
    assert!(standard.iter().all(|p| p.size() == 3 && p.matches.len() == 3));
    assert!(overflow.iter().all(|p| p.size() == 4));

    let overflow_matches: usize = overflow.iter().map(|p| p.matches.len()).sum();
    assert_eq!(result.total_matches(), 2 * 3 + overflow_matches);
    assert_valid(&result, &league);
}

#[test]
fn two_players_make_one_standard_pod_with_one_match() {
    let league = league(2);
    let result = generate_pods(&league, 3, &MatchHistory::default(), "February", &seeded(1)).unwrap();

    assert_eq!(result.pods.len(), 1);
    assert_eq!(result.pods[0].size(), 2);
    assert!(!result.pods[0].is_overflow);
    assert_eq!(result.pods[0].matches.len(), 1);
    assert_valid(&result, &league);
}

#[test]
fn various_roster_and_pod_sizes_stay_valid() {
    for pod_size in 2..=6 {
        for count in [2, 3, 5, 7, 12, 13, 31, 50] {
            let league = league(count);
            let result =
                generate_pods(&league, pod_size, &MatchHistory::default(), "March", &seeded(count as u64))
                    .unwrap();
            assert_eq!(result.total_players(), count);
            assert_valid(&result, &league);
            for pod in &result.pods {
                assert!(pod.size() >= 2, "size {pod_size}, count {count}");
                assert_eq!(pod.is_overflow, pod.size() > pod_size);
            }
        }
    }
}

#[test]
fn same_seed_is_byte_identical() {
    let league = league(17);
    let history = history_with(&[("1", "2", "January"), ("3", "4", "January")]);
    let a = generate_pods(&league, 4, &history, "February", &seeded(7)).unwrap();
    let b = generate_pods(&league, 4, &history, "February", &seeded(7)).unwrap();

    assert_eq!(a.pods, b.pods);
    assert_eq!(
        serde_json::to_string(&a.pods).unwrap(),
        serde_json::to_string(&b.pods).unwrap()
    );
}

#[test]
fn different_seeds_change_pods() {
    let league = league(20);
    let a = generate_pods(&league, 3, &MatchHistory::default(), "February", &seeded(1)).unwrap();
    let different = (2..10).any(|seed| {
        let b = generate_pods(&league, 3, &MatchHistory::default(), "February", &seeded(seed)).unwrap();
        a.pods
            .iter()
            .zip(&b.pods)
            .any(|(x, y)| x.player_ids != y.player_ids)
    });
    assert!(different, "different seeds should produce different pods");
}

#[test]
fn fixed_pods_lead_with_exact_membership() {
    let league = league(10);
    let options = seeded(3).with_fixed_pods(vec![ids(&["1", "2", "3", "4"]), ids(&["9", "10"])]);
    let result = generate_pods(&league, 3, &MatchHistory::default(), "February", &options).unwrap();

    assert_eq!(result.pods[0].player_ids, ids(&["1", "2", "3", "4"]));
    assert_eq!(result.pods[0].pod_id, 1);
    assert!(result.pods[0].is_overflow);
    assert_eq!(result.pods[1].player_ids, ids(&["9", "10"]));
    assert!(!result.pods[1].is_overflow);
    assert_eq!(result.pods[1].matches.len(), 1);
    assert_valid(&result, &league);
}

#[test]
fn fixed_pod_of_four_at_size_three_is_independent_of_the_rest() {
    let league = league(10);
    for seed in 0..5 {
        let options = seeded(seed).with_fixed_pods(vec![ids(&["1", "2", "3", "4"])]);
        let result = generate_pods(&league, 3, &MatchHistory::default(), "February", &options).unwrap();
        assert_eq!(result.pods[0].size(), 4);
        assert!(result.pods[0].is_overflow);
        assert_eq!(result.pods.len(), 3);
        assert_valid(&result, &league);
    }
}

#[test]
fn fixed_pod_validation_errors() {
    let league = league(6);
    let history = MatchHistory::default();

    let options = seeded(1).with_fixed_pods(vec![ids(&["1", "999"])]);
    let err = generate_pods(&league, 3, &history, "February", &options).unwrap_err();
    assert_eq!(err, PodError::UnknownPlayer("999".into()));
    assert!(err.to_string().contains("not found"));

    let options = seeded(1).with_fixed_pods(vec![ids(&["1", "2", "3"]), ids(&["3", "4", "5"])]);
    let err = generate_pods(&league, 3, &history, "February", &options).unwrap_err();
    assert_eq!(err, PodError::DuplicateAssignment("3".into()));

    let options = seeded(1).with_fixed_pods(vec![ids(&["1"])]);
    let err = generate_pods(&league, 3, &history, "February", &options).unwrap_err();
    assert!(matches!(err, PodError::FixedPodTooSmall { .. }));
}

#[test]
fn history_penalty_ranks_repeat_pair_last() {
    let history = history_with(&[("A", "B", "January"), ("B", "A", "February")]);
    let members = ids(&["A", "B", "C", "D", "E"]);
    let mut rng = make_rng(Some(99));

    let candidates = weighted_candidates(&members, &history, &mut rng);
    let repeat = candidates
        .iter()
        .find(|c| members[c.first] == "A" && members[c.second] == "B")
        .unwrap();

    assert!(repeat.weight >= 2 * HISTORY_PENALTY);
    for fresh in candidates.iter().filter(|c| c != &repeat) {
        assert!(fresh.weight < repeat.weight);
    }
}

#[test]
fn multiple_months_track_history() {
    let league = league(6);
    let mut history = MatchHistory::new("test-event");

    let feb = generate_pods(&league, 3, &history, "February", &seeded(100)).unwrap();
    for m in feb.pods.iter().flat_map(|p| &p.matches) {
        history.add_pairing(m.player1_id.clone(), m.player2_id.clone(), "February");
    }
    let march = generate_pods(&league, 3, &history, "March", &seeded(200)).unwrap();

    assert_valid(&feb, &league);
    assert_valid(&march, &league);
    assert_eq!(history.pairings.len(), feb.total_matches());
    // Generation only reads the ledger.
    assert!(history.pairings.iter().all(|p| p.month == "February"));
}

#[test]
fn huge_pod_size_yields_one_standard_pod() {
    let league = league(5);
    let result = generate_pods(&league, usize::MAX, &MatchHistory::default(), "February", &seeded(1)).unwrap();
    assert_eq!(result.pods.len(), 1);
    assert!(!result.pods[0].is_overflow);
    assert_eq!(result.total_matches(), 10);
    assert_valid(&result, &league);
}

#[test]
fn unseeded_generation_is_still_valid() {
    let league = league(11);
    let result = generate_pods(&league, 3, &MatchHistory::default(), "April", &GenerateOptions::default()).unwrap();
    assert_valid(&result, &league);
}
