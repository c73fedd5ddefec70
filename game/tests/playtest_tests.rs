use game::playtest::{AgentPlan, Mistake, run_playtest};
use game::settings::TimingSettings;

#[test]
fn wrong_answer_in_round_three_ends_the_game() {
    let report = run_playtest(
        21,
        TimingSettings::default(),
        AgentPlan {
            max_rounds: 10,
            miss: Some((3, Mistake::Wrong)),
        },
    );
    assert!(report.game_over);
    assert_eq!(report.rounds_cleared, 2);
    assert_eq!(report.score, 250 + 300);
    assert_eq!(report.highest_round, 3);
    assert_eq!(report.sequence_lengths, vec![3, 4, 5]);
}

#[test]
fn short_answer_in_round_one_scores_nothing() {
    let report = run_playtest(
        22,
        TimingSettings::default(),
        AgentPlan {
            max_rounds: 10,
            miss: Some((1, Mistake::Short)),
        },
    );
    assert!(report.game_over);
    assert_eq!(report.score, 0);
    assert_eq!(report.highest_round, 1);
}

#[test]
fn default_pacing_for_first_round() {
    let report = run_playtest(
        23,
        TimingSettings::default(),
        AgentPlan {
            max_rounds: 1,
            miss: None,
        },
    );
    assert_eq!(report.rounds_cleared, 1);
    // Input opens at 2000 + (3 + 1) * 1000 ms; the agent answers on that tick.
    assert_eq!(report.simulated_ms, 6_000);
}

#[test]
fn perfect_run_through_the_length_reset() {
    let report = run_playtest(24, TimingSettings::default(), AgentPlan::default());
    assert!(!report.game_over);
    assert_eq!(report.rounds_cleared, 10);
    assert_eq!(report.sequence_lengths, vec![3, 4, 5, 6, 7, 3, 4, 5, 6, 7]);
    let expected: u32 = report
        .sequence_lengths
        .iter()
        .map(|&len| 50 * len as u32 + 100)
        .sum();
    assert_eq!(report.score, expected);
}

#[test]
fn runs_are_reproducible_per_seed() {
    let plan = AgentPlan {
        max_rounds: 6,
        miss: Some((6, Mistake::Wrong)),
    };
    let a = run_playtest(25, TimingSettings::default(), plan);
    let b = run_playtest(25, TimingSettings::default(), plan);
    assert_eq!(a, b);
    let json = serde_json::to_string(&a).expect("report serializes");
    assert!(json.contains("\"highest_round\":6"));
}
