use engine::{GameLogic, HeadlessRunner};

use game::direction::Direction::{self, Down, Left, Right, Up};
use game::round::{Phase, RoundEffect, RoundEngine, RoundInput, RoundState, round_points};
use game::sequence::{Sequence, sequence_length};
use game::sfx::SoundCue;
use game::view::Screen;

fn runner(seed: u64) -> HeadlessRunner<RoundEngine> {
    HeadlessRunner::new(RoundEngine::seeded(seed)).with_journal()
}

/// Plays the current round perfectly and starts the next one.
fn clear_round(runner: &mut HeadlessRunner<RoundEngine>) {
    runner.step(RoundInput::SequenceDisplayed);
    let answer = runner.state().sequence().to_vec();
    runner.step(RoundInput::Submit(answer));
    assert_eq!(runner.state().phase(), Phase::RoundComplete);
    runner.step(RoundInput::StartRound);
}

#[test]
fn first_round_submit_scores_250_and_moves_to_round_two() {
    let mut engine = RoundEngine::seeded(11);
    let state = RoundState::restore(1, 0, Sequence::from(vec![Up, Down, Left]), Phase::AwaitingInput);

    let t = engine.step(&state, RoundInput::Submit(vec![Up, Down, Left]));
    assert_eq!(t.state.score(), 250);
    assert_eq!(t.state.current_round(), 2);
    assert_eq!(t.state.phase(), Phase::RoundComplete);
}

#[test]
fn three_of_four_in_round_two_ends_the_game_at_round_two() {
    let mut r = runner(12);
    r.step(RoundInput::StartGame);
    clear_round(&mut r);
    assert_eq!(r.state().current_round(), 2);
    assert_eq!(r.state().sequence().len(), 4);

    r.step(RoundInput::SequenceDisplayed);
    let partial: Vec<Direction> = r.state().sequence()[..3].to_vec();
    let effects = r.step(RoundInput::Submit(partial));

    assert_eq!(r.state().phase(), Phase::GameOver);
    assert_eq!(r.state().score(), 250);
    assert!(effects.contains(&RoundEffect::ReportFinalState {
        score: 250,
        highest_round: 2,
    }));
    assert!(effects.contains(&RoundEffect::PlaySound(SoundCue::GameOver)));
    assert!(effects.contains(&RoundEffect::ShowScreen(Screen::GameOver)));
}

#[test]
fn ten_perfect_rounds_follow_the_length_curve_and_score_formula() {
    let mut r = runner(13);
    r.step(RoundInput::StartGame);

    let mut expected_score = 0;
    for round in 1..=10 {
        assert_eq!(r.state().current_round(), round);
        let len = r.state().sequence().len();
        assert_eq!(len, sequence_length(round));
        expected_score += round_points(len);
        clear_round(&mut r);
        assert_eq!(r.state().score(), expected_score);
    }

    let lengths: Vec<usize> = r
        .journal()
        .iter()
        .filter_map(|(_, e)| match e {
            RoundEffect::DisplaySequence { sequence, .. } => Some(sequence.len()),
            _ => None,
        })
        .collect();
    assert_eq!(lengths, vec![3, 4, 5, 6, 7, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn round_six_resets_to_three_cues() {
    let mut r = runner(14);
    r.step(RoundInput::StartGame);
    for _ in 0..5 {
        clear_round(&mut r);
    }
    assert_eq!(r.state().current_round(), 6);
    assert_eq!(r.state().sequence().len(), 3);
}

#[test]
fn game_over_is_terminal_until_a_new_game() {
    let mut r = runner(15);
    r.step(RoundInput::StartGame);
    r.step(RoundInput::SequenceDisplayed);
    let mut wrong = r.state().sequence().to_vec();
    wrong[0] = match wrong[0] {
        Up => Down,
        Down => Up,
        Left => Right,
        Right => Left,
    };
    r.step(RoundInput::Submit(wrong));
    let over = r.state().clone();
    assert!(over.is_game_over());

    for input in [
        RoundInput::StartRound,
        RoundInput::SequenceDisplayed,
        RoundInput::Submit(over.sequence().to_vec()),
    ] {
        assert!(r.step(input).is_empty());
        assert_eq!(r.state(), &over);
    }

    r.step(RoundInput::StartGame);
    assert_eq!(r.state().current_round(), 1);
    assert_eq!(r.state().score(), 0);
    assert_eq!(r.state().phase(), Phase::Playing);
}

#[test]
fn submitting_twice_only_scores_once() {
    let mut r = runner(16);
    r.step(RoundInput::StartGame);
    r.step(RoundInput::SequenceDisplayed);
    let answer = r.state().sequence().to_vec();
    r.step(RoundInput::Submit(answer.clone()));
    let effects = r.step(RoundInput::Submit(answer));
    assert!(effects.is_empty());
    assert_eq!(r.state().score(), 250);
    assert_eq!(r.state().current_round(), 2);
}

#[test]
fn same_seed_replays_the_same_game() {
    let play = |seed| {
        let mut r = runner(seed);
        r.step(RoundInput::StartGame);
        for _ in 0..4 {
            clear_round(&mut r);
        }
        r.journal().to_vec()
    };
    assert_eq!(play(99), play(99));
}
