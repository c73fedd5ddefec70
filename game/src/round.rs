use engine::{GameLogic, Transition};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::direction::Direction;
use crate::sequence::Sequence;
use crate::sfx::SoundCue;
use crate::view::Screen;

pub const POINTS_PER_CUE: u32 = 50;
pub const ROUND_CLEAR_BONUS: u32 = 100;

/// Points for clearing a round whose sequence had `len` cues.
pub fn round_points(len: usize) -> u32 {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    POINTS_PER_CUE
        .saturating_mul(len)
        .saturating_add(ROUND_CLEAR_BONUS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Playing,
    AwaitingInput,
    RoundComplete,
    GameOver,
}

/// Everything the round engine knows about a game in progress.
///
/// Values are passed into and returned from `RoundEngine` operations; nothing else mutates
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    current_round: u32,
    score: u32,
    sequence: Sequence,
    phase: Phase,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            current_round: 1,
            score: 0,
            sequence: Sequence::default(),
            phase: Phase::Idle,
        }
    }

    /// Rebuilds a state from its parts (replays, scripted scenarios).
    pub fn restore(current_round: u32, score: u32, sequence: Sequence, phase: Phase) -> Self {
        Self {
            current_round: current_round.max(1),
            score,
            sequence,
            phase,
        }
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundInput {
    StartGame,
    StartRound,
    SequenceDisplayed,
    Submit(Vec<Direction>),
}

/// Instructions for the collaborator hosting the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEffect {
    ShowScreen(Screen),
    StartMusic,
    PlaySound(SoundCue),
    UpdateHud { round: u32, score: u32 },
    /// Play back `sequence` and report `RoundInput::SequenceDisplayed` when done.
    DisplaySequence { round: u32, sequence: Sequence },
    AcceptInput,
    /// Report `RoundInput::StartRound` after the inter-round pause.
    RoundComplete { next_round: u32, points: u32 },
    ReportFinalState { score: u32, highest_round: u32 },
}

/// Owns sequence generation, round progression, scoring and input validation.
#[derive(Debug, Clone)]
pub struct RoundEngine<R = StdRng> {
    rng: R,
}

impl RoundEngine<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RoundEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Resets to round 1 with no points and immediately starts the first round.
    pub fn start_game(&mut self, _state: &RoundState) -> Transition<RoundState, RoundEffect> {
        info!("starting new game");
        let fresh = RoundState::new();
        let mut effects = vec![
            RoundEffect::ShowScreen(Screen::Game),
            RoundEffect::StartMusic,
            RoundEffect::UpdateHud {
                round: fresh.current_round,
                score: fresh.score,
            },
        ];
        let Transition {
            state,
            effects: round_effects,
        } = self.start_round(&fresh);
        effects.extend(round_effects);
        Transition::new(state, effects)
    }

    pub fn start_round(&mut self, state: &RoundState) -> Transition<RoundState, RoundEffect> {
        if !matches!(state.phase, Phase::Idle | Phase::RoundComplete) {
            debug!(phase = ?state.phase, "ignoring start_round");
            return Transition::unchanged(state.clone());
        }

        let sequence = Sequence::for_round(state.current_round, &mut self.rng);
        debug!(round = state.current_round, len = sequence.len(), "round started");
        let next = RoundState {
            sequence: sequence.clone(),
            phase: Phase::Playing,
            ..state.clone()
        };
        Transition::new(
            next,
            vec![
                RoundEffect::UpdateHud {
                    round: state.current_round,
                    score: state.score,
                },
                RoundEffect::PlaySound(SoundCue::RoundStart),
                RoundEffect::DisplaySequence {
                    round: state.current_round,
                    sequence,
                },
            ],
        )
    }

    pub fn on_sequence_displayed(&mut self, state: &RoundState) -> Transition<RoundState, RoundEffect> {
        if state.phase != Phase::Playing {
            debug!(phase = ?state.phase, "ignoring sequence-displayed");
            return Transition::unchanged(state.clone());
        }
        Transition::new(
            RoundState {
                phase: Phase::AwaitingInput,
                ..state.clone()
            },
            vec![RoundEffect::AcceptInput],
        )
    }

    pub fn submit_input(
        &mut self,
        state: &RoundState,
        input: &[Direction],
    ) -> Transition<RoundState, RoundEffect> {
        if state.phase != Phase::AwaitingInput {
            debug!(phase = ?state.phase, "ignoring submit");
            return Transition::unchanged(state.clone());
        }

        if !state.sequence.matches(input) {
            info!(
                round = state.current_round,
                score = state.score,
                expected = state.sequence.len(),
                got = input.len(),
                "game over"
            );
            return Transition::new(
                RoundState {
                    phase: Phase::GameOver,
                    ..state.clone()
                },
                vec![
                    RoundEffect::PlaySound(SoundCue::GameOver),
                    RoundEffect::ShowScreen(Screen::GameOver),
                    RoundEffect::ReportFinalState {
                        score: state.score,
                        highest_round: state.current_round,
                    },
                ],
            );
        }

        let points = round_points(state.sequence.len());
        let next = RoundState {
            current_round: state.current_round.saturating_add(1),
            score: state.score.saturating_add(points),
            phase: Phase::RoundComplete,
            sequence: state.sequence.clone(),
        };
        debug!(round = state.current_round, points, score = next.score, "round cleared");
        Transition::new(
            next.clone(),
            vec![
                RoundEffect::PlaySound(SoundCue::RoundWin),
                RoundEffect::UpdateHud {
                    round: next.current_round,
                    score: next.score,
                },
                RoundEffect::RoundComplete {
                    next_round: next.current_round,
                    points,
                },
            ],
        )
    }
}

impl<R: Rng> GameLogic for RoundEngine<R> {
    type State = RoundState;
    type Input = RoundInput;
    type Effect = RoundEffect;

    fn initial_state(&self) -> RoundState {
        RoundState::new()
    }

    fn step(&mut self, state: &RoundState, input: RoundInput) -> Transition<RoundState, RoundEffect> {
        match input {
            RoundInput::StartGame => self.start_game(state),
            RoundInput::StartRound => self.start_round(state),
            RoundInput::SequenceDisplayed => self.on_sequence_displayed(state),
            RoundInput::Submit(directions) => self.submit_input(state, &directions),
        }
    }
}
