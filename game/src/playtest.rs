use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::direction::Direction;
use crate::round::{Phase, RoundEngine};
use crate::session::{Frontend, Session, Status};
use crate::settings::TimingSettings;
use crate::sfx::SoundCue;
use crate::view::Screen;

/// One collaborator call, as seen by a `RecordingFrontend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontendEvent {
    ShowScreen(Screen),
    DisplayCue { direction: Direction, round: u32 },
    ClearCue,
    PlaySound(SoundCue),
    StartMusic,
    ShowStatus(Option<Status>),
    UpdateHud { round: u32, score: u32 },
    SetInput { entered: Vec<Direction>, accepting: bool },
    ReportFinalState { score: u32, highest_round: u32 },
}

/// Frontend that only records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingFrontend {
    events: Vec<FrontendEvent>,
}

impl RecordingFrontend {
    pub fn events(&self) -> &[FrontendEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<FrontendEvent> {
        std::mem::take(&mut self.events)
    }

    /// Directions shown via `display_cue`, in order.
    pub fn cues(&self) -> Vec<Direction> {
        self.events
            .iter()
            .filter_map(|e| match e {
                FrontendEvent::DisplayCue { direction, .. } => Some(*direction),
                _ => None,
            })
            .collect()
    }

    pub fn final_state(&self) -> Option<(u32, u32)> {
        self.events.iter().rev().find_map(|e| match e {
            FrontendEvent::ReportFinalState {
                score,
                highest_round,
            } => Some((*score, *highest_round)),
            _ => None,
        })
    }
}

impl Frontend for RecordingFrontend {
    fn show_screen(&mut self, screen: Screen) {
        self.events.push(FrontendEvent::ShowScreen(screen));
    }

    fn display_cue(&mut self, direction: Direction, round: u32) {
        self.events.push(FrontendEvent::DisplayCue { direction, round });
    }

    fn clear_cue(&mut self) {
        self.events.push(FrontendEvent::ClearCue);
    }

    fn play_sound(&mut self, sound: SoundCue) {
        self.events.push(FrontendEvent::PlaySound(sound));
    }

    fn start_music(&mut self) {
        self.events.push(FrontendEvent::StartMusic);
    }

    fn show_status(&mut self, status: Option<Status>) {
        self.events.push(FrontendEvent::ShowStatus(status));
    }

    fn update_hud(&mut self, round: u32, score: u32) {
        self.events.push(FrontendEvent::UpdateHud { round, score });
    }

    fn set_input(&mut self, entered: &[Direction], accepting: bool) {
        self.events.push(FrontendEvent::SetInput {
            entered: entered.to_vec(),
            accepting,
        });
    }

    fn report_final_state(&mut self, score: u32, highest_round: u32) {
        self.events.push(FrontendEvent::ReportFinalState {
            score,
            highest_round,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mistake {
    /// Types the full length but flips the last direction.
    Wrong,
    /// Submits one direction short.
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentPlan {
    /// Stop (abandon the game) after clearing this many rounds.
    pub max_rounds: u32,
    /// Make `Mistake` on this round number.
    pub miss: Option<(u32, Mistake)>,
}

impl Default for AgentPlan {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            miss: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytestReport {
    pub seed: u64,
    pub rounds_cleared: u32,
    pub score: u32,
    pub highest_round: u32,
    pub game_over: bool,
    pub sequence_lengths: Vec<usize>,
    pub simulated_ms: u64,
}

const AGENT_TICK: Duration = Duration::from_millis(50);
const SIMULATION_LIMIT: Duration = Duration::from_secs(60 * 60);

/// Plays one game through a `Session` on a virtual clock, reading cues the way a player would.
pub fn run_playtest(seed: u64, timing: TimingSettings, plan: AgentPlan) -> PlaytestReport {
    let mut session = Session::new(RoundEngine::seeded(seed), timing, RecordingFrontend::default());
    session.start_requested();

    let mut sequence_lengths = Vec::new();
    let mut rounds_cleared = 0;

    while session.now() < SIMULATION_LIMIT {
        if session.state().phase() == Phase::GameOver {
            break;
        }
        if !session.is_accepting_input() {
            session.advance(AGENT_TICK);
            continue;
        }

        let round = session.state().current_round();
        let observed = session.frontend_mut().take_events();
        let cues: Vec<Direction> = observed
            .iter()
            .filter_map(|e| match e {
                FrontendEvent::DisplayCue { direction, .. } => Some(*direction),
                _ => None,
            })
            .collect();
        sequence_lengths.push(cues.len());
        debug!(round, cues = cues.len(), "agent answering");

        match plan.miss {
            Some((miss_round, mistake)) if miss_round == round => {
                answer_with_mistake(&mut session, &cues, mistake);
            }
            _ => {
                for d in &cues {
                    session.direction_pressed(*d);
                }
            }
        }

        if session.state().phase() == Phase::RoundComplete {
            rounds_cleared += 1;
            if rounds_cleared >= plan.max_rounds {
                break;
            }
        }
    }

    let state = session.state();
    let report = PlaytestReport {
        seed,
        rounds_cleared,
        score: state.score(),
        highest_round: state.current_round(),
        game_over: state.is_game_over(),
        sequence_lengths,
        simulated_ms: session.now().as_millis() as u64,
    };
    info!(?report, "playtest finished");
    report
}

fn answer_with_mistake<F: Frontend>(session: &mut Session<F>, cues: &[Direction], mistake: Mistake) {
    match mistake {
        Mistake::Wrong => {
            let Some((last, head)) = cues.split_last() else {
                session.submit_requested();
                return;
            };
            for d in head {
                session.direction_pressed(*d);
            }
            session.direction_pressed(flip(*last));
        }
        Mistake::Short => {
            for d in cues.iter().take(cues.len().saturating_sub(1)) {
                session.direction_pressed(*d);
            }
            session.submit_requested();
        }
    }
}

fn flip(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
    }
}
