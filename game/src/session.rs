use std::time::Duration;

use engine::HeadlessRunner;
use engine::scheduler::Scheduler;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::direction::Direction;
use crate::input::{PlayerInput, PushOutcome};
use crate::round::{RoundEffect, RoundEngine, RoundInput, RoundState};
use crate::sequence::Sequence;
use crate::settings::TimingSettings;
use crate::sfx::SoundCue;
use crate::view::{Screen, ScreenEffect, ScreenEvent};

/// Status line shown in the cue area between cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    RoundStarting,
    YourTurn,
    RoundComplete,
}

impl Status {
    pub fn text(self) -> &'static str {
        match self {
            Status::RoundStarting => "Get ready...",
            Status::YourTurn => "Your turn!",
            Status::RoundComplete => "Round Complete!",
        }
    }
}

/// Everything the game needs from whatever presents it (a window, a test double, an agent).
pub trait Frontend {
    fn show_screen(&mut self, screen: Screen);
    fn display_cue(&mut self, direction: Direction, round: u32);
    fn clear_cue(&mut self);
    fn play_sound(&mut self, sound: SoundCue);
    fn start_music(&mut self);
    fn show_status(&mut self, status: Option<Status>);
    fn update_hud(&mut self, round: u32, score: u32);
    /// Input echo; `accepting` tells whether direction keys are currently listened to.
    fn set_input(&mut self, entered: &[Direction], accepting: bool);
    fn report_final_state(&mut self, score: u32, highest_round: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    BeginPlayback,
    ShowCue(usize),
    PlaybackFinished,
    NextRound,
}

/// Hosts a `RoundEngine`: turns its effects into frontend calls and timed playback, and turns
/// player triggers into engine inputs.
///
/// Time only moves through `advance`, so hosts decide what a millisecond is (frame deltas in
/// the window, arbitrary jumps in tests).
pub struct Session<F, R = StdRng>
where
    R: Rng,
{
    runner: HeadlessRunner<RoundEngine<R>>,
    frontend: F,
    screen: Screen,
    scheduler: Scheduler<SessionTimer>,
    timing: TimingSettings,
    playback: Option<Sequence>,
    input: Option<PlayerInput>,
}

impl<F: Frontend, R: Rng> Session<F, R> {
    pub fn new(engine: RoundEngine<R>, timing: TimingSettings, frontend: F) -> Self {
        Self {
            runner: HeadlessRunner::new(engine),
            frontend,
            screen: Screen::Splash,
            scheduler: Scheduler::new(),
            timing: timing.clamp(),
            playback: None,
            input: None,
        }
    }

    pub fn state(&self) -> &RoundState {
        self.runner.state()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_accepting_input(&self) -> bool {
        self.input.is_some()
    }

    /// Start / play-again trigger. Valid from every screen; a game in progress is abandoned.
    pub fn start_requested(&mut self) {
        let (screen, effect) = self.screen.handle(ScreenEvent::Start);
        if effect != ScreenEffect::ResetSession {
            debug!(?screen, "start ignored");
            return;
        }
        self.cancel_pending();
        self.screen = screen;
        self.step(RoundInput::StartGame);
    }

    /// Returns from the game-over screen to the splash screen, dropping the round state.
    pub fn back_requested(&mut self) {
        let (screen, effect) = self.screen.handle(ScreenEvent::Back);
        if effect != ScreenEffect::DiscardSession {
            debug!(?screen, "back ignored");
            return;
        }
        self.cancel_pending();
        self.runner.reset();
        self.screen = screen;
        self.frontend.show_screen(screen);
    }

    /// Manual submit: sends whatever has been typed so far.
    pub fn submit_requested(&mut self) {
        let Some(input) = self.input.take() else {
            debug!("submit ignored: not accepting input");
            return;
        };
        self.frontend.set_input(input.as_slice(), false);
        self.step(RoundInput::Submit(input.into_vec()));
    }

    pub fn direction_pressed(&mut self, direction: Direction) {
        let Some(input) = self.input.as_mut() else {
            debug!(?direction, "direction ignored: not accepting input");
            return;
        };
        match input.push(direction) {
            PushOutcome::Accepted => {
                self.frontend.set_input(input.as_slice(), true);
            }
            PushOutcome::Filled => {
                // Stop listening before submitting so nothing lands in a finished attempt.
                self.submit_requested();
            }
            PushOutcome::Rejected => {}
        }
    }

    /// Moves the session clock forward, firing timers in order.
    ///
    /// Timers scheduled while handling a timer are relative to that timer's due time, so one
    /// large `dt` behaves like many small ones.
    pub fn advance(&mut self, dt: Duration) {
        let mut remaining = dt;
        loop {
            match self.scheduler.next_due_in() {
                Some(wait) if wait <= remaining => {
                    self.scheduler.advance_clock(wait);
                    remaining -= wait;
                    while let Some(timer) = self.scheduler.pop_due() {
                        self.on_timer(timer);
                    }
                }
                _ => {
                    self.scheduler.advance_clock(remaining);
                    break;
                }
            }
        }
    }

    fn cancel_pending(&mut self) {
        let epoch = self.scheduler.cancel_all();
        self.playback = None;
        self.input = None;
        debug!(epoch, "pending timers and input cancelled");
    }

    fn step(&mut self, input: RoundInput) {
        debug!(frame = self.runner.frame(), ?input, "round input");
        for effect in self.runner.step(input) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: RoundEffect) {
        match effect {
            RoundEffect::ShowScreen(Screen::GameOver) => {
                self.screen = self.screen.handle(ScreenEvent::GameOver).0;
                self.frontend.show_screen(self.screen);
            }
            RoundEffect::ShowScreen(screen) => {
                self.screen = screen;
                self.frontend.show_screen(screen);
            }
            RoundEffect::StartMusic => self.frontend.start_music(),
            RoundEffect::PlaySound(sound) => self.frontend.play_sound(sound),
            RoundEffect::UpdateHud { round, score } => self.frontend.update_hud(round, score),
            RoundEffect::DisplaySequence { sequence, .. } => {
                self.playback = Some(sequence);
                self.input = None;
                self.frontend.show_status(Some(Status::RoundStarting));
                self.frontend.set_input(&[], false);
                self.scheduler
                    .schedule(self.timing.round_start_delay(), SessionTimer::BeginPlayback);
            }
            RoundEffect::AcceptInput => {
                let cap = self.runner.state().sequence().len();
                self.input = Some(PlayerInput::with_capacity(cap));
                self.frontend.set_input(&[], true);
            }
            RoundEffect::RoundComplete { .. } => {
                self.frontend.show_status(Some(Status::RoundComplete));
                self.scheduler
                    .schedule(self.timing.inter_round_delay(), SessionTimer::NextRound);
            }
            RoundEffect::ReportFinalState {
                score,
                highest_round,
            } => {
                self.playback = None;
                self.input = None;
                self.frontend.report_final_state(score, highest_round);
            }
        }
    }

    fn on_timer(&mut self, timer: SessionTimer) {
        let interval = self.timing.cue_interval();
        match timer {
            SessionTimer::BeginPlayback => {
                self.frontend.clear_cue();
                self.frontend.show_status(None);
                self.frontend.set_input(&[], false);
                let first = if self.playback.as_ref().is_some_and(|s| !s.is_empty()) {
                    SessionTimer::ShowCue(0)
                } else {
                    SessionTimer::PlaybackFinished
                };
                self.scheduler.schedule(interval, first);
            }
            SessionTimer::ShowCue(index) => {
                let Some(direction) = self.playback.as_ref().and_then(|s| s.get(index).copied())
                else {
                    debug!(index, "cue timer without playback");
                    return;
                };
                let round = self.runner.state().current_round();
                self.frontend.display_cue(direction, round);
                self.frontend.play_sound(SoundCue::Beep(direction));

                let len = self.playback.as_ref().map_or(0, |s| s.len());
                let next = if index + 1 < len {
                    SessionTimer::ShowCue(index + 1)
                } else {
                    SessionTimer::PlaybackFinished
                };
                self.scheduler.schedule(interval, next);
            }
            SessionTimer::PlaybackFinished => {
                self.playback = None;
                self.frontend.clear_cue();
                self.frontend.show_status(Some(Status::YourTurn));
                self.step(RoundInput::SequenceDisplayed);
            }
            SessionTimer::NextRound => self.step(RoundInput::StartRound),
        }
    }
}
