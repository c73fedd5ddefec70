use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Splash,
    Game,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEvent {
    Start,
    GameOver,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEffect {
    None,
    /// Cancel anything pending and start a fresh game.
    ResetSession,
    /// Cancel anything pending and drop the round state.
    DiscardSession,
}

impl Screen {
    /// Pure transition function for which screen is showing.
    ///
    /// Side-effects are reported via `ScreenEffect` so callers stay deterministic.
    pub fn handle(self, event: ScreenEvent) -> (Screen, ScreenEffect) {
        match (self, event) {
            (Screen::Splash, ScreenEvent::Start) => (Screen::Game, ScreenEffect::ResetSession),
            // Restarting mid-game is allowed; pending playback is cancelled.
            (Screen::Game, ScreenEvent::Start) => (Screen::Game, ScreenEffect::ResetSession),
            (Screen::Game, ScreenEvent::GameOver) => (Screen::GameOver, ScreenEffect::None),
            (Screen::GameOver, ScreenEvent::Start) => (Screen::Game, ScreenEffect::ResetSession),
            (Screen::GameOver, ScreenEvent::Back) => (Screen::Splash, ScreenEffect::DiscardSession),

            (state, _) => (state, ScreenEffect::None),
        }
    }
}
