use std::time::Duration;

use engine::app::{AppControl, GameApp, InputFrame};
use engine::graphics::Renderer2d;
use engine::ui::{Button, hit_test};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::direction::{CueVariant, Direction};
use crate::headful::audio::AudioOut;
use crate::headful::input_adapter::{Command, map_key};
use crate::headful::screens::{self, ClientView};
use crate::session::{Frontend, Session, Status};
use crate::sfx::SoundCue;
use crate::view::Screen;

/// Frontend for the window: keeps a drawable snapshot and forwards sounds to the device.
pub struct HeadfulFrontend {
    view: ClientView,
    audio: Option<AudioOut>,
    rng: StdRng,
}

impl HeadfulFrontend {
    /// `audio` is `None` when running muted or without an output device.
    pub fn new(audio: Option<AudioOut>) -> Self {
        Self {
            view: ClientView {
                music_on: audio.as_ref().is_some_and(AudioOut::music_enabled),
                ..ClientView::default()
            },
            audio,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn view(&self) -> &ClientView {
        &self.view
    }

    pub fn toggle_music(&mut self) {
        if let Some(audio) = self.audio.as_mut() {
            audio.toggle_music();
            self.view.music_on = audio.music_enabled();
        }
    }
}

impl Frontend for HeadfulFrontend {
    fn show_screen(&mut self, screen: Screen) {
        self.view.screen = screen;
        if screen != Screen::Game {
            self.view.cue = None;
            self.view.status = None;
            self.view.entered.clear();
            self.view.accepting = false;
        }
    }

    fn display_cue(&mut self, direction: Direction, round: u32) {
        let variant = CueVariant::pick(round, &mut self.rng);
        self.view.cue = Some((direction, variant));
    }

    fn clear_cue(&mut self) {
        self.view.cue = None;
    }

    fn play_sound(&mut self, sound: SoundCue) {
        if let Some(audio) = self.audio.as_mut() {
            audio.play(sound);
        }
    }

    fn start_music(&mut self) {
        if let Some(audio) = self.audio.as_mut() {
            audio.start_music();
        }
    }

    fn show_status(&mut self, status: Option<Status>) {
        self.view.status = status;
    }

    fn update_hud(&mut self, round: u32, score: u32) {
        self.view.round = round;
        self.view.score = score;
    }

    fn set_input(&mut self, entered: &[Direction], accepting: bool) {
        self.view.entered = entered.to_vec();
        self.view.accepting = accepting;
    }

    fn report_final_state(&mut self, score: u32, highest_round: u32) {
        info!(score, highest_round, "game over");
        self.view.final_score = score;
        self.view.highest_round = highest_round;
    }
}

/// Window-side game: routes keys and clicks into a `Session` and draws its frontend.
pub struct HeadfulGame {
    session: Session<HeadfulFrontend>,
    buttons: Vec<Button<Command>>,
}

impl HeadfulGame {
    pub fn new(session: Session<HeadfulFrontend>) -> Self {
        Self {
            session,
            buttons: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session<HeadfulFrontend> {
        &self.session
    }

    /// Applies one command; returns `AppControl::Exit` for quit.
    pub fn apply(&mut self, command: Command) -> AppControl {
        debug!(?command, screen = ?self.session.screen(), "command");
        match command {
            Command::Direction(direction) => self.session.direction_pressed(direction),
            Command::Submit => self.session.submit_requested(),
            Command::Start => self.session.start_requested(),
            Command::Back => self.session.back_requested(),
            Command::ToggleMusic => self.session.frontend_mut().toggle_music(),
            Command::Quit => return AppControl::Exit,
        }
        AppControl::Continue
    }
}

impl GameApp for HeadfulGame {
    fn update(&mut self, input: &InputFrame, dt: Duration) -> AppControl {
        for key in &input.keys_pressed {
            if let Some(command) = map_key(*key, self.session.screen()) {
                if self.apply(command) == AppControl::Exit {
                    return AppControl::Exit;
                }
            }
        }

        if input.clicked {
            let hit = input
                .mouse_pos
                .and_then(|(x, y)| hit_test(&self.buttons, x, y));
            if let Some(command) = hit {
                if self.apply(command) == AppControl::Exit {
                    return AppControl::Exit;
                }
            }
        }

        self.session.advance(dt);
        AppControl::Continue
    }

    fn render(&mut self, renderer: &mut dyn Renderer2d) {
        self.buttons = screens::draw(self.session.frontend().view(), renderer);
    }

    fn on_exit(&mut self) {
        let state = self.session.state();
        info!(
            round = state.current_round(),
            score = state.score(),
            "closing"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::RoundEngine;
    use crate::settings::TimingSettings;
    use engine::graphics::{FrameBuffer, SurfaceSize};
    use winit::event::VirtualKeyCode;

    fn game() -> HeadfulGame {
        let frontend = HeadfulFrontend::new(None);
        HeadfulGame::new(Session::new(
            RoundEngine::seeded(3),
            TimingSettings::default(),
            frontend,
        ))
    }

    fn press(game: &mut HeadfulGame, key: VirtualKeyCode, dt_ms: u64) -> AppControl {
        let input = InputFrame {
            keys_pressed: vec![key],
            ..InputFrame::default()
        };
        game.update(&input, Duration::from_millis(dt_ms))
    }

    fn idle(game: &mut HeadfulGame, ms: u64) {
        game.update(&InputFrame::default(), Duration::from_millis(ms));
    }

    #[test]
    fn enter_on_splash_starts_and_escape_quits() {
        let mut g = game();
        assert_eq!(press(&mut g, VirtualKeyCode::Return, 0), AppControl::Continue);
        assert_eq!(g.session().screen(), Screen::Game);
        assert_eq!(g.session().frontend().view().round, 1);

        let mut g = game();
        assert_eq!(press(&mut g, VirtualKeyCode::Escape, 0), AppControl::Exit);
    }

    #[test]
    fn cues_show_up_in_the_view_during_playback() {
        let mut g = game();
        press(&mut g, VirtualKeyCode::Return, 0);
        assert_eq!(g.session().frontend().view().status, Some(Status::RoundStarting));

        idle(&mut g, 3_000);
        let view = g.session().frontend().view();
        let (direction, variant) = view.cue.expect("first cue visible");
        assert_eq!(variant, CueVariant::Plain);
        assert_eq!(direction, g.session().state().sequence()[0]);
    }

    #[test]
    fn typing_the_sequence_by_keyboard_clears_the_round() {
        let mut g = game();
        press(&mut g, VirtualKeyCode::Return, 0);
        idle(&mut g, 2_000 + 4 * 1_000);
        assert!(g.session().frontend().view().accepting);

        let sequence: Vec<Direction> = g.session().state().sequence().to_vec();
        for d in sequence {
            let key = match d {
                Direction::Up => VirtualKeyCode::Up,
                Direction::Down => VirtualKeyCode::Down,
                Direction::Left => VirtualKeyCode::Left,
                Direction::Right => VirtualKeyCode::Right,
            };
            press(&mut g, key, 0);
        }
        let view = g.session().frontend().view();
        assert_eq!(view.status, Some(Status::RoundComplete));
        assert_eq!(view.score, 250);
        assert_eq!(view.round, 2);
    }

    #[test]
    fn clicking_start_button_after_render() {
        let mut g = game();
        let mut fb = FrameBuffer::new(SurfaceSize::new(960, 720));
        g.render(&mut fb.renderer());
        let (x, y) = g.buttons[0].rect.center();

        let click = InputFrame {
            mouse_pos: Some((x, y)),
            clicked: true,
            ..InputFrame::default()
        };
        g.update(&click, Duration::ZERO);
        assert_eq!(g.session().screen(), Screen::Game);
    }

    #[test]
    fn music_toggle_without_audio_is_a_no_op() {
        let mut g = game();
        assert!(!g.session().frontend().view().music_on);
        press(&mut g, VirtualKeyCode::M, 0);
        assert!(!g.session().frontend().view().music_on);
    }
}
