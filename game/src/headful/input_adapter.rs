use winit::event::VirtualKeyCode;

use crate::direction::Direction;
use crate::view::Screen;

/// What a key press or button click means to the headful client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Direction(Direction),
    Submit,
    Start,
    Back,
    ToggleMusic,
    Quit,
}

fn map_direction_key(key: VirtualKeyCode) -> Option<Direction> {
    match key {
        VirtualKeyCode::Up | VirtualKeyCode::W => Some(Direction::Up),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(Direction::Down),
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(Direction::Left),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

/// Key bindings depend on the screen: Enter submits during play but starts a game elsewhere.
pub fn map_key(key: VirtualKeyCode, screen: Screen) -> Option<Command> {
    if key == VirtualKeyCode::M {
        return Some(Command::ToggleMusic);
    }

    match screen {
        Screen::Splash => match key {
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter | VirtualKeyCode::Space => {
                Some(Command::Start)
            }
            VirtualKeyCode::Escape => Some(Command::Quit),
            _ => None,
        },
        Screen::Game => match key {
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => Some(Command::Submit),
            VirtualKeyCode::R => Some(Command::Start),
            other => map_direction_key(other).map(Command::Direction),
        },
        Screen::GameOver => match key {
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter | VirtualKeyCode::Space => {
                Some(Command::Start)
            }
            VirtualKeyCode::Escape => Some(Command::Back),
            _ => None,
        },
    }
}
