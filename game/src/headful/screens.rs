use engine::graphics::{Color, DEFAULT_TEXT_SCALE, Renderer2d, text_size};
use engine::ui::{Anchor, Button, Insets, Rect, Size};

use crate::direction::{CueVariant, Direction, glyph_string};
use crate::headful::input_adapter::Command;
use crate::session::Status;
use crate::view::Screen;

const BG: Color = [18, 20, 28, 255];
const PANEL: Color = [32, 36, 48, 255];
const TEXT: Color = [230, 232, 240, 255];
const MUTED: Color = [140, 146, 160, 255];
const ACCENT: Color = [250, 200, 60, 255];
const DANGER: Color = [230, 80, 80, 255];
const BUTTON: Color = [60, 70, 96, 255];
const BUTTON_ACTIVE: Color = [80, 150, 110, 255];

const TITLE_SCALE: u32 = 6;
const HUD_SCALE: u32 = 3;
const BUTTON_H: u32 = 48;
const GAP: u32 = 12;

/// Everything the client shows, as last reported by the session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientView {
    pub screen: Screen,
    pub round: u32,
    pub score: u32,
    pub cue: Option<(Direction, CueVariant)>,
    pub status: Option<Status>,
    pub entered: Vec<Direction>,
    pub accepting: bool,
    pub final_score: u32,
    pub highest_round: u32,
    pub music_on: bool,
}

pub fn cue_color(variant: CueVariant) -> Color {
    match variant {
        CueVariant::Plain => ACCENT,
        CueVariant::Alt(1) => [90, 190, 250, 255],
        CueVariant::Alt(2) => [240, 110, 200, 255],
        CueVariant::Alt(_) => [130, 230, 120, 255],
    }
}

/// Draws the current screen and returns its clickable buttons, in draw order.
pub fn draw(view: &ClientView, r: &mut dyn Renderer2d) -> Vec<Button<Command>> {
    r.clear(BG);
    match view.screen {
        Screen::Splash => draw_splash(r),
        Screen::Game => draw_game(view, r),
        Screen::GameOver => draw_game_over(view, r),
    }
}

fn centered_text(r: &mut dyn Renderer2d, area: Rect, text: &str, color: Color, scale: u32) {
    let at = area.place(text_size(text, scale), Anchor::Center);
    r.draw_text_scaled(at.x, at.y, text, color, scale);
}

fn button(
    r: &mut dyn Renderer2d,
    rect: Rect,
    label: &str,
    fill: Color,
    command: Command,
) -> Button<Command> {
    r.fill_rect(rect, fill);
    r.rect_outline(rect, TEXT, 2);
    centered_text(r, rect, label, TEXT, DEFAULT_TEXT_SCALE);
    Button::new(rect, command)
}

fn draw_splash(r: &mut dyn Renderer2d) -> Vec<Button<Command>> {
    let area = r.size().rect().inset(Insets::all(24));
    let (title, rest) = area.take_top(area.h / 2);
    centered_text(r, title, "ARROW RECALL", ACCENT, TITLE_SCALE);

    let (hint, bottom) = rest.take_top(rest.h / 2);
    centered_text(
        r,
        hint,
        "WATCH THE ARROWS THEN REPEAT THEM\n\nARROWS/WASD: MOVE  ENTER: SUBMIT\nM: MUSIC  ESC: QUIT",
        MUTED,
        DEFAULT_TEXT_SCALE,
    );

    let start = bottom.place(Size::new(220, BUTTON_H), Anchor::Center);
    vec![button(r, start, "START", BUTTON_ACTIVE, Command::Start)]
}

fn draw_game_over(view: &ClientView, r: &mut dyn Renderer2d) -> Vec<Button<Command>> {
    let area = r.size().rect().inset(Insets::all(24));
    let (title, rest) = area.take_top(area.h / 3);
    centered_text(r, title, "GAME OVER", DANGER, TITLE_SCALE);

    let (stats, bottom) = rest.take_top(rest.h / 2);
    let summary = format!(
        "FINAL SCORE: {}\nHIGHEST LEVEL: {}",
        view.final_score, view.highest_round
    );
    centered_text(r, stats, &summary, TEXT, HUD_SCALE);
    let (_, footer) = bottom.take_bottom(DEFAULT_TEXT_SCALE * 6);
    centered_text(r, footer, "ESC: MENU", MUTED, DEFAULT_TEXT_SCALE);

    let row = bottom.place(Size::new(460, BUTTON_H), Anchor::Center);
    let half = row.w.saturating_sub(20) / 2;
    let again = Rect::new(row.x, row.y, half, row.h);
    let back = Rect::new(row.right() - half, row.y, half, row.h);
    vec![
        button(r, again, "PLAY AGAIN", BUTTON_ACTIVE, Command::Start),
        button(r, back, "MENU", BUTTON, Command::Back),
    ]
}

fn draw_game(view: &ClientView, r: &mut dyn Renderer2d) -> Vec<Button<Command>> {
    let area = r.size().rect().inset(Insets::all(16));
    let (hud, rest) = area.take_top(48);
    let (stage, controls) = rest.take_bottom(BUTTON_H * 2 + 64);

    let round = format!("ROUND {}", view.round);
    r.draw_text_scaled(hud.x, hud.y, &round, TEXT, HUD_SCALE);
    let score = format!("POINTS {}", view.score);
    let score_size = text_size(&score, HUD_SCALE);
    let score_at = hud.place(score_size, Anchor::TopRight);
    r.draw_text_scaled(score_at.x, score_at.y, &score, TEXT, HUD_SCALE);
    let music = if view.music_on { "M: MUSIC ON" } else { "M: MUSIC OFF" };
    let music_at = hud.place(text_size(music, DEFAULT_TEXT_SCALE), Anchor::BottomCenter);
    r.draw_text_scaled(music_at.x, music_at.y, music, MUTED, DEFAULT_TEXT_SCALE);

    r.fill_rect(stage, PANEL);
    if let Some((direction, variant)) = view.cue {
        let side = stage.w.min(stage.h) * 2 / 3;
        draw_arrow(r, stage.place(Size::square(side), Anchor::Center), direction, cue_color(variant));
    } else if let Some(status) = view.status {
        centered_text(r, stage, &status.text().to_uppercase(), ACCENT, HUD_SCALE + 1);
    }

    let (echo, pad) = controls.take_top(40);
    let echo_text = if view.entered.is_empty() && view.accepting {
        String::from("-")
    } else {
        glyph_string(&view.entered)
    };
    centered_text(r, echo, &echo_text, TEXT, HUD_SCALE + 1);

    let fill = if view.accepting { BUTTON_ACTIVE } else { BUTTON };
    let row = pad.place(Size::new(5 * 96 + 4 * GAP, BUTTON_H), Anchor::Center);
    let bw = row.w.saturating_sub(4 * GAP) / 5;
    let slot = |i: u32| Rect::new(row.x + i * (bw + GAP), row.y, bw, row.h);
    let mut buttons = Vec::with_capacity(5);
    for (i, direction) in Direction::ALL.into_iter().enumerate() {
        let rect = slot(i as u32);
        buttons.push(button(
            r,
            rect,
            &direction.glyph().to_string(),
            fill,
            Command::Direction(direction),
        ));
    }
    let submit = slot(4);
    buttons.push(button(r, submit, "SUBMIT", fill, Command::Submit));
    buttons
}

/// Filled arrow (triangle head plus shaft) pointing in `direction`, fitted to `bounds`.
pub fn draw_arrow(r: &mut dyn Renderer2d, bounds: Rect, direction: Direction, color: Color) {
    let (cx, cy) = bounds.center();
    let (cx, cy) = (cx as i32, cy as i32);
    let half = (bounds.w.min(bounds.h) / 2) as i32;
    let shaft = (half / 3).max(1);

    // Arrow pointing up in local coordinates, rotated per direction.
    let rotate = |dx: i32, dy: i32| -> (i32, i32) {
        match direction {
            Direction::Up => (cx + dx, cy + dy),
            Direction::Down => (cx - dx, cy - dy),
            Direction::Left => (cx + dy, cy - dx),
            Direction::Right => (cx - dy, cy + dx),
        }
    };

    r.fill_triangle(rotate(0, -half), rotate(-half, 0), rotate(half, 0), color);
    r.fill_triangle(rotate(-shaft, 0), rotate(shaft, 0), rotate(shaft, half), color);
    r.fill_triangle(rotate(-shaft, 0), rotate(shaft, half), rotate(-shaft, half), color);
}
