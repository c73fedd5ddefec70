use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Uniform draw over the four directions.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Beep pitch played with each displayed cue.
    pub fn beep_hz(self) -> f32 {
        match self {
            Direction::Up => 329.63,    // E4
            Direction::Down => 261.63,  // C4
            Direction::Left => 196.00,  // G3
            Direction::Right => 220.00, // A3
        }
    }

    /// Block-font glyph used in the input echo.
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }

}

/// Renders a list of directions as echo glyphs, e.g. `^v<`.
pub fn glyph_string(directions: &[Direction]) -> String {
    directions.iter().map(|d| d.glyph()).collect()
}

/// Visual variant of a displayed cue.
///
/// Early rounds always show the plain cue; later rounds pick one of a few alternate looks per
/// cue so the player can't lean on a single visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueVariant {
    Plain,
    Alt(u8),
}

impl CueVariant {
    pub const ALT_COUNT: u8 = 3;
    /// Rounds above this show alternate variants.
    pub const PLAIN_UNTIL_ROUND: u32 = 5;

    pub fn pick<R: Rng + ?Sized>(round: u32, rng: &mut R) -> Self {
        if round > Self::PLAIN_UNTIL_ROUND {
            CueVariant::Alt(rng.gen_range(1..=Self::ALT_COUNT))
        } else {
            CueVariant::Plain
        }
    }
}
