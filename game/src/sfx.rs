use std::time::Duration;

use engine::audio::{Melody, Note, Waveform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Default per-category volumes (0.0..=1.0), before the master volume.
pub const THEME_VOLUME: f32 = 0.25;
pub const BEEP_VOLUME: f32 = 1.0;
pub const ROUND_START_VOLUME: f32 = 1.0;
pub const GAME_OVER_VOLUME: f32 = 1.0;
pub const ROUND_WIN_VOLUME: f32 = 1.0;

pub const DEFAULT_BEEP_LENGTH: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    RoundStart,
    RoundWin,
    GameOver,
    Beep(Direction),
}

const ROUND_START_A: &[Note] = &[
    Note::new(261.63, 120),
    Note::new(329.63, 120),
    Note::new(392.00, 240),
];
const ROUND_START_B: &[Note] = &[
    Note::new(392.00, 100),
    Note::rest(40),
    Note::new(392.00, 100),
    Note::new(523.25, 260),
];
const ROUND_START_C: &[Note] = &[
    Note::new(196.00, 150),
    Note::new(293.66, 150),
    Note::new(392.00, 150),
    Note::new(587.33, 250),
];

const ROUND_WIN_A: &[Note] = &[
    Note::new(523.25, 110),
    Note::new(659.25, 110),
    Note::new(783.99, 110),
    Note::new(1046.50, 300),
];
const ROUND_WIN_B: &[Note] = &[
    Note::new(440.00, 140),
    Note::new(554.37, 140),
    Note::new(659.25, 360),
];

const GAME_OVER: &[Note] = &[
    Note::new(392.00, 220),
    Note::new(369.99, 220),
    Note::new(349.23, 220),
    Note::new(329.63, 600),
];

const ROUND_START_POOL: &[&[Note]] = &[ROUND_START_A, ROUND_START_B, ROUND_START_C];
const ROUND_WIN_POOL: &[&[Note]] = &[ROUND_WIN_A, ROUND_WIN_B];
const GAME_OVER_POOL: &[&[Note]] = &[GAME_OVER];

const THEME: &[Note] = &[
    Note::new(220.00, 250),
    Note::new(261.63, 250),
    Note::new(329.63, 250),
    Note::new(261.63, 250),
    Note::new(196.00, 250),
    Note::new(246.94, 250),
    Note::new(293.66, 250),
    Note::new(246.94, 250),
];

impl SoundCue {
    /// Number of interchangeable sounds for this cue; the frontend picks one uniformly.
    pub fn pool_size(self) -> usize {
        match self {
            SoundCue::RoundStart => ROUND_START_POOL.len(),
            SoundCue::RoundWin => ROUND_WIN_POOL.len(),
            SoundCue::GameOver => GAME_OVER_POOL.len(),
            SoundCue::Beep(_) => 1,
        }
    }

    pub fn pick_variant<R: Rng + ?Sized>(self, rng: &mut R) -> usize {
        rng.gen_range(0..self.pool_size())
    }

    /// Synthesizes pool entry `variant` (wrapped into range).
    pub fn melody(self, variant: usize, beep_length: Duration) -> Melody {
        let pool = match self {
            SoundCue::RoundStart => ROUND_START_POOL,
            SoundCue::RoundWin => ROUND_WIN_POOL,
            SoundCue::GameOver => GAME_OVER_POOL,
            SoundCue::Beep(direction) => {
                return Melody::tone(direction.beep_hz(), beep_length)
                    .with_waveform(Waveform::Sine)
                    .with_gain(0.6);
            }
        };
        let notes = pool[variant % pool.len()];
        Melody::new(notes.to_vec())
            .with_waveform(Waveform::Triangle)
            .with_gain(0.45)
    }
}

/// Looping background theme.
pub fn theme() -> Melody {
    Melody::new(THEME.to_vec())
        .with_waveform(Waveform::Sine)
        .with_gain(0.3)
        .with_envelope(0.04, 0.1)
        .looping()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pool_sizes_per_event_type() {
        assert_eq!(SoundCue::RoundStart.pool_size(), 3);
        assert_eq!(SoundCue::RoundWin.pool_size(), 2);
        assert_eq!(SoundCue::GameOver.pool_size(), 1);
        assert_eq!(SoundCue::Beep(Direction::Up).pool_size(), 1);
    }

    #[test]
    fn picks_stay_in_pool_and_cover_it() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 3];
        for _ in 0..100 {
            let v = SoundCue::RoundStart.pick_variant(&mut rng);
            seen[v] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn beep_is_one_short_tone() {
        let beep = SoundCue::Beep(Direction::Left).melody(0, DEFAULT_BEEP_LENGTH);
        assert_eq!(beep.total_duration(), Some(DEFAULT_BEEP_LENGTH));
    }

    #[test]
    fn jingles_are_finite_and_theme_loops() {
        for cue in [SoundCue::RoundStart, SoundCue::RoundWin, SoundCue::GameOver] {
            for v in 0..cue.pool_size() {
                assert!(cue.melody(v, DEFAULT_BEEP_LENGTH).total_duration().is_some());
            }
        }
        assert!(theme().total_duration().is_none());
    }
}
