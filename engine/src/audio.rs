use std::f32::consts::TAU;
use std::time::Duration;

pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

fn waveform_sample(wave: Waveform, phase: f32) -> f32 {
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Triangle => (2.0 / std::f32::consts::PI) * phase.sin().asin(),
    }
}

/// Linear attack/release envelope over `pos` in `0.0..=1.0` of a note.
fn envelope(pos: f32, attack: f32, release: f32) -> f32 {
    if attack > 0.0 && pos < attack {
        return pos / attack;
    }
    if release > 0.0 && pos > (1.0 - release) {
        return ((1.0 - pos) / release).max(0.0);
    }
    1.0
}

/// One pitched note (or a rest when `freq_hz` is `None`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq_hz: Option<f32>,
    pub length: Duration,
}

impl Note {
    pub const fn new(freq_hz: f32, length_ms: u64) -> Self {
        Self {
            freq_hz: Some(freq_hz),
            length: Duration::from_millis(length_ms),
        }
    }

    pub const fn rest(length_ms: u64) -> Self {
        Self {
            freq_hz: None,
            length: Duration::from_millis(length_ms),
        }
    }
}

/// Finite mono sample stream that plays a list of notes once (or forever with `looping`).
///
/// A single beep is just a one-note melody.
#[derive(Debug, Clone)]
pub struct Melody {
    notes: Vec<Note>,
    waveform: Waveform,
    gain: f32,
    attack: f32,
    release: f32,
    sample_rate: u32,
    looping: bool,
    note_index: usize,
    pos_in_note: u64,
    phase: f32,
}

impl Melody {
    pub fn new(notes: impl Into<Vec<Note>>) -> Self {
        Self {
            notes: notes.into(),
            waveform: Waveform::Sine,
            gain: 0.5,
            attack: 0.05,
            release: 0.2,
            sample_rate: DEFAULT_SAMPLE_RATE,
            looping: false,
            note_index: 0,
            pos_in_note: 0,
            phase: 0.0,
        }
    }

    pub fn tone(freq_hz: f32, length: Duration) -> Self {
        Self::new(vec![Note {
            freq_hz: Some(freq_hz),
            length,
        }])
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain.max(0.0);
        self
    }

    pub fn with_envelope(mut self, attack: f32, release: f32) -> Self {
        self.attack = attack.clamp(0.0, 0.49);
        self.release = release.clamp(0.0, 0.49);
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate.max(1);
        self
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn total_duration(&self) -> Option<Duration> {
        if self.looping {
            return None;
        }
        Some(self.notes.iter().map(|n| n.length).sum())
    }

    fn note_len_samples(&self, note: &Note) -> u64 {
        ((note.length.as_secs_f64() * self.sample_rate as f64).round() as u64).max(1)
    }
}

impl Iterator for Melody {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.notes.is_empty() {
            return None;
        }
        if self.note_index >= self.notes.len() {
            if !self.looping {
                return None;
            }
            self.note_index = 0;
        }

        let note = self.notes[self.note_index];
        let len = self.note_len_samples(&note);
        let pos = self.pos_in_note as f32 / len as f32;

        let sample = match note.freq_hz {
            Some(freq_hz) => {
                let phase_delta = TAU * freq_hz / self.sample_rate as f32;
                self.phase = (self.phase + phase_delta) % TAU;
                waveform_sample(self.waveform, self.phase)
                    * envelope(pos, self.attack, self.release)
                    * self.gain
            }
            None => 0.0,
        };

        self.pos_in_note += 1;
        if self.pos_in_note >= len {
            self.pos_in_note = 0;
            self.note_index += 1;
        }

        Some(sample)
    }
}
