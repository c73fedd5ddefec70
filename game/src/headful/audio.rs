use std::time::Duration;

use engine::audio::Melody;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use crate::settings::AudioSettings;
use crate::sfx::{self, SoundCue};

/// Adapts an engine `Melody` to rodio (mono).
struct MelodySource(Melody);

impl Iterator for MelodySource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        self.0.next()
    }
}

impl rodio::Source for MelodySource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.0.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.0.total_duration()
    }
}

/// Sound output on the default device. One detached sink per effect, one sink for the theme.
pub struct AudioOut {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
    music_started: bool,
    settings: AudioSettings,
    beep_length: Duration,
    rng: StdRng,
}

impl AudioOut {
    pub fn open(settings: AudioSettings, beep_length: Duration) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = match Sink::try_new(&handle) {
            Ok(sink) => {
                sink.set_volume(settings.effective_music_gain());
                Some(sink)
            }
            Err(err) => {
                warn!(%err, "no music sink; theme disabled");
                None
            }
        };
        Ok(Self {
            _stream: stream,
            handle,
            music,
            music_started: false,
            settings,
            beep_length,
            rng: StdRng::from_entropy(),
        })
    }

    pub fn play(&mut self, cue: SoundCue) {
        let gain = self.settings.effective_gain(cue);
        if gain <= 0.0 {
            return;
        }
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!(%err, ?cue, "failed to open sink");
                return;
            }
        };
        let variant = cue.pick_variant(&mut self.rng);
        debug!(?cue, variant, "play");
        sink.set_volume(gain);
        let melody = cue
            .melody(variant, self.beep_length)
            .with_sample_rate(self.settings.sample_rate_hz);
        sink.append(MelodySource(melody));
        sink.detach();
    }

    /// Starts the looping theme once; later calls are no-ops.
    pub fn start_music(&mut self) {
        if self.music_started {
            return;
        }
        let Some(sink) = self.music.as_ref() else {
            return;
        };
        sink.append(MelodySource(
            sfx::theme().with_sample_rate(self.settings.sample_rate_hz),
        ));
        if !self.music_enabled() {
            sink.pause();
        }
        self.music_started = true;
    }

    /// Whether the theme is meant to be audible; the sink is paused whenever this is false.
    pub fn music_enabled(&self) -> bool {
        self.music.is_some() && self.settings.music_on()
    }

    pub fn toggle_music(&mut self) {
        let Some(sink) = self.music.as_ref() else {
            return;
        };
        if self.settings.toggle_music() {
            sink.set_volume(self.settings.effective_music_gain());
            sink.play();
        } else {
            sink.pause();
        }
        debug!(music = self.settings.music_on(), "music toggled");
    }
}
