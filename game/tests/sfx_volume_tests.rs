use game::direction::Direction;
use game::settings::AudioSettings;
use game::sfx::{
    BEEP_VOLUME, DEFAULT_BEEP_LENGTH, GAME_OVER_VOLUME, ROUND_START_VOLUME, ROUND_WIN_VOLUME,
    SoundCue, THEME_VOLUME, theme,
};

#[test]
fn theme_sits_under_the_effects() {
    for (name, v) in [
        ("beep", BEEP_VOLUME),
        ("round_start", ROUND_START_VOLUME),
        ("round_win", ROUND_WIN_VOLUME),
        ("game_over", GAME_OVER_VOLUME),
    ] {
        assert!(
            THEME_VOLUME < v,
            "expected THEME_VOLUME < {name} volume (music should sit under effects)"
        );
    }
}

#[test]
fn volumes_are_in_valid_range() {
    for (name, v) in [
        ("theme", THEME_VOLUME),
        ("beep", BEEP_VOLUME),
        ("round_start", ROUND_START_VOLUME),
        ("round_win", ROUND_WIN_VOLUME),
        ("game_over", GAME_OVER_VOLUME),
    ] {
        assert!(v > 0.0, "{name} volume must be > 0.0, got {v}");
        assert!(v <= 1.0, "{name} volume must be <= 1.0, got {v}");
    }
}

#[test]
fn every_direction_has_a_distinct_beep() {
    let mut pitches: Vec<f32> = Direction::ALL.iter().map(|d| d.beep_hz()).collect();
    pitches.sort_by(|a, b| a.total_cmp(b));
    pitches.dedup();
    assert_eq!(pitches.len(), 4);
}

#[test]
fn beep_lasts_the_configured_length() {
    let beep = SoundCue::Beep(Direction::Up).melody(0, DEFAULT_BEEP_LENGTH);
    assert_eq!(beep.total_duration(), Some(DEFAULT_BEEP_LENGTH));
    assert!(theme().total_duration().is_none());
}

#[test]
fn master_volume_scales_every_category() {
    let audio = AudioSettings {
        master_volume: 0.5,
        ..AudioSettings::default()
    };
    assert!((audio.effective_gain(SoundCue::GameOver) - 0.5).abs() < 1e-6);
    assert!((audio.effective_music_gain() - 0.125).abs() < 1e-6);
}
