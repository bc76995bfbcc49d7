use dstk_services::{AppearanceSettings, ThemePreference};
use dstk_theme::mode::ThemeMode;
use std::fs;

fn always_dark() -> ThemeMode {
    ThemeMode::Dark
}

fn always_light() -> ThemeMode {
    ThemeMode::Light
}

#[test]
fn test_initial_mode_defaults_to_light() {
    let settings = AppearanceSettings::default();
    assert_eq!(settings.initial_mode(None, always_dark), ThemeMode::Light);
}

#[test]
fn test_persisted_preference_is_used() {
    let mut settings = AppearanceSettings::default();
    settings.set_theme(ThemePreference::Dark);
    assert_eq!(settings.initial_mode(None, always_light), ThemeMode::Dark);
}

#[test]
fn test_env_signal_beats_persisted_preference() {
    let mut settings = AppearanceSettings::default();
    settings.set_theme(ThemePreference::Dark);
    assert_eq!(settings.initial_mode(Some("light"), always_dark), ThemeMode::Light);
}

#[test]
fn test_invalid_env_signal_is_ignored() {
    let mut settings = AppearanceSettings::default();
    settings.set_theme(ThemePreference::Dark);
    assert_eq!(settings.initial_mode(Some("purple"), always_light), ThemeMode::Dark);
}

#[test]
fn test_system_preference_asks_detector() {
    let mut settings = AppearanceSettings::default();
    settings.set_theme(ThemePreference::System);
    assert_eq!(settings.initial_mode(None, always_dark), ThemeMode::Dark);
    assert_eq!(settings.initial_mode(None, always_light), ThemeMode::Light);
    assert_eq!(settings.initial_mode(Some("SYSTEM"), always_dark), ThemeMode::Dark);
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dstk-0").join("appearance.toml");

    let mut settings = AppearanceSettings::default();
    settings.set_theme(ThemePreference::System);
    smol::block_on(settings.save_to(&path)).expect("Failed to save appearance settings");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[appearance]"));
    assert!(content.contains("theme = \"system\""));

    let mut loaded = AppearanceSettings::default();
    let results = smol::block_on(loaded.load_from_paths_async(vec![path]));
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(loaded, settings);
}

#[test]
fn test_later_layers_win() {
    let dir = tempfile::tempdir().unwrap();
    let system = dir.path().join("system.toml");
    let user = dir.path().join("user.toml");
    let empty = dir.path().join("empty.toml");
    fs::write(&system, "[appearance]\ntheme = \"dark\"\n").unwrap();
    fs::write(&user, "[appearance]\ntheme = \"light\"\n").unwrap();
    fs::write(&empty, "").unwrap();

    let mut settings = AppearanceSettings::default();
    let results = smol::block_on(settings.load_from_paths_async(vec![system, user, empty]));

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(settings.theme(), Some(ThemePreference::Light));
}

#[test]
fn test_broken_layers_are_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.toml");
    let broken = dir.path().join("broken.toml");
    fs::write(&good, "[appearance]\ntheme = \"dark\"\n").unwrap();
    fs::write(&broken, "[appearance\ntheme = ").unwrap();

    let mut settings = AppearanceSettings::default();
    let results = smol::block_on(settings.load_from_paths_async(vec![
        good,
        broken,
        dir.path().join("missing.toml"),
    ]));

    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_err());
    assert_eq!(settings.theme(), Some(ThemePreference::Dark));
}
