use std::sync::Arc;
use std::thread;

use dstk_services::{create_shared_theme_switch, ThemeSwitch};
use dstk_theme::mode::ThemeMode;
use dstk_theme::request::StyleRequest;
use dstk_theme::system::DesignSystem;

#[test]
fn test_theme_switch_defaults_to_light() {
    let switch = ThemeSwitch::default();
    assert_eq!(switch.current(), ThemeMode::Light);
}

#[test]
fn test_theme_switch_set() {
    let switch = ThemeSwitch::new(ThemeMode::Light);
    switch.set(ThemeMode::Dark);
    assert_eq!(switch.current(), ThemeMode::Dark);
    switch.set(ThemeMode::Dark);
    assert_eq!(switch.current(), ThemeMode::Dark);
}

#[test]
fn test_concurrent_toggles_never_tear() {
    let switch = create_shared_theme_switch(ThemeMode::Light);

    let togglers: Vec<_> = (0..4)
        .map(|_| {
            let switch = Arc::clone(&switch);
            thread::spawn(move || {
                for _ in 0..1000 {
                    switch.toggle();
                }
            })
        })
        .collect();
    let reader = {
        let switch = Arc::clone(&switch);
        thread::spawn(move || {
            for _ in 0..1000 {
                let mode = switch.current();
                assert!(mode == ThemeMode::Light || mode == ThemeMode::Dark);
            }
        })
    };

    for handle in togglers {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    // An even number of flips lands back where it started.
    assert_eq!(switch.current(), ThemeMode::Light);
}

#[test]
fn test_snapshot_drives_resolution() {
    let apple = DesignSystem::apple().unwrap();
    let switch = ThemeSwitch::new(ThemeMode::Light);
    let request = StyleRequest::new("card");

    let light = apple.resolve(&switch.snapshot(request.clone())).unwrap();
    switch.toggle();
    let dark = apple.resolve(&switch.snapshot(request)).unwrap();

    assert_eq!(light.get("background-color"), Some("#f2f2f7"));
    assert_eq!(dark.get("background-color"), Some("#1c1c1e"));
}
