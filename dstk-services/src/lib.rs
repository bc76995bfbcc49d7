// SPDX-License-Identifier: LGPL-3.0-only
//! Host-side collaborators of the dstk design system: the runtime
//! light/dark switch and the appearance preferences that seed it.
pub mod settings;
pub mod theme_switch;

pub use settings::{os_theme_detector, AppearanceSettings, ThemeDetector, ThemePreference, THEME_ENV};
pub use theme_switch::{create_shared_theme_switch, SharedThemeSwitch, ThemeSwitch};

/// Load appearance preferences and create a theme switch in the mode they select.
///
/// The environment signal `DSTK_THEME` wins over the persisted preference.
pub async fn theme_switch_from_environment() -> anyhow::Result<SharedThemeSwitch> {
    let settings = AppearanceSettings::load().await?;
    Ok(create_shared_theme_switch(settings.initial_mode_from_env()))
}
