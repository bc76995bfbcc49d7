// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Result;
use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use dstk_theme::mode::ThemeMode;
use serde::{Deserialize, Serialize};
use smol::fs;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use xdg::BaseDirectories;

/// Environment variable carrying the initial theme signal.
pub const THEME_ENV: &str = "DSTK_THEME";

const XDG_PREFIX: &str = "dstk-0";
const APPEARANCE_FILE: &str = "appearance.toml";

/// A persisted theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the operating system.
    System,
}

impl Display for ThemePreference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        })
    }
}

impl FromStr for ThemePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(anyhow::anyhow!(
                "Unknown theme preference '{}', expected light, dark or system",
                other
            )),
        }
    }
}

/// Detects whether the user prefers a light or dark theme.
pub type ThemeDetector = fn() -> ThemeMode;

/// Ask the operating system for its current appearance.
pub fn os_theme_detector() -> ThemeMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

/// The `[appearance]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceSection {
    /// The preferred theme, if one was ever chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePreference>,
}

/// Appearance preferences, layered from XDG locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    /// Appearance settings
    #[serde(default)]
    pub appearance: AppearanceSection,
}

impl AppearanceSettings {
    /// Load preferences from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/dstk-0/appearance.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/dstk-0/appearance.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/dstk-0/appearance.toml (XDG_CONFIG_HOME)
    ///
    /// Unreadable or malformed files are logged and skipped.
    pub async fn load() -> Result<Self> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
        let mut settings = Self::default();

        for path in xdg_dirs.find_data_files(APPEARANCE_FILE).rev() {
            settings.load_file(&path).await;
        }
        for path in xdg_dirs.find_config_files(APPEARANCE_FILE).rev() {
            settings.load_file(&path).await;
        }
        let user_config_path = xdg_dirs.get_config_home().join(APPEARANCE_FILE);
        if user_config_path.exists() {
            settings.load_file(&user_config_path).await;
        }

        Ok(settings)
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading appearance settings from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match Self::from_toml(&content) {
                Ok(loaded) => self.merge(loaded),
                Err(e) => log::warn!("Failed to parse appearance settings {:?}: {}", path, e),
            },
            Err(e) => log::warn!("Failed to read appearance settings {:?}: {}", path, e),
        }
    }

    /// Parse preferences from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Merge a loaded layer; values it sets win.
    pub fn merge(&mut self, other: AppearanceSettings) {
        if other.appearance.theme.is_some() {
            self.appearance.theme = other.appearance.theme;
        }
    }

    /// Load preferences from custom paths, in order, reporting each file's outcome.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result: Result<()> = async {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to read appearance settings {:?}: {}", path, e))?;
                let loaded = Self::from_toml(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse appearance settings {:?}: {}", path, e))?;
                self.merge(loaded);
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Persist preferences to the user config directory, returning the file written.
    pub async fn save(&self) -> Result<PathBuf> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
        let path = xdg_dirs.get_config_home().join(APPEARANCE_FILE);
        self.save_to(&path).await?;
        Ok(path)
    }

    /// Persist preferences to `path`, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, toml::to_string(self)?).await?;
        log::info!("Saved appearance settings to: {:?}", path);
        Ok(())
    }

    /// The persisted theme preference.
    pub fn theme(&self) -> Option<ThemePreference> {
        self.appearance.theme
    }

    /// Change the theme preference.
    pub fn set_theme(&mut self, preference: ThemePreference) {
        self.appearance.theme = Some(preference);
    }

    /// Decide the theme mode a process starts in.
    ///
    /// A valid environment signal beats the persisted preference, which beats
    /// the light default. `System` asks `detector`.
    pub fn initial_mode(&self, env_signal: Option<&str>, detector: ThemeDetector) -> ThemeMode {
        let from_env = env_signal.and_then(|signal| match signal.parse::<ThemePreference>() {
            Ok(preference) => Some(preference),
            Err(e) => {
                log::warn!("Ignoring {}: {}", THEME_ENV, e);
                None
            },
        });

        match from_env.or(self.appearance.theme) {
            Some(ThemePreference::Light) | None => ThemeMode::Light,
            Some(ThemePreference::Dark) => ThemeMode::Dark,
            Some(ThemePreference::System) => detector(),
        }
    }

    /// [Self::initial_mode] using `DSTK_THEME` and the operating system detector.
    pub fn initial_mode_from_env(&self) -> ThemeMode {
        let signal = std::env::var(THEME_ENV).ok();
        self.initial_mode(signal.as_deref(), os_theme_detector)
    }
}
