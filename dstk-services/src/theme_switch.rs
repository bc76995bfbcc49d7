// SPDX-License-Identifier: LGPL-3.0-only
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use dstk_theme::mode::ThemeMode;
use dstk_theme::request::StyleRequest;

const LIGHT: u8 = 0;
const DARK: u8 = 1;

fn encode(mode: ThemeMode) -> u8 {
    match mode {
        ThemeMode::Light => LIGHT,
        ThemeMode::Dark => DARK,
    }
}

fn decode(value: u8) -> ThemeMode {
    if value == DARK {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    }
}

/// The process-wide light/dark cell.
///
/// Every read is a single atomic load, so a reader never observes a torn
/// value while another thread toggles the mode.
#[derive(Debug)]
pub struct ThemeSwitch {
    mode: AtomicU8,
}

impl ThemeSwitch {
    /// Create a switch starting in `initial`.
    pub fn new(initial: ThemeMode) -> Self {
        Self {
            mode: AtomicU8::new(encode(initial)),
        }
    }

    /// The current theme mode.
    pub fn current(&self) -> ThemeMode {
        decode(self.mode.load(Ordering::Acquire))
    }

    /// Set the theme mode.
    pub fn set(&self, mode: ThemeMode) {
        let previous = decode(self.mode.swap(encode(mode), Ordering::AcqRel));
        if previous != mode {
            log::debug!("Theme switched from {} to {}", previous, mode);
        }
    }

    /// Flip between light and dark, returning the new mode.
    pub fn toggle(&self) -> ThemeMode {
        let previous = decode(self.mode.fetch_xor(DARK, Ordering::AcqRel));
        let current = previous.toggled();
        log::debug!("Theme toggled to {}", current);
        current
    }

    /// Stamp a request with the current mode.
    pub fn snapshot(&self, request: StyleRequest) -> StyleRequest {
        request.with_theme(self.current())
    }
}

impl Default for ThemeSwitch {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

/// A thread-safe, shared theme switch.
pub type SharedThemeSwitch = Arc<ThemeSwitch>;

/// Create a new shared theme switch.
pub fn create_shared_theme_switch(initial: ThemeMode) -> SharedThemeSwitch {
    Arc::new(ThemeSwitch::new(initial))
}
