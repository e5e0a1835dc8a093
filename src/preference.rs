//! The one persisted setting: whether the page is in dark mode.

use std::collections::HashMap;

use crate::error::FxResult;

pub const DARK_MODE_KEY: &str = "darkMode";

/// String key-value storage, shaped like the browser's `localStorage`.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> FxResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> FxResult<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> FxResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> FxResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle button: the mode a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "\u{1F319}",
            Self::Dark => "\u{2600}\u{FE0F}",
        }
    }
}

#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Reads the stored flag once. Only the exact string `"true"` selects
    /// dark mode; a missing key or unreadable store means light.
    pub fn load(store: S) -> Self {
        let theme = match store.get(DARK_MODE_KEY) {
            Ok(Some(value)) if value == "true" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(err) => {
                log::warn!("could not read theme preference, using light mode: {err}");
                Theme::Light
            }
        };
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flips the theme and persists it. The in-memory theme only changes if
    /// the write succeeds.
    pub fn toggle(&mut self) -> FxResult<Theme> {
        let next = self.theme.flipped();
        self.store
            .set(DARK_MODE_KEY, if next.is_dark() { "true" } else { "false" })?;
        self.theme = next;
        log::debug!("theme switched to {next:?}");
        Ok(next)
    }
}
