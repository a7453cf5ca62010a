use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

/// Settings key holding the theme
/// preference.
pub const THEME_STORAGE_KEY: &str =
  "theme";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  /// Class applied to the document root.
  pub fn as_class(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn from_storage_value(
    raw: &str
  ) -> Option<Self> {
    match raw.trim() {
      | "light" => Some(Self::Light),
      | "dark" => Some(Self::Dark),
      | _ => None
    }
  }

  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Light => {
        "Switch to dark mode"
      }
      | Self::Dark => {
        "Switch to light mode"
      }
    }
  }
}

/// Durable key/value settings. Browser
/// local storage in the app, a map in
/// tests.
pub trait SettingsStore {
  fn get(&self, key: &str)
  -> Option<String>;

  fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemorySettings {
  entries: RefCell<HashMap<String, String>>
}

impl SettingsStore for MemorySettings {
  fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.entries.borrow().get(key).cloned()
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) {
    self
      .entries
      .borrow_mut()
      .insert(
        key.to_string(),
        value.to_string()
      );
  }
}

/// Stored preference first, then the
/// environment's dark-mode signal.
pub fn load_theme(
  settings: &impl SettingsStore,
  prefers_dark: bool
) -> Theme {
  let stored = settings
    .get(THEME_STORAGE_KEY)
    .and_then(|raw| {
      Theme::from_storage_value(&raw)
    });

  match stored {
    | Some(theme) => theme,
    | None if prefers_dark => {
      Theme::Dark
    }
    | None => Theme::Light
  }
}

pub fn save_theme(
  settings: &impl SettingsStore,
  theme: Theme
) {
  settings.set(
    THEME_STORAGE_KEY,
    theme.storage_value()
  );
  debug!(
    theme = theme.storage_value(),
    "persisted theme preference"
  );
}

/// Persists the theme each time the board
/// settles on a new one. The startup value
/// is only recorded, so an unset preference
/// keeps following the environment.
#[derive(Debug, Default)]
pub struct ThemeTracker {
  last: Option<Theme>
}

impl ThemeTracker {
  /// Returns whether `theme` was written.
  pub fn observe(
    &mut self,
    settings: &impl SettingsStore,
    theme: Theme
  ) -> bool {
    let previous = self.last.replace(theme);
    match previous {
      | Some(previous)
        if previous != theme =>
      {
        save_theme(settings, theme);
        true
      }
      | _ => false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_preference_follows_environment()
  {
    let settings =
      MemorySettings::default();
    assert_eq!(
      load_theme(&settings, true),
      Theme::Dark
    );
    assert_eq!(
      load_theme(&settings, false),
      Theme::Light
    );
  }

  #[test]
  fn stored_preference_beats_environment()
  {
    let settings =
      MemorySettings::default();
    settings
      .set(THEME_STORAGE_KEY, "light");
    assert_eq!(
      load_theme(&settings, true),
      Theme::Light
    );
  }

  #[test]
  fn garbage_preference_is_ignored() {
    let settings =
      MemorySettings::default();
    settings
      .set(THEME_STORAGE_KEY, "sepia");
    assert_eq!(
      load_theme(&settings, true),
      Theme::Dark
    );
  }

  #[test]
  fn toggling_twice_is_identity() {
    for theme in
      [Theme::Light, Theme::Dark]
    {
      assert_eq!(
        theme.toggled().toggled(),
        theme
      );
    }
  }

  #[test]
  fn saved_theme_survives_restart() {
    let settings =
      MemorySettings::default();
    let first_run =
      load_theme(&settings, false);
    save_theme(
      &settings,
      first_run.toggled()
    );

    let second_run =
      load_theme(&settings, false);
    assert_eq!(second_run, Theme::Dark);
  }

  #[test]
  fn tracker_skips_startup_and_saves_changes()
  {
    let settings =
      MemorySettings::default();
    let mut tracker =
      ThemeTracker::default();

    assert!(!tracker.observe(
      &settings,
      Theme::Dark
    ));
    assert_eq!(
      settings.get(THEME_STORAGE_KEY),
      None
    );

    assert!(tracker.observe(
      &settings,
      Theme::Light
    ));
    assert_eq!(
      settings
        .get(THEME_STORAGE_KEY)
        .as_deref(),
      Some("light")
    );

    assert!(!tracker.observe(
      &settings,
      Theme::Light
    ));
    assert!(tracker.observe(
      &settings,
      Theme::Dark
    ));
    assert_eq!(
      load_theme(&settings, false),
      Theme::Dark
    );
  }
}
