use datapulse_core::Theme;
use datapulse_core::theme::SettingsStore;

/// Settings persisted in the webview's
/// local storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSettings;

fn local_storage() -> Option<web_sys::Storage> {
  web_sys::window().and_then(|window| {
    window.local_storage().ok().flatten()
  })
}

impl SettingsStore for LocalSettings {
  fn get(
    &self,
    key: &str
  ) -> Option<String> {
    local_storage().and_then(|storage| {
      storage.get_item(key).ok().flatten()
    })
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) {
    match local_storage() {
      | Some(storage) => {
        if storage
          .set_item(key, value)
          .is_err()
        {
          tracing::warn!(
            key,
            "failed writing local \
             storage"
          );
        }
      }
      | None => {
        tracing::warn!(
          key,
          "local storage unavailable"
        );
      }
    }
  }
}

pub fn prefers_dark() -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .match_media(
          "(prefers-color-scheme: dark)"
        )
        .ok()
        .flatten()
    })
    .is_some_and(|query| query.matches())
}

/// Puts the theme class on the document
/// root so the stylesheet can switch
/// palettes.
pub fn apply_theme_class(theme: Theme) {
  let root = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.document_element()
    });
  if let Some(root) = root {
    root.set_class_name(theme.as_class());
  }
}
