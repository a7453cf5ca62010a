//! Store settings, resolved once at
//! backend start.
//!
//! Environment variables win over the
//! `[store]` table of `datapulse.toml`.
//! Empty values count as absent, and a
//! missing or malformed file never stops
//! the app: it simply comes up not
//! configured.

use std::fmt;
use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::{
  debug,
  info,
  warn
};

pub const CONFIG_FILE_NAME: &str =
  "datapulse.toml";
pub const CONFIG_PATH_ENV: &str =
  "DATAPULSE_CONFIG";
pub const DEFAULT_TABLE: &str =
  "data_tasks";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const URL_VARS: [&str; 3] = [
  "DATAPULSE_STORE_URL",
  "SUPABASE_URL",
  "VITE_SUPABASE_URL"
];
const KEY_VARS: [&str; 3] = [
  "DATAPULSE_STORE_KEY",
  "SUPABASE_ANON_KEY",
  "VITE_SUPABASE_ANON_KEY"
];
const TABLE_VAR: &str =
  "DATAPULSE_STORE_TABLE";
const TIMEOUT_VAR: &str =
  "DATAPULSE_STORE_TIMEOUT_SECS";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  #[serde(default)]
  store: StoreSection
}

#[derive(Debug, Default, Deserialize)]
struct StoreSection {
  url:          Option<String>,
  key:          Option<String>,
  table:        Option<String>,
  timeout_secs: Option<u64>
}

#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
  pub url:     String,
  pub key:     String,
  pub table:   String,
  pub timeout: Duration
}

impl fmt::Debug for StoreConfig {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.debug_struct("StoreConfig")
      .field("url", &self.url)
      .field(
        "key",
        &if self.key.is_empty() {
          "<unset>"
        } else {
          "<redacted>"
        }
      )
      .field("table", &self.table)
      .field("timeout", &self.timeout)
      .finish()
  }
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      url:     String::new(),
      key:     String::new(),
      table:   DEFAULT_TABLE.to_string(),
      timeout: Duration::from_secs(
        DEFAULT_TIMEOUT_SECS
      )
    }
  }
}

impl StoreConfig {
  /// Both credentials present and
  /// non-empty.
  pub fn is_configured(&self) -> bool {
    !self.url.trim().is_empty()
      && !self.key.trim().is_empty()
  }

  /// Resolves from the process
  /// environment and the first config
  /// file found.
  pub fn load() -> Self {
    let env = |name: &str| {
      std::env::var(name).ok()
    };
    let file = find_config_file(&env);
    let config =
      Self::load_from(&env, file.as_deref());

    info!(
      configured = config.is_configured(),
      table = %config.table,
      timeout_secs = config.timeout.as_secs(),
      config_file = ?file,
      "resolved data store settings"
    );
    config
  }

  pub fn load_from(
    env: &impl Fn(&str) -> Option<String>,
    file: Option<&Path>
  ) -> Self {
    let section = match file {
      | Some(path) => {
        match read_store_section(path) {
          | Ok(section) => section,
          | Err(err) => {
            warn!(
              path = %path.display(),
              error = %format!("{err:#}"),
              "ignoring unreadable \
               config file"
            );
            StoreSection::default()
          }
        }
      }
      | None => {
        debug!(
          "no config file found; \
           using environment only"
        );
        StoreSection::default()
      }
    };

    Self::merge(env, section)
  }

  fn merge(
    env: &impl Fn(&str) -> Option<String>,
    file: StoreSection
  ) -> Self {
    let url = first_present(env, &URL_VARS)
      .or_else(|| non_empty(file.url))
      .unwrap_or_default();
    let key = first_present(env, &KEY_VARS)
      .or_else(|| non_empty(file.key))
      .unwrap_or_default();
    let table = first_present(env, &[
      TABLE_VAR
    ])
    .or_else(|| non_empty(file.table))
    .unwrap_or_else(|| {
      DEFAULT_TABLE.to_string()
    });

    let env_timeout =
      first_present(env, &[TIMEOUT_VAR])
        .and_then(|raw| {
          match raw.parse::<u64>() {
            | Ok(secs) => Some(secs),
            | Err(err) => {
              warn!(
                value = %raw,
                error = %err,
                "ignoring invalid store \
                 timeout"
              );
              None
            }
          }
        });
    let timeout_secs = env_timeout
      .or(file.timeout_secs)
      .filter(|secs| *secs > 0)
      .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Self {
      url: url.trim().to_string(),
      key: key.trim().to_string(),
      table: table.trim().to_string(),
      timeout: Duration::from_secs(
        timeout_secs
      )
    }
  }
}

fn first_present(
  env: &impl Fn(&str) -> Option<String>,
  names: &[&str]
) -> Option<String> {
  names
    .iter()
    .find_map(|name| non_empty(env(name)))
}

fn non_empty(
  value: Option<String>
) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

fn read_store_section(
  path: &Path
) -> anyhow::Result<StoreSection> {
  let raw = fs::read_to_string(path)
    .with_context(|| {
      format!(
        "failed to read {}",
        path.display()
      )
    })?;
  let parsed: ConfigFile =
    toml::from_str(&raw).with_context(
      || {
        format!(
          "failed to parse TOML {}",
          path.display()
        )
      }
    )?;
  Ok(parsed.store)
}

/// Explicit override first, then the
/// working directory and its ancestors,
/// then the user config directory.
fn candidate_config_paths(
  env: &impl Fn(&str) -> Option<String>
) -> Vec<PathBuf> {
  let mut candidates = Vec::new();

  if let Some(path) =
    non_empty(env(CONFIG_PATH_ENV))
  {
    candidates.push(PathBuf::from(
      path.trim()
    ));
  }

  if let Ok(cwd) = std::env::current_dir()
  {
    let mut cursor = Some(cwd.as_path());
    while let Some(path) = cursor {
      candidates
        .push(path.join(CONFIG_FILE_NAME));
      cursor = path.parent();
    }
  }

  if let Some(config_dir) =
    dirs::config_dir()
  {
    candidates.push(
      config_dir
        .join("datapulse")
        .join(CONFIG_FILE_NAME)
    );
  }

  let mut unique =
    Vec::<PathBuf>::new();
  for candidate in candidates {
    if !unique.contains(&candidate) {
      unique.push(candidate);
    }
  }
  unique
}

fn find_config_file(
  env: &impl Fn(&str) -> Option<String>
) -> Option<PathBuf> {
  candidate_config_paths(env)
    .into_iter()
    .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tempfile::tempdir;

  use super::*;

  fn env_of(
    pairs: &[(&str, &str)]
  ) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
      pairs
        .iter()
        .map(|(k, v)| {
          (k.to_string(), v.to_string())
        })
        .collect();
    move |name: &str| map.get(name).cloned()
  }

  #[test]
  fn empty_environment_is_not_configured()
  {
    let config = StoreConfig::load_from(
      &env_of(&[]),
      None
    );
    assert!(!config.is_configured());
    assert_eq!(config.table, DEFAULT_TABLE);
    assert_eq!(
      config.timeout,
      Duration::from_secs(
        DEFAULT_TIMEOUT_SECS
      )
    );
  }

  #[test]
  fn one_credential_is_not_enough() {
    let config = StoreConfig::load_from(
      &env_of(&[
        (
          "DATAPULSE_STORE_URL",
          "https://db.example.test"
        ),
        ("DATAPULSE_STORE_KEY", "   ")
      ]),
      None
    );
    assert!(!config.is_configured());
  }

  #[test]
  fn hosted_service_names_are_fallbacks()
  {
    let config = StoreConfig::load_from(
      &env_of(&[
        (
          "SUPABASE_URL",
          "https://abc.example.test"
        ),
        ("VITE_SUPABASE_ANON_KEY", "anon"),
        (
          "DATAPULSE_STORE_URL",
          ""
        )
      ]),
      None
    );
    assert!(config.is_configured());
    assert_eq!(
      config.url,
      "https://abc.example.test"
    );
    assert_eq!(config.key, "anon");
  }

  #[test]
  fn environment_overrides_file() {
    let dir = tempdir().expect("tempdir");
    let path =
      dir.path().join(CONFIG_FILE_NAME);
    fs::write(
      &path,
      "[store]\n\
       url = \"https://file.example.test\"\n\
       key = \"file-key\"\n\
       table = \"monitored\"\n\
       timeout_secs = 30\n"
    )
    .expect("write config");

    let config = StoreConfig::load_from(
      &env_of(&[(
        "DATAPULSE_STORE_KEY",
        "env-key"
      )]),
      Some(&path)
    );

    assert_eq!(
      config.url,
      "https://file.example.test"
    );
    assert_eq!(config.key, "env-key");
    assert_eq!(config.table, "monitored");
    assert_eq!(
      config.timeout,
      Duration::from_secs(30)
    );
  }

  #[test]
  fn malformed_file_is_ignored() {
    let dir = tempdir().expect("tempdir");
    let path =
      dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[store\nurl = ")
      .expect("write config");

    let config = StoreConfig::load_from(
      &env_of(&[
        (
          "DATAPULSE_STORE_URL",
          "https://db.example.test"
        ),
        ("DATAPULSE_STORE_KEY", "k")
      ]),
      Some(&path)
    );
    assert!(config.is_configured());
    assert_eq!(config.table, DEFAULT_TABLE);
  }

  #[test]
  fn zero_or_invalid_timeout_falls_back() {
    let config = StoreConfig::load_from(
      &env_of(&[(
        "DATAPULSE_STORE_TIMEOUT_SECS",
        "soon"
      )]),
      None
    );
    assert_eq!(
      config.timeout,
      Duration::from_secs(
        DEFAULT_TIMEOUT_SECS
      )
    );

    let config = StoreConfig::load_from(
      &env_of(&[(
        "DATAPULSE_STORE_TIMEOUT_SECS",
        "0"
      )]),
      None
    );
    assert_eq!(
      config.timeout,
      Duration::from_secs(
        DEFAULT_TIMEOUT_SECS
      )
    );
  }

  #[test]
  fn debug_output_hides_the_key() {
    let config = StoreConfig {
      key: "super-secret".to_string(),
      ..StoreConfig::default()
    };
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
  }

  #[test]
  fn override_path_is_searched_first() {
    let candidates =
      candidate_config_paths(&env_of(&[(
        CONFIG_PATH_ENV,
        "/etc/datapulse/custom.toml"
      )]));
    assert_eq!(
      candidates.first(),
      Some(&PathBuf::from(
        "/etc/datapulse/custom.toml"
      ))
    );
  }
}
