use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use sugoroku_core::{ControllerConfig, Timing};

const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// Optional launch settings. Command-line flags take precedence over every
/// field here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub timing: Option<Timing>,
    #[serde(default)]
    pub bell: Option<bool>,
    #[serde(default)]
    pub mute: Option<bool>,
}

fn default_version() -> u32 {
    SETTINGS_SCHEMA_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_SCHEMA_VERSION,
            locale: None,
            seed: None,
            timing: None,
            bell: None,
            mute: None,
        }
    }
}

impl Settings {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            timing: self.timing.unwrap_or_default(),
            ..ControllerConfig::default()
        }
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SUGOROKU_SETTINGS") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".sugoroku.json"))
}

pub fn load_settings_file(path: &Path) -> Result<Settings, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let settings: Settings = serde_json::from_str(&body).map_err(|err| err.to_string())?;
    if settings.version != SETTINGS_SCHEMA_VERSION {
        return Err(format!(
            "unsupported settings version {} (expected {})",
            settings.version, SETTINGS_SCHEMA_VERSION
        ));
    }
    settings
        .controller_config()
        .validate()
        .map_err(|err| err.to_string())?;
    Ok(settings)
}

/// Loads the default settings file when present. A missing file is not an
/// error; a malformed one is.
pub fn load_default_settings() -> Result<Settings, String> {
    match default_settings_path() {
        Some(path) if path.exists() => load_settings_file(&path),
        _ => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn load_partial_settings_keeps_default_timing() {
        let file = unique_temp_file();
        let body = r#"
{
  "locale":"ja",
  "seed":99,
  "timing":{"reveal_ms":3000}
}
"#;
        std::fs::write(&file, body).expect("write");
        let loaded = load_settings_file(&file).expect("load");
        assert_eq!(loaded.seed, Some(99));
        assert_eq!(loaded.locale.as_deref(), Some("ja"));
        let config = loaded.controller_config();
        assert_eq!(config.timing.reveal_ms, 3000);
        assert_eq!(config.timing.flip_ms, 2000);
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn rejects_timing_that_reveals_before_flip() {
        let file = unique_temp_file();
        std::fs::write(&file, r#"{"timing":{"reveal_ms":100}}"#).expect("write");
        assert!(load_settings_file(&file).is_err());
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn rejects_unlock_before_every_card_is_dealt() {
        let file = unique_temp_file();
        std::fs::write(&file, r#"{"timing":{"shuffle_unlock_ms":100}}"#).expect("write");
        assert!(load_settings_file(&file).is_err());
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn rejects_unknown_version() {
        let file = unique_temp_file();
        std::fs::write(&file, r#"{"version":9}"#).expect("write");
        let err = load_settings_file(&file).expect_err("version");
        assert!(err.contains("unsupported settings version"));
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn empty_object_is_default() {
        let file = unique_temp_file();
        std::fs::write(&file, "{}").expect("write");
        let loaded = load_settings_file(&file).expect("load");
        assert_eq!(loaded.version, SETTINGS_SCHEMA_VERSION);
        assert_eq!(loaded.controller_config(), ControllerConfig::default());
        let _ = std::fs::remove_file(file);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "sugoroku_settings_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
