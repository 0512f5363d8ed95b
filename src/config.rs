use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Rooms created for a fresh in-process store.
pub const DEFAULT_ROOMS: &[&str] = &["general", "random"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    /// "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Write chat transcripts to the data directory
    #[serde(default)]
    pub log_messages: bool,
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            log_messages: false,
            show_timestamps: true,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "roomchat", "roomchat-client") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    parse_settings(&content)
}

fn parse_settings(content: &str) -> Option<Settings> {
    match serde_json::from_str(content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!("Ignoring invalid settings file: {}", e);
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings)?;
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.theme, "dark");
        assert!(!s.log_messages);
        assert!(s.show_timestamps);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let s = parse_settings(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(s.theme, "light");
        assert!(!s.log_messages);
        assert!(s.show_timestamps);

        assert_eq!(parse_settings("{}"), Some(Settings::default()));
    }

    #[test]
    fn test_invalid_settings() {
        assert!(parse_settings("not json").is_none());
    }

    #[test]
    fn test_roundtrip_json() {
        let s = Settings {
            theme: "light".into(),
            log_messages: true,
            show_timestamps: false,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(parse_settings(&json), Some(s));
    }
}
