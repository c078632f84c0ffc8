use crate::config::types::{Config, MediaTypeTable, SETTINGS_FILE, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 編譯時嵌入的媒體類型設定（不需要外部檔案）
const MEDIA_TYPE_TABLE_JSON: &str = include_str!("../data/media_type_table.json");

impl Config {
    pub fn new() -> Result<Self> {
        let media_type_table = Self::load_embedded_media_type_table()?;
        let settings = load_settings_from(Path::new(SETTINGS_FILE)).unwrap_or_default();

        Ok(Self {
            media_type_table,
            settings,
        })
    }

    /// 從編譯時嵌入的 JSON 載入媒體類型表
    fn load_embedded_media_type_table() -> Result<MediaTypeTable> {
        serde_json::from_str(MEDIA_TYPE_TABLE_JSON).context("無法解析嵌入的媒體類型設定")
    }
}

pub fn load_settings_from(path: &Path) -> Result<UserSettings> {
    if !path.exists() {
        return Ok(UserSettings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::save::save_settings_to;
    use crate::config::types::SortPreset;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_table_parses() {
        let config = Config::new().unwrap();
        assert!(!config.media_type_table.photo_file.is_empty());
        assert!(!config.media_type_table.video_file.is_empty());
    }

    #[test]
    fn test_missing_settings_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_settings_from(&temp_dir.path().join("settings.json")).unwrap();
        assert!(settings.presets.is_empty());
        assert!(settings.recent_sources.is_empty());
    }

    #[test]
    fn test_settings_persist_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = UserSettings::default();
        settings.presets.insert(
            "假期".to_string(),
            SortPreset {
                source: "/media/card".to_string(),
                destination: "/archive/photos".to_string(),
            },
        );
        settings.recent_sources.push("/media/card".to_string());

        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path).unwrap();

        assert_eq!(loaded.recent_sources, vec!["/media/card".to_string()]);
        assert_eq!(
            loaded.presets.get("假期").unwrap().destination,
            "/archive/photos"
        );
    }
}
