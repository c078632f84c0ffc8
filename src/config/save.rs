use crate::config::types::{MAX_RECENT_PATHS, SETTINGS_FILE, SortPreset, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    // Save to settings.json in the current working directory
    save_settings_to(Path::new(SETTINGS_FILE), settings)
}

pub fn save_settings_to(path: &Path, settings: &UserSettings) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的來源路徑
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_source(settings: &mut UserSettings, path: &str) {
    // 移除已存在的相同路徑
    settings.recent_sources.retain(|p| p != path);

    // 加入到最前面
    settings.recent_sources.insert(0, path.to_string());

    // 限制數量
    settings.recent_sources.truncate(MAX_RECENT_PATHS);
}

/// 新增或覆寫具名預設集
pub fn store_preset(settings: &mut UserSettings, name: &str, source: &str, destination: &str) {
    settings.presets.insert(
        name.to_string(),
        SortPreset {
            source: source.to_string(),
            destination: destination.to_string(),
        },
    );
}

/// 刪除具名預設集，回傳是否存在
pub fn remove_preset(settings: &mut UserSettings, name: &str) -> bool {
    settings.presets.remove(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_recent_source_deduplicates() {
        let mut settings = UserSettings::default();
        add_recent_source(&mut settings, "/a");
        add_recent_source(&mut settings, "/b");
        add_recent_source(&mut settings, "/a");

        // 重複的路徑應該移到最前面而不是重複出現
        assert_eq!(settings.recent_sources, vec!["/a", "/b"]);
    }

    #[test]
    fn test_add_recent_source_caps_length() {
        let mut settings = UserSettings::default();
        for i in 0..20 {
            add_recent_source(&mut settings, &format!("/path/{i}"));
        }

        assert_eq!(settings.recent_sources.len(), MAX_RECENT_PATHS);
        assert_eq!(settings.recent_sources[0], "/path/19");
    }

    #[test]
    fn test_store_and_remove_preset() {
        let mut settings = UserSettings::default();
        store_preset(&mut settings, "backup", "/src", "/dst");
        assert_eq!(settings.presets.get("backup").unwrap().source, "/src");

        // 同名預設集直接覆寫
        store_preset(&mut settings, "backup", "/src2", "/dst2");
        assert_eq!(settings.presets.get("backup").unwrap().source, "/src2");

        assert!(remove_preset(&mut settings, "backup"));
        assert!(!remove_preset(&mut settings, "backup"));
    }
}
