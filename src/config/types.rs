use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// 最近使用路徑的保留上限
pub const MAX_RECENT_PATHS: usize = 10;

/// 使用者設定檔名（存放於程式工作目錄）
pub const SETTINGS_FILE: &str = "settings.json";

/// 媒體類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Photo => "照片",
            Self::Video => "影片",
        }
    }
}

/// 支援的媒體副檔名表（副檔名含前導點，一律小寫）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTypeTable {
    #[serde(rename = "PHOTO_FILE")]
    pub photo_file: Vec<String>,
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl MediaTypeTable {
    #[must_use]
    pub fn photo_extensions_set(&self) -> HashSet<String> {
        self.photo_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    /// 判斷檔案屬於照片或影片，不支援的類型回傳 None
    #[must_use]
    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))?;

        if self.photo_extensions_set().contains(&ext) {
            Some(MediaKind::Photo)
        } else if self.video_extensions_set().contains(&ext) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_media_file(&self, path: &Path) -> bool {
        self.classify(path).is_some()
    }

    #[must_use]
    pub fn is_photo_file(&self, path: &Path) -> bool {
        self.classify(path) == Some(MediaKind::Photo)
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        self.classify(path) == Some(MediaKind::Video)
    }
}

/// 介面語言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
            Self::ZhCn => "zh-CN",
            Self::JaJp => "ja-JP",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EnUs => "English (US)",
            Self::ZhTw => "繁體中文",
            Self::ZhCn => "简体中文",
            Self::JaJp => "日本語",
        };
        write!(f, "{name}")
    }
}

/// 具名的來源／目的地組合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPreset {
    pub source: String,
    pub destination: String,
}

/// 整理功能的預設選項
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterDefaults {
    pub move_files: bool,
    pub overwrite: bool,
}

impl Default for SorterDefaults {
    fn default() -> Self {
        Self {
            move_files: true,
            overwrite: false,
        }
    }
}

/// 使用者設定，序列化為 settings.json
///
/// 所有欄位都有預設值，舊版設定檔缺少欄位時仍可載入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub recent_sources: Vec<String>,
    pub presets: BTreeMap<String, SortPreset>,
    pub sorter: SorterDefaults,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub media_type_table: MediaTypeTable,
    pub settings: UserSettings,
}
