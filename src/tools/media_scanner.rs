use crate::config::{MediaKind, MediaTypeTable};
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct MediaFileInfo {
    pub path: PathBuf,
    pub size: u64,
    pub kind: MediaKind,
}

/// 掃描目錄下所有支援的媒體檔案
///
/// exclude 指定要整個略過的子樹（整理時的目的地資料夾）
pub fn scan_media_files(
    directory: &Path,
    exclude: Option<&Path>,
    table: &MediaTypeTable,
) -> Result<Vec<MediaFileInfo>> {
    let mut files: Vec<MediaFileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            exclude.is_none_or(|excluded| !entry.path().starts_with(excluded))
        })
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .par_bridge()
        .filter_map(|entry| {
            let kind = table.classify(entry.path())?;
            let metadata = entry.metadata().ok()?;
            Some(MediaFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
                kind,
            })
        })
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
