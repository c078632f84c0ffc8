use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 移動檔案到目標位置
///
/// 優先使用 rename，失敗時（例如跨檔案系統）改用複製後刪除
pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }

    if let Err(e) = copy_with_times(source, target) {
        // 清掉複製到一半的目標檔
        let _ = fs::remove_file(target);
        return Err(e);
    }

    fs::remove_file(source).with_context(|| format!("刪除原檔案失敗: {}", source.display()))?;

    Ok(())
}

/// 複製檔案到目標位置，保留來源的內容與修改時間
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    copy_with_times(source, target)
}

fn copy_with_times(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target)
        .with_context(|| format!("複製檔案失敗: {} -> {}", source.display(), target.display()))?;

    // 目標沿用來源的修改時間，日期整理才不會因複製而改變分桶
    let modified = fs::metadata(source)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("無法讀取修改時間: {}", source.display()))?;

    fs::OpenOptions::new()
        .write(true)
        .open(target)
        .and_then(|file| file.set_modified(modified))
        .with_context(|| format!("無法設定修改時間: {}", target.display()))?;

    Ok(())
}
