use anyhow::{Result, bail};
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// 以字面路徑判斷目的地是否位於來源之內（不等於來源本身）
///
/// 目的地可能尚未存在，因此只做詞法上的絕對化，不解析符號連結
pub fn path_is_nested_inside(inner: &Path, outer: &Path) -> Result<bool> {
    let inner = std::path::absolute(inner)?;
    let outer = std::path::absolute(outer)?;
    Ok(inner != outer && inner.starts_with(&outer))
}
