use super::date_resolver::EffectiveDate;
use crate::tools::ensure_directory_exists;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 單一檔案的搬移計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPlan {
    /// 搬移到 target
    Transfer {
        target: PathBuf,
        /// 使用了編號檔名避開同名檔案
        collision_renamed: bool,
        /// 將覆寫目的地的既有檔案
        overwrite: bool,
    },
    /// 來源已在正確位置，不需搬移
    AlreadyInPlace,
    /// 每個編號檔名都被佔用且繞回來源本身，找不到安全目標
    NoSafeTarget,
}

/// 計算目的地資料夾並規劃不會撞名的最終檔名
///
/// 目的地資料夾（dest_root/年/月）不存在時會建立；
/// 覆寫模式下同名檔案直接成為目標，否則從 (1) 開始找第一個空缺編號
pub fn plan_transfer(
    source_path: &Path,
    dest_root: &Path,
    date: &EffectiveDate,
    overwrite: bool,
) -> Result<TransferPlan> {
    let target_dir = dest_root.join(date.year_folder()).join(date.month_folder());
    ensure_directory_exists(&target_dir)
        .with_context(|| format!("無法建立目的地資料夾: {}", target_dir.display()))?;

    let file_name = source_path
        .file_name()
        .with_context(|| format!("檔案沒有名稱: {}", source_path.display()))?;
    let candidate = target_dir.join(file_name);

    if is_same_file(&candidate, source_path)? {
        return Ok(TransferPlan::AlreadyInPlace);
    }

    if !candidate.exists() {
        return Ok(TransferPlan::Transfer {
            target: candidate,
            collision_renamed: false,
            overwrite: false,
        });
    }

    if overwrite {
        return Ok(TransferPlan::Transfer {
            target: candidate,
            collision_renamed: false,
            overwrite: true,
        });
    }

    let stem = source_path
        .file_stem()
        .unwrap_or(file_name)
        .to_string_lossy();
    let ext = source_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut counter: u64 = 1;
    loop {
        let renamed = target_dir.join(format!("{stem} ({counter}){ext}"));
        if !renamed.exists() {
            return Ok(TransferPlan::Transfer {
                target: renamed,
                collision_renamed: true,
                overwrite: false,
            });
        }
        if is_same_file(&renamed, source_path)? {
            return Ok(TransferPlan::NoSafeTarget);
        }
        counter += 1;
    }
}

/// 兩個路徑是否指向同一個檔案；candidate 不存在時視為不同
fn is_same_file(candidate: &Path, source: &Path) -> Result<bool> {
    if candidate == source {
        return Ok(true);
    }
    if !candidate.exists() {
        return Ok(false);
    }

    let candidate = fs::canonicalize(candidate)?;
    let source = fs::canonicalize(source)
        .with_context(|| format!("無法解析來源路徑: {}", source.display()))?;
    Ok(candidate == source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DATE: EffectiveDate = EffectiveDate {
        year: 2023,
        month: 6,
    };

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let source_dir = temp_dir.path().join("src");
        let dest_root = temp_dir.path().join("dst");
        fs::create_dir_all(&source_dir).unwrap();
        fs::create_dir_all(&dest_root).unwrap();
        (temp_dir, source_dir, dest_root)
    }

    #[test]
    fn test_plan_creates_bucket_and_keeps_name() {
        let (_guard, source_dir, dest_root) = setup();
        let source = source_dir.join("photo.jpg");
        fs::write(&source, "x").unwrap();

        let plan = plan_transfer(&source, &dest_root, &DATE, false).unwrap();

        assert!(dest_root.join("2023/06").is_dir());
        assert_eq!(
            plan,
            TransferPlan::Transfer {
                target: dest_root.join("2023/06/photo.jpg"),
                collision_renamed: false,
                overwrite: false,
            }
        );
    }

    #[test]
    fn test_plan_already_in_place() {
        let (_guard, _source_dir, dest_root) = setup();
        let bucket = dest_root.join("2023/06");
        fs::create_dir_all(&bucket).unwrap();
        let source = bucket.join("photo.jpg");
        fs::write(&source, "x").unwrap();

        let plan = plan_transfer(&source, &dest_root, &DATE, false).unwrap();
        assert_eq!(plan, TransferPlan::AlreadyInPlace);
    }

    #[test]
    fn test_plan_overwrite_reuses_original_name() {
        let (_guard, source_dir, dest_root) = setup();
        let source = source_dir.join("photo.jpg");
        fs::write(&source, "new").unwrap();
        let bucket = dest_root.join("2023/06");
        fs::create_dir_all(&bucket).unwrap();
        fs::write(bucket.join("photo.jpg"), "old").unwrap();

        let plan = plan_transfer(&source, &dest_root, &DATE, true).unwrap();
        assert_eq!(
            plan,
            TransferPlan::Transfer {
                target: bucket.join("photo.jpg"),
                collision_renamed: false,
                overwrite: true,
            }
        );
    }

    #[test]
    fn test_plan_collision_picks_first_free_counter() {
        let (_guard, source_dir, dest_root) = setup();
        let source = source_dir.join("photo.jpg");
        fs::write(&source, "x").unwrap();
        let bucket = dest_root.join("2023/06");
        fs::create_dir_all(&bucket).unwrap();
        fs::write(bucket.join("photo.jpg"), "x").unwrap();
        fs::write(bucket.join("photo (1).jpg"), "x").unwrap();

        // photo.jpg 與 photo (1).jpg 都被佔用，應該規劃 photo (2).jpg
        let plan = plan_transfer(&source, &dest_root, &DATE, false).unwrap();
        assert_eq!(
            plan,
            TransferPlan::Transfer {
                target: bucket.join("photo (2).jpg"),
                collision_renamed: true,
                overwrite: false,
            }
        );
    }

    #[test]
    fn test_plan_keeps_extension_case() {
        let (_guard, source_dir, dest_root) = setup();
        let source = source_dir.join("IMG_0001.JPG");
        fs::write(&source, "x").unwrap();
        let bucket = dest_root.join("2023/06");
        fs::create_dir_all(&bucket).unwrap();
        fs::write(bucket.join("IMG_0001.JPG"), "x").unwrap();

        let plan = plan_transfer(&source, &dest_root, &DATE, false).unwrap();
        assert_eq!(
            plan,
            TransferPlan::Transfer {
                target: bucket.join("IMG_0001 (1).JPG"),
                collision_renamed: true,
                overwrite: false,
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_no_safe_target_when_renamed_candidate_is_source() {
        let (_guard, source_dir, dest_root) = setup();
        let source = source_dir.join("photo.jpg");
        fs::write(&source, "x").unwrap();
        let bucket = dest_root.join("2023/06");
        fs::create_dir_all(&bucket).unwrap();
        fs::write(bucket.join("photo.jpg"), "x").unwrap();
        // 編號檔名透過符號連結指回來源本身
        std::os::unix::fs::symlink(&source, bucket.join("photo (1).jpg")).unwrap();

        let plan = plan_transfer(&source, &dest_root, &DATE, false).unwrap();
        assert_eq!(plan, TransferPlan::NoSafeTarget);
    }
}
