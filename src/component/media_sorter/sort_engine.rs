//! 媒體整理引擎
//!
//! 走訪來源樹，依有效日期將媒體檔案搬移或複製到「目的地/年/月」。
//! 引擎本身不依賴任何介面，事件透過回呼交給呼叫端呈現。

use super::date_resolver::resolve_effective_date;
use super::path_planner::{TransferPlan, plan_transfer};
use crate::config::MediaTypeTable;
use crate::tools::{
    copy_file, ensure_directory_exists, move_file, path_is_nested_inside,
    validate_directory_exists,
};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// 單次整理的參數，執行期間不會變動
#[derive(Debug, Clone)]
pub struct SortOptions {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// true 為移動，false 為複製
    pub move_files: bool,
    /// 目的地已有同名檔案時是否覆寫
    pub overwrite: bool,
}

/// 整理結果統計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl SortReport {
    /// 取得訪問過的媒體檔案總數
    #[must_use]
    pub const fn total_files(&self) -> usize {
        self.processed + self.skipped + self.errors
    }
}

/// 整理過程中回報給呼叫端的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortEvent {
    /// 略過目的地子樹，不再往下走訪
    DestinationDirSkipped { path: PathBuf },
    /// 目的地的同名檔案即將被覆寫
    OverwritingExisting { file_name: String, bucket: String },
    /// 同名檔案已存在，改用編號檔名
    CollisionRenamed {
        file_name: String,
        new_name: String,
        bucket: String,
    },
    FileMoved {
        file_name: String,
        relative_target: PathBuf,
    },
    FileCopied {
        file_name: String,
        relative_target: PathBuf,
    },
    /// 檔案已在正確位置
    SkippedInPlace { file_name: String },
    /// 編號檔名繞回來源本身，為避免資料遺失而跳過
    SkippedUnsafeRename { file_name: String },
    FileFailed { file_name: String, reason: String },
    /// 收到中斷訊號，提前結束
    Interrupted,
}

enum FileOutcome {
    Processed,
    Skipped,
}

/// 媒體整理引擎
pub struct MediaSortEngine {
    media_type_table: MediaTypeTable,
    shutdown_signal: Arc<AtomicBool>,
}

impl MediaSortEngine {
    pub const fn new(media_type_table: MediaTypeTable, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            media_type_table,
            shutdown_signal,
        }
    }

    /// 執行一次整理
    ///
    /// 事前驗證失敗會直接回傳錯誤且不碰任何檔案；
    /// 單一檔案的失敗只計入 errors，不會中止整個流程。
    /// 每個被訪問的媒體檔案恰好讓三個計數器之一加一。
    pub fn sort(
        &self,
        options: &SortOptions,
        on_event: &mut dyn FnMut(SortEvent),
    ) -> Result<SortReport> {
        validate_directory_exists(&options.source_dir)?;
        ensure_directory_exists(&options.dest_dir)
            .with_context(|| format!("無法建立目的地資料夾: {}", options.dest_dir.display()))?;
        validate_directory_exists(&options.dest_dir)?;

        let source_root = fs::canonicalize(&options.source_dir)?;
        let dest_root = fs::canonicalize(&options.dest_dir)?;
        let exclude_dest = source_root != dest_root;

        info!(
            "開始整理: {} -> {} ({})",
            source_root.display(),
            dest_root.display(),
            if options.move_files { "移動" } else { "複製" }
        );

        let mut report = SortReport::default();
        let mut walker = WalkDir::new(&source_root).follow_links(false).into_iter();

        while let Some(entry) = walker.next() {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止處理");
                on_event(SortEvent::Interrupted);
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("走訪來源時發生錯誤: {e}");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                // 目的地在來源內部時不重新處理這次執行剛寫入的檔案
                if exclude_dest && entry.path().starts_with(&dest_root) {
                    debug!("略過目的地子樹: {}", entry.path().display());
                    on_event(SortEvent::DestinationDirSkipped {
                        path: entry.path().to_path_buf(),
                    });
                    walker.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            if !self.media_type_table.is_media_file(entry.path()) {
                continue;
            }

            match self.process_file(entry.path(), &dest_root, options, on_event) {
                Ok(FileOutcome::Processed) => report.processed += 1,
                Ok(FileOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    warn!("處理檔案失敗 {}: {e:#}", entry.path().display());
                    on_event(SortEvent::FileFailed {
                        file_name: display_name(entry.path()),
                        reason: format!("{e:#}"),
                    });
                    report.errors += 1;
                }
            }
        }

        info!(
            "整理完成 - 成功: {}, 跳過: {}, 失敗: {}",
            report.processed, report.skipped, report.errors
        );
        Ok(report)
    }

    fn process_file(
        &self,
        source_path: &Path,
        dest_root: &Path,
        options: &SortOptions,
        on_event: &mut dyn FnMut(SortEvent),
    ) -> Result<FileOutcome> {
        let file_name = display_name(source_path);
        let metadata = fs::metadata(source_path)
            .with_context(|| format!("無法讀取檔案資訊: {}", source_path.display()))?;
        let date = resolve_effective_date(&metadata)?;

        match plan_transfer(source_path, dest_root, &date, options.overwrite)? {
            TransferPlan::AlreadyInPlace => {
                debug!("已在正確位置: {}", source_path.display());
                on_event(SortEvent::SkippedInPlace { file_name });
                Ok(FileOutcome::Skipped)
            }
            TransferPlan::NoSafeTarget => {
                on_event(SortEvent::SkippedUnsafeRename { file_name });
                Ok(FileOutcome::Skipped)
            }
            TransferPlan::Transfer {
                target,
                collision_renamed,
                overwrite,
            } => {
                if overwrite {
                    on_event(SortEvent::OverwritingExisting {
                        file_name: file_name.clone(),
                        bucket: date.bucket(),
                    });
                } else if collision_renamed {
                    on_event(SortEvent::CollisionRenamed {
                        file_name: file_name.clone(),
                        new_name: display_name(&target),
                        bucket: date.bucket(),
                    });
                }

                if options.move_files {
                    move_file(source_path, &target)?;
                } else {
                    copy_file(source_path, &target)?;
                }

                debug!(
                    "{}: {} -> {}",
                    if options.move_files { "移動" } else { "複製" },
                    source_path.display(),
                    target.display()
                );

                let relative_target = target
                    .strip_prefix(dest_root)
                    .unwrap_or(&target)
                    .to_path_buf();
                if options.move_files {
                    on_event(SortEvent::FileMoved {
                        file_name,
                        relative_target,
                    });
                } else {
                    on_event(SortEvent::FileCopied {
                        file_name,
                        relative_target,
                    });
                }
                Ok(FileOutcome::Processed)
            }
        }
    }
}

/// 目的地是否位於來源之內（且不等於來源）
///
/// 成立時呼叫端必須先取得使用者明確確認才執行整理
pub fn destination_nested_in_source(options: &SortOptions) -> Result<bool> {
    path_is_nested_inside(&options.dest_dir, &options.source_dir)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
