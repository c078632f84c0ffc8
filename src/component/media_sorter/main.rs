//! 依日期整理照片影片主模組
//!
//! 負責互動流程：選擇路徑與選項、巢狀目的地確認、預掃描摘要、
//! 驅動整理引擎並呈現進度與結果

use super::sort_engine::{
    MediaSortEngine, SortEvent, SortOptions, SortReport, destination_nested_in_source,
};
use crate::config::save::{add_recent_source, save_settings, store_preset};
use crate::config::{Config, MediaKind};
use crate::tools::{MediaFileInfo, scan_media_files, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 依日期整理照片影片元件
pub struct MediaSorter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl MediaSorter {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 依日期整理照片影片 ===").cyan().bold());

        let Some((source_input, dest_input)) = self.prompt_source_and_dest()? else {
            return Ok(()); // ESC pressed
        };

        let source_dir = PathBuf::from(&source_input);
        validate_directory_exists(&source_dir)?;

        let options = SortOptions {
            source_dir,
            dest_dir: PathBuf::from(&dest_input),
            move_files: self.prompt_transfer_mode()?,
            overwrite: self.prompt_overwrite()?,
        };

        // 更新路徑歷史與預設選項並儲存
        {
            let mut settings = self.config.settings.clone();
            add_recent_source(&mut settings, &source_input);
            settings.sorter.move_files = options.move_files;
            settings.sorter.overwrite = options.overwrite;
            if let Err(e) = save_settings(&settings) {
                warn!("無法儲存設定: {e}");
            }
        }

        // 目的地在來源內部時需要明確確認，拒絕就不碰任何檔案
        let nested = destination_nested_in_source(&options)?;
        if nested && !self.confirm_nested_destination()? {
            println!("{}", style("操作已取消").yellow());
            return Ok(());
        }

        // 預掃描：顯示待整理的媒體數量
        println!("{}", style("掃描媒體檔案中...").dim());
        let source_abs = std::path::absolute(&options.source_dir)?;
        let dest_abs = std::path::absolute(&options.dest_dir)?;
        let exclude = if nested { Some(dest_abs.as_path()) } else { None };
        let files = scan_media_files(&source_abs, exclude, &self.config.media_type_table)?;

        if files.is_empty() {
            println!("{}", style("找不到任何媒體檔案").yellow());
            return Ok(());
        }

        self.print_scan_summary(&files);

        if !self.confirm_sort(options.move_files)? {
            println!("{}", style("操作已取消").yellow());
            return Ok(());
        }

        // 檢查中斷訊號
        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            return Ok(());
        }

        let report = self.execute_sort(&options, files.len())?;
        self.display_summary(&report, options.move_files);

        Ok(())
    }

    /// 選擇預設集或手動輸入來源與目的地
    fn prompt_source_and_dest(&self) -> Result<Option<(String, String)>> {
        let presets: Vec<_> = self.config.settings.presets.iter().collect();
        if presets.is_empty() {
            return self.prompt_manual_paths().map(Some);
        }

        let mut items: Vec<String> = presets
            .iter()
            .map(|(name, preset)| format!("{} ({} -> {})", name, preset.source, preset.destination))
            .collect();
        items.push("手動輸入路徑...".to_string());

        println!("{}", style("(按 ESC 返回主選單)").dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇預設集")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < presets.len() => {
                let (_, preset) = presets[idx];
                Ok(Some((preset.source.clone(), preset.destination.clone())))
            }
            Some(_) => self.prompt_manual_paths().map(Some),
        }
    }

    fn prompt_manual_paths(&self) -> Result<(String, String)> {
        let source = self.prompt_source_path()?;
        let destination: String = Input::new()
            .with_prompt("請輸入目的地資料夾路徑")
            .interact_text()?;
        let destination = destination.trim().to_string();

        self.offer_preset_save(&source, &destination)?;
        Ok((source, destination))
    }

    fn prompt_source_path(&self) -> Result<String> {
        let recent = &self.config.settings.recent_sources;

        // 如果沒有歷史路徑，直接輸入
        if recent.is_empty() {
            let path: String = Input::new()
                .with_prompt("請輸入來源資料夾路徑")
                .interact_text()?;
            return Ok(path.trim().to_string());
        }

        // 建立選項清單：歷史路徑 + 輸入新路徑
        let mut items: Vec<String> = recent
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let exists = Path::new(p).exists();
                let indicator = if exists { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        items.push("輸入新路徑...".to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇來源路徑")
            .items(&items)
            .default(0)
            .interact()?;

        if selection < recent.len() {
            Ok(recent[selection].clone())
        } else {
            let path: String = Input::new()
                .with_prompt("請輸入來源資料夾路徑")
                .interact_text()?;
            Ok(path.trim().to_string())
        }
    }

    /// 手動輸入的路徑組合可以存成具名預設集
    fn offer_preset_save(&self, source: &str, destination: &str) -> Result<()> {
        if source.is_empty() || destination.is_empty() {
            return Ok(());
        }

        let save = Confirm::new()
            .with_prompt("將這組路徑儲存為預設集？")
            .default(false)
            .interact()?;
        if !save {
            return Ok(());
        }

        let name: String = Input::new().with_prompt("請輸入預設集名稱").interact_text()?;
        let name = name.trim().to_string();
        if name.is_empty() {
            println!("{}", style("預設集名稱不能為空").yellow());
            return Ok(());
        }

        if self.config.settings.presets.contains_key(&name) {
            let overwrite = Confirm::new()
                .with_prompt(format!("預設集「{name}」已存在，要覆寫嗎？"))
                .default(false)
                .interact()?;
            if !overwrite {
                return Ok(());
            }
        }

        let mut settings = self.config.settings.clone();
        store_preset(&mut settings, &name, source, destination);
        save_settings(&settings)?;
        info!("預設集已儲存: {name}");
        println!("{}", style(format!("預設集「{name}」已儲存")).green());
        Ok(())
    }

    fn prompt_transfer_mode(&self) -> Result<bool> {
        let items = ["移動檔案（來源檔案會被移除）", "複製檔案（保留來源檔案）"];
        let default_index = usize::from(!self.config.settings.sorter.move_files);

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇處理方式")
            .items(&items)
            .default(default_index)
            .interact()?;

        Ok(selection == 0)
    }

    fn prompt_overwrite(&self) -> Result<bool> {
        let overwrite = Confirm::new()
            .with_prompt("目的地已有同名檔案時要覆寫嗎？")
            .default(self.config.settings.sorter.overwrite)
            .interact()?;
        Ok(overwrite)
    }

    fn confirm_nested_destination(&self) -> Result<bool> {
        println!();
        println!(
            "{}",
            style("警告：目的地資料夾位於來源資料夾內部。").yellow().bold()
        );
        println!(
            "{}",
            style("繼續執行可能導致檔案被重複處理，特別是選擇移動模式時。").yellow()
        );

        let confirmed = Confirm::new()
            .with_prompt("確定要繼續嗎？")
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    fn confirm_sort(&self, move_files: bool) -> Result<bool> {
        let prompt = if move_files {
            "確定要移動這些檔案嗎？"
        } else {
            "確定要複製這些檔案嗎？"
        };
        let confirmed = Confirm::new().with_prompt(prompt).default(true).interact()?;
        Ok(confirmed)
    }

    fn print_scan_summary(&self, files: &[MediaFileInfo]) {
        let photo_count = files.iter().filter(|f| f.kind == MediaKind::Photo).count();
        let video_count = files.iter().filter(|f| f.kind == MediaKind::Video).count();
        let total_size: u64 = files.iter().map(|f| f.size).sum();
        let size_mb = total_size as f64 / 1024.0 / 1024.0;

        println!();
        println!(
            "{}",
            style(format!("找到 {} 個媒體檔案：", files.len())).green()
        );
        println!(
            "  {} {}: {} 個",
            style("→").dim(),
            MediaKind::Photo.display_name(),
            photo_count
        );
        println!(
            "  {} {}: {} 個",
            style("→").dim(),
            MediaKind::Video.display_name(),
            video_count
        );
        println!("  {} 總大小: {size_mb:.2} MB", style("→").dim());
        println!();
    }

    fn execute_sort(&self, options: &SortOptions, expected_total: usize) -> Result<SortReport> {
        let engine = MediaSortEngine::new(
            self.config.media_type_table.clone(),
            Arc::clone(&self.shutdown_signal),
        );

        let progress_bar = ProgressBar::new(expected_total as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message("整理中...");

        let action = if options.move_files { "已移動" } else { "已複製" };

        let report = engine.sort(options, &mut |event| {
            match &event {
                SortEvent::DestinationDirSkipped { path } => {
                    progress_bar.println(format!("略過目的地子資料夾: {}", path.display()));
                }
                SortEvent::OverwritingExisting { file_name, bucket } => {
                    progress_bar.println(format!("覆寫 {bucket} 中的「{file_name}」"));
                }
                SortEvent::CollisionRenamed {
                    file_name,
                    new_name,
                    bucket,
                } => {
                    progress_bar.println(format!(
                        "「{file_name}」已存在，改存為 {bucket} 中的「{new_name}」"
                    ));
                }
                SortEvent::FileMoved {
                    file_name,
                    relative_target,
                }
                | SortEvent::FileCopied {
                    file_name,
                    relative_target,
                } => {
                    progress_bar.println(format!(
                        "{action}「{file_name}」到 {}",
                        relative_target.display()
                    ));
                }
                SortEvent::SkippedInPlace { file_name } => {
                    progress_bar.println(format!("跳過「{file_name}」：已在正確位置"));
                }
                SortEvent::SkippedUnsafeRename { file_name } => {
                    progress_bar.println(format!(
                        "跳過「{file_name}」：編號檔名會指回來源本身"
                    ));
                }
                SortEvent::FileFailed { file_name, reason } => {
                    progress_bar.println(format!("處理「{file_name}」失敗: {reason}"));
                }
                SortEvent::Interrupted => {
                    progress_bar.println("操作已中斷".to_string());
                }
            }

            // 每個檔案恰好一個結果事件，提示類事件不推進進度
            if matches!(
                event,
                SortEvent::FileMoved { .. }
                    | SortEvent::FileCopied { .. }
                    | SortEvent::SkippedInPlace { .. }
                    | SortEvent::SkippedUnsafeRename { .. }
                    | SortEvent::FileFailed { .. }
            ) {
                progress_bar.inc(1);
            }
        })?;

        progress_bar.finish_with_message("完成");
        Ok(report)
    }

    fn display_summary(&self, report: &SortReport, move_files: bool) {
        println!();
        println!("{}", style("=== 整理結果 ===").cyan().bold());

        let action = if move_files { "成功移動" } else { "成功複製" };
        println!("  {}: {} 個檔案", action, style(report.processed).green());

        if report.skipped > 0 {
            println!("  已跳過: {} 個檔案", style(report.skipped).yellow());
        }

        if report.errors > 0 {
            println!("  失敗: {} 個檔案", style(report.errors).red());
        }

        info!(
            "媒體整理完成 - 成功: {}, 跳過: {}, 失敗: {}",
            report.processed, report.skipped, report.errors
        );
    }
}
