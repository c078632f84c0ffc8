//! E2E Integration Tests
//!
//! 測試預設集儲存與整理引擎的端對端流程

use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use auto_media_sort::component::media_sorter::{
    MediaSortEngine, SortOptions, destination_nested_in_source, resolve_effective_date,
};
use auto_media_sort::config::load::load_settings_from;
use auto_media_sort::config::save::{add_recent_source, save_settings_to, store_preset};
use auto_media_sort::config::{Config, UserSettings};
use tempfile::TempDir;

fn engine() -> MediaSortEngine {
    let config = Config::new().expect("無法載入設定");
    MediaSortEngine::new(config.media_type_table, Arc::new(AtomicBool::new(false)))
}

/// 測試 1: 預設集從儲存到驅動整理的完整流程
#[test]
fn test_preset_round_trip_drives_sort() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("card");
    let dest = temp_dir.path().join("archive");
    fs::create_dir_all(&source).unwrap();

    fs::write(source.join("IMG_0001.JPG"), "photo").unwrap();
    fs::write(source.join("MOV_0001.MP4"), "video").unwrap();

    // 儲存預設集並更新路徑歷史
    let settings_path = temp_dir.path().join("settings.json");
    let mut settings = UserSettings::default();
    store_preset(
        &mut settings,
        "記憶卡",
        &source.to_string_lossy(),
        &dest.to_string_lossy(),
    );
    add_recent_source(&mut settings, &source.to_string_lossy());
    save_settings_to(&settings_path, &settings).unwrap();

    // 重新載入，模擬下一次啟動
    let loaded = load_settings_from(&settings_path).unwrap();
    let preset = loaded.presets.get("記憶卡").expect("應該找到預設集");
    assert_eq!(loaded.recent_sources.len(), 1);

    // 用預設集的路徑執行整理
    let options = SortOptions {
        source_dir: preset.source.clone().into(),
        dest_dir: preset.destination.clone().into(),
        move_files: true,
        overwrite: false,
    };
    assert!(!destination_nested_in_source(&options).unwrap());

    let report = engine().sort(&options, &mut |_| {}).unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.errors, 0);
}

/// 測試 2: 目的地的年/月結構符合持久化契約
#[test]
fn test_destination_layout_contract() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let dest = temp_dir.path().join("dst");
    fs::create_dir_all(&source).unwrap();

    let photo = source.join("photo.jpg");
    fs::write(&photo, "x").unwrap();
    let date = resolve_effective_date(&fs::metadata(&photo).unwrap()).unwrap();

    let options = SortOptions {
        source_dir: source,
        dest_dir: dest.clone(),
        move_files: true,
        overwrite: false,
    };
    engine().sort(&options, &mut |_| {}).unwrap();

    // 第一層是四位數年份，第二層是兩位數月份
    let year_dir = fs::read_dir(&dest).unwrap().next().unwrap().unwrap();
    let year_name = year_dir.file_name().to_string_lossy().into_owned();
    assert_eq!(year_name.len(), 4, "年份資料夾應該是四位數");
    assert!(year_name.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(year_name, date.year_folder());

    let month_dir = fs::read_dir(year_dir.path()).unwrap().next().unwrap().unwrap();
    let month_name = month_dir.file_name().to_string_lossy().into_owned();
    assert_eq!(month_name.len(), 2, "月份資料夾應該是兩位數");
    assert!(month_name.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(month_name, date.month_folder());

    assert!(month_dir.path().join("photo.jpg").exists());
}

/// 測試 3: 複製模式重複執行會產生編號副本
#[test]
fn test_repeated_copy_runs_create_numbered_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let dest = temp_dir.path().join("dst");
    fs::create_dir_all(&source).unwrap();

    let photo = source.join("photo.jpg");
    fs::write(&photo, "x").unwrap();
    let bucket = dest.join(
        resolve_effective_date(&fs::metadata(&photo).unwrap())
            .unwrap()
            .bucket(),
    );

    let options = SortOptions {
        source_dir: source,
        dest_dir: dest,
        move_files: false,
        overwrite: false,
    };

    let first = engine().sort(&options, &mut |_| {}).unwrap();
    assert_eq!(first.processed, 1);

    // 同名檔案已存在且未開啟覆寫，第二次複製改用編號檔名
    let second = engine().sort(&options, &mut |_| {}).unwrap();
    assert_eq!(second.processed, 1);

    assert!(bucket.join("photo.jpg").exists());
    assert!(bucket.join("photo (1).jpg").exists());
}

/// 測試 4: 巢狀目的地偵測需要先經過確認才能執行
#[test]
fn test_nested_destination_detection_for_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("library");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("photo.jpg"), "x").unwrap();

    let options = SortOptions {
        source_dir: source.clone(),
        dest_dir: source.join("sorted"),
        move_files: true,
        overwrite: false,
    };

    // 呼叫端在執行前必須偵測到巢狀目的地並要求確認；
    // 使用者拒絕時不呼叫 sort，來源保持原狀
    assert!(destination_nested_in_source(&options).unwrap());
    assert!(source.join("photo.jpg").exists());
    assert!(!source.join("sorted").exists());
}
