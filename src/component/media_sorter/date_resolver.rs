use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local};
use std::fs::Metadata;
use std::time::{SystemTime, UNIX_EPOCH};

/// 早於此秒數的時間戳視為未設定（約 1973 年之前）
const PLAUSIBLE_EPOCH_FLOOR_SECS: u64 = 100_000_000;

/// 建立時間比修改時間早超過此秒數時，視為複製或還原造成的過期值
const CREATION_STALENESS_SECS: u64 = 3_600;

/// 檔案的有效拍攝日期（本地時間的年與月），只用來決定分桶資料夾
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveDate {
    pub year: i32,
    pub month: u32,
}

impl EffectiveDate {
    #[must_use]
    pub fn from_timestamp(timestamp: SystemTime) -> Self {
        let local: DateTime<Local> = timestamp.into();
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    #[must_use]
    pub fn year_folder(&self) -> String {
        format!("{:04}", self.year)
    }

    #[must_use]
    pub fn month_folder(&self) -> String {
        format!("{:02}", self.month)
    }

    /// 顯示用的「年/月」分桶名稱
    #[must_use]
    pub fn bucket(&self) -> String {
        format!("{}/{}", self.year_folder(), self.month_folder())
    }
}

/// 從檔案系統中繼資料推導有效日期
///
/// 建立時間在部分平台或檔案系統上不可用，此時退回修改時間
pub fn resolve_effective_date(metadata: &Metadata) -> Result<EffectiveDate> {
    let modified = metadata.modified().context("無法讀取檔案修改時間")?;
    let chosen = select_timestamp(metadata.created().ok(), modified);
    Ok(EffectiveDate::from_timestamp(chosen))
}

/// 校正規則：建立時間不可信（低於門檻，或明顯早於修改時間）時改用修改時間
fn select_timestamp(created: Option<SystemTime>, modified: SystemTime) -> SystemTime {
    let candidate = created.unwrap_or(modified);
    let candidate_secs = secs_since_epoch(candidate);
    let modified_secs = secs_since_epoch(modified);

    let implausible = candidate_secs < PLAUSIBLE_EPOCH_FLOOR_SECS;
    let stale = modified_secs > candidate_secs
        && modified_secs - candidate_secs > CREATION_STALENESS_SECS;

    if (implausible || stale) && modified_secs > 0 {
        modified
    } else {
        candidate
    }
}

fn secs_since_epoch(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}
