use crate::component::{MediaSorter, PresetManager};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_media_sorter(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    // 重新載入設定，帶入其他功能剛存檔的預設集
    let config = Config::new()?;
    let sorter = MediaSorter::new(config, Arc::clone(shutdown_signal));

    if let Err(e) = sorter.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_preset_manager(term: &Term) -> Result<()> {
    let config = Config::new()?;
    let mut manager = PresetManager::new(config);

    if let Err(e) = manager.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
