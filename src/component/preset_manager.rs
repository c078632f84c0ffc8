//! 預設集管理元件
//!
//! 維護具名的來源／目的地組合，儲存於 settings.json

use crate::config::Config;
use crate::config::save::{remove_preset, save_settings, store_preset};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use log::info;

/// 預設集管理器
pub struct PresetManager {
    config: Config,
}

impl PresetManager {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style("=== 預設集管理 ===").cyan().bold());

        loop {
            println!();
            self.print_presets();

            let items = ["新增預設集", "刪除預設集", "返回"];
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("請選擇動作")
                .items(&items)
                .default(0)
                .interact_opt()?;

            match selection {
                Some(0) => self.add_preset()?,
                Some(1) => self.delete_preset()?,
                Some(2) | None => break, // ESC or back
                _ => unreachable!(),
            }
        }

        Ok(())
    }

    fn print_presets(&self) {
        if self.config.settings.presets.is_empty() {
            println!("{}", style("目前沒有任何預設集").dim());
            return;
        }

        for (name, preset) in &self.config.settings.presets {
            println!("  {} {}", style("•").dim(), style(name).cyan());
            println!("      來源: {}", preset.source);
            println!("      目的地: {}", preset.destination);
        }
    }

    fn add_preset(&mut self) -> Result<()> {
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

        let source: String = Input::new()
            .with_prompt("請輸入來源資料夾路徑")
            .interact_text()?;
        let destination: String = Input::new()
            .with_prompt("請輸入目的地資料夾路徑")
            .interact_text()?;

        store_preset(
            &mut self.config.settings,
            &name,
            source.trim(),
            destination.trim(),
        );
        save_settings(&self.config.settings)?;
        info!("預設集已儲存: {name}");
        println!("{}", style(format!("預設集「{name}」已儲存")).green());
        Ok(())
    }

    fn delete_preset(&mut self) -> Result<()> {
        if self.config.settings.presets.is_empty() {
            println!("{}", style("沒有可刪除的預設集").yellow());
            return Ok(());
        }

        let names: Vec<String> = self.config.settings.presets.keys().cloned().collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇要刪除的預設集")
            .items(&names)
            .default(0)
            .interact_opt()?;

        let Some(index) = selection else {
            return Ok(()); // ESC pressed
        };
        let name = names[index].clone();

        let confirmed = Confirm::new()
            .with_prompt(format!("確定要刪除預設集「{name}」嗎？"))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }

        if remove_preset(&mut self.config.settings, &name) {
            save_settings(&self.config.settings)?;
            info!("預設集已刪除: {name}");
            println!("{}", style(format!("預設集「{name}」已刪除")).green());
        }
        Ok(())
    }
}
