use crate::config::save::save_settings;
use crate::config::types::{Config, Language};
use crate::menu::handlers::{run_media_sorter, run_preset_manager};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_sorter"),
        t!("main_menu.opt_presets"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_media_sorter(term, shutdown_signal)?;
            Ok(true)
        }
        Some(1) => {
            run_preset_manager(term)?;
            Ok(true)
        }
        Some(2) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(3) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_sorter"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_sorter_defaults_menu(term, config)?,
            Some(1) => show_language_menu(term, config)?,
            Some(2) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 整理預設選項選單
fn show_sorter_defaults_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.sorter.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    // 顯示當前設定
    println!(
        "\n{} {}",
        style(t!("settings.sorter.current_mode")).dim(),
        if config.settings.sorter.move_files {
            t!("settings.sorter.mode_move")
        } else {
            t!("settings.sorter.mode_copy")
        }
    );
    println!(
        "{} {}",
        style(t!("settings.sorter.current_overwrite")).dim(),
        if config.settings.sorter.overwrite {
            t!("common.enabled")
        } else {
            t!("common.disabled")
        }
    );
    println!();

    let items: Vec<String> = vec![
        t!("settings.sorter.opt_mode_move").to_string(),
        t!("settings.sorter.opt_mode_copy").to_string(),
        t!("settings.sorter.opt_toggle_overwrite").to_string(),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.sorter.prompt"))
        .items(&items)
        .default(0)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    match selection {
        0 => config.settings.sorter.move_files = true,
        1 => config.settings.sorter.move_files = false,
        2 => config.settings.sorter.overwrite = !config.settings.sorter.overwrite,
        _ => unreachable!(),
    }

    save_settings(&config.settings)?;
    println!("\n{}", style(t!("settings.saved")).green());
    std::thread::sleep(std::time::Duration::from_secs(1));

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [
        Language::EnUs,
        Language::ZhTw,
        Language::ZhCn,
        Language::JaJp,
    ];

    let items: Vec<String> = languages.iter().map(|l: &Language| l.to_string()).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        println!("\n{} {}", style(t!("settings.saved")).green(), selected_lang);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
