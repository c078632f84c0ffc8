//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod media_sorter;
pub mod preset_manager;

pub use media_sorter::MediaSorter;
pub use preset_manager::PresetManager;
