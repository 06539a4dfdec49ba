//! # materials 子命令实现
//!
//! 列出材料预设及其交换长度。
//!
//! ## 依赖关系
//! - 使用 `cli/materials.rs` 定义的 MaterialsArgs
//! - 使用 `models/material.rs` 的预设表

use crate::cli::materials::MaterialsArgs;
use crate::demag::anisotropy::exchange_length;
use crate::error::{DemagError, Result};
use crate::models::material::{find_preset, MaterialPreset, MATERIAL_PRESETS};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
    #[tabled(rename = "Ms (A/m)")]
    ms: String,
    #[tabled(rename = "Ku (J/m³)")]
    ku: String,
    #[tabled(rename = "A (J/m)")]
    exchange: String,
    #[tabled(rename = "l_ex (nm)")]
    exchange_length: String,
    #[tabled(rename = "Aliases")]
    aliases: String,
}

impl From<&MaterialPreset> for PresetRow {
    fn from(p: &MaterialPreset) -> Self {
        Self {
            name: p.name,
            description: p.description,
            ms: format!("{:.3e}", p.ms),
            ku: format!("{:.3e}", p.ku),
            exchange: format!("{:.2e}", p.exchange),
            exchange_length: format!("{:.2}", exchange_length(p.exchange, p.ms) * 1e9),
            aliases: p.aliases.join(", "),
        }
    }
}

/// 执行 materials 命令
pub fn execute(args: MaterialsArgs) -> Result<()> {
    let rows: Vec<PresetRow> = match &args.name {
        Some(name) => {
            let preset = find_preset(name).ok_or_else(|| DemagError::UnknownMaterial(name.clone()))?;
            vec![preset.into()]
        }
        None => MATERIAL_PRESETS.iter().map(PresetRow::from).collect(),
    };

    output::print_header("Material Presets (room temperature)");
    println!("{}", Table::new(&rows));
    output::print_info("Override individual values with --ms, --ku, --exchange");

    Ok(())
}
