//! # materials 子命令 CLI 定义
//!
//! 列出材料预设。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/materials.rs`

use clap::Args;

/// materials 子命令参数
#[derive(Args, Debug)]
pub struct MaterialsArgs {
    /// Show a single preset (name or alias)
    pub name: Option<String>,
}
