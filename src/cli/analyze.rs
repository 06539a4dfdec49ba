//! # analyze 子命令 CLI 定义
//!
//! 退磁因子 + 各向异性分析。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze.rs`

use super::common::{GeometryArgs, MaterialArgs};

use clap::Args;
use std::path::PathBuf;

/// analyze 子命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub material: MaterialArgs,

    /// Write the full report to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
