//! # factors 子命令 CLI 定义
//!
//! 计算单个几何体的退磁因子。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/factors.rs`

use super::common::GeometryArgs;

use clap::Args;

/// factors 子命令参数
#[derive(Args, Debug)]
pub struct FactorsArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,
}
