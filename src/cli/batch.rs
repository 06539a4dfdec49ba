//! # batch 子命令 CLI 定义
//!
//! 批量处理几何表 CSV 文件。
//!
//! ## 输入格式
//! 带表头的 CSV，列 `shape`、`dims`（`10x20x5`，薄膜/长棒留空）、
//! 可选列 `material`（预设名称）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use crate::batch::collector::DEFAULT_PATTERN;
use crate::models::material::ROOM_TEMPERATURE;

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input: geometry CSV file or directory containing CSV files
    pub input: PathBuf,

    /// Output directory for result CSV files
    #[arg(short, long, default_value = "demag_results")]
    pub output: PathBuf,

    /// Default material preset for rows without a 'material' column
    #[arg(short, long)]
    pub material: Option<String>,

    /// Temperature in K used for thermal stability
    #[arg(short, long, default_value_t = ROOM_TEMPERATURE, allow_hyphen_values = true)]
    pub temperature: f64,

    /// Crystalline easy axis lies in-plane (default: out-of-plane)
    #[arg(long, default_value_t = false)]
    pub in_plane: bool,

    /// Glob pattern for input files (directory mode, e.g., "*.csv,geom*")
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
