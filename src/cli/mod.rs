//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `factors`: 单个几何体的退磁因子
//! - `analyze`: 退磁因子 + 各向异性分析
//! - `sweep`: 长径比扫描（CSV / 图表）
//! - `batch`: 批量处理几何表
//! - `materials`: 材料预设列表
//!
//! 全局参数 `--cache-size`、`--cache-ttl-ms` 也可通过环境变量设置。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, factors, analyze, sweep, batch, materials

pub mod analyze;
pub mod batch;
pub mod common;
pub mod factors;
pub mod materials;
pub mod sweep;

use crate::demag::{EngineConfig, CACHE_TTL, MAX_CACHE_SIZE};

use clap::{Parser, Subcommand};
use std::time::Duration;

/// nanodemag - 纳米结构退磁因子与形状各向异性计算
#[derive(Parser, Debug)]
#[command(name = "nanodemag")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Demagnetization factors and shape anisotropy of magnetic nanostructures",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Maximum number of entries in each computation cache
    #[arg(long, global = true, env = "NANODEMAG_CACHE_SIZE", default_value_t = MAX_CACHE_SIZE)]
    pub cache_size: usize,

    /// Lifetime of cached analysis results in milliseconds
    #[arg(
        long,
        global = true,
        env = "NANODEMAG_CACHE_TTL_MS",
        default_value_t = CACHE_TTL.as_millis() as u64
    )]
    pub cache_ttl_ms: u64,

    /// Print cache statistics after the command
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// 计算引擎配置
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            cache_capacity: self.cache_size,
            results_ttl: Duration::from_millis(self.cache_ttl_ms),
        }
    }
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute demagnetization factors of a single geometry
    Factors(factors::FactorsArgs),

    /// Compute demagnetization factors and the shape/effective anisotropy analysis
    Analyze(analyze::AnalyzeArgs),

    /// Sweep demagnetization factors over a logarithmic aspect-ratio range
    Sweep(sweep::SweepArgs),

    /// Process geometry CSV files in parallel
    Batch(batch::BatchArgs),

    /// List built-in material presets
    Materials(materials::MaterialsArgs),
}
