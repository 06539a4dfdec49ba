//! # sweep 子命令 CLI 定义
//!
//! 退磁因子随长径比的对数扫描。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/sweep.rs`

use crate::demag::SweepShape;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 可扫描的几何体
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SweepShapeArg {
    /// Square-section prism (width x width x height)
    Prism,
    /// Cylinder (diameter = width, thickness = height)
    Cylinder,
}

impl From<SweepShapeArg> for SweepShape {
    fn from(shape: SweepShapeArg) -> Self {
        match shape {
            SweepShapeArg::Prism => SweepShape::Prism,
            SweepShapeArg::Cylinder => SweepShape::Cylinder,
        }
    }
}

/// 图表输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlotFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

/// sweep 子命令参数
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Geometry to sweep
    #[arg(short, long, value_enum, default_value = "prism")]
    pub shape: SweepShapeArg,

    /// Lateral size in nm (prism side or cylinder diameter)
    #[arg(short, long, default_value_t = 10.0)]
    pub width: f64,

    /// Aspect ratio range height/width (e.g., "0.01-100")
    #[arg(short, long, default_value = "0.01-100")]
    pub range: String,

    /// Number of logarithmically spaced points
    #[arg(short = 'n', long, default_value_t = 50)]
    pub points: usize,

    /// CSV output file
    #[arg(short, long, default_value = "demag_sweep.csv")]
    pub output: PathBuf,

    /// Also render a plot to this file
    #[arg(short, long)]
    pub plot: Option<PathBuf>,

    /// Plot format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<PlotFormat>,

    /// Plot title
    #[arg(long)]
    pub title: Option<String>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub plot_width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub plot_height: u32,
}
