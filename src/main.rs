//! # nanodemag - 纳米结构退磁因子与形状各向异性计算
//!
//! 解析计算长方体、圆柱、球、薄膜和无限长棒的退磁因子，
//! 并由材料参数分析形状各向异性、有效各向异性、矫顽场和热稳定性。
//!
//! ## 子命令
//! - `factors`   - 单个几何体的退磁因子
//! - `analyze`   - 退磁因子 + 各向异性分析
//! - `sweep`     - 长径比扫描（CSV / PNG / SVG）
//! - `batch`     - 批量处理几何表
//! - `materials` - 材料预设列表
//!
//! ## 依赖关系
//! ```text
//! main.rs → lib.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── demag/     (椭圆积分、退磁因子、各向异性、缓存、导出、绘图)
//!   │     ├── batch/     (文件收集 + 并行执行)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

use clap::Parser;
use nanodemag::cli::Cli;
use nanodemag::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        if e.is_geometry_error() {
            utils::output::print_info("Dimensions are given in nm, e.g. --dims 10,20,5 for a prism");
        }
        std::process::exit(1);
    }
}
