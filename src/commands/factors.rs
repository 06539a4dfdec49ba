//! # factors 子命令实现
//!
//! 计算并显示单个几何体的退磁因子。
//!
//! ## 依赖关系
//! - 使用 `cli/factors.rs` 定义的 FactorsArgs
//! - 使用 `demag/engine.rs` 计算

use crate::cli::factors::FactorsArgs;
use crate::demag::DemagEngine;
use crate::error::Result;
use crate::models::{DemagFactors, GeometryDimensions};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 退磁因子表格行
#[derive(Tabled)]
struct FactorRow {
    #[tabled(rename = "Axis")]
    axis: String,
    #[tabled(rename = "N")]
    value: String,
    #[tabled(rename = "4πN (CGS)")]
    cgs: String,
}

/// 执行 factors 命令
pub fn execute(args: FactorsArgs, engine: &DemagEngine) -> Result<()> {
    output::print_header("Demagnetization Factors");

    let geometry = args.geometry.geometry()?;
    output::print_info(&format!("Geometry: {}", geometry.describe()));

    let factors = engine.compute_factors(&geometry)?;
    print_factor_table(&factors);
    print_geometry_summary(&geometry, &factors);

    Ok(())
}

/// 打印 Nx, Ny, Nz 表格
pub fn print_factor_table(factors: &DemagFactors) {
    let rows: Vec<FactorRow> = ["x", "y", "z"]
        .iter()
        .zip(factors.as_array())
        .map(|(axis, n)| FactorRow {
            axis: axis.to_string(),
            value: format!("{:.6}", n),
            cgs: format!("{:.5}", 4.0 * std::f64::consts::PI * n),
        })
        .collect();

    println!("{}", Table::new(&rows));
}

/// 打印和规则与体积
pub fn print_geometry_summary(geometry: &GeometryDimensions, factors: &DemagFactors) {
    output::print_kv("Nx + Ny + Nz", &format!("{:.9}", factors.sum()));
    match geometry.volume_m3() {
        Some(v) => output::print_kv("Volume", &format!("{:.4e} nm³", v * 1e27)),
        None => output::print_kv("Volume", "infinite"),
    }
}
