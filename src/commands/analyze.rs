//! # analyze 子命令实现
//!
//! 计算退磁因子并完成形状/有效各向异性分析。
//!
//! ## 功能
//! - 材料预设 + 单项覆盖
//! - 磁晶易轴取向（面内/面外）
//! - 可选导出 CSV 报告
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的 AnalyzeArgs
//! - 使用 `demag/engine.rs` 计算，`demag/export.rs` 导出

use super::factors::{print_factor_table, print_geometry_summary};
use crate::cli::analyze::AnalyzeArgs;
use crate::demag::{export, DemagEngine};
use crate::error::Result;
use crate::models::{CalculationReport, MagnetizationDirection};
use crate::utils::output;

const SUPERPARAMAGNETIC_LIMIT: f64 = 40.0;

/// 执行 analyze 命令
pub fn execute(args: AnalyzeArgs, engine: &DemagEngine) -> Result<()> {
    output::print_header("Shape Anisotropy Analysis");

    let geometry = args.geometry.geometry()?;
    let material = args.material.properties()?;
    engine.set_crystalline_easy_axis_in_plane(args.material.in_plane)?;

    output::print_info(&format!("Geometry: {}", geometry.describe()));
    output::print_info(&format!(
        "Material: {} (Ms = {:.3e} A/m, Ku = {:.3e} J/m³, A = {:.2e} J/m, T = {} K)",
        args.material.label(),
        material.ms,
        material.ku,
        material.exchange,
        material.temperature
    ));
    output::print_info(&format!(
        "Crystalline easy axis: {}",
        MagnetizationDirection::from_in_plane(args.material.in_plane)
    ));

    let report = engine.calculate(&geometry, &material)?;

    print_factor_table(&report.factors);
    print_geometry_summary(&geometry, &report.factors);
    print_analysis(&report);

    if let Some(path) = &args.output {
        export::reports_to_csv(std::slice::from_ref(&report), path)?;
        output::print_success(&format!("Report saved to '{}'", path.display()));
    }

    Ok(())
}

/// 打印各向异性分析结果
fn print_analysis(report: &CalculationReport) {
    let a = &report.analysis;

    output::print_separator();
    output::print_kv(
        "Shape easy axis",
        &format!("{} (N = {:.6})", a.easy_axis, a.n_easy),
    );
    output::print_kv(
        "Shape hard axis",
        &format!("{} (N = {:.6})", a.hard_axis, a.n_hard),
    );
    output::print_kv("K_shape", &format!("{:.4e} J/m³", a.k_shape));
    output::print_kv("K_eff", &format!("{:.4e} J/m³", a.k_eff));
    output::print_kv(
        "Coercive field",
        &format!(
            "{:.4e} A/m ({:.2} mT)",
            a.coercive_field,
            a.coercive_field_mt()
        ),
    );
    match a.thermal_stability {
        Some(delta) => output::print_kv("Thermal stability Δ", &format!("{:.4e}", delta)),
        None => output::print_kv("Thermal stability Δ", "undefined (infinite volume)"),
    }
    output::print_kv("Exchange length", &format!("{:.3} nm", a.exchange_length_nm));
    output::print_kv("Classification", &a.classification.to_string());
    output::print_kv("Preferred direction", &a.preferred_direction.to_string());

    if let Some(delta) = a.thermal_stability {
        // 常用的十年保持判据 Δ ≥ 40
        if delta < SUPERPARAMAGNETIC_LIMIT {
            output::print_warning(&format!(
                "Δ = {:.1} is below {}: superparamagnetic at {} K",
                delta, SUPERPARAMAGNETIC_LIMIT, report.material.temperature
            ));
        }
    }
}
