//! # 计算结果导出
//!
//! 导出退磁计算结果到 CSV。
//!
//! ## 支持格式
//! - 报告 CSV: 每次计算一行，包含几何、材料、退磁因子和各向异性分析
//! - 扫描 CSV: aspect_ratio, nx, ny, nz
//! - 批处理 CSV: 每个输入行一行，失败的行记录错误信息
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs`, `commands/sweep.rs`, `commands/batch.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use super::SweepPoint;
use crate::error::{DemagError, Result};
use crate::models::CalculationReport;

use serde::Serialize;
use std::path::Path;

/// 批处理输出的一行
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchRecord {
    pub row: usize,
    pub shape: String,
    pub dimensions: String,
    pub material: Option<String>,
    pub nx: Option<f64>,
    pub ny: Option<f64>,
    pub nz: Option<f64>,
    pub easy_axis: Option<String>,
    pub k_eff: Option<f64>,
    pub coercive_field_mt: Option<f64>,
    pub thermal_stability: Option<f64>,
    pub preferred_direction: Option<String>,
    pub error: Option<String>,
}

/// 导出计算报告为 CSV 格式
pub fn reports_to_csv(reports: &[CalculationReport], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "geometry",
        "dimensions_nm",
        "ms_a_per_m",
        "ku_j_per_m3",
        "exchange_j_per_m",
        "temperature_k",
        "crystalline_easy_axis",
        "nx",
        "ny",
        "nz",
        "easy_axis",
        "hard_axis",
        "k_shape_j_per_m3",
        "k_eff_j_per_m3",
        "coercive_field_a_per_m",
        "coercive_field_mt",
        "thermal_stability",
        "exchange_length_nm",
        "classification",
        "preferred_direction",
    ])?;

    for report in reports {
        let analysis = &report.analysis;
        let material = &report.material;
        wtr.write_record(&[
            report.geometry.kind().to_string(),
            join_dimensions(&report.geometry.dimensions()),
            format!("{:.6e}", material.ms),
            format!("{:.6e}", material.ku),
            format!("{:.6e}", material.exchange),
            format!("{:.2}", material.temperature),
            if report.crystalline_easy_axis_in_plane {
                "in-plane".to_string()
            } else {
                "out-of-plane".to_string()
            },
            format!("{:.8}", report.factors.nx),
            format!("{:.8}", report.factors.ny),
            format!("{:.8}", report.factors.nz),
            analysis.easy_axis.to_string(),
            analysis.hard_axis.to_string(),
            format!("{:.6e}", analysis.k_shape),
            format!("{:.6e}", analysis.k_eff),
            format!("{:.6e}", analysis.coercive_field),
            format!("{:.4}", analysis.coercive_field_mt()),
            analysis
                .thermal_stability
                .map(|d| format!("{:.4e}", d))
                .unwrap_or_default(),
            format!("{:.4}", analysis.exchange_length_nm),
            analysis.classification.to_string(),
            analysis.preferred_direction.to_string(),
        ])?;
    }

    flush(wtr, output_path)
}

/// 导出扫描结果为 CSV 格式
pub fn sweep_to_csv(points: &[SweepPoint], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["aspect_ratio", "nx", "ny", "nz"])?;

    for point in points {
        wtr.write_record(&[
            format!("{:.6e}", point.aspect_ratio),
            format!("{:.8}", point.factors.nx),
            format!("{:.8}", point.factors.ny),
            format!("{:.8}", point.factors.nz),
        ])?;
    }

    flush(wtr, output_path)
}

/// 导出批处理结果为 CSV 格式
pub fn batch_to_csv(records: &[BatchRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    flush(wtr, output_path)
}

/// 尺寸列表格式化为 `10x20x5`，无尺寸时为空
pub fn join_dimensions(dims: &[f64]) -> String {
    dims.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("x")
}

fn flush<W: std::io::Write>(mut wtr: csv::Writer<W>, output_path: &Path) -> Result<()> {
    wtr.flush().map_err(|e| DemagError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demag::DemagEngine;
    use crate::models::{DemagFactors, GeometryDimensions, MaterialProperties};
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("nanodemag-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_reports_to_csv() {
        let engine = DemagEngine::default();
        let material = MaterialProperties::new(1.44e6, 4.5e5, 3.0e-11, 300.0);
        let reports = vec![
            engine
                .calculate(&GeometryDimensions::Sphere { diameter: 10.0 }, &material)
                .unwrap(),
            engine
                .calculate(&GeometryDimensions::InfiniteRod, &material)
                .unwrap(),
        ];

        let path = temp_path("reports.csv");
        reports_to_csv(&reports, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("geometry,dimensions_nm,"));
        assert!(lines[1].starts_with("sphere,10,"));
        assert!(lines[2].starts_with("infinite-rod,,"));
        // 无限长棒没有热稳定因子
        assert!(lines[2].contains(",,"));
    }

    #[test]
    fn test_sweep_to_csv() {
        let points = vec![
            SweepPoint {
                aspect_ratio: 1.0,
                factors: DemagFactors::exact(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            },
            SweepPoint {
                aspect_ratio: 10.0,
                factors: DemagFactors::exact(0.45, 0.45, 0.1),
            },
        ];

        let path = temp_path("sweep.csv");
        sweep_to_csv(&points, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "aspect_ratio,nx,ny,nz");
        assert_eq!(lines[1], "1.000000e0,0.33333333,0.33333333,0.33333333");
        assert_eq!(lines[2], "1.000000e1,0.45000000,0.45000000,0.10000000");
    }

    #[test]
    fn test_batch_to_csv_records_errors() {
        let records = vec![
            BatchRecord {
                row: 1,
                shape: "thin-film".to_string(),
                nx: Some(0.0),
                ny: Some(0.0),
                nz: Some(1.0),
                ..Default::default()
            },
            BatchRecord {
                row: 2,
                shape: "sphere".to_string(),
                dimensions: "-1".to_string(),
                error: Some("invalid dimension".to_string()),
                ..Default::default()
            },
        ];

        let path = temp_path("batch.csv");
        batch_to_csv(&records, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("row,shape,dimensions,material,nx,ny,nz,"));
        assert!(lines[2].ends_with("invalid dimension"));
    }

    #[test]
    fn test_join_dimensions() {
        assert_eq!(join_dimensions(&[10.0, 20.0, 5.5]), "10x20x5.5");
        assert_eq!(join_dimensions(&[]), "");
    }
}
