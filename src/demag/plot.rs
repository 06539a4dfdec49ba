//! # 退磁因子图表生成
//!
//! 使用 `plotters` 库绘制 Nx, Ny, Nz 随长径比变化的曲线（对数横轴）。
//!
//! ## 功能
//! - 三条曲线分色绘制，附图例
//! - N = 1/3 参考线（立方体/球）
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 调用
//! - 使用 `demag/sweep.rs` 的 SweepPoint 结构
//! - 使用 `plotters` 渲染图表

use super::SweepPoint;
use crate::error::{DemagError, Result};

use plotters::prelude::*;
use std::path::Path;

/// 图表参数
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "Demagnetization factors".to_string(),
            width: 1200,
            height: 800,
            use_svg: false,
        }
    }
}

/// 生成退磁因子扫描图
pub fn generate_sweep_plot(
    points: &[SweepPoint],
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    if points.len() < 2 {
        return Err(DemagError::PlotError(format!(
            "need at least 2 sweep points to plot, got {}",
            points.len()
        )));
    }

    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_sweep_chart(&root, points, &options.title)?;
        root.present().map_err(plot_error)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_sweep_chart(&root, points, &options.title)?;
        root.present().map_err(plot_error)?;
    }
    Ok(())
}

/// 绘制图表的核心逻辑
fn draw_sweep_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[SweepPoint],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let x_min = points
        .iter()
        .map(|p| p.aspect_ratio)
        .fold(f64::INFINITY, f64::min);
    let x_max = points
        .iter()
        .map(|p| p.aspect_ratio)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..1.0)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Aspect ratio (height / width)")
        .y_desc("Demagnetization factor N")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_error)?;

    let series: [(&str, RGBColor, fn(&SweepPoint) -> f64); 3] = [
        ("Nx", RGBColor(0, 102, 204), |p| p.factors.nx),
        ("Ny", RGBColor(0, 153, 76), |p| p.factors.ny),
        ("Nz", RGBColor(204, 51, 0), |p| p.factors.nz),
    ];

    for (label, color, value) in series {
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p.aspect_ratio, value(p))),
                color.stroke_width(2),
            ))
            .map_err(plot_error)?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    // 立方体 / 球的参考值
    chart
        .draw_series(LineSeries::new(
            [(x_min, 1.0 / 3.0), (x_max, 1.0 / 3.0)],
            BLACK.mix(0.3).stroke_width(1),
        ))
        .map_err(plot_error)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

fn plot_error<E: std::fmt::Debug>(e: E) -> DemagError {
    DemagError::PlotError(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemagFactors;

    #[test]
    fn test_rejects_single_point() {
        let points = [SweepPoint {
            aspect_ratio: 1.0,
            factors: DemagFactors::exact(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
        }];
        let path = std::env::temp_dir().join("nanodemag-single-point.svg");
        let err = generate_sweep_plot(&points, &path, &PlotOptions::default()).unwrap_err();
        assert!(matches!(err, DemagError::PlotError(_)));
    }
}
