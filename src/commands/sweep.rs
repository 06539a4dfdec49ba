//! # sweep 子命令实现
//!
//! 在对数长径比区间上并行计算退磁因子，导出 CSV 并可选绘图。
//!
//! ## 依赖关系
//! - 使用 `cli/sweep.rs` 定义的 SweepArgs
//! - 使用 `demag/sweep.rs` 计算，`demag/export.rs` 和 `demag/plot.rs` 输出
//! - 使用 `utils/progress.rs` 显示进度

use crate::cli::sweep::{PlotFormat, SweepArgs};
use crate::demag::plot::{self, PlotOptions};
use crate::demag::{export, sweep, DemagEngine, SweepConfig, SweepPoint};
use crate::error::{DemagError, Result};
use crate::utils::{output, progress};

use std::path::Path;
use tabled::{Table, Tabled};

/// 执行 sweep 命令
pub fn execute(args: SweepArgs, engine: &DemagEngine) -> Result<()> {
    output::print_header("Aspect Ratio Sweep");

    let (min_ratio, max_ratio) = parse_ratio_range(&args.range)?;
    let config = SweepConfig {
        shape: args.shape.into(),
        width: args.width,
        min_ratio,
        max_ratio,
        points: args.points,
    };

    output::print_info(&format!(
        "{} with lateral size {} nm, aspect ratio {:e} - {:e} ({} points)",
        config.shape.kind(),
        config.width,
        min_ratio,
        max_ratio,
        config.points
    ));

    let pb = progress::create_progress_bar(config.points as u64, "Sweeping");
    let result = sweep::run(engine, &config, || pb.inc(1));
    pb.finish_and_clear();
    let points = result?;

    output::print_success(&format!("Computed {} points", points.len()));
    print_sweep_summary(&points);

    export::sweep_to_csv(&points, &args.output)?;
    output::print_success(&format!("Sweep saved to '{}'", args.output.display()));

    if let Some(plot_path) = &args.plot {
        let format = args
            .format
            .unwrap_or_else(|| guess_format_from_extension(plot_path));
        let options = PlotOptions {
            title: args.title.clone().unwrap_or_else(|| {
                format!("Demagnetization factors of a {}", config.shape.kind())
            }),
            width: args.plot_width,
            height: args.plot_height,
            use_svg: format == PlotFormat::Svg,
        };
        plot::generate_sweep_plot(&points, plot_path, &options)?;
        output::print_success(&format!("Plot saved to '{}'", plot_path.display()));
    }

    Ok(())
}

/// 解析长径比区间，例如 "0.01-100" 或 "1e-3:1e3"
///
/// 冒号优先；否则以不属于指数的 '-' 分隔。
fn parse_ratio_range(range: &str) -> Result<(f64, f64)> {
    let invalid = || DemagError::InvalidRange(format!("'{}' (expected MIN-MAX, e.g. 0.01-100)", range));

    let range = range.trim();
    let (min_str, max_str) = match range.split_once(':') {
        Some(parts) => parts,
        None => {
            let bytes = range.as_bytes();
            let split = (1..bytes.len())
                .find(|&i| bytes[i] == b'-' && !matches!(bytes[i - 1], b'e' | b'E'))
                .ok_or_else(invalid)?;
            (&range[..split], &range[split + 1..])
        }
    };

    let min: f64 = min_str.trim().parse().map_err(|_| invalid())?;
    let max: f64 = max_str.trim().parse().map_err(|_| invalid())?;
    Ok((min, max))
}

/// 从扩展名推断图表格式
fn guess_format_from_extension(path: &Path) -> PlotFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("svg") => PlotFormat::Svg,
        _ => PlotFormat::Png,
    }
}

/// 打印首、中、尾三个点
fn print_sweep_summary(points: &[SweepPoint]) {
    #[derive(Tabled)]
    struct SweepRow {
        #[tabled(rename = "Aspect ratio")]
        aspect_ratio: String,
        #[tabled(rename = "Nx")]
        nx: String,
        #[tabled(rename = "Ny")]
        ny: String,
        #[tabled(rename = "Nz")]
        nz: String,
    }

    if points.is_empty() {
        return;
    }

    let mut picks = vec![0, points.len() / 2, points.len() - 1];
    picks.dedup();

    let rows: Vec<SweepRow> = picks
        .into_iter()
        .map(|i| &points[i])
        .map(|p| SweepRow {
            aspect_ratio: format!("{:.4e}", p.aspect_ratio),
            nx: format!("{:.6}", p.factors.nx),
            ny: format!("{:.6}", p.factors.ny),
            nz: format!("{:.6}", p.factors.nz),
        })
        .collect();

    println!("{}", Table::new(&rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_ratio_range() {
        assert_eq!(parse_ratio_range("0.01-100").unwrap(), (0.01, 100.0));
        assert_eq!(parse_ratio_range("1e-3-1e3").unwrap(), (1e-3, 1e3));
        assert_eq!(parse_ratio_range("1e-3:1E3").unwrap(), (1e-3, 1e3));
        assert_eq!(parse_ratio_range(" 0.5 - 2 ").unwrap(), (0.5, 2.0));
        assert!(parse_ratio_range("100").is_err());
        assert!(parse_ratio_range("a-b").is_err());
    }

    #[test]
    fn test_guess_format() {
        assert_eq!(
            guess_format_from_extension(&PathBuf::from("sweep.SVG")),
            PlotFormat::Svg
        );
        assert_eq!(
            guess_format_from_extension(&PathBuf::from("sweep.png")),
            PlotFormat::Png
        );
        assert_eq!(
            guess_format_from_extension(&PathBuf::from("sweep")),
            PlotFormat::Png
        );
    }
}
