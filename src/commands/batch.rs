//! # batch 子命令实现
//!
//! 并行处理几何表 CSV 文件，每个输入文件生成一个结果 CSV。
//!
//! ## 输入格式
//! ```text
//! shape,dims,material
//! prism,10x20x5,Co
//! cylinder,2x50,
//! thin-film,,Permalloy
//! ```
//! `material` 列可省略；缺省时使用 `--material`，两者都没有时只计算退磁因子。
//! 单行的错误写入结果的 `error` 列，不影响其他行。
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的 BatchArgs
//! - 使用 `batch/` 模块收集文件并并行处理
//! - 使用 `demag/engine.rs` 计算（所有文件共享缓存）

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::demag::export::{self, BatchRecord};
use crate::demag::DemagEngine;
use crate::error::{DemagError, Result};
use crate::models::material::find_preset;
use crate::models::{GeometryDimensions, GeometryKind};
use crate::utils::output;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 输入 CSV 的一行
#[derive(Debug, Deserialize)]
struct GeometryRow {
    shape: String,
    #[serde(default)]
    dims: Option<String>,
    #[serde(default)]
    material: Option<String>,
}

/// 批处理共享配置
struct BatchConfig<'a> {
    engine: &'a DemagEngine,
    output_dir: PathBuf,
    default_material: Option<String>,
    temperature: f64,
    overwrite: bool,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs, engine: &DemagEngine) -> Result<()> {
    output::print_header("Batch Demagnetization Analysis");

    if !args.input.exists() {
        return Err(DemagError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    if let Some(name) = &args.material {
        if find_preset(name).is_none() {
            return Err(DemagError::UnknownMaterial(name.clone()));
        }
    }

    let files = FileCollector::new(args.input.clone())?
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} geometry files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| DemagError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    engine.set_crystalline_easy_axis_in_plane(args.in_plane)?;

    let config = BatchConfig {
        engine,
        output_dir: args.output.clone(),
        default_material: args.material.clone(),
        temperature: args.temperature,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Running with {} parallel jobs", runner.jobs()));
    let result = runner.run(files, |file| process_file(file, &config))?;

    for msg in &result.messages {
        output::print_info(msg);
    }

    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理单个输入文件
fn process_file(input: &PathBuf, config: &BatchConfig) -> ProcessResult {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("geometries");
    let output_file = config.output_dir.join(format!("{}_demag.csv", stem));

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match process_rows(input, config).and_then(|records| {
        export::batch_to_csv(&records, &output_file)?;
        Ok(records)
    }) {
        Ok(records) => {
            let failed = records.iter().filter(|r| r.error.is_some()).count();
            ProcessResult::Success(format!(
                "{} -> {} ({} rows, {} with errors)",
                input.display(),
                output_file.display(),
                records.len(),
                failed
            ))
        }
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 逐行计算，单行错误记录在结果中
fn process_rows(input: &Path, config: &BatchConfig) -> Result<Vec<BatchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(true)
        .from_path(input)?;

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<GeometryRow>().enumerate() {
        let index = i + 1;
        let record = match row {
            Ok(row) => process_row(index, row, config),
            Err(e) => BatchRecord {
                row: index,
                error: Some(e.to_string()),
                ..Default::default()
            },
        };
        records.push(record);
    }

    Ok(records)
}

/// 计算单行
fn process_row(index: usize, row: GeometryRow, config: &BatchConfig) -> BatchRecord {
    let dims = row.dims.unwrap_or_default();
    let material = non_empty(row.material).or_else(|| config.default_material.clone());

    let mut record = BatchRecord {
        row: index,
        shape: row.shape.clone(),
        dimensions: dims.clone(),
        material: material.clone(),
        ..Default::default()
    };

    if let Err(e) = fill_record(&mut record, &row.shape, &dims, material.as_deref(), config) {
        record.error = Some(e.to_string());
    }
    record
}

fn fill_record(
    record: &mut BatchRecord,
    shape: &str,
    dims: &str,
    material: Option<&str>,
    config: &BatchConfig,
) -> Result<()> {
    let geometry = parse_geometry(shape, dims)?;

    let Some(name) = material else {
        let factors = config.engine.compute_factors(&geometry)?;
        record.nx = Some(factors.nx);
        record.ny = Some(factors.ny);
        record.nz = Some(factors.nz);
        return Ok(());
    };

    let preset = find_preset(name).ok_or_else(|| DemagError::UnknownMaterial(name.to_string()))?;
    let report = config
        .engine
        .calculate(&geometry, &preset.properties(config.temperature))?;

    record.nx = Some(report.factors.nx);
    record.ny = Some(report.factors.ny);
    record.nz = Some(report.factors.nz);
    record.easy_axis = Some(report.analysis.easy_axis.to_string());
    record.k_eff = Some(report.analysis.k_eff);
    record.coercive_field_mt = Some(report.analysis.coercive_field_mt());
    record.thermal_stability = report.analysis.thermal_stability;
    record.preferred_direction = Some(report.analysis.preferred_direction.to_string());
    Ok(())
}

/// 解析几何列
fn parse_geometry(shape: &str, dims: &str) -> Result<GeometryDimensions> {
    let kind = GeometryKind::from_name(shape)
        .ok_or_else(|| DemagError::InvalidArgument(format!("unknown shape '{}'", shape)))?;
    let dims = parse_dimensions(dims)?;
    GeometryDimensions::from_kind(kind, &dims)
}

/// 解析尺寸列，分隔符可以是 `x`、`*`、`;` 或空白
fn parse_dimensions(dims: &str) -> Result<Vec<f64>> {
    dims.split(|c: char| c == 'x' || c == 'X' || c == '*' || c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| DemagError::InvalidArgument(format!("invalid dimension '{}'", s)))
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
