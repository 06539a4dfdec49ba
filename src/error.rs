//! # 统一错误处理模块
//!
//! 定义 nanodemag 的所有错误类型，使用 `thiserror` 派生。
//!
//! 数值核心的错误（尺寸、范围、长径比、定义域、数值）都携带上下文参数，
//! 格式化为用户消息由 `Display` 完成。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// nanodemag 统一错误类型
#[derive(Error, Debug)]
pub enum DemagError {
    // ─────────────────────────────────────────────────────────────
    // 几何输入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid dimension '{name}' = {value} nm (must be a positive, finite length)")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Dimension '{name}' = {value} nm is outside the supported range [{min}, {max}] nm")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error(
        "Aspect ratio {ratio:.3e} exceeds the maximum of {max:.0e}; \
         use the 'thin-film' or 'infinite-rod' geometry for this limit"
    )]
    ExtremeAspectRatio { ratio: f64, max: f64 },

    // ─────────────────────────────────────────────────────────────
    // 数值错误
    // ─────────────────────────────────────────────────────────────
    #[error("{function}: parameter {parameter} = {value} is outside the domain [0, 1)")]
    Domain {
        function: &'static str,
        parameter: &'static str,
        value: f64,
    },

    #[error("Numerical error in {context} (value: {value:e})")]
    Numerical { context: String, value: f64 },

    #[error("Demagnetization factors sum to {sum:.9} (tolerance {tolerance:e})")]
    FactorSum { sum: f64, tolerance: f64 },

    // ─────────────────────────────────────────────────────────────
    // 材料参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid material parameter '{name}' = {value:e}")]
    InvalidMaterial { name: &'static str, value: f64 },

    #[error("Unknown material preset '{0}' (run 'nanodemag materials' for the list)")]
    UnknownMaterial(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl DemagError {
    /// 创建数值错误
    pub fn numerical(context: impl Into<String>, value: f64) -> Self {
        Self::Numerical {
            context: context.into(),
            value,
        }
    }

    /// 创建定义域错误
    pub fn domain(function: &'static str, parameter: &'static str, value: f64) -> Self {
        Self::Domain {
            function,
            parameter,
            value,
        }
    }

    /// 是否为几何输入错误（尺寸、范围、长径比）
    pub fn is_geometry_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimension { .. } | Self::OutOfRange { .. } | Self::ExtremeAspectRatio { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DemagError>;
