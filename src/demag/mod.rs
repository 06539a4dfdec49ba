//! # 退磁因子计算模块
//!
//! 提供纳米结构退磁因子与形状各向异性的解析计算。
//!
//! ## 子模块
//! - `elliptic`: 完全/不完全椭圆积分
//! - `factors`: 五种几何体的退磁因子公式
//! - `anisotropy`: 形状/有效各向异性、矫顽场、热稳定性分析
//! - `cache`: FIFO + TTL 记忆化缓存
//! - `engine`: 持有缓存的计算引擎
//! - `sweep`: 长径比扫描
//! - `export`: CSV 导出
//! - `plot`: 退磁因子随长径比变化的图表
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 的数据模型

pub mod anisotropy;
pub mod cache;
pub mod elliptic;
pub mod engine;
pub mod export;
pub mod factors;
pub mod plot;
pub mod sweep;

pub use engine::{DemagEngine, EngineConfig};
pub use factors::compute_factors;
pub use sweep::{SweepConfig, SweepPoint, SweepShape};

use std::time::Duration;

// ─────────────────────────────────────────────────────────────
// 物理常数
// ─────────────────────────────────────────────────────────────

/// 真空磁导率 μ0（H/m）
pub const MU0: f64 = 4.0 * std::f64::consts::PI * 1e-7;

/// 玻尔兹曼常数 k_B（J/K）
pub const K_B: f64 = 1.380649e-23;

// ─────────────────────────────────────────────────────────────
// 几何校验
// ─────────────────────────────────────────────────────────────

/// 最小尺寸（nm）
pub const MIN_DIMENSION: f64 = 0.01;

/// 最大尺寸（nm）
pub const MAX_DIMENSION: f64 = 1e6;

/// 最大长径比
pub const MAX_ASPECT_RATIO: f64 = 1e7;

/// 退磁因子之和与 1 的容差
pub const FACTOR_SUM_TOLERANCE: f64 = 1e-6;

/// 单个退磁因子越出 [0, 1] 的舍入容差
pub const FACTOR_BOUND_TOLERANCE: f64 = 1e-9;

// ─────────────────────────────────────────────────────────────
// 分析与缓存
// ─────────────────────────────────────────────────────────────

/// |K_eff| 低于该值视为各向同性（J/m³）
pub const ISOTROPIC_THRESHOLD: f64 = 0.01e6;

/// 分析结果缓存有效期
pub const CACHE_TTL: Duration = Duration::from_millis(30_000);

/// 缓存最大条目数
pub const MAX_CACHE_SIZE: usize = 100;
