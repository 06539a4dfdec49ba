//! # 数据模型模块
//!
//! 定义几何尺寸、材料参数和各向异性分析结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `demag/` 和 `commands/` 使用
//! - 子模块: geometry, material, analysis

pub mod analysis;
pub mod geometry;
pub mod material;

pub use analysis::{AnisotropyAnalysis, AnisotropyClass, CalculationReport, MagnetizationDirection};
pub use geometry::{Axis, AxisFactor, DemagFactors, GeometryDimensions, GeometryKey, GeometryKind};
pub use material::{MaterialKey, MaterialProperties};
