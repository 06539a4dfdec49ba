//! # 各向异性分析结果数据模型
//!
//! ## 依赖关系
//! - 由 `demag/anisotropy.rs` 生成
//! - 被 `demag/engine.rs`, `demag/export.rs`, `commands/` 使用

use crate::models::{Axis, DemagFactors, GeometryDimensions, MaterialProperties};

use serde::{Deserialize, Serialize};

/// 磁化方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagnetizationDirection {
    /// 无择优方向
    None,
    InPlane,
    OutOfPlane,
}

impl MagnetizationDirection {
    /// 由磁晶易轴取向得到方向
    pub fn from_in_plane(in_plane: bool) -> Self {
        if in_plane {
            Self::InPlane
        } else {
            Self::OutOfPlane
        }
    }

    /// 相反方向（None 保持不变）
    pub fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::InPlane => Self::OutOfPlane,
            Self::OutOfPlane => Self::InPlane,
        }
    }
}

impl std::fmt::Display for MagnetizationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::InPlane => write!(f, "In-plane"),
            Self::OutOfPlane => write!(f, "Out-of-plane"),
        }
    }
}

/// 各向异性分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnisotropyClass {
    Isotropic,
    CrystallineDominated,
    ShapeDominated,
}

impl std::fmt::Display for AnisotropyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Isotropic => write!(f, "Isotropic"),
            Self::CrystallineDominated => write!(f, "Crystalline-dominated"),
            Self::ShapeDominated => write!(f, "Shape-dominated"),
        }
    }
}

/// 各向异性分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnisotropyAnalysis {
    /// 易轴（退磁因子最小）
    pub easy_axis: Axis,
    pub n_easy: f64,
    /// 难轴（退磁因子最大）
    pub hard_axis: Axis,
    pub n_hard: f64,
    /// 形状各向异性 K_shape（J/m³）
    pub k_shape: f64,
    /// 有效各向异性 K_eff（J/m³）
    pub k_eff: f64,
    /// 矫顽场 H_c（A/m）
    pub coercive_field: f64,
    /// 热稳定因子 Δ，体积未定义时为 None
    pub thermal_stability: Option<f64>,
    /// 交换长度（nm）
    pub exchange_length_nm: f64,
    pub classification: AnisotropyClass,
    pub preferred_direction: MagnetizationDirection,
}

impl AnisotropyAnalysis {
    /// 矫顽场 μ0·H_c（mT）
    pub fn coercive_field_mt(&self) -> f64 {
        crate::demag::MU0 * self.coercive_field * 1e3
    }
}

/// 完整计算报告：几何 + 材料 + 退磁因子 + 分析
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationReport {
    pub geometry: GeometryDimensions,
    pub material: MaterialProperties,
    pub crystalline_easy_axis_in_plane: bool,
    pub factors: DemagFactors,
    pub analysis: AnisotropyAnalysis,
}
