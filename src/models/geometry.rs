//! # 纳米结构几何数据模型
//!
//! 定义五种标准几何体的尺寸表示、退磁因子三元组以及带轴标签的退磁因子。
//!
//! ## 依赖关系
//! - 被 `demag/` 和 `commands/` 使用
//! - 使用 `demag/mod.rs` 中的容差常量

use crate::demag::{FACTOR_BOUND_TOLERANCE, FACTOR_SUM_TOLERANCE};
use crate::error::{DemagError, Result};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// nm³ 到 m³ 的换算系数
const NM3_TO_M3: f64 = 1e-27;

/// 几何体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Prism,
    Cylinder,
    Sphere,
    ThinFilm,
    InfiniteRod,
}

impl GeometryKind {
    /// 该几何体需要的尺寸参数名称（按输入顺序）
    pub fn dimension_names(&self) -> &'static [&'static str] {
        match self {
            GeometryKind::Prism => &["a", "b", "c"],
            GeometryKind::Cylinder => &["thickness", "diameter"],
            GeometryKind::Sphere => &["diameter"],
            GeometryKind::ThinFilm | GeometryKind::InfiniteRod => &[],
        }
    }

    /// 从名称解析几何体类型
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "prism" | "rect" | "rectangular-prism" => Some(Self::Prism),
            "cylinder" | "disk" | "disc" => Some(Self::Cylinder),
            "sphere" => Some(Self::Sphere),
            "thin-film" | "thinfilm" | "film" => Some(Self::ThinFilm),
            "infinite-rod" | "rod" | "wire" => Some(Self::InfiniteRod),
            _ => None,
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryKind::Prism => write!(f, "prism"),
            GeometryKind::Cylinder => write!(f, "cylinder"),
            GeometryKind::Sphere => write!(f, "sphere"),
            GeometryKind::ThinFilm => write!(f, "thin-film"),
            GeometryKind::InfiniteRod => write!(f, "infinite-rod"),
        }
    }
}

/// 几何尺寸（单位：nm）
///
/// 薄膜与无限长棒是无限尺寸极限，不需要显式尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryDimensions {
    /// 长方体，c 沿 z 轴
    Prism { a: f64, b: f64, c: f64 },
    /// 圆柱，厚度沿 z 轴
    Cylinder { thickness: f64, diameter: f64 },
    Sphere { diameter: f64 },
    ThinFilm,
    InfiniteRod,
}

impl GeometryDimensions {
    /// 从几何类型和尺寸列表构造
    pub fn from_kind(kind: GeometryKind, dims: &[f64]) -> Result<Self> {
        let expected = kind.dimension_names();
        if dims.len() != expected.len() {
            return Err(DemagError::InvalidArgument(format!(
                "{} expects {} dimension(s) ({}), got {}",
                kind,
                expected.len(),
                if expected.is_empty() {
                    "none".to_string()
                } else {
                    expected.join(", ")
                },
                dims.len()
            )));
        }

        Ok(match kind {
            GeometryKind::Prism => Self::Prism {
                a: dims[0],
                b: dims[1],
                c: dims[2],
            },
            GeometryKind::Cylinder => Self::Cylinder {
                thickness: dims[0],
                diameter: dims[1],
            },
            GeometryKind::Sphere => Self::Sphere { diameter: dims[0] },
            GeometryKind::ThinFilm => Self::ThinFilm,
            GeometryKind::InfiniteRod => Self::InfiniteRod,
        })
    }

    /// 几何类型
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Prism { .. } => GeometryKind::Prism,
            Self::Cylinder { .. } => GeometryKind::Cylinder,
            Self::Sphere { .. } => GeometryKind::Sphere,
            Self::ThinFilm => GeometryKind::ThinFilm,
            Self::InfiniteRod => GeometryKind::InfiniteRod,
        }
    }

    /// 尺寸列表（与 `dimension_names` 顺序一致）
    pub fn dimensions(&self) -> Vec<f64> {
        match *self {
            Self::Prism { a, b, c } => vec![a, b, c],
            Self::Cylinder {
                thickness,
                diameter,
            } => vec![thickness, diameter],
            Self::Sphere { diameter } => vec![diameter],
            Self::ThinFilm | Self::InfiniteRod => vec![],
        }
    }

    /// 体积（m³），无限几何体返回 None
    pub fn volume_m3(&self) -> Option<f64> {
        let nm3 = match *self {
            Self::Prism { a, b, c } => a * b * c,
            Self::Cylinder {
                thickness,
                diameter,
            } => PI * (diameter / 2.0).powi(2) * thickness,
            Self::Sphere { diameter } => 4.0 / 3.0 * PI * (diameter / 2.0).powi(3),
            Self::ThinFilm | Self::InfiniteRod => return None,
        };
        Some(nm3 * NM3_TO_M3)
    }

    /// 将退磁因子映射为参与各向异性分析的带标签轴
    ///
    /// 长方体和球取三个轴；圆柱取径向 (x) 和轴向 (z)；
    /// 薄膜取面内 (x) 和法向 (z)；无限长棒取垂直 (x) 和轴向 (z)。
    pub fn axis_factors(&self, factors: &DemagFactors) -> Vec<AxisFactor> {
        match self {
            Self::Prism { .. } | Self::Sphere { .. } => vec![
                AxisFactor::new(Axis::X, factors.nx),
                AxisFactor::new(Axis::Y, factors.ny),
                AxisFactor::new(Axis::Z, factors.nz),
            ],
            Self::Cylinder { .. } | Self::ThinFilm | Self::InfiniteRod => vec![
                AxisFactor::new(Axis::X, factors.nx),
                AxisFactor::new(Axis::Z, factors.nz),
            ],
        }
    }

    /// 缓存键（尺寸按位编码，避免字符串格式化带来的精度问题）
    pub fn key(&self) -> GeometryKey {
        let mut dims = [0u64; 3];
        for (slot, value) in dims.iter_mut().zip(self.dimensions()) {
            *slot = value.to_bits();
        }
        GeometryKey {
            kind: self.kind(),
            dims,
        }
    }

    /// 简短描述，例如 `prism 10 x 20 x 5 nm`
    pub fn describe(&self) -> String {
        match *self {
            Self::Prism { a, b, c } => format!("prism {} x {} x {} nm", a, b, c),
            Self::Cylinder {
                thickness,
                diameter,
            } => format!("cylinder t = {} nm, d = {} nm", thickness, diameter),
            Self::Sphere { diameter } => format!("sphere d = {} nm", diameter),
            Self::ThinFilm => "thin film (infinite lateral size)".to_string(),
            Self::InfiniteRod => "infinite rod".to_string(),
        }
    }
}

/// 几何缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    kind: GeometryKind,
    dims: [u64; 3],
}

/// 退磁因子三元组 (Nx, Ny, Nz)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemagFactors {
    pub nx: f64,
    pub ny: f64,
    pub nz: f64,
}

impl DemagFactors {
    /// 解析极限下的精确值，不做校验
    pub(crate) const fn exact(nx: f64, ny: f64, nz: f64) -> Self {
        Self { nx, ny, nz }
    }

    /// 创建并校验退磁因子
    ///
    /// 每个分量必须有限且落在 [0, 1] 内（舍入噪声会被截断），
    /// 三者之和与 1 的偏差不超过 `FACTOR_SUM_TOLERANCE`。
    pub fn validated(nx: f64, ny: f64, nz: f64) -> Result<Self> {
        let nx = clamp_factor("Nx", nx)?;
        let ny = clamp_factor("Ny", ny)?;
        let nz = clamp_factor("Nz", nz)?;

        let sum = nx + ny + nz;
        if (sum - 1.0).abs() > FACTOR_SUM_TOLERANCE {
            return Err(DemagError::FactorSum {
                sum,
                tolerance: FACTOR_SUM_TOLERANCE,
            });
        }

        Ok(Self { nx, ny, nz })
    }

    pub fn sum(&self) -> f64 {
        self.nx + self.ny + self.nz
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.nx, self.ny, self.nz]
    }
}

fn clamp_factor(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite()
        || value < -FACTOR_BOUND_TOLERANCE
        || value > 1.0 + FACTOR_BOUND_TOLERANCE
    {
        return Err(DemagError::numerical(
            format!("demagnetization factor {} outside [0, 1]", name),
            value,
        ));
    }
    Ok(value.clamp(0.0, 1.0))
}

/// 坐标轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// 带轴标签的退磁因子
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisFactor {
    pub axis: Axis,
    pub value: f64,
}

impl AxisFactor {
    pub fn new(axis: Axis, value: f64) -> Self {
        Self { axis, value }
    }
}
