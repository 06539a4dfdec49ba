//! # 共享 CLI 参数
//!
//! 多个子命令共用的几何和材料参数。
//!
//! ## 依赖关系
//! - 被 `cli/factors.rs`, `cli/analyze.rs`, `cli/batch.rs` 使用
//! - 使用 `models/` 构造几何和材料参数

use crate::error::{DemagError, Result};
use crate::models::material::{find_preset, ROOM_TEMPERATURE};
use crate::models::{GeometryDimensions, GeometryKind, MaterialProperties};

use clap::{Args, ValueEnum};

// ─────────────────────────────────────────────────────────────
// 几何参数
// ─────────────────────────────────────────────────────────────

/// 几何体类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ShapeArg {
    /// Rectangular prism (a x b x c, c along z)
    Prism,
    /// Cylinder (axis along z)
    Cylinder,
    /// Sphere
    Sphere,
    /// Infinite thin film (normal along z)
    ThinFilm,
    /// Infinitely long rod (axis along z)
    InfiniteRod,
}

impl From<ShapeArg> for GeometryKind {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Prism => GeometryKind::Prism,
            ShapeArg::Cylinder => GeometryKind::Cylinder,
            ShapeArg::Sphere => GeometryKind::Sphere,
            ShapeArg::ThinFilm => GeometryKind::ThinFilm,
            ShapeArg::InfiniteRod => GeometryKind::InfiniteRod,
        }
    }
}

/// 几何参数
#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Geometry of the nanostructure
    #[arg(short, long, value_enum)]
    pub shape: ShapeArg,

    /// Dimensions in nm, comma-separated: prism "a,b,c", cylinder "thickness,diameter",
    /// sphere "diameter"; none for thin-film and infinite-rod
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub dims: Vec<f64>,
}

impl GeometryArgs {
    /// 构造几何尺寸（只检查参数个数，数值由计算核心校验）
    pub fn geometry(&self) -> Result<GeometryDimensions> {
        GeometryDimensions::from_kind(self.shape.into(), &self.dims)
    }
}

// ─────────────────────────────────────────────────────────────
// 材料参数
// ─────────────────────────────────────────────────────────────

/// 材料参数：预设 + 单项覆盖
#[derive(Args, Debug, Clone)]
pub struct MaterialArgs {
    /// Material preset (run 'nanodemag materials' for the list)
    #[arg(short, long)]
    pub material: Option<String>,

    /// Saturation magnetization Ms in A/m (overrides the preset)
    #[arg(long, allow_hyphen_values = true)]
    pub ms: Option<f64>,

    /// Uniaxial crystalline anisotropy Ku in J/m³ (overrides the preset, default 0)
    #[arg(long, allow_hyphen_values = true)]
    pub ku: Option<f64>,

    /// Exchange stiffness A in J/m (overrides the preset)
    #[arg(long, allow_hyphen_values = true)]
    pub exchange: Option<f64>,

    /// Temperature in K
    #[arg(short, long, default_value_t = ROOM_TEMPERATURE, allow_hyphen_values = true)]
    pub temperature: f64,

    /// Crystalline easy axis lies in-plane (default: out-of-plane)
    #[arg(long, default_value_t = false)]
    pub in_plane: bool,
}

impl MaterialArgs {
    /// 解析并校验材料参数
    pub fn properties(&self) -> Result<MaterialProperties> {
        let preset = match &self.material {
            Some(name) => Some(
                find_preset(name).ok_or_else(|| DemagError::UnknownMaterial(name.clone()))?,
            ),
            None => None,
        };

        let ms = self.ms.or(preset.map(|p| p.ms)).ok_or_else(|| {
            DemagError::InvalidArgument(
                "saturation magnetization is required: pass --material or --ms".to_string(),
            )
        })?;
        let exchange = self.exchange.or(preset.map(|p| p.exchange)).ok_or_else(|| {
            DemagError::InvalidArgument(
                "exchange stiffness is required: pass --material or --exchange".to_string(),
            )
        })?;
        let ku = self.ku.or(preset.map(|p| p.ku)).unwrap_or(0.0);

        let material = MaterialProperties::new(ms, ku, exchange, self.temperature);
        material.validate()?;
        Ok(material)
    }

    /// 材料名称（用于输出）
    pub fn label(&self) -> String {
        let Some(preset) = self.material.as_deref().and_then(find_preset) else {
            return "custom".to_string();
        };

        if self.ms.is_some() || self.ku.is_some() || self.exchange.is_some() {
            format!("{} (modified)", preset.name)
        } else {
            preset.name.to_string()
        }
    }
}
