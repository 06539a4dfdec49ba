//! # 磁性材料参数
//!
//! 存储饱和磁化强度、单轴磁晶各向异性常数、交换刚度和温度，
//! 并提供常见材料的预设参数。
//!
//! ## 数据来源
//! 室温文献值（Coey, *Magnetism and Magnetic Materials*, 2010；
//! Skomski & Coey, *Permanent Magnetism*, 1999）。
//!
//! ## 依赖关系
//! - 被 `demag/anisotropy.rs`, `demag/engine.rs` 使用
//! - 被 `commands/` 使用

use crate::error::{DemagError, Result};

use serde::{Deserialize, Serialize};

/// 默认温度（K）
pub const ROOM_TEMPERATURE: f64 = 300.0;

/// 材料参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// 饱和磁化强度 Ms（A/m）
    pub ms: f64,
    /// 单轴磁晶各向异性常数 Ku（J/m³）
    pub ku: f64,
    /// 交换刚度 A（J/m）
    pub exchange: f64,
    /// 温度 T（K）
    pub temperature: f64,
}

impl MaterialProperties {
    pub fn new(ms: f64, ku: f64, exchange: f64, temperature: f64) -> Self {
        Self {
            ms,
            ku,
            exchange,
            temperature,
        }
    }

    /// 校验参数
    ///
    /// Ms、A、T 必须严格为正；Ku 可以为 0（纯形状各向异性）。
    pub fn validate(&self) -> Result<()> {
        check_positive("Ms", self.ms)?;
        check_positive("A", self.exchange)?;
        check_positive("T", self.temperature)?;
        if !self.ku.is_finite() || self.ku < 0.0 {
            return Err(DemagError::InvalidMaterial {
                name: "Ku",
                value: self.ku,
            });
        }
        Ok(())
    }

    /// 缓存键
    pub fn key(&self) -> MaterialKey {
        MaterialKey([
            self.ms.to_bits(),
            self.ku.to_bits(),
            self.exchange.to_bits(),
            self.temperature.to_bits(),
        ])
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DemagError::InvalidMaterial { name, value })
    }
}

/// 材料缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialKey([u64; 4]);

/// 材料预设
#[derive(Debug, Clone, Copy)]
pub struct MaterialPreset {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    /// Ms（A/m）
    pub ms: f64,
    /// Ku（J/m³）
    pub ku: f64,
    /// A（J/m）
    pub exchange: f64,
}

impl MaterialPreset {
    /// 在给定温度下生成材料参数
    pub fn properties(&self, temperature: f64) -> MaterialProperties {
        MaterialProperties::new(self.ms, self.ku, self.exchange, temperature)
    }
}

/// 预设材料表
pub const MATERIAL_PRESETS: &[MaterialPreset] = &[
    MaterialPreset {
        name: "Fe",
        aliases: &["iron", "bcc-fe"],
        description: "bcc iron",
        ms: 1.71e6,
        ku: 4.8e4,
        exchange: 2.1e-11,
    },
    MaterialPreset {
        name: "Co",
        aliases: &["cobalt", "hcp-co"],
        description: "hcp cobalt",
        ms: 1.44e6,
        ku: 4.5e5,
        exchange: 3.0e-11,
    },
    MaterialPreset {
        name: "Ni",
        aliases: &["nickel"],
        description: "fcc nickel",
        ms: 4.85e5,
        ku: 5.7e3,
        exchange: 9.0e-12,
    },
    MaterialPreset {
        name: "Permalloy",
        aliases: &["py", "ni80fe20", "nife"],
        description: "Ni80Fe20 soft magnet",
        ms: 8.0e5,
        ku: 0.0,
        exchange: 1.3e-11,
    },
    MaterialPreset {
        name: "CoFeB",
        aliases: &["cofeb", "co20fe60b20"],
        description: "CoFeB with interfacial PMA",
        ms: 1.1e6,
        ku: 8.0e5,
        exchange: 1.5e-11,
    },
    MaterialPreset {
        name: "FePt",
        aliases: &["l10-fept"],
        description: "L1_0 ordered FePt",
        ms: 1.14e6,
        ku: 6.6e6,
        exchange: 1.0e-11,
    },
    MaterialPreset {
        name: "Nd2Fe14B",
        aliases: &["ndfeb", "neodymium"],
        description: "Nd2Fe14B permanent magnet",
        ms: 1.28e6,
        ku: 4.9e6,
        exchange: 7.7e-12,
    },
    MaterialPreset {
        name: "YIG",
        aliases: &["y3fe5o12"],
        description: "yttrium iron garnet",
        ms: 1.4e5,
        ku: 6.1e2,
        exchange: 3.7e-12,
    },
];

/// 按名称或别名查找材料预设（不区分大小写）
pub fn find_preset(name: &str) -> Option<&'static MaterialPreset> {
    let needle = name.trim().to_lowercase();
    MATERIAL_PRESETS.iter().find(|p| {
        p.name.to_lowercase() == needle || p.aliases.iter().any(|alias| *alias == needle)
    })
}
