//! # 退磁因子公式
//!
//! 五种几何体的退磁因子 (Nx, Ny, Nz) 解析解。
//!
//! ## 公式
//! - 长方体：Aharoni 闭式解（J. Appl. Phys. 83, 3432 (1998)）
//! - 圆柱：Joseph 椭圆积分解（J. Appl. Phys. 37, 4639 (1966)）
//! - 球：各向同性 1/3
//! - 薄膜：(0, 0, 1)
//! - 无限长棒：(0.5, 0.5, 0)
//!
//! 尺寸比超过 1e6 时直接使用薄膜/长棒极限。
//!
//! ## 依赖关系
//! - 被 `demag/engine.rs` 调用
//! - 使用 `demag/elliptic.rs` 计算圆柱的 K、E
//! - 使用 `models/geometry.rs` 的 GeometryDimensions, DemagFactors

use super::elliptic::ellipk_minus_ellipe;
use super::{FACTOR_BOUND_TOLERANCE, MAX_ASPECT_RATIO, MAX_DIMENSION, MIN_DIMENSION};
use crate::error::{DemagError, Result};
use crate::models::{DemagFactors, GeometryDimensions};

use std::f64::consts::PI;

/// 尺寸比低于该值视为薄膜极限
const THIN_LIMIT: f64 = 1e-6;

/// 尺寸比高于该值视为长棒极限
const ROD_LIMIT: f64 = 1e6;

/// 计算任意几何体的退磁因子
pub fn compute_factors(geometry: &GeometryDimensions) -> Result<DemagFactors> {
    match *geometry {
        GeometryDimensions::Prism { a, b, c } => prism_factors(a, b, c),
        GeometryDimensions::Cylinder {
            thickness,
            diameter,
        } => cylinder_factors(thickness, diameter),
        GeometryDimensions::Sphere { diameter } => sphere_factors(diameter),
        GeometryDimensions::ThinFilm => Ok(thin_film_factors()),
        GeometryDimensions::InfiniteRod => Ok(infinite_rod_factors()),
    }
}

// ─────────────────────────────────────────────────────────────
// 长方体
// ─────────────────────────────────────────────────────────────

/// 长方体退磁因子，a、b、c 分别沿 x、y、z
pub fn prism_factors(a: f64, b: f64, c: f64) -> Result<DemagFactors> {
    validate_dimensions(&[("a", a), ("b", b), ("c", c)])?;

    let nz = prism_nz(a, b, c)?;
    let nx = prism_nz(b, c, a)?;
    let ny = 1.0 - nx - nz;

    DemagFactors::validated(nx, ny, nz)
}

/// 沿第三个尺寸 (c) 方向的退磁因子
fn prism_nz(a: f64, b: f64, c: f64) -> Result<f64> {
    if let Some(nz) = prism_limit(a, b, c) {
        return Ok(nz);
    }

    let nz = aharoni(a / 2.0, b / 2.0, c / 2.0)?;
    unit_interval("prism Nz", nz)
}

/// 极端长径比的极限值
fn prism_limit(a: f64, b: f64, c: f64) -> Option<f64> {
    // c 极薄：面外方向
    if c <= THIN_LIMIT * a.min(b) {
        return Some(1.0);
    }
    // a 或 b 极薄：c 在膜面内
    if a <= THIN_LIMIT * b.min(c) || b <= THIN_LIMIT * a.min(c) {
        return Some(0.0);
    }
    // c 极长：沿棒轴
    if c >= ROD_LIMIT * a.max(b) {
        return Some(0.0);
    }
    // a 或 b 极长：c 垂直于棒轴
    if a >= ROD_LIMIT * b.max(c) || b >= ROD_LIMIT * a.max(c) {
        return Some(0.5);
    }
    None
}

/// Aharoni 闭式解，参数为半边长
///
/// 成对的对数项合并为 atanh 差，三次项合并为 r 的混合二阶差分，
/// 各项均由同号量构成。
fn aharoni(a: f64, b: f64, c: f64) -> Result<f64> {
    let (a2, b2, c2) = (a * a, b * b, c * c);

    let r = (a2 + b2 + c2).sqrt();
    let r_ab = (a2 + b2).sqrt();
    let r_bc = (b2 + c2).sqrt();
    let r_ac = (a2 + c2).sqrt();

    // atanh(x) − atanh(y) = atanh((x − y) / (1 − xy))，分母与 1 的差值显式给出
    let t_ac = atanh_gap(a * b2, b2 * c2 / (r_ac + a) + c2 * (r + r_ac))?;
    let t_bc = atanh_gap(b * a2, a2 * c2 / (r_bc + b) + c2 * (r + r_bc))?;
    let t_ab_a = atanh_gap(a * c2, c2 * b2 / (r_ab + a) + b2 * (r + r_ab))?;
    let t_ab_b = atanh_gap(b * c2, c2 * a2 / (r_ab + b) + a2 * (r + r_ab))?;

    // r(x, y, z) 的混合二阶差分，例如 x_a = r − r_ab − r_ac + a
    let x_a = -b2 * c2 * (1.0 / (r + r_ac) + 1.0 / (r_ab + a)) / ((r + r_ab) * (r_ac + a));
    let x_b = -a2 * c2 * (1.0 / (r + r_bc) + 1.0 / (r_ab + b)) / ((r + r_ab) * (r_bc + b));
    let x_c = a2 * b2 * (1.0 / (r + r_ac) + 1.0 / (r_bc + c)) / ((r + r_bc) * (r_ac + c));
    let cubic = (a2 * x_a + b2 * x_b + 2.0 * c2 * x_c) / (3.0 * a * b * c);

    let mut pi_nz = 0.0;
    pi_nz += b / c * t_ab_a;
    pi_nz += a / c * t_ab_b;
    pi_nz -= c / b * t_ac;
    pi_nz -= c / a * t_bc;
    pi_nz += 2.0 * (a * b).atan2(c * r);
    pi_nz += cubic;

    if !pi_nz.is_finite() {
        return Err(DemagError::numerical("Aharoni prism formula", pi_nz));
    }
    Ok(pi_nz / PI)
}

/// atanh(num / (num + gap))，gap > 0 为分母与分子之差
fn atanh_gap(num: f64, gap: f64) -> Result<f64> {
    let x = 2.0 * num / gap;
    if x.is_finite() && x >= 0.0 {
        Ok(0.5 * x.ln_1p())
    } else {
        Err(DemagError::numerical("logarithm argument in prism formula", x))
    }
}

// ─────────────────────────────────────────────────────────────
// 圆柱
// ─────────────────────────────────────────────────────────────

/// 圆柱退磁因子，轴沿 z
pub fn cylinder_factors(thickness: f64, diameter: f64) -> Result<DemagFactors> {
    validate_dimensions(&[("thickness", thickness), ("diameter", diameter)])?;

    let nz = cylinder_nz(thickness / diameter)?;
    let nxy = (1.0 - nz) / 2.0;

    DemagFactors::validated(nxy, nxy, nz)
}

/// 轴向退磁因子，p = 厚度 / 直径
fn cylinder_nz(p: f64) -> Result<f64> {
    if p < THIN_LIMIT {
        // 薄圆盘渐近式
        return Ok(1.0 - 2.0 * p / PI);
    }
    if p > ROD_LIMIT {
        return Ok(0.0);
    }

    let k2 = 1.0 / (1.0 + 0.25 * p * p);
    if !(k2 > 0.0 && k2 < 1.0) {
        return Err(DemagError::domain("cylinder_nz", "k²", k2));
    }
    let k = k2.sqrt();

    let nz = 1.0 - (2.0 / PI) * (p / k) * ellipk_minus_ellipe(k2)?;
    unit_interval("cylinder Nz", nz)
}

// ─────────────────────────────────────────────────────────────
// 球、薄膜、无限长棒
// ─────────────────────────────────────────────────────────────

/// 球：各向同性
pub fn sphere_factors(diameter: f64) -> Result<DemagFactors> {
    if !diameter.is_finite() || diameter <= 0.0 {
        return Err(DemagError::InvalidDimension {
            name: "diameter",
            value: diameter,
        });
    }
    Ok(DemagFactors::exact(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0))
}

/// 无限大薄膜：全部退磁沿面外
pub fn thin_film_factors() -> DemagFactors {
    DemagFactors::exact(0.0, 0.0, 1.0)
}

/// 无限长棒：轴向无退磁
pub fn infinite_rod_factors() -> DemagFactors {
    DemagFactors::exact(0.5, 0.5, 0.0)
}

// ─────────────────────────────────────────────────────────────
// 校验
// ─────────────────────────────────────────────────────────────

/// 要求结果落在 [0, 1]，舍入噪声截断到边界
fn unit_interval(context: &str, value: f64) -> Result<f64> {
    if value.is_finite()
        && value >= -FACTOR_BOUND_TOLERANCE
        && value <= 1.0 + FACTOR_BOUND_TOLERANCE
    {
        Ok(value.clamp(0.0, 1.0))
    } else {
        Err(DemagError::numerical(format!("{} outside [0, 1]", context), value))
    }
}

/// 依次检查：正值 → 范围 → 长径比
fn validate_dimensions(dims: &[(&'static str, f64)]) -> Result<()> {
    for &(name, value) in dims {
        if !value.is_finite() || value <= 0.0 {
            return Err(DemagError::InvalidDimension { name, value });
        }
    }

    for &(name, value) in dims {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
            return Err(DemagError::OutOfRange {
                name,
                value,
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            });
        }
    }

    let max = dims.iter().map(|&(_, v)| v).fold(f64::MIN, f64::max);
    let min = dims.iter().map(|&(_, v)| v).fold(f64::MAX, f64::min);
    let ratio = max / min;
    if ratio > MAX_ASPECT_RATIO {
        return Err(DemagError::ExtremeAspectRatio {
            ratio,
            max: MAX_ASPECT_RATIO,
        });
    }

    Ok(())
}
