//! # 各向异性分析
//!
//! 由退磁因子和材料参数计算形状各向异性、有效各向异性、矫顽场和热稳定因子。
//!
//! ## 算法
//! 1. 按退磁因子升序稳定排序，最小为易轴，最大为难轴
//! 2. K_shape = ½ μ0 Ms² (N_hard − N_easy)
//! 3. K_eff = Ku ± K_shape，符号由磁晶易轴取向和形状易轴是否为 z 决定
//! 4. H_c = 2|K_eff| / (μ0 Ms)
//! 5. Δ = |K_eff| V / (k_B T)
//! 6. 分类：各向同性 / 磁晶主导 / 形状主导
//!
//! 相等的退磁因子保持输入顺序 (x, y, z)：易轴取并列最小值中的第一个，
//! 难轴取并列最大值中的最后一个。
//!
//! ## 依赖关系
//! - 被 `demag/engine.rs` 调用
//! - 使用 `models/analysis.rs`, `models/geometry.rs`, `models/material.rs`

use super::{ISOTROPIC_THRESHOLD, K_B, MU0};
use crate::error::{DemagError, Result};
use crate::models::{
    AnisotropyAnalysis, AnisotropyClass, Axis, AxisFactor, MagnetizationDirection,
    MaterialProperties,
};

/// 执行各向异性分析
///
/// `volume` 为 m³，无限几何体传入 None（此时热稳定因子未定义）。
pub fn analyze(
    axes: &[AxisFactor],
    material: &MaterialProperties,
    volume: Option<f64>,
    crystalline_easy_axis_in_plane: bool,
) -> Result<AnisotropyAnalysis> {
    if !(2..=3).contains(&axes.len()) {
        return Err(DemagError::InvalidArgument(format!(
            "anisotropy analysis needs 2 or 3 axis factors, got {}",
            axes.len()
        )));
    }
    if let Some(bad) = axes.iter().find(|a| !a.value.is_finite()) {
        return Err(DemagError::numerical(
            format!("demagnetization factor along {}", bad.axis),
            bad.value,
        ));
    }

    let mut sorted = axes.to_vec();
    sorted.sort_by(|a, b| a.value.total_cmp(&b.value));
    let easy = sorted[0];
    let hard = sorted[sorted.len() - 1];

    let ms = material.ms;
    let k_shape = finite("K_shape", 0.5 * MU0 * ms * ms * (hard.value - easy.value))?;

    let k_eff = finite(
        "K_eff",
        effective_anisotropy(material.ku, k_shape, crystalline_easy_axis_in_plane, easy.axis),
    )?;

    let coercive_field = finite("H_c", 2.0 * k_eff.abs() / (MU0 * ms))?;

    let thermal_stability = match volume {
        Some(v) => Some(finite(
            "thermal stability",
            k_eff.abs() * v / (K_B * material.temperature),
        )?),
        None => None,
    };

    let exchange_length_nm = finite(
        "exchange length",
        exchange_length(material.exchange, ms) * 1e9,
    )?;

    let crystalline = MagnetizationDirection::from_in_plane(crystalline_easy_axis_in_plane);
    let (classification, preferred_direction) = if k_eff.abs() < ISOTROPIC_THRESHOLD {
        (AnisotropyClass::Isotropic, MagnetizationDirection::None)
    } else if k_eff > 0.0 {
        (AnisotropyClass::CrystallineDominated, crystalline)
    } else if easy.axis == Axis::Z {
        (AnisotropyClass::ShapeDominated, crystalline.opposite())
    } else {
        (AnisotropyClass::ShapeDominated, crystalline)
    };

    Ok(AnisotropyAnalysis {
        easy_axis: easy.axis,
        n_easy: easy.value,
        hard_axis: hard.axis,
        n_hard: hard.value,
        k_shape,
        k_eff,
        coercive_field,
        thermal_stability,
        exchange_length_nm,
        classification,
        preferred_direction,
    })
}

/// 磁晶与形状各向异性的组合
///
/// | 磁晶易轴 | 形状易轴为 z | K_eff         |
/// |----------|--------------|---------------|
/// | 面外     | 是           | Ku + K_shape  |
/// | 面外     | 否           | Ku − K_shape  |
/// | 面内     | 是           | Ku − K_shape  |
/// | 面内     | 否           | Ku + K_shape  |
pub fn effective_anisotropy(ku: f64, k_shape: f64, in_plane: bool, easy_axis: Axis) -> f64 {
    let easy_is_z = easy_axis == Axis::Z;
    match (in_plane, easy_is_z) {
        (false, true) => ku + k_shape,
        (false, false) => ku - k_shape,
        (true, true) => ku - k_shape,
        (true, false) => ku + k_shape,
    }
}

/// 交换长度 l_ex = √(2A / (μ0 Ms²))，单位 m
pub fn exchange_length(exchange: f64, ms: f64) -> f64 {
    (2.0 * exchange / (MU0 * ms * ms)).sqrt()
}

fn finite(context: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DemagError::numerical(context, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn material(ms: f64, ku: f64) -> MaterialProperties {
        MaterialProperties::new(ms, ku, 1.3e-11, 300.0)
    }

    #[test]
    fn test_pure_shape_anisotropy() {
        let axes = [AxisFactor::new(Axis::X, 0.0), AxisFactor::new(Axis::Z, 1.0)];
        let result = analyze(&axes, &material(1e6, 0.0), None, false).unwrap();

        let expected = 0.5 * MU0 * 1e12;
        assert_eq!(result.easy_axis, Axis::X);
        assert_eq!(result.hard_axis, Axis::Z);
        assert_relative_eq!(result.k_shape, expected, max_relative = 1e-12);
        assert_relative_eq!(result.k_eff, -expected, max_relative = 1e-12);
        assert_eq!(result.classification, AnisotropyClass::ShapeDominated);
        assert_eq!(result.preferred_direction, MagnetizationDirection::OutOfPlane);
        assert!(result.thermal_stability.is_none());
    }

    #[test]
    fn test_sign_table() {
        assert_eq!(effective_anisotropy(10.0, 3.0, false, Axis::Z), 13.0);
        assert_eq!(effective_anisotropy(10.0, 3.0, false, Axis::X), 7.0);
        assert_eq!(effective_anisotropy(10.0, 3.0, true, Axis::Z), 7.0);
        assert_eq!(effective_anisotropy(10.0, 3.0, true, Axis::Y), 13.0);
    }

    #[test]
    fn test_coercive_field_and_stability() {
        // 面外磁晶易轴 + 长棒形状（z 为形状易轴）
        let axes = [AxisFactor::new(Axis::X, 0.5), AxisFactor::new(Axis::Z, 0.0)];
        let mat = material(1.4e6, 4.5e5);
        let volume = 1e-24;
        let result = analyze(&axes, &mat, Some(volume), false).unwrap();

        let k_shape = 0.5 * MU0 * 1.4e6 * 1.4e6 * 0.5;
        let k_eff = 4.5e5 + k_shape;
        assert_relative_eq!(result.k_eff, k_eff, max_relative = 1e-12);
        assert_relative_eq!(
            result.coercive_field,
            2.0 * k_eff / (MU0 * 1.4e6),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.thermal_stability.unwrap(),
            k_eff * volume / (K_B * 300.0),
            max_relative = 1e-12
        );
        assert_eq!(result.classification, AnisotropyClass::CrystallineDominated);
        assert_eq!(result.preferred_direction, MagnetizationDirection::OutOfPlane);
    }

    #[test]
    fn test_isotropic_sphere() {
        let third = 1.0 / 3.0;
        let axes = [
            AxisFactor::new(Axis::X, third),
            AxisFactor::new(Axis::Y, third),
            AxisFactor::new(Axis::Z, third),
        ];
        let result = analyze(&axes, &material(8e5, 0.0), Some(1e-24), true).unwrap();

        // 并列时易轴取第一个，难轴取最后一个
        assert_eq!(result.easy_axis, Axis::X);
        assert_eq!(result.hard_axis, Axis::Z);
        assert_eq!(result.k_shape, 0.0);
        assert_eq!(result.classification, AnisotropyClass::Isotropic);
        assert_eq!(result.preferred_direction, MagnetizationDirection::None);
        assert_eq!(result.thermal_stability, Some(0.0));
    }

    #[test]
    fn test_shape_dominated_direction_flips_for_z_easy_axis() {
        // 面内磁晶易轴，形状易轴为 z：K_eff = Ku − K_shape < 0
        let axes = [AxisFactor::new(Axis::X, 0.5), AxisFactor::new(Axis::Z, 0.0)];
        let result = analyze(&axes, &material(1e6, 1e4), None, true).unwrap();
        assert!(result.k_eff < 0.0);
        assert_eq!(result.classification, AnisotropyClass::ShapeDominated);
        assert_eq!(result.preferred_direction, MagnetizationDirection::OutOfPlane);
    }

    #[test]
    fn test_exchange_length() {
        // 坡莫合金约 5.7 nm
        let result = analyze(
            &[AxisFactor::new(Axis::X, 0.0), AxisFactor::new(Axis::Z, 1.0)],
            &material(8e5, 0.0),
            None,
            false,
        )
        .unwrap();
        assert!(result.exchange_length_nm > 5.5 && result.exchange_length_nm < 6.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        let one = [AxisFactor::new(Axis::X, 1.0)];
        assert!(matches!(
            analyze(&one, &material(1e6, 0.0), None, false),
            Err(DemagError::InvalidArgument(_))
        ));

        let nan = [AxisFactor::new(Axis::X, f64::NAN), AxisFactor::new(Axis::Z, 1.0)];
        assert!(matches!(
            analyze(&nan, &material(1e6, 0.0), None, false),
            Err(DemagError::Numerical { .. })
        ));
    }
}
