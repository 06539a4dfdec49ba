//! # 椭圆积分
//!
//! 完全椭圆积分 K(m)、E(m) 和不完全椭圆积分 F(k, θ)、E(k, θ)。
//!
//! ## 约定
//! - 完全积分使用参数 m = k²，定义域 [0, 1)
//! - 不完全积分使用模 k，定义域 [0, 1)
//!
//! ## 算法
//! - 完全积分：Abramowitz & Stegun 17.3.34 / 17.3.36 四阶多项式近似，
//!   误差 < 2e-8；m → 1 时使用渐近式
//! - 不完全积分：k²sin²θ < 0.9 时 k² 的 Taylor 级数（至 k⁶），
//!   否则 20 段中点求积
//!
//! ## 依赖关系
//! - 被 `demag/factors.rs`（圆柱）调用
//! - 无外部模块依赖

use crate::error::{DemagError, Result};

use std::f64::consts::FRAC_PI_2;

/// 超过该 m 值时改用渐近式
const ASYMPTOTIC_THRESHOLD: f64 = 0.99999;

/// Taylor 级数适用的 k²sin²θ 上限
const SERIES_LIMIT: f64 = 0.9;

/// 低于该 m 值时 K − E 使用幂级数
const DIFFERENCE_SERIES_LIMIT: f64 = 0.1;

/// K − E 幂级数的最大项数
const DIFFERENCE_SERIES_TERMS: usize = 40;

/// 中点求积的分段数
const QUADRATURE_PANELS: usize = 20;

/// 第一类完全椭圆积分 K(m)
pub fn ellipk(m: f64) -> Result<f64> {
    check_parameter("ellipk", "m", m)?;

    if m == 0.0 {
        return Ok(FRAC_PI_2);
    }

    let m1 = 1.0 - m;
    let k = if m > ASYMPTOTIC_THRESHOLD {
        (4.0 / m1.sqrt()).ln()
    } else {
        // A&S 17.3.34
        let poly_a = 1.386_294_361_12
            + m1 * (0.096_663_442_59
                + m1 * (0.035_900_923_83 + m1 * (0.037_425_637_13 + m1 * 0.014_511_962_12)));
        let poly_b = 0.5
            + m1 * (0.124_985_935_97
                + m1 * (0.068_802_485_76 + m1 * (0.033_283_553_46 + m1 * 0.004_417_870_12)));
        poly_a - poly_b * m1.ln()
    };

    finite("ellipk", k)
}

/// 第二类完全椭圆积分 E(m)
pub fn ellipe(m: f64) -> Result<f64> {
    check_parameter("ellipe", "m", m)?;

    if m == 0.0 {
        return Ok(FRAC_PI_2);
    }
    if m > ASYMPTOTIC_THRESHOLD {
        return Ok(1.0);
    }

    // A&S 17.3.36
    let m1 = 1.0 - m;
    let poly_a = 1.0
        + m1 * (0.443_251_414_63
            + m1 * (0.062_606_012_20 + m1 * (0.047_573_835_46 + m1 * 0.017_365_064_51)));
    let poly_b = m1
        * (0.249_983_683_10
            + m1 * (0.092_001_800_37 + m1 * (0.040_696_975_26 + m1 * 0.005_264_496_39)));

    finite("ellipe", poly_a - poly_b * m1.ln())
}

/// K(m) − E(m)
///
/// 小 m 时两者的多项式近似误差（~1e-8）远大于差值本身（~πm/4），
/// 因此改用差值的幂级数 (π/2) Σ c_n² · 2n/(2n−1) · mⁿ，c_n = (2n−1)!!/(2n)!!。
pub fn ellipk_minus_ellipe(m: f64) -> Result<f64> {
    check_parameter("ellipk_minus_ellipe", "m", m)?;

    if m >= DIFFERENCE_SERIES_LIMIT {
        return finite("ellipk_minus_ellipe", ellipk(m)? - ellipe(m)?);
    }

    let mut c = 1.0;
    let mut power = 1.0;
    let mut sum = 0.0;
    for n in 1..=DIFFERENCE_SERIES_TERMS {
        let n = n as f64;
        c *= (2.0 * n - 1.0) / (2.0 * n);
        power *= m;
        let term = c * c * 2.0 * n / (2.0 * n - 1.0) * power;
        sum += term;
        if term < f64::EPSILON * sum {
            break;
        }
    }

    finite("ellipk_minus_ellipe", FRAC_PI_2 * sum)
}

/// 第一类不完全椭圆积分 F(k, θ) = ∫₀^θ dt / √(1 − k²sin²t)
pub fn ellipf_inc(k: f64, theta: f64) -> Result<f64> {
    check_parameter("ellipf_inc", "k", k)?;
    check_angle("ellipf_inc", theta)?;

    if theta == 0.0 {
        return Ok(0.0);
    }
    if theta.abs() >= FRAC_PI_2 {
        return Ok(theta.signum() * ellipk(k * k)?);
    }

    let k2 = k * k;
    let s = theta.sin();
    let value = if k2 * s * s < SERIES_LIMIT {
        let [i0, i2, i4, i6] = sine_power_integrals(theta);
        i0 + k2 * (0.5 * i2 + k2 * (0.375 * i4 + k2 * 0.3125 * i6))
    } else {
        midpoint(theta, |t| 1.0 / (1.0 - k2 * t.sin().powi(2)).sqrt())
    };

    finite("ellipf_inc", value)
}

/// 第二类不完全椭圆积分 E(k, θ) = ∫₀^θ √(1 − k²sin²t) dt
pub fn ellipe_inc(k: f64, theta: f64) -> Result<f64> {
    check_parameter("ellipe_inc", "k", k)?;
    check_angle("ellipe_inc", theta)?;

    if theta == 0.0 {
        return Ok(0.0);
    }
    if theta.abs() >= FRAC_PI_2 {
        return Ok(theta.signum() * ellipe(k * k)?);
    }

    let k2 = k * k;
    let s = theta.sin();
    let value = if k2 * s * s < SERIES_LIMIT {
        let [i0, i2, i4, i6] = sine_power_integrals(theta);
        i0 - k2 * (0.5 * i2 + k2 * (0.125 * i4 + k2 * 0.0625 * i6))
    } else {
        midpoint(theta, |t| (1.0 - k2 * t.sin().powi(2)).sqrt())
    };

    finite("ellipe_inc", value)
}

/// ∫₀^θ sin^{2n}(t) dt，n = 0..=3
fn sine_power_integrals(theta: f64) -> [f64; 4] {
    let s2 = (2.0 * theta).sin();
    let s4 = (4.0 * theta).sin();
    let s6 = (6.0 * theta).sin();

    [
        theta,
        theta / 2.0 - s2 / 4.0,
        3.0 * theta / 8.0 - s2 / 4.0 + s4 / 32.0,
        5.0 * theta / 16.0 - 15.0 * s2 / 64.0 + 3.0 * s4 / 64.0 - s6 / 192.0,
    ]
}

/// [0, θ] 上的中点求积（θ 可为负）
fn midpoint<F: Fn(f64) -> f64>(theta: f64, integrand: F) -> f64 {
    let h = theta / QUADRATURE_PANELS as f64;
    (0..QUADRATURE_PANELS)
        .map(|i| integrand((i as f64 + 0.5) * h))
        .sum::<f64>()
        * h
}

fn check_parameter(function: &'static str, parameter: &'static str, value: f64) -> Result<()> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(DemagError::domain(function, parameter, value))
    }
}

fn check_angle(function: &'static str, theta: f64) -> Result<()> {
    if theta.is_finite() {
        Ok(())
    } else {
        Err(DemagError::numerical(format!("{}: angle", function), theta))
    }
}

fn finite(function: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DemagError::numerical(function, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// 参考值来自 scipy.special.ellipk / ellipe
    const K_REFERENCE: &[(f64, f64)] = &[
        (0.1, 1.6124413487202192),
        (0.3, 1.713889448178791),
        (0.5, 1.8540746773013719),
        (0.7, 2.075363135292469),
        (0.9, 2.5780921133481733),
        (0.99, 3.6956373629898747),
        (0.999, 4.841132560550296),
    ];

    const E_REFERENCE: &[(f64, f64)] = &[
        (0.1, 1.5307576368977633),
        (0.3, 1.4453630644126654),
        (0.5, 1.3506438810476755),
        (0.7, 1.2416705679458229),
        (0.9, 1.1047747327040733),
        (0.99, 1.015993545025224),
        (0.999, 1.0021707908344453),
    ];

    /// 高精度 Simpson 积分，用作不完全积分的参考
    fn simpson<F: Fn(f64) -> f64>(theta: f64, f: F) -> f64 {
        let n = 2000;
        let h = theta / n as f64;
        let mut sum = f(0.0) + f(theta);
        for i in 1..n {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * f(i as f64 * h);
        }
        sum * h / 3.0
    }

    #[test]
    fn test_complete_at_zero() {
        assert_eq!(ellipk(0.0).unwrap(), FRAC_PI_2);
        assert_eq!(ellipe(0.0).unwrap(), FRAC_PI_2);
    }

    #[test]
    fn test_complete_reference_values() {
        for &(m, expected) in K_REFERENCE {
            assert_abs_diff_eq!(ellipk(m).unwrap(), expected, epsilon = 5e-8);
        }
        for &(m, expected) in E_REFERENCE {
            assert_abs_diff_eq!(ellipe(m).unwrap(), expected, epsilon = 5e-8);
        }
    }

    #[test]
    fn test_ellipk_increasing_and_divergent() {
        let ms = [
            0.0, 0.1, 0.2, 0.4, 0.6, 0.8, 0.9, 0.99, 0.999, 0.9999, 0.999999, 0.99999999,
        ];
        let values: Vec<f64> = ms.iter().map(|&m| ellipk(m).unwrap()).collect();
        for pair in values.windows(2) {
            assert!(pair[1] > pair[0], "K not increasing: {:?}", pair);
        }
        assert!(ellipk(1.0 - 1e-12).unwrap() > 14.0);
    }

    #[test]
    fn test_asymptotic_branch() {
        let m: f64 = 0.999995;
        assert_relative_eq!(
            ellipk(m).unwrap(),
            (4.0 / (1.0 - m).sqrt()).ln(),
            max_relative = 1e-12
        );
        assert_eq!(ellipe(m).unwrap(), 1.0);
    }

    #[test]
    fn test_complete_domain_errors() {
        for m in [-0.1, 1.0, 1.5, f64::NAN] {
            assert!(matches!(ellipk(m), Err(DemagError::Domain { .. })));
            assert!(matches!(ellipe(m), Err(DemagError::Domain { .. })));
        }
    }

    #[test]
    fn test_difference_series() {
        // 级数区与多项式区在分界附近一致
        let m = 0.099;
        assert_abs_diff_eq!(
            ellipk_minus_ellipe(m).unwrap(),
            ellipk(m).unwrap() - ellipe(m).unwrap(),
            epsilon = 1e-7
        );

        // 小 m 时 K − E ≈ πm/4
        let m = 1e-8;
        assert_relative_eq!(
            ellipk_minus_ellipe(m).unwrap(),
            std::f64::consts::PI * m / 4.0,
            max_relative = 1e-7
        );

        assert_eq!(ellipk_minus_ellipe(0.0).unwrap(), 0.0);
        assert_eq!(
            ellipk_minus_ellipe(0.5).unwrap(),
            ellipk(0.5).unwrap() - ellipe(0.5).unwrap()
        );
    }

    #[test]
    fn test_incomplete_trivial_cases() {
        assert_eq!(ellipf_inc(0.5, 0.0).unwrap(), 0.0);
        assert_eq!(ellipe_inc(0.5, 0.0).unwrap(), 0.0);

        // k = 0 时积分退化为 θ
        assert_abs_diff_eq!(ellipf_inc(0.0, 1.2).unwrap(), 1.2, epsilon = 1e-14);
        assert_abs_diff_eq!(ellipe_inc(0.0, 1.2).unwrap(), 1.2, epsilon = 1e-14);
    }

    #[test]
    fn test_incomplete_delegates_to_complete() {
        let k: f64 = 0.6;
        assert_eq!(ellipf_inc(k, FRAC_PI_2).unwrap(), ellipk(k * k).unwrap());
        assert_eq!(ellipe_inc(k, 2.0).unwrap(), ellipe(k * k).unwrap());
        assert_eq!(ellipf_inc(k, -2.0).unwrap(), -ellipk(k * k).unwrap());
    }

    #[test]
    fn test_incomplete_series_branch() {
        let k: f64 = 0.5;
        let theta = 1.0;
        let f_ref = simpson(theta, |t| 1.0 / (1.0 - k * k * t.sin().powi(2)).sqrt());
        let e_ref = simpson(theta, |t| (1.0 - k * k * t.sin().powi(2)).sqrt());

        assert_abs_diff_eq!(ellipf_inc(k, theta).unwrap(), f_ref, epsilon = 1e-3);
        assert_abs_diff_eq!(ellipe_inc(k, theta).unwrap(), e_ref, epsilon = 1e-3);

        // 奇函数
        assert_abs_diff_eq!(
            ellipf_inc(k, -theta).unwrap(),
            -ellipf_inc(k, theta).unwrap(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_incomplete_quadrature_branch() {
        let k: f64 = 0.99;
        let theta: f64 = 1.45;
        assert!(k * k * theta.sin().powi(2) >= SERIES_LIMIT);

        let f_ref = simpson(theta, |t| 1.0 / (1.0 - k * k * t.sin().powi(2)).sqrt());
        let e_ref = simpson(theta, |t| (1.0 - k * k * t.sin().powi(2)).sqrt());

        assert_relative_eq!(ellipf_inc(k, theta).unwrap(), f_ref, max_relative = 1e-2);
        assert_relative_eq!(ellipe_inc(k, theta).unwrap(), e_ref, max_relative = 1e-2);
    }

    #[test]
    fn test_incomplete_domain_errors() {
        assert!(matches!(
            ellipf_inc(1.0, 0.5),
            Err(DemagError::Domain { parameter: "k", .. })
        ));
        assert!(matches!(ellipe_inc(-0.2, 0.5), Err(DemagError::Domain { .. })));
    }
}
