//! # 长径比扫描
//!
//! 在对数等距的长径比序列上计算方形截面长方体或圆柱的退磁因子。
//!
//! 长径比定义为沿 z 轴的尺寸除以横向尺寸：
//! - 长方体：c / a（a = b = 横向尺寸）
//! - 圆柱：thickness / diameter
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 调用
//! - 使用 `demag/engine.rs` 的共享缓存
//! - 使用 `rayon` 并行计算

use super::DemagEngine;
use crate::error::{DemagError, Result};
use crate::models::{DemagFactors, GeometryDimensions, GeometryKind};

use rayon::prelude::*;

/// 扫描的几何体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepShape {
    /// 方形截面长方体
    Prism,
    Cylinder,
}

impl SweepShape {
    pub fn kind(&self) -> GeometryKind {
        match self {
            SweepShape::Prism => GeometryKind::Prism,
            SweepShape::Cylinder => GeometryKind::Cylinder,
        }
    }

    /// 给定横向尺寸和长径比构造几何体
    pub fn geometry(&self, width: f64, aspect_ratio: f64) -> GeometryDimensions {
        let height = width * aspect_ratio;
        match self {
            SweepShape::Prism => GeometryDimensions::Prism {
                a: width,
                b: width,
                c: height,
            },
            SweepShape::Cylinder => GeometryDimensions::Cylinder {
                thickness: height,
                diameter: width,
            },
        }
    }
}

/// 扫描参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    pub shape: SweepShape,
    /// 横向尺寸（nm）
    pub width: f64,
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub points: usize,
}

impl SweepConfig {
    /// 对数等距的长径比序列（包含两端）
    pub fn aspect_ratios(&self) -> Result<Vec<f64>> {
        if !(self.min_ratio.is_finite() && self.min_ratio > 0.0) {
            return Err(DemagError::InvalidRange(format!(
                "minimum aspect ratio must be positive, got {}",
                self.min_ratio
            )));
        }
        if !(self.max_ratio.is_finite() && self.max_ratio > self.min_ratio) {
            return Err(DemagError::InvalidRange(format!(
                "maximum aspect ratio {} must exceed minimum {}",
                self.max_ratio, self.min_ratio
            )));
        }
        if self.points < 2 {
            return Err(DemagError::InvalidRange(format!(
                "a sweep needs at least 2 points, got {}",
                self.points
            )));
        }

        let log_min = self.min_ratio.ln();
        let step = (self.max_ratio.ln() - log_min) / (self.points - 1) as f64;
        let mut ratios: Vec<f64> = (0..self.points)
            .map(|i| (log_min + step * i as f64).exp())
            .collect();

        // 端点取精确值
        ratios[0] = self.min_ratio;
        ratios[self.points - 1] = self.max_ratio;
        Ok(ratios)
    }
}

/// 扫描结果中的一个点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub aspect_ratio: f64,
    pub factors: DemagFactors,
}

/// 并行执行扫描
///
/// 每完成一个点调用一次 `on_point`（用于推进进度条）。
/// 任何一个点计算失败则整个扫描失败。
pub fn run<F>(engine: &DemagEngine, config: &SweepConfig, on_point: F) -> Result<Vec<SweepPoint>>
where
    F: Fn() + Sync,
{
    let ratios = config.aspect_ratios()?;

    ratios
        .par_iter()
        .map(|&aspect_ratio| -> Result<SweepPoint> {
            let geometry = config.shape.geometry(config.width, aspect_ratio);
            let factors = engine.compute_factors(&geometry)?;
            on_point();
            Ok(SweepPoint {
                aspect_ratio,
                factors,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(shape: SweepShape) -> SweepConfig {
        SweepConfig {
            shape,
            width: 10.0,
            min_ratio: 0.01,
            max_ratio: 100.0,
            points: 5,
        }
    }

    #[test]
    fn test_log_spacing() {
        let ratios = config(SweepShape::Prism).aspect_ratios().unwrap();
        let expected = [0.01, 0.1, 1.0, 10.0, 100.0];
        assert_eq!(ratios.len(), expected.len());
        for (r, e) in ratios.iter().zip(expected) {
            assert_relative_eq!(*r, e, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_rejects_bad_range() {
        let mut bad = config(SweepShape::Prism);
        bad.min_ratio = 0.0;
        assert!(matches!(bad.aspect_ratios(), Err(DemagError::InvalidRange(_))));

        let mut bad = config(SweepShape::Prism);
        bad.max_ratio = 0.001;
        assert!(matches!(bad.aspect_ratios(), Err(DemagError::InvalidRange(_))));

        let mut bad = config(SweepShape::Prism);
        bad.points = 1;
        assert!(matches!(bad.aspect_ratios(), Err(DemagError::InvalidRange(_))));
    }

    #[test]
    fn test_prism_sweep_is_monotonic() {
        let engine = DemagEngine::default();
        let counter = AtomicUsize::new(0);
        let points = run(&engine, &config(SweepShape::Prism), || {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        assert_eq!(counter.load(Ordering::Relaxed), 5);
        // 拉长沿 z 的尺寸，Nz 单调下降
        for pair in points.windows(2) {
            assert!(pair[0].aspect_ratio < pair[1].aspect_ratio);
            assert!(pair[0].factors.nz > pair[1].factors.nz);
            assert_relative_eq!(pair[1].factors.nx, pair[1].factors.ny, epsilon = 1e-9);
        }
        // 立方体
        assert_relative_eq!(points[2].factors.nz, 1.0 / 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cylinder_sweep_uses_engine_cache() {
        let engine = DemagEngine::default();
        let cfg = config(SweepShape::Cylinder);
        run(&engine, &cfg, || {}).unwrap();
        run(&engine, &cfg, || {}).unwrap();

        let stats = engine.stats().unwrap().factors;
        assert_eq!(stats.len, 5);
        assert_eq!(stats.hits, 5);
    }

    #[test]
    fn test_sweep_propagates_validation_errors() {
        let engine = DemagEngine::default();
        let cfg = SweepConfig {
            shape: SweepShape::Prism,
            width: 1.0,
            min_ratio: 1.0,
            max_ratio: 1e8,
            points: 3,
        };
        assert!(run(&engine, &cfg, || {}).is_err());
    }
}
