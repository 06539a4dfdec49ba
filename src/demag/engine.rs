//! # 退磁计算引擎
//!
//! 持有两级缓存的计算入口：
//! - 退磁因子缓存：纯函数结果，永不过期，FIFO 容量上限
//! - 分析结果缓存：几何 + 材料 → 完整报告，带有效期
//!
//! 每个缓存由各自的互斥锁保护，引擎可以在 rayon 线程池中共享。
//! 磁晶易轴取向与结果缓存位于同一把锁内，切换取向时清空缓存，
//! 不会与并发读取交错。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `demag/factors.rs`, `demag/anisotropy.rs`, `demag/cache.rs`

use super::anisotropy;
use super::cache::{CacheStats, ComputationCache};
use super::factors;
use super::{CACHE_TTL, MAX_CACHE_SIZE};
use crate::error::{DemagError, Result};
use crate::models::{
    CalculationReport, DemagFactors, GeometryDimensions, GeometryKey, MaterialKey,
    MaterialProperties,
};

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// 引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// 每个缓存的最大条目数
    pub cache_capacity: usize,
    /// 分析结果的有效期
    pub results_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: MAX_CACHE_SIZE,
            results_ttl: CACHE_TTL,
        }
    }
}

/// 分析结果缓存键
type ReportKey = (GeometryKey, MaterialKey);

/// 分析结果缓存及其依赖的全局参数
struct ReportState {
    crystalline_easy_axis_in_plane: bool,
    cache: ComputationCache<ReportKey, CalculationReport>,
}

/// 两级缓存的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub factors: CacheStats,
    pub reports: CacheStats,
}

/// 退磁计算引擎
pub struct DemagEngine {
    factor_cache: Mutex<ComputationCache<GeometryKey, DemagFactors>>,
    reports: Mutex<ReportState>,
}

impl Default for DemagEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DemagEngine {
    /// 创建新的计算引擎（磁晶易轴默认面外）
    pub fn new(config: EngineConfig) -> Self {
        Self {
            factor_cache: Mutex::new(ComputationCache::new(config.cache_capacity)),
            reports: Mutex::new(ReportState {
                crystalline_easy_axis_in_plane: false,
                cache: ComputationCache::with_ttl(config.cache_capacity, config.results_ttl),
            }),
        }
    }

    /// 计算退磁因子（经过因子缓存）
    pub fn compute_factors(&self, geometry: &GeometryDimensions) -> Result<DemagFactors> {
        let key = geometry.key();
        if let Some(factors) = lock(&self.factor_cache)?.get(&key) {
            return Ok(factors);
        }

        // 计算期间不持有锁
        let factors = factors::compute_factors(geometry)?;
        lock(&self.factor_cache)?.set(key, factors);
        Ok(factors)
    }

    /// 计算退磁因子并完成各向异性分析（经过结果缓存）
    pub fn calculate(
        &self,
        geometry: &GeometryDimensions,
        material: &MaterialProperties,
    ) -> Result<CalculationReport> {
        material.validate()?;

        let key = (geometry.key(), material.key());
        let in_plane = {
            let mut state = lock(&self.reports)?;
            if let Some(report) = state.cache.get(&key) {
                return Ok(report);
            }
            state.crystalline_easy_axis_in_plane
        };

        let factors = self.compute_factors(geometry)?;
        let axes = geometry.axis_factors(&factors);
        let analysis = anisotropy::analyze(&axes, material, geometry.volume_m3(), in_plane)?;

        let report = CalculationReport {
            geometry: *geometry,
            material: *material,
            crystalline_easy_axis_in_plane: in_plane,
            factors,
            analysis,
        };

        let mut state = lock(&self.reports)?;
        // 计算期间取向已被切换时，结果不再有效，不写入缓存
        if state.crystalline_easy_axis_in_plane == in_plane {
            state.cache.set(key, report.clone());
        }
        Ok(report)
    }

    /// 当前磁晶易轴取向
    pub fn crystalline_easy_axis_in_plane(&self) -> Result<bool> {
        Ok(lock(&self.reports)?.crystalline_easy_axis_in_plane)
    }

    /// 设置磁晶易轴取向，取向改变时清空结果缓存
    ///
    /// 返回是否发生了改变。
    pub fn set_crystalline_easy_axis_in_plane(&self, in_plane: bool) -> Result<bool> {
        let mut state = lock(&self.reports)?;
        if state.crystalline_easy_axis_in_plane == in_plane {
            return Ok(false);
        }
        state.crystalline_easy_axis_in_plane = in_plane;
        state.cache.clear();
        Ok(true)
    }

    /// 清扫过期的分析结果，返回删除数量
    pub fn cleanup(&self) -> Result<usize> {
        Ok(lock(&self.reports)?.cache.cleanup())
    }

    /// 清空两级缓存
    pub fn clear(&self) -> Result<()> {
        lock(&self.factor_cache)?.clear();
        lock(&self.reports)?.cache.clear();
        Ok(())
    }

    pub fn stats(&self) -> Result<EngineStats> {
        Ok(EngineStats {
            factors: lock(&self.factor_cache)?.stats(),
            reports: lock(&self.reports)?.cache.stats(),
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| DemagError::Other("computation cache lock poisoned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnisotropyClass, MagnetizationDirection};
    use rayon::prelude::*;

    fn permalloy() -> MaterialProperties {
        MaterialProperties::new(8.0e5, 0.0, 1.3e-11, 300.0)
    }

    #[test]
    fn test_factor_cache_hit() {
        let engine = DemagEngine::default();
        let geometry = GeometryDimensions::Prism {
            a: 10.0,
            b: 20.0,
            c: 5.0,
        };

        let first = engine.compute_factors(&geometry).unwrap();
        let second = engine.compute_factors(&geometry).unwrap();
        assert_eq!(first, second);

        let stats = engine.stats().unwrap().factors;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.len, 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let engine = DemagEngine::default();
        let bad = GeometryDimensions::Sphere { diameter: -1.0 };
        assert!(engine.compute_factors(&bad).is_err());
        assert_eq!(engine.stats().unwrap().factors.len, 0);
    }

    #[test]
    fn test_calculate_thin_film() {
        let engine = DemagEngine::default();
        let report = engine
            .calculate(&GeometryDimensions::ThinFilm, &permalloy())
            .unwrap();

        assert_eq!(report.factors.as_array(), [0.0, 0.0, 1.0]);
        assert_eq!(report.analysis.classification, AnisotropyClass::ShapeDominated);
        assert_eq!(
            report.analysis.preferred_direction,
            MagnetizationDirection::OutOfPlane
        );
        assert!(report.analysis.thermal_stability.is_none());
    }

    #[test]
    fn test_orientation_change_clears_reports() {
        let engine = DemagEngine::default();
        let geometry = GeometryDimensions::Cylinder {
            thickness: 2.0,
            diameter: 50.0,
        };
        let material = MaterialProperties::new(1.1e6, 8.0e5, 1.5e-11, 300.0);

        let out_of_plane = engine.calculate(&geometry, &material).unwrap();
        assert_eq!(engine.stats().unwrap().reports.len, 1);

        assert!(engine.set_crystalline_easy_axis_in_plane(true).unwrap());
        assert_eq!(engine.stats().unwrap().reports.len, 0);
        assert!(!engine.set_crystalline_easy_axis_in_plane(true).unwrap());

        let in_plane = engine.calculate(&geometry, &material).unwrap();
        assert!(in_plane.crystalline_easy_axis_in_plane);
        assert_ne!(out_of_plane.analysis.k_eff, in_plane.analysis.k_eff);

        // 退磁因子缓存不受取向影响
        assert_eq!(engine.stats().unwrap().factors.len, 1);
    }

    #[test]
    fn test_rejects_invalid_material() {
        let engine = DemagEngine::default();
        let material = MaterialProperties::new(-1.0, 0.0, 1e-11, 300.0);
        let err = engine
            .calculate(&GeometryDimensions::Sphere { diameter: 10.0 }, &material)
            .unwrap_err();
        assert!(matches!(err, DemagError::InvalidMaterial { .. }));
    }

    #[test]
    fn test_results_expire() {
        let engine = DemagEngine::new(EngineConfig {
            cache_capacity: 8,
            results_ttl: Duration::from_millis(10),
        });
        engine
            .calculate(&GeometryDimensions::Sphere { diameter: 10.0 }, &permalloy())
            .unwrap();
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(engine.cleanup().unwrap(), 1);
        assert_eq!(engine.stats().unwrap().reports.len, 0);
    }

    #[test]
    fn test_shared_across_threads() {
        let engine = DemagEngine::default();
        let results: Vec<DemagFactors> = (1..=50)
            .into_par_iter()
            .map(|i| {
                let geometry = GeometryDimensions::Prism {
                    a: 10.0,
                    b: 10.0,
                    c: i as f64,
                };
                engine.compute_factors(&geometry).unwrap()
            })
            .collect();

        for f in &results {
            assert!((f.sum() - 1.0).abs() < 1e-6);
        }
        assert_eq!(engine.stats().unwrap().factors.len, 50);
    }
}
