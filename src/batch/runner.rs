//! # 批量执行器
//!
//! 在独立的 rayon 线程池中并行处理输入文件。
//!
//! ## 功能
//! - 可配置并行作业数（0 = CPU 核数）
//! - 进度条显示
//! - 失败文件汇总
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{DemagError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（输出已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
    /// 成功和跳过的消息（按输入顺序）
    pub messages: Vec<String>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(msg) => {
                self.success += 1;
                self.messages.push(msg);
            }
            ProcessResult::Skipped(msg) => {
                self.skipped += 1;
                self.messages.push(msg);
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| DemagError::Other(format!("failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_jobs() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }

    #[test]
    fn test_run_collects_results() {
        let files: Vec<PathBuf> = ["ok.csv", "skip.csv", "bad.csv", "ok2.csv"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let result = BatchRunner::new(2)
            .run(files, |file| {
                let name = file.display().to_string();
                if name.starts_with("ok") {
                    ProcessResult::Success(name)
                } else if name.starts_with("skip") {
                    ProcessResult::Skipped(name)
                } else {
                    ProcessResult::Failed(name, "broken".to_string())
                }
            })
            .unwrap();

        assert_eq!(result.total(), 4);
        assert_eq!(result.success, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.failures, vec![("bad.csv".to_string(), "broken".to_string())]);
        assert_eq!(result.messages, vec!["ok.csv", "skip.csv", "ok2.csv"]);
    }
}
