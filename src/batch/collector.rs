//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理文件列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（`glob::Pattern`，逗号分隔多个模式）
//! - 递归目录搜索
//! - 结果按路径排序，输出顺序可重复
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{DemagError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认匹配的几何表文件
pub const DEFAULT_PATTERN: &str = "*.csv";

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器，默认匹配 `*.csv`
    pub fn new(input: PathBuf) -> Result<Self> {
        Ok(Self {
            input,
            patterns: parse_patterns(DEFAULT_PATTERN)?,
            recursive: false,
        })
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let patterns = parse_patterns(pattern)?;
        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let walker = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file());

        let mut files: Vec<PathBuf> = walker
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.patterns.iter().any(|p| p.matches(name)),
            None => false,
        }
    }
}

/// 解析逗号分隔的 glob 模式，空项忽略
fn parse_patterns(pattern: &str) -> Result<Vec<Pattern>> {
    pattern
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Pattern::new(s).map_err(|e| {
                DemagError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[PathBuf]) -> Vec<&str> {
        files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect()
    }

    #[test]
    fn test_parse_patterns() {
        let patterns = parse_patterns("*.csv, run[0-9].txt,,").unwrap();
        assert_eq!(patterns.len(), 2);
        assert!(patterns[0].matches("geometries.csv"));
        assert!(!patterns[0].matches("geometries.tsv"));
        assert!(patterns[1].matches("run1.txt"));
        assert!(!patterns[1].matches("runa.txt"));

        // ? 匹配单个字符（含非 ASCII）
        let patterns = parse_patterns("set?.csv").unwrap();
        assert!(patterns[0].matches("seté.csv"));
        assert!(!patterns[0].matches("set12.csv"));

        let err = parse_patterns("run[0-9.csv").unwrap_err();
        assert!(matches!(err, DemagError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = FileCollector::new(PathBuf::from(".")).and_then(|c| c.with_pattern("**a"));
        assert!(matches!(result, Err(DemagError::InvalidArgument(_))));
    }

    #[test]
    fn test_collect_directory() {
        let root = std::env::temp_dir().join(format!("nanodemag-collect-{}", std::process::id()));
        let nested = root.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("b.csv"), "shape\n").unwrap();
        fs::write(root.join("a.csv"), "shape\n").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(nested.join("c.csv"), "shape\n").unwrap();
        fs::write(root.join("run1.csv"), "shape\n").unwrap();

        let flat = FileCollector::new(root.clone()).unwrap().collect();
        assert_eq!(names(&flat), vec!["a.csv", "b.csv", "run1.csv"]);

        let deep = FileCollector::new(root.clone())
            .unwrap()
            .recursive(true)
            .collect();
        assert_eq!(deep.len(), 4);

        let txt = FileCollector::new(root.clone())
            .unwrap()
            .with_pattern("*.txt, *.csv")
            .unwrap()
            .collect();
        assert_eq!(txt.len(), 4);

        let runs = FileCollector::new(root.clone())
            .unwrap()
            .with_pattern("run[0-9].csv")
            .unwrap()
            .collect();
        assert_eq!(names(&runs), vec!["run1.csv"]);

        // 空模式保留默认
        let default = FileCollector::new(root.clone())
            .unwrap()
            .with_pattern(" , ")
            .unwrap()
            .collect();
        assert_eq!(default.len(), 3);

        fs::remove_dir_all(&root).ok();
    }
}
