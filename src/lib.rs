//! # nanodemag 库
//!
//! 纳米结构退磁因子、椭圆积分、形状各向异性分析与计算缓存。
//! 命令行程序 (`main.rs`) 只是这些模块之上的一层薄封装。
//!
//! ## 模块
//! - `demag`: 计算核心（椭圆积分、退磁因子、各向异性、缓存、引擎、导出、绘图）
//! - `models`: 几何、材料和分析结果数据模型
//! - `error`: 统一错误类型
//! - `batch`: 文件收集与并行执行
//! - `cli` / `commands`: 命令行定义与执行
//! - `utils`: 终端输出与进度条

pub mod batch;
pub mod cli;
pub mod commands;
pub mod demag;
pub mod error;
pub mod models;
pub mod utils;

pub use demag::{DemagEngine, EngineConfig};
pub use error::{DemagError, Result};
