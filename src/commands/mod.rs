//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。所有计算型子命令共享同一个 `DemagEngine`。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `demag/`, `models/`, `utils/`
//! - 子模块: factors, analyze, sweep, batch, materials

pub mod analyze;
pub mod batch;
pub mod factors;
pub mod materials;
pub mod sweep;

use crate::cli::{Cli, Commands};
use crate::demag::cache::CacheStats;
use crate::demag::DemagEngine;
use crate::error::Result;
use crate::utils::output;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let engine = DemagEngine::new(cli.engine_config());

    match cli.command {
        Commands::Factors(args) => factors::execute(args, &engine)?,
        Commands::Analyze(args) => analyze::execute(args, &engine)?,
        Commands::Sweep(args) => sweep::execute(args, &engine)?,
        Commands::Batch(args) => batch::execute(args, &engine)?,
        Commands::Materials(args) => materials::execute(args)?,
    }

    if cli.verbose {
        print_cache_stats(&engine)?;
    }
    Ok(())
}

/// 打印缓存统计
fn print_cache_stats(engine: &DemagEngine) -> Result<()> {
    let expired = engine.cleanup()?;
    let stats = engine.stats()?;

    output::print_separator();
    output::print_info("Cache statistics");
    print_one("factor cache", &stats.factors);
    print_one("report cache", &stats.reports);
    if expired > 0 {
        output::print_kv("expired reports swept", &expired.to_string());
    }
    Ok(())
}

fn print_one(name: &str, stats: &CacheStats) {
    output::print_kv(
        name,
        &format!(
            "{} entries, {} hits, {} misses, {} evicted, {} expired",
            stats.len, stats.hits, stats.misses, stats.evictions, stats.expirations
        ),
    );
}
