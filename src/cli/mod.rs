//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `pattern`: 计算并输出单个晶带的倒格点图样
//! - `systems`: 列出晶系、允许的格心类型与可编辑参数
//! - `session`: 按脚本逐条执行参数编辑（事务式提交/回滚）
//! - `zones`: 并行输出多个晶带轴的图样
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: lattice, pattern, session, zones

pub mod lattice;
pub mod pattern;
pub mod session;
pub mod zones;

use clap::{Parser, Subcommand};

/// relp - 单晶晶带倒格点图样
#[derive(Parser)]
#[command(name = "relp")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Reciprocal lattice zone patterns of single crystals", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the reciprocal lattice pattern of one zone axis
    Pattern(pattern::PatternArgs),

    /// List crystal systems, allowed centerings and independent parameters
    Systems,

    /// Replay a script of lattice edits, committing or rolling back each one
    Session(session::SessionArgs),

    /// Render several zone axes of the same crystal in parallel
    Zones(zones::ZonesArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_radius_range() {
        let parse = |radius: &str| {
            Cli::try_parse_from(["relp", "pattern", "--search-radius", radius])
        };

        assert!(parse("100").is_ok());
        assert!(parse("0").is_err());
        assert!(parse("101").is_err());
        assert!(parse("2147483647").is_err());

        let session = Cli::try_parse_from(["relp", "session", "--search-radius", "1000"]);
        assert!(session.is_err());
    }
}
