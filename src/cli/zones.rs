//! # Zones 子命令参数
//!
//! 对同一晶体的多个晶带轴并行计算并输出图样。
//!
//! ## 使用示例
//! ```bash
//! relp zones --basis body -a 2.87 --zones "1,0,0;1,1,0;1,1,1" -o patterns/ -j 4
//! ```
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 引用
//! - 参数传递给 `commands/zones.rs`

use clap::Args;
use std::path::PathBuf;

use super::lattice::{LatticeArgs, PatternFormat, RenderArgs};

/// Zones 子命令参数
#[derive(Args, Debug)]
pub struct ZonesArgs {
    #[command(flatten)]
    pub lattice: LatticeArgs,

    /// Zone axes separated by ';' (e.g. "1,0,0;1,1,0;1,1,1")
    #[arg(short, long, allow_hyphen_values = true)]
    pub zones: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Output format for every zone
    #[arg(short, long, value_enum, default_value_t = PatternFormat::Png)]
    pub format: PatternFormat,

    /// Number of parallel jobs (default: CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Overwrite existing files
    #[arg(long)]
    pub overwrite: bool,

    #[command(flatten)]
    pub render: RenderArgs,
}
