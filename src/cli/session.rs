//! # Session 子命令参数
//!
//! 逐行读取编辑脚本（文件或标准输入），每条编辑作为一次事务提交或回滚。
//!
//! ## 脚本格式
//! ```text
//! # 注释
//! system hexagonal
//! basis primitive
//! a 3.2
//! c 5.2
//! zone 0 0 1
//! show
//! ```
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 引用
//! - 参数传递给 `commands/session.rs`

use clap::Args;
use std::path::PathBuf;

/// Session 子命令参数
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Edit script; reads standard input when omitted
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Starting cubic lattice length a (Å)
    #[arg(short = 'a', long = "a", default_value_t = 5.0)]
    pub a: f64,

    /// Half-range H of the Miller index search
    #[arg(
        long,
        env = "RELP_SEARCH_RADIUS",
        default_value_t = relp::diffraction::DEFAULT_SEARCH_RADIUS,
        value_parser = clap::value_parser!(i32).range(1..=relp::diffraction::MAX_SEARCH_RADIUS as i64)
    )]
    pub search_radius: i32,

    /// Stop at the first rolled-back edit instead of continuing
    #[arg(long)]
    pub strict: bool,

    /// Number of reflections listed by `show`
    #[arg(short, long, default_value_t = 6)]
    pub top: usize,
}
