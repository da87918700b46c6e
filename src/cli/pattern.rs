//! # Pattern 子命令参数
//!
//! 计算单个晶带轴的倒格点图样，并可输出为 PNG/SVG 图像或 CSV 数据。
//!
//! ## 使用示例
//! ```bash
//! # 面心立方 [1 1 0] 晶带，输出图像
//! relp pattern --basis face -a 4.05 --zone 1,1,0 -o al_110.png
//!
//! # 六方晶系，只打印最近的 12 个衍射点
//! relp pattern --system hexagonal -a 3.2 -c 5.2 --zone 0,0,1 --top 12
//!
//! # 输出 CSV
//! relp pattern --system monoclinic -a 4 -b 5 -c 6 --beta 101 --zone 0,1,0 -o mono.csv
//! ```
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 引用
//! - 参数传递给 `commands/pattern.rs`

use clap::Args;
use relp::math::Hkl;
use relp::models::parse_hkl;
use std::path::PathBuf;

use super::lattice::{LatticeArgs, PatternFormat, RenderArgs};

/// Pattern 子命令参数
#[derive(Args, Debug)]
pub struct PatternArgs {
    #[command(flatten)]
    pub lattice: LatticeArgs,

    /// Zone axis [u v w] as "u,v,w" (a zero axis falls back to [1 0 0])
    #[arg(short, long, value_parser = parse_hkl, default_value = "1,0,0", allow_hyphen_values = true)]
    pub zone: Hkl,

    /// Output file (.png, .svg or .csv); omit to only print the reflection table
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (guessed from the output extension if omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<PatternFormat>,

    /// Number of observable reflections to list, nearest to the origin first
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    #[command(flatten)]
    pub render: RenderArgs,
}
