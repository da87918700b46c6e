//! # Pattern 子命令实现
//!
//! 计算单个晶带轴的倒格点图样。
//!
//! ## 流程
//! 1. 立方默认晶体上提交命令行给出的晶格（耦合 → 校验 → 重建）
//! 2. 打印最近的可观测反射
//! 3. 可选输出 PNG/SVG/CSV
//!
//! ## 依赖关系
//! - 使用 `cli/pattern.rs` 定义的 PatternArgs
//! - 使用 `render/` 输出

use super::{commit_lattice, guess_format, resolve_wavelength, write_pattern};
use crate::cli::lattice::PatternFormat;
use crate::cli::pattern::PatternArgs;
use crate::render::table;
use crate::utils::output;

use relp::diffraction::limiting_sphere_radius;
use relp::Result;

/// 执行 pattern 子命令
pub fn execute(args: PatternArgs) -> Result<()> {
    output::print_header("Reciprocal Lattice Zone Pattern");

    let wavelength = resolve_wavelength(&args.render)?;
    let state = commit_lattice(&args.lattice, args.zone)?;
    let crystal = state.crystal();

    let observable = crystal.space.observable().count();
    output::print_info(&format!(
        "Zone {}: {} points, {} observable (H = {})",
        crystal.space.zone(),
        crystal.space.len(),
        observable,
        state.enumerator().search_radius()
    ));
    output::print_info(&format!(
        "Limiting sphere: λ = {:.4} Å, radius = {:.4} Å⁻¹",
        wavelength,
        limiting_sphere_radius(wavelength)
    ));

    table::print_reflection_table(crystal, args.top);

    if let Some(ref path) = args.output {
        let format = args
            .format
            .or_else(|| guess_format(path))
            .unwrap_or(PatternFormat::Png);

        write_pattern(crystal, path, format, &args.render, wavelength)?;
        output::print_success(&format!("Pattern saved to '{}'", path.display()));
    }

    Ok(())
}
