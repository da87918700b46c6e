//! # 反射表
//!
//! 以 `tabled` 打印离原点最近的可观测倒格点。
//!
//! ## 依赖关系
//! - 被 `commands/pattern.rs`, `commands/session.rs` 调用

use super::{d_spacing, nearest_reflections};
use crate::utils::output;

use relp::Crystal;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ReflectionRow {
    #[tabled(rename = "(hkl)")]
    hkl: String,
    #[tabled(rename = "u (Å⁻¹)")]
    u: String,
    #[tabled(rename = "v (Å⁻¹)")]
    v: String,
    #[tabled(rename = "d (Å)")]
    d_spacing: String,
    #[tabled(rename = "|F|²")]
    intensity: String,
}

/// 打印最近的 `count` 个可观测反射
pub fn print_reflection_table(crystal: &Crystal, count: usize) {
    let rows: Vec<ReflectionRow> = nearest_reflections(&crystal.space, count)
        .into_iter()
        .map(|p| ReflectionRow {
            hkl: p.hkl.to_string(),
            u: format!("{:.4}", p.u),
            v: format!("{:.4}", p.v),
            d_spacing: d_spacing(&crystal.lattice, p.hkl)
                .map(|d| format!("{:.4}", d))
                .unwrap_or_default(),
            intensity: format!("{:.3}", p.intensity),
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("No observable reflections in this zone");
        return;
    }

    output::print_header(&format!(
        "{} nearest reflections in zone {}",
        rows.len(),
        crystal.space.zone()
    ));
    println!("{}", Table::new(&rows));
}
