//! # 图样数据导出
//!
//! 将晶带内全部倒格点导出为 CSV。
//!
//! ## CSV 列
//! h, k, l, u, v, d_spacing, intensity, observable
//!
//! 行顺序与枚举顺序一致（h 外层、k 中层、l 内层）；原点的 d_spacing 为空。
//!
//! ## 依赖关系
//! - 被 `commands/pattern.rs`, `commands/zones.rs` 调用
//! - 使用 `csv` + `serde` 写入记录

use super::d_spacing;

use relp::{Crystal, RelpError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// CSV 单行记录
#[derive(Debug, Serialize)]
struct PointRecord {
    h: i32,
    k: i32,
    l: i32,
    u: f64,
    v: f64,
    d_spacing: Option<f64>,
    intensity: f64,
    observable: bool,
}

/// 导出为 CSV 文件
pub fn to_csv(crystal: &Crystal, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    write_points(crystal, &mut wtr)?;

    wtr.flush().map_err(|e| RelpError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 写入全部倒格点
pub fn write_points<W: Write>(crystal: &Crystal, wtr: &mut csv::Writer<W>) -> Result<()> {
    for p in crystal.space.points() {
        wtr.serialize(PointRecord {
            h: p.hkl.h(),
            k: p.hkl.k(),
            l: p.hkl.l(),
            u: p.u,
            v: p.v,
            d_spacing: d_spacing(&crystal.lattice, p.hkl),
            intensity: p.intensity,
            observable: p.is_observable(),
        })?;
    }
    Ok(())
}
