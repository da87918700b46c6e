//! # 图样输出模块
//!
//! 将已提交的晶带倒格点输出为终端表格、图像或数据文件。
//!
//! ## 子模块
//! - `plot`: 二维图样绘制 (PNG/SVG)
//! - `export`: CSV 数据导出
//! - `table`: 终端反射表
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 relp 库的 `Crystal`, `ReciprocalSpace`

pub mod export;
pub mod plot;
pub mod table;

use relp::diffraction::zone::reciprocal_vector;
use relp::{Hkl, Lattice, ReciprocalPoint, ReciprocalSpace};

use std::f64::consts::PI;

/// 离原点最近的 `count` 个可观测倒格点（不含原点），按平面距离、再按指数排序
pub fn nearest_reflections(space: &ReciprocalSpace, count: usize) -> Vec<&ReciprocalPoint> {
    let mut points: Vec<&ReciprocalPoint> = space
        .observable()
        .filter(|p| !p.hkl.is_zero())
        .collect();

    points.sort_by(|a, b| {
        a.radius()
            .total_cmp(&b.radius())
            .then_with(|| a.hkl.components().cmp(&b.hkl.components()))
    });
    points.truncate(count);
    points
}

/// 晶面间距 d = 2π/|q|；原点返回 None
pub fn d_spacing(lattice: &Lattice, hkl: Hkl) -> Option<f64> {
    if hkl.is_zero() {
        return None;
    }
    let q = reciprocal_vector(lattice.reciprocal(), hkl).magnitude();
    Some(2.0 * PI / q)
}
