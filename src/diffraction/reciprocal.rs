//! # 倒格矢推导
//!
//! b1 = 2π(b×c)/V, b2 = 2π(c×a)/V, b3 = 2π(a×b)/V，其中 V = a·(b×c)。
//! 采用物理约定（含 2π 因子），满足 aᵢ·bⱼ = 2πδᵢⱼ。
//!
//! ## 依赖关系
//! - 被 `diffraction/cell.rs` 调用
//! - 使用 `math/vector.rs`

use crate::error::{RelpError, Result};
use crate::math::Mat3;

use std::f64::consts::PI;

/// 小于此体积的晶胞视为退化
pub const MIN_CELL_VOLUME: f64 = 1e-10;

/// 由正空间基矢（列）计算倒空间基矢（列）
pub fn derive_reciprocal(direct: &Mat3) -> Result<Mat3> {
    let [a, b, c] = direct.columns();

    // 体积 V = a · (b × c)
    let b_cross_c = b.cross(c);
    let volume = a.dot(b_cross_c);

    if !volume.is_finite() || volume.abs() < MIN_CELL_VOLUME {
        return Err(RelpError::DegenerateCell { volume });
    }

    let factor = 2.0 * PI / volume;

    Ok(Mat3::from_columns(
        b_cross_c * factor,
        c.cross(a) * factor,
        a.cross(b) * factor,
    ))
}
