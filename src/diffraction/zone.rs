//! # 晶带倒格点枚举与投影
//!
//! 实现晶带平面内倒格点的枚举、二维投影与强度计算。
//!
//! ## 算法概述
//! 1. 计算晶带法向 n = h·b1 + k·b2 + l·b3 并归一化
//! 2. 遍历 [-H, H]³ 内满足晶带定律 h·zh + k·zk + l·zl = 0 的整数点（先计数再填充）
//! 3. 构建平面内正交标架 e1, e2（e1 与 x̂ 同向）
//! 4. 投影 q = h·b1 + k·b2 + l·b3 得到 (u, v)，计算结构因子强度
//!
//! 输出顺序固定为 h 外层、k 中层、l 内层，不排序。
//!
//! ## 依赖关系
//! - 被 `diffraction/state.rs` 调用
//! - 使用 `diffraction/structure_factor.rs` 计算强度

use crate::diffraction::structure_factor::intensity;
use crate::error::{RelpError, Result};
use crate::math::{Hkl, Mat3, Vec3};
use crate::models::{AtomicBasis, Lattice, ReciprocalPoint, ReciprocalSpace, ZoneAxis};

use std::f64::consts::PI;
use std::ops::RangeInclusive;

/// 默认搜索半径 H（每个指数取 [-H, H]）
pub const DEFAULT_SEARCH_RADIUS: i32 = 15;

/// 搜索半径上限：(2H+1)³ 个候选点
pub const MAX_SEARCH_RADIUS: i32 = 100;

/// Cu Kα 波长（Å），用于极限球
pub const CU_K_ALPHA: f64 = 1.54;

/// 波长 λ 对应的极限球半径 2π/λ（与倒格矢同为含 2π 的单位）
pub fn limiting_sphere_radius(wavelength: f64) -> f64 {
    2.0 * PI / wavelength
}

/// 晶带平面内的正交标架
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneFrame {
    /// 单位法向
    pub normal: Vec3,
    pub e1: Vec3,
    pub e2: Vec3,
}

impl ZoneFrame {
    /// 由倒格子基矢与晶带轴构建标架
    pub fn new(reciprocal: &Mat3, zone: ZoneAxis) -> Result<Self> {
        let normal = reciprocal_vector(reciprocal, zone.hkl()).normalize();
        if normal == Vec3::ZERO {
            return Err(RelpError::DegenerateZone { zone: zone.hkl() });
        }

        let mut e1 = normal.unit_normal();
        let mut e2 = normal.cross(e1);

        // 固定屏幕朝向：e1 与 x̂ 同向
        if e1.dot(Vec3::X) < 0.0 {
            e1 = -e1;
            e2 = -e2;
        }

        Ok(ZoneFrame { normal, e1, e2 })
    }

    /// 投影到平面坐标 (u, v)
    pub fn project(&self, q: Vec3) -> (f64, f64) {
        (q.dot(self.e1), q.dot(self.e2))
    }
}

/// 倒格矢 q = h·b1 + k·b2 + l·b3
pub fn reciprocal_vector(reciprocal: &Mat3, hkl: Hkl) -> Vec3 {
    reciprocal.mul_vec(hkl.to_vec3())
}

/// 晶带倒格点枚举器
#[derive(Debug, Clone, Copy)]
pub struct ZoneEnumerator {
    /// 搜索半径 H
    search_radius: i32,
}

impl Default for ZoneEnumerator {
    fn default() -> Self {
        ZoneEnumerator::new()
    }
}

impl ZoneEnumerator {
    /// 创建使用默认搜索半径的枚举器
    pub fn new() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }

    /// 设置搜索半径，限制在 [1, MAX_SEARCH_RADIUS]
    pub fn with_search_radius(mut self, radius: i32) -> Self {
        self.search_radius = radius.clamp(1, MAX_SEARCH_RADIUS);
        self
    }

    pub fn search_radius(&self) -> i32 {
        self.search_radius
    }

    /// 生成晶带平面内的全部倒格点
    pub fn generate(
        &self,
        lattice: &Lattice,
        basis: &AtomicBasis,
        zone: ZoneAxis,
    ) -> Result<ReciprocalSpace> {
        // ZoneAxis 已保证非零，这里仍按整数三元组再检查一次
        if zone.hkl().is_zero() {
            return Err(RelpError::DegenerateZone { zone: zone.hkl() });
        }

        let reciprocal = lattice.reciprocal();
        let frame = ZoneFrame::new(reciprocal, zone)?;

        let count = self.members(zone).count();
        let mut points = Vec::with_capacity(count);

        for plane in self.members(zone) {
            let q = reciprocal_vector(reciprocal, plane);
            let (u, v) = frame.project(q);
            points.push(ReciprocalPoint {
                hkl: plane,
                u,
                v,
                intensity: intensity(basis, plane),
            });
        }

        Ok(ReciprocalSpace::new(zone, points))
    }

    /// 搜索范围内满足晶带定律的 (h, k, l)，按 h、k、l 嵌套顺序
    fn members(&self, zone: ZoneAxis) -> impl Iterator<Item = Hkl> {
        let range = self.range();
        range.clone().flat_map(move |h| {
            let range = range.clone();
            range.clone().flat_map(move |k| {
                range
                    .clone()
                    .map(move |l| Hkl::new(h, k, l))
                    .filter(move |plane| zone.contains(*plane))
            })
        })
    }

    fn range(&self) -> RangeInclusive<i32> {
        -self.search_radius..=self.search_radius
    }
}
