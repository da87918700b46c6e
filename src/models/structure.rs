//! # 晶体与倒空间数据模型
//!
//! 定义原子基元、晶带轴、倒格点以及聚合后的 `Crystal`。
//!
//! ## 依赖关系
//! - 被 `diffraction/` 和 `commands/` 使用
//! - 使用 `models/lattice.rs` 的 Lattice, BasisType

use crate::error::{RelpError, Result};
use crate::math::{Hkl, Vec3};
use crate::models::lattice::{BasisType, Lattice};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 低于此强度的倒格点视为不可观测（仅在绘制时过滤）
pub const INTENSITY_THRESHOLD: f64 = 1e-6;

/// 原子信息
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 分数坐标 [x, y, z]
    pub position: Vec3,

    /// 可选：原子序数（散射振幅目前按每原子 1 处理）
    pub atomic_number: Option<u8>,
}

impl Atom {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Atom {
            position: Vec3::new(x, y, z),
            atomic_number: None,
        }
    }
}

/// 原子基元：由 (晶系, 格心类型) 唯一确定，不可单独编辑
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicBasis {
    basis_type: BasisType,
    atoms: Vec<Atom>,
}

impl AtomicBasis {
    pub(crate) fn new(basis_type: BasisType, atoms: Vec<Atom>) -> Self {
        AtomicBasis { basis_type, atoms }
    }

    pub fn basis_type(&self) -> BasisType {
        self.basis_type
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// 晶带轴 [h k l]，保证不为 (0, 0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneAxis(Hkl);

impl ZoneAxis {
    /// 零向量的替代值
    pub const DEFAULT: ZoneAxis = ZoneAxis(Hkl::new(1, 0, 0));

    pub fn new(hkl: Hkl) -> Result<Self> {
        if hkl.is_zero() {
            return Err(RelpError::DegenerateZone { zone: hkl });
        }
        Ok(ZoneAxis(hkl))
    }

    /// 零向量时替换为 (1, 0, 0)
    pub fn or_default(hkl: Hkl) -> Self {
        ZoneAxis::new(hkl).unwrap_or(ZoneAxis::DEFAULT)
    }

    pub fn hkl(self) -> Hkl {
        self.0
    }

    /// 晶带定律：h·u + k·v + l·w == 0
    pub fn contains(self, plane: Hkl) -> bool {
        self.0.dot(plane) == 0
    }
}

impl Default for ZoneAxis {
    fn default() -> Self {
        ZoneAxis::DEFAULT
    }
}

impl fmt::Display for ZoneAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {} {}]", self.0.h(), self.0.k(), self.0.l())
    }
}

/// 解析 "h,k,l" 或 "h k l" 形式的整数三元组
pub fn parse_hkl(input: &str) -> Result<Hkl> {
    let parts: Vec<&str> = input
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')'])
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 3 {
        return Err(RelpError::InvalidArgument(format!(
            "Expected three integers 'h,k,l', got '{}'",
            input
        )));
    }

    let mut idx = [0i32; 3];
    for (slot, part) in idx.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| {
            RelpError::InvalidArgument(format!("Invalid Miller index '{}' in '{}'", part, input))
        })?;
    }

    Ok(Hkl::new(idx[0], idx[1], idx[2]))
}

impl FromStr for ZoneAxis {
    type Err = RelpError;

    fn from_str(s: &str) -> Result<Self> {
        ZoneAxis::new(parse_hkl(s)?)
    }
}

/// 投影到晶带平面上的倒格点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReciprocalPoint {
    /// Miller 指数
    pub hkl: Hkl,
    /// 平面内坐标（Å⁻¹，含 2π 因子）
    pub u: f64,
    pub v: f64,
    /// 运动学强度 |F|²
    pub intensity: f64,
}

impl ReciprocalPoint {
    pub fn is_observable(&self) -> bool {
        self.intensity >= INTENSITY_THRESHOLD
    }

    /// 到原点的平面距离
    pub fn radius(&self) -> f64 {
        self.u.hypot(self.v)
    }
}

/// 当前晶带轴下的全部倒格点，每次重建整体替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReciprocalSpace {
    zone: ZoneAxis,
    points: Vec<ReciprocalPoint>,
}

impl ReciprocalSpace {
    pub(crate) fn new(zone: ZoneAxis, points: Vec<ReciprocalPoint>) -> Self {
        ReciprocalSpace { zone, points }
    }

    pub fn zone(&self) -> ZoneAxis {
        self.zone
    }

    pub fn points(&self) -> &[ReciprocalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 强度不低于阈值的点
    pub fn observable(&self) -> impl Iterator<Item = &ReciprocalPoint> {
        self.points.iter().filter(|p| p.is_observable())
    }

    pub fn find(&self, hkl: Hkl) -> Option<&ReciprocalPoint> {
        self.points.iter().find(|p| p.hkl == hkl)
    }
}

/// 晶体：当前已提交的完整模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crystal {
    /// 晶格
    pub lattice: Lattice,

    /// 原子基元
    pub basis: AtomicBasis,

    /// 倒空间
    pub space: ReciprocalSpace,
}

impl Crystal {
    pub fn new(lattice: Lattice, basis: AtomicBasis, space: ReciprocalSpace) -> Self {
        Crystal {
            lattice,
            basis,
            space,
        }
    }

    /// 晶体标签，如 "CUBIC cF"
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            self.lattice.system(),
            self.basis.basis_type().symbol()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_axis_rejects_zero() {
        assert!(ZoneAxis::new(Hkl::new(0, 0, 0)).is_err());
        assert_eq!(ZoneAxis::or_default(Hkl::new(0, 0, 0)), ZoneAxis::DEFAULT);
        assert_eq!(
            ZoneAxis::or_default(Hkl::new(1, 1, 0)).hkl(),
            Hkl::new(1, 1, 0)
        );
    }

    #[test]
    fn test_zone_axis_contains() {
        let zone = ZoneAxis::new(Hkl::new(0, 0, 1)).unwrap();
        assert!(zone.contains(Hkl::new(1, 0, 0)));
        assert!(!zone.contains(Hkl::new(0, 0, 1)));
    }

    #[test]
    fn test_parse_hkl() {
        assert_eq!(parse_hkl("1,1,0").unwrap(), Hkl::new(1, 1, 0));
        assert_eq!(parse_hkl("1 -1 2").unwrap(), Hkl::new(1, -1, 2));
        assert_eq!(parse_hkl("[0, 0, 1]").unwrap(), Hkl::new(0, 0, 1));
        assert!(parse_hkl("1,1").is_err());
        assert!(parse_hkl("a,b,c").is_err());
        assert!("0,0,0".parse::<ZoneAxis>().is_err());
    }

    #[test]
    fn test_point_observable() {
        let p = ReciprocalPoint {
            hkl: Hkl::new(1, 0, 0),
            u: 3.0,
            v: 4.0,
            intensity: 1e-9,
        };
        assert!(!p.is_observable());
        assert!((p.radius() - 5.0).abs() < 1e-12);
    }
}
