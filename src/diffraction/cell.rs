//! # 晶胞构建
//!
//! 由 (晶系, 格心类型, 晶格参数) 构建正空间基矢矩阵 A 与分数坐标原子基元。
//!
//! ## 基矢公式（A 的列向量）
//! - 立方/四方/正交：diag(a, b, c)
//! - 六方：(a, 0, 0), (-a/2, √3·a/2, 0), (0, 0, c)
//! - 单斜：(a, 0, 0), (0, b, 0), (c·cosβ, 0, c·sinβ)
//! - 三方/三斜：通用三斜公式（三方不使用六方设定的变换）
//!
//! ## 依赖关系
//! - 被 `diffraction/state.rs` 调用
//! - 使用 `diffraction/reciprocal.rs` 计算倒格矢

use crate::diffraction::reciprocal::derive_reciprocal;
use crate::error::{RelpError, Result};
use crate::math::{Mat3, Vec3};
use crate::models::{Atom, AtomicBasis, BasisType, Lattice, LatticeParameters, System};

const ALL_CENTERINGS: [BasisType; 4] = BasisType::ALL;
const PRIMITIVE_ONLY: [BasisType; 1] = [BasisType::Primitive];
const CUBIC_CENTERINGS: [BasisType; 3] = [
    BasisType::Primitive,
    BasisType::BodyCentered,
    BasisType::FaceCentered,
];
const TETRAGONAL_CENTERINGS: [BasisType; 2] = [BasisType::Primitive, BasisType::BodyCentered];
const MONOCLINIC_CENTERINGS: [BasisType; 2] = [BasisType::Primitive, BasisType::BaseCentered];

/// 晶系允许的格心类型（按 P, I, F, C 顺序）
pub fn allowed_basis_types(system: System) -> &'static [BasisType] {
    match system {
        System::Cubic => &CUBIC_CENTERINGS,
        System::Tetragonal => &TETRAGONAL_CENTERINGS,
        System::Orthorhombic => &ALL_CENTERINGS,
        System::Monoclinic => &MONOCLINIC_CENTERINGS,
        System::Hexagonal | System::Rhombohedral | System::Triclinic => &PRIMITIVE_ONLY,
    }
}

/// 检查格心类型是否与晶系兼容
pub fn basis_allowed(system: System, basis: BasisType) -> bool {
    allowed_basis_types(system).contains(&basis)
}

/// 构建正空间基矢矩阵与原子基元
pub fn build_cell(
    system: System,
    basis: BasisType,
    params: &LatticeParameters,
) -> Result<(Mat3, AtomicBasis)> {
    if !basis_allowed(system, basis) {
        return Err(RelpError::IncompatibleBasis { system, basis });
    }

    Ok((direct_basis(system, params), atomic_basis(system, basis)))
}

/// 构建完整晶格（正空间 + 倒空间基矢）与原子基元
pub fn build_lattice(
    system: System,
    basis: BasisType,
    params: &LatticeParameters,
) -> Result<(Lattice, AtomicBasis)> {
    let (direct, atoms) = build_cell(system, basis, params)?;
    let reciprocal = derive_reciprocal(&direct)?;
    Ok((Lattice::new(system, *params, direct, reciprocal), atoms))
}

/// 各晶系的正空间基矢
fn direct_basis(system: System, p: &LatticeParameters) -> Mat3 {
    match system {
        System::Cubic => Mat3::diagonal(p.a, p.a, p.a),
        System::Tetragonal => Mat3::diagonal(p.a, p.a, p.c),
        System::Orthorhombic => Mat3::diagonal(p.a, p.b, p.c),
        System::Hexagonal => Mat3::from_columns(
            Vec3::new(p.a, 0.0, 0.0),
            Vec3::new(-p.a / 2.0, 3.0_f64.sqrt() * p.a / 2.0, 0.0),
            Vec3::new(0.0, 0.0, p.c),
        ),
        System::Monoclinic => {
            let beta = p.beta.to_radians();
            Mat3::from_columns(
                Vec3::new(p.a, 0.0, 0.0),
                Vec3::new(0.0, p.b, 0.0),
                Vec3::new(p.c * beta.cos(), 0.0, p.c * beta.sin()),
            )
        }
        System::Rhombohedral | System::Triclinic => triclinic_basis(p),
    }
}

/// 通用三斜基矢：a 沿 x，b 位于 xy 平面
fn triclinic_basis(p: &LatticeParameters) -> Mat3 {
    let (cos_alpha, cos_beta) = (p.alpha.to_radians().cos(), p.beta.to_radians().cos());
    let gamma = p.gamma.to_radians();
    let (cos_gamma, sin_gamma) = (gamma.cos(), gamma.sin());

    let c_x = p.c * cos_beta;
    let c_y = p.c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
    // 角度组合不可实现时为 NaN，由倒格矢推导报告为退化晶胞
    let c_z = (p.c * p.c - c_x * c_x - c_y * c_y).sqrt();

    Mat3::from_columns(
        Vec3::new(p.a, 0.0, 0.0),
        Vec3::new(p.b * cos_gamma, p.b * sin_gamma, 0.0),
        Vec3::new(c_x, c_y, c_z),
    )
}

/// 各格心类型的分数坐标原子基元
fn atomic_basis(system: System, basis: BasisType) -> AtomicBasis {
    let atoms = match basis {
        BasisType::Primitive if system == System::Rhombohedral => vec![
            Atom::new(0.0, 0.0, 0.0),
            Atom::new(2.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            Atom::new(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0),
        ],
        BasisType::Primitive => vec![Atom::new(0.0, 0.0, 0.0)],
        BasisType::BodyCentered => vec![Atom::new(0.0, 0.0, 0.0), Atom::new(0.5, 0.5, 0.5)],
        BasisType::FaceCentered => vec![
            Atom::new(0.0, 0.0, 0.0),
            Atom::new(0.5, 0.5, 0.0),
            Atom::new(0.5, 0.0, 0.5),
            Atom::new(0.0, 0.5, 0.5),
        ],
        BasisType::BaseCentered => vec![Atom::new(0.0, 0.0, 0.0), Atom::new(0.5, 0.5, 0.0)],
    };
    AtomicBasis::new(basis, atoms)
}
