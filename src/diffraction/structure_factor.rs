//! # 运动学结构因子
//!
//! F(hkl) = Σ f · exp(2πi (hx + ky + lz))，散射振幅 f 对所有原子取 1，
//! 强度为 |F|²。不使用原子散射因子表。
//!
//! ## 依赖关系
//! - 被 `diffraction/zone.rs` 调用
//! - 使用 `models/structure.rs` 的 AtomicBasis

use crate::math::Hkl;
use crate::models::AtomicBasis;

use std::f64::consts::PI;

/// 每个原子的散射振幅
const SCATTERING_AMPLITUDE: f64 = 1.0;

/// 结构因子 F 的实部与虚部
pub fn structure_factor(basis: &AtomicBasis, plane: Hkl) -> (f64, f64) {
    let g = plane.to_vec3();
    let mut f_real = 0.0;
    let mut f_imag = 0.0;

    for atom in basis.atoms() {
        let phase = 2.0 * PI * atom.position.dot(g);
        f_real += SCATTERING_AMPLITUDE * phase.cos();
        f_imag += SCATTERING_AMPLITUDE * phase.sin();
    }

    (f_real, f_imag)
}

/// 衍射强度 |F|²，非负
pub fn intensity(basis: &AtomicBasis, plane: Hkl) -> f64 {
    let (f_real, f_imag) = structure_factor(basis, plane);
    f_real * f_real + f_imag * f_imag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diffraction::cell::build_cell;
    use crate::models::{BasisType, LatticeParameters, System, INTENSITY_THRESHOLD};

    fn basis(system: System, bas: BasisType) -> AtomicBasis {
        let params = System::canonical_parameters(system, 5.0);
        build_cell(system, bas, &params).unwrap().1
    }

    #[test]
    fn test_primitive_all_unit() {
        let b = basis(System::Cubic, BasisType::Primitive);
        for hkl in [Hkl::new(1, 0, 0), Hkl::new(3, -2, 7), Hkl::new(0, 0, 0)] {
            assert!((intensity(&b, hkl) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bcc_extinction() {
        let b = basis(System::Cubic, BasisType::BodyCentered);
        // h + k + l 为奇数时消光
        assert!(intensity(&b, Hkl::new(1, 0, 0)) < INTENSITY_THRESHOLD);
        assert!(intensity(&b, Hkl::new(1, 1, 1)) < INTENSITY_THRESHOLD);
        assert!((intensity(&b, Hkl::new(1, 1, 0)) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_fcc_extinction() {
        let b = basis(System::Cubic, BasisType::FaceCentered);
        // 奇偶混合时消光，全奇或全偶时 |F|² = 16
        assert!(intensity(&b, Hkl::new(1, 0, 0)) < INTENSITY_THRESHOLD);
        assert!(intensity(&b, Hkl::new(1, 1, 0)) < INTENSITY_THRESHOLD);
        assert!((intensity(&b, Hkl::new(1, 1, 1)) - 16.0).abs() < 1e-9);
        assert!((intensity(&b, Hkl::new(2, 0, 0)) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_centered_extinction() {
        let params = LatticeParameters::new(4.0, 5.0, 6.0, 90.0, 90.0, 90.0);
        let b = build_cell(System::Orthorhombic, BasisType::BaseCentered, &params)
            .unwrap()
            .1;
        // C 心：h + k 为奇数时消光
        assert!(intensity(&b, Hkl::new(1, 0, 0)) < INTENSITY_THRESHOLD);
        assert!((intensity(&b, Hkl::new(0, 0, 1)) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_rhombohedral_reflection_condition() {
        let b = basis(System::Rhombohedral, BasisType::Primitive);
        // -h + k + l = 3n 时 |F|² = 9，否则为 0
        assert!((intensity(&b, Hkl::new(0, 0, 3)) - 9.0).abs() < 1e-9);
        assert!((intensity(&b, Hkl::new(1, 0, 1)) - 9.0).abs() < 1e-9);
        assert!(intensity(&b, Hkl::new(1, 0, 0)) < INTENSITY_THRESHOLD);
    }
}
