//! # 晶格参数约束
//!
//! - `validate`: 各晶系的等式约束检查（精确比较）
//! - `couple`: 根据最近编辑的参数，在校验前把取值传播到受约束的参数
//!
//! 耦合是校验前的归一化步骤：单个参数的编辑加上强制耦合后，
//! 除瞬时的无效输入外总能落在满足 `validate` 的点上。
//!
//! ## 依赖关系
//! - 被 `diffraction/state.rs` 调用
//! - 使用 `models/lattice.rs`

use crate::models::{Field, LatticeParameters, System};

const RIGHT: f64 = 90.0;
const HEX_GAMMA: f64 = 120.0;

/// 检查晶格参数是否满足晶系约束
#[allow(clippy::float_cmp)]
pub fn validate(system: System, p: &LatticeParameters) -> bool {
    let right_angles = p.alpha == RIGHT && p.beta == RIGHT && p.gamma == RIGHT;
    match system {
        System::Cubic => p.a == p.b && p.b == p.c && right_angles,
        System::Tetragonal => p.a == p.b && right_angles,
        System::Hexagonal => {
            p.a == p.b && p.alpha == RIGHT && p.beta == RIGHT && p.gamma == HEX_GAMMA
        }
        System::Orthorhombic => right_angles,
        System::Rhombohedral => p.a == p.b && p.b == p.c && p.alpha == p.beta && p.beta == p.gamma,
        System::Monoclinic => p.alpha == RIGHT && p.gamma == RIGHT,
        System::Triclinic => true,
    }
}

/// 把最近编辑的参数传播到与之耦合的参数，并强制晶系固定的角度
pub fn couple(system: System, edited: Field, p: &mut LatticeParameters) {
    match system {
        System::Cubic => {
            let a = match edited {
                Field::B => p.b,
                Field::C => p.c,
                _ => p.a,
            };
            p.a = a;
            p.b = a;
            p.c = a;
            force_angles(p, RIGHT, RIGHT, RIGHT);
        }
        System::Tetragonal | System::Hexagonal => {
            if edited == Field::B {
                p.a = p.b;
            } else {
                p.b = p.a;
            }
            let gamma = if system == System::Hexagonal {
                HEX_GAMMA
            } else {
                RIGHT
            };
            force_angles(p, RIGHT, RIGHT, gamma);
        }
        System::Orthorhombic => force_angles(p, RIGHT, RIGHT, RIGHT),
        System::Rhombohedral => couple_rhombohedral(edited, p),
        System::Monoclinic => {
            p.alpha = RIGHT;
            p.gamma = RIGHT;
        }
        System::Triclinic => {}
    }
}

/// 三方：长度与角度是两组独立的耦合
fn couple_rhombohedral(edited: Field, p: &mut LatticeParameters) {
    let length = match edited {
        Field::B => p.b,
        Field::C => p.c,
        _ => p.a,
    };
    let angle = match edited {
        Field::Beta => p.beta,
        Field::Gamma => p.gamma,
        _ => p.alpha,
    };

    if edited == Field::None || edited.is_length() {
        p.a = length;
        p.b = length;
        p.c = length;
    }
    if edited == Field::None || edited.is_angle() {
        force_angles(p, angle, angle, angle);
    }
}

fn force_angles(p: &mut LatticeParameters, alpha: f64, beta: f64, gamma: f64) {
    p.alpha = alpha;
    p.beta = beta;
    p.gamma = gamma;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELDS: [Field; 7] = [
        Field::None,
        Field::A,
        Field::B,
        Field::C,
        Field::Alpha,
        Field::Beta,
        Field::Gamma,
    ];

    #[test]
    fn test_canonical_parameters_validate() {
        for system in System::ALL {
            let params = system.canonical_parameters(5.0);
            assert!(validate(system, &params), "{} rejects {}", system, params);
        }
    }

    #[test]
    fn test_validate_table() {
        let p = LatticeParameters::new(4.0, 4.0, 6.0, 90.0, 90.0, 90.0);
        assert!(!validate(System::Cubic, &p));
        assert!(validate(System::Tetragonal, &p));
        assert!(!validate(System::Hexagonal, &p));
        assert!(validate(System::Orthorhombic, &p));
        assert!(!validate(System::Rhombohedral, &p));
        assert!(validate(System::Monoclinic, &p));
        assert!(validate(System::Triclinic, &p));

        let mono = LatticeParameters::new(4.0, 5.0, 6.0, 90.0, 101.0, 90.0);
        assert!(validate(System::Monoclinic, &mono));
        assert!(!validate(System::Orthorhombic, &mono));
    }

    #[test]
    fn test_tetragonal_coupling() {
        let mut p = LatticeParameters::new(4.0, 4.5, 6.0, 80.0, 90.0, 90.0);
        couple(System::Tetragonal, Field::B, &mut p);
        assert_eq!((p.a, p.b, p.c), (4.5, 4.5, 6.0));
        assert_eq!(p.angles(), [90.0, 90.0, 90.0]);

        let mut p = LatticeParameters::new(4.0, 4.5, 6.0, 90.0, 90.0, 90.0);
        couple(System::Hexagonal, Field::None, &mut p);
        assert_eq!((p.a, p.b), (4.0, 4.0));
        assert_eq!(p.angles(), [90.0, 90.0, 120.0]);
    }

    #[test]
    fn test_rhombohedral_coupling_groups() {
        let mut p = LatticeParameters::new(4.0, 4.0, 4.0, 70.0, 70.0, 70.0);
        p.c = 4.4;
        couple(System::Rhombohedral, Field::C, &mut p);
        assert_eq!(p.lengths(), [4.4, 4.4, 4.4]);
        assert_eq!(p.angles(), [70.0, 70.0, 70.0]);

        p.beta = 65.0;
        couple(System::Rhombohedral, Field::Beta, &mut p);
        assert_eq!(p.angles(), [65.0, 65.0, 65.0]);
        assert_eq!(p.lengths(), [4.4, 4.4, 4.4]);

        let mut p = LatticeParameters::new(3.0, 5.0, 6.0, 75.0, 90.0, 100.0);
        couple(System::Rhombohedral, Field::None, &mut p);
        assert_eq!(p.lengths(), [3.0, 3.0, 3.0]);
        assert_eq!(p.angles(), [75.0, 75.0, 75.0]);
    }

    #[test]
    fn test_monoclinic_keeps_beta() {
        let mut p = LatticeParameters::new(4.0, 5.0, 6.0, 80.0, 101.0, 70.0);
        couple(System::Monoclinic, Field::Beta, &mut p);
        assert_eq!(p.angles(), [90.0, 101.0, 90.0]);
        assert_eq!(p.lengths(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_triclinic_untouched() {
        let original = LatticeParameters::new(4.0, 5.0, 6.0, 80.0, 101.0, 70.0);
        let mut p = original;
        couple(System::Triclinic, Field::A, &mut p);
        assert_eq!(p, original);
    }

    proptest! {
        #[test]
        fn cubic_coupling_always_validates(
            a in 0.5f64..20.0, b in 0.5f64..20.0, c in 0.5f64..20.0,
            alpha in 1.0f64..179.0, beta in 1.0f64..179.0, gamma in 1.0f64..179.0,
            field_idx in 0usize..7,
        ) {
            let mut p = LatticeParameters::new(a, b, c, alpha, beta, gamma);
            couple(System::Cubic, FIELDS[field_idx], &mut p);
            prop_assert!(p.a == p.b && p.b == p.c);
            prop_assert_eq!(p.angles(), [90.0, 90.0, 90.0]);
            prop_assert!(validate(System::Cubic, &p));
        }

        #[test]
        fn coupling_lands_on_valid_point(
            a in 0.5f64..20.0, b in 0.5f64..20.0, c in 0.5f64..20.0,
            alpha in 1.0f64..179.0, beta in 1.0f64..179.0, gamma in 1.0f64..179.0,
            field_idx in 0usize..7,
            system_idx in 0usize..7,
        ) {
            let system = System::ALL[system_idx];
            let field = FIELDS[field_idx];
            let mut p = LatticeParameters::new(a, b, c, alpha, beta, gamma);
            couple(system, field, &mut p);

            // 三方只在编辑长度时同步长度、编辑角度时同步角度
            let expect_valid = match system {
                System::Rhombohedral => field == Field::None,
                _ => true,
            };
            if expect_valid {
                prop_assert!(validate(system, &p), "{} {} {}", system, field, p);
            }
        }
    }
}
