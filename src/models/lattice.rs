//! # 晶系、格心与晶格参数
//!
//! 定义七大晶系 `System`、四种格心 `BasisType`、六个晶格参数
//! `LatticeParameters`，以及已构建的晶格 `Lattice`（正空间基矢 A 与倒空间基矢 B）。
//!
//! ## 依赖关系
//! - 被 `diffraction/` 和 `cli/` 使用
//! - 使用 `math/vector.rs`

use crate::error::RelpError;
use crate::math::Mat3;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────
// 晶系
// ─────────────────────────────────────────────────────────────

/// 七大晶系，按约束从强到弱排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum System {
    Cubic,
    Tetragonal,
    Hexagonal,
    Orthorhombic,
    Rhombohedral,
    Monoclinic,
    Triclinic,
}

impl System {
    pub const ALL: [System; 7] = [
        System::Cubic,
        System::Tetragonal,
        System::Hexagonal,
        System::Orthorhombic,
        System::Rhombohedral,
        System::Monoclinic,
        System::Triclinic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            System::Cubic => "CUBIC",
            System::Tetragonal => "TETRAGONAL",
            System::Hexagonal => "HEXAGONAL",
            System::Orthorhombic => "ORTHORHOMBIC",
            System::Rhombohedral => "RHOMBOHEDRAL",
            System::Monoclinic => "MONOCLINIC",
            System::Triclinic => "TRICLINIC",
        }
    }

    /// 可独立编辑的晶格参数，其余参数由耦合规则决定
    pub fn editable_fields(self) -> &'static [Field] {
        use Field::*;
        match self {
            System::Cubic => &[A],
            System::Tetragonal | System::Hexagonal => &[A, C],
            System::Orthorhombic => &[A, B, C],
            System::Rhombohedral => &[A, Alpha],
            System::Monoclinic => &[A, B, C, Beta],
            System::Triclinic => &[A, B, C, Alpha, Beta, Gamma],
        }
    }

    /// 满足该晶系约束的典型参数（长度取 `a`）
    pub fn canonical_parameters(self, a: f64) -> LatticeParameters {
        let mut params = LatticeParameters::cubic(a);
        match self {
            System::Hexagonal => params.gamma = 120.0,
            System::Rhombohedral => {
                params.alpha = 60.0;
                params.beta = 60.0;
                params.gamma = 60.0;
            }
            System::Cubic
            | System::Tetragonal
            | System::Orthorhombic
            | System::Monoclinic
            | System::Triclinic => {}
        }
        params
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for System {
    type Err = RelpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        System::ALL
            .into_iter()
            .find(|sys| sys.name().to_lowercase() == key)
            .ok_or_else(|| {
                RelpError::InvalidArgument(format!(
                    "Unknown crystal system '{}'. Use one of: cubic, tetragonal, hexagonal, orthorhombic, rhombohedral, monoclinic, triclinic",
                    s
                ))
            })
    }
}

// ─────────────────────────────────────────────────────────────
// 格心类型
// ─────────────────────────────────────────────────────────────

/// 格心类型（晶胞内重复格点的排布方式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisType {
    Primitive,
    BodyCentered,
    FaceCentered,
    BaseCentered,
}

impl BasisType {
    pub const ALL: [BasisType; 4] = [
        BasisType::Primitive,
        BasisType::BodyCentered,
        BasisType::FaceCentered,
        BasisType::BaseCentered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BasisType::Primitive => "PRIMITIVE",
            BasisType::BodyCentered => "BODY_CENTERED",
            BasisType::FaceCentered => "FACE_CENTERED",
            BasisType::BaseCentered => "BASE_CENTERED",
        }
    }

    /// Pearson 符号中的格心字母
    pub fn symbol(self) -> char {
        match self {
            BasisType::Primitive => 'P',
            BasisType::BodyCentered => 'I',
            BasisType::FaceCentered => 'F',
            BasisType::BaseCentered => 'C',
        }
    }
}

impl fmt::Display for BasisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BasisType {
    type Err = RelpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "primitive" | "p" => Ok(BasisType::Primitive),
            "body_centered" | "body" | "i" => Ok(BasisType::BodyCentered),
            "face_centered" | "face" | "f" => Ok(BasisType::FaceCentered),
            "base_centered" | "base" | "c" => Ok(BasisType::BaseCentered),
            _ => Err(RelpError::InvalidArgument(format!(
                "Unknown basis type '{}'. Use one of: primitive (p), body (i), face (f), base (c)",
                s
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 晶格参数
// ─────────────────────────────────────────────────────────────

/// 最近一次编辑的晶格参数；`None` 表示整体修改（例如切换晶系）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field {
    #[default]
    None,
    A,
    B,
    C,
    Alpha,
    Beta,
    Gamma,
}

impl Field {
    pub fn is_length(self) -> bool {
        matches!(self, Field::A | Field::B | Field::C)
    }

    pub fn is_angle(self) -> bool {
        matches!(self, Field::Alpha | Field::Beta | Field::Gamma)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::None => "none",
            Field::A => "a",
            Field::B => "b",
            Field::C => "c",
            Field::Alpha => "alpha",
            Field::Beta => "beta",
            Field::Gamma => "gamma",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Field {
    type Err = RelpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Field::None),
            "a" => Ok(Field::A),
            "b" => Ok(Field::B),
            "c" => Ok(Field::C),
            "alpha" | "α" => Ok(Field::Alpha),
            "beta" | "β" => Ok(Field::Beta),
            "gamma" | "γ" => Ok(Field::Gamma),
            _ => Err(RelpError::InvalidArgument(format!(
                "Unknown lattice parameter '{}'",
                s
            ))),
        }
    }
}

/// 晶格参数 (a, b, c, α, β, γ)
/// 长度单位：Å；角度单位：度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        LatticeParameters {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// 立方晶胞：a = b = c，三个角均为 90°
    pub fn cubic(a: f64) -> Self {
        LatticeParameters::new(a, a, a, 90.0, 90.0, 90.0)
    }

    /// 读取单个参数；`Field::None` 没有对应的值
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::None => None,
            Field::A => Some(self.a),
            Field::B => Some(self.b),
            Field::C => Some(self.c),
            Field::Alpha => Some(self.alpha),
            Field::Beta => Some(self.beta),
            Field::Gamma => Some(self.gamma),
        }
    }

    /// 写入单个参数；`Field::None` 时不做任何事
    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::None => {}
            Field::A => self.a = value,
            Field::B => self.b = value,
            Field::C => self.c = value,
            Field::Alpha => self.alpha = value,
            Field::Beta => self.beta = value,
            Field::Gamma => self.gamma = value,
        }
    }

    pub fn lengths(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    pub fn angles(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }

    /// 长度为正的有限值，角度严格位于 (0°, 180°)
    pub fn in_bounds(&self) -> bool {
        self.lengths().iter().all(|l| l.is_finite() && *l > 0.0)
            && self
                .angles()
                .iter()
                .all(|ang| ang.is_finite() && *ang > 0.0 && *ang < 180.0)
    }
}

impl Default for LatticeParameters {
    fn default() -> Self {
        LatticeParameters::cubic(5.0)
    }
}

impl fmt::Display for LatticeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a = {:.3} Å, b = {:.3} Å, c = {:.3} Å, α = {:.2}°, β = {:.2}°, γ = {:.2}°",
            self.a, self.b, self.c, self.alpha, self.beta, self.gamma
        )
    }
}

// ─────────────────────────────────────────────────────────────
// 晶格
// ─────────────────────────────────────────────────────────────

/// 已构建的晶格
///
/// 只能由 `diffraction::cell` 从经过校验的参数构建；参数或晶系变化时整体重建。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    system: System,
    params: LatticeParameters,
    /// 正空间基矢（列向量 a, b, c）
    direct: Mat3,
    /// 倒空间基矢（列向量 a*, b*, c*），含 2π 因子
    reciprocal: Mat3,
}

impl Lattice {
    pub(crate) fn new(
        system: System,
        params: LatticeParameters,
        direct: Mat3,
        reciprocal: Mat3,
    ) -> Self {
        Lattice {
            system,
            params,
            direct,
            reciprocal,
        }
    }

    pub fn system(&self) -> System {
        self.system
    }

    pub fn parameters(&self) -> &LatticeParameters {
        &self.params
    }

    pub fn direct(&self) -> &Mat3 {
        &self.direct
    }

    pub fn reciprocal(&self) -> &Mat3 {
        &self.reciprocal
    }

    /// 晶胞体积 V = a · (b × c)
    pub fn volume(&self) -> f64 {
        self.direct.determinant()
    }

    /// 由基矢反算晶格参数 (a, b, c, α, β, γ)
    pub fn measured_parameters(&self) -> LatticeParameters {
        let [a_vec, b_vec, c_vec] = self.direct.columns();

        let a = a_vec.magnitude();
        let b = b_vec.magnitude();
        let c = c_vec.magnitude();

        let alpha = (b_vec.dot(c_vec) / (b * c)).acos().to_degrees();
        let beta = (a_vec.dot(c_vec) / (a * c)).acos().to_degrees();
        let gamma = (a_vec.dot(b_vec) / (a * b)).acos().to_degrees();

        LatticeParameters::new(a, b, c, alpha, beta, gamma)
    }
}
