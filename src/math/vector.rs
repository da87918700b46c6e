//! # 三维向量与矩阵
//!
//! 晶格计算所需的最小线性代数：`Vec3`、`Mat3`（按列存储）与整数 Miller 指数 `Hkl`。
//! 全部为值类型上的纯函数，没有失败路径。
//!
//! ## 依赖关系
//! - 被 `models/` 和 `diffraction/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// 归一化与投影时视为零向量的模平方阈值
pub const ZERO_NORM_SQUARED: f64 = 1e-24;

/// 三维实向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    pub fn scale(self, s: f64) -> Self {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// 单位化；模平方低于 1e-24 时返回零向量
    pub fn normalize(self) -> Vec3 {
        let n2 = self.dot(self);
        if n2 < ZERO_NORM_SQUARED {
            return Vec3::ZERO;
        }
        self.scale(1.0 / n2.sqrt())
    }

    /// `self` 在 `onto` 方向上的投影
    pub fn project(self, onto: Vec3) -> Vec3 {
        let uu = onto.dot(onto);
        if uu < ZERO_NORM_SQUARED {
            return Vec3::ZERO;
        }
        onto.scale(self.dot(onto) / uu)
    }

    /// 与 `self` 垂直的单位向量
    ///
    /// 取与 `self` 最不平行的坐标轴（并列时依次优先 x、y、z），
    /// 与 `self` 叉乘后归一化。
    pub fn unit_normal(self) -> Vec3 {
        let (ax, ay, az) = (self.x.abs(), self.y.abs(), self.z.abs());
        let axis = if ax <= ay && ax <= az {
            Vec3::X
        } else if ay <= az {
            Vec3::Y
        } else {
            Vec3::Z
        };
        self.cross(axis).normalize()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// 3x3 矩阵，按列存储（每列是一个基矢）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Mat3 {
    cols: [Vec3; 3],
}

impl Mat3 {
    pub const ZERO: Mat3 = Mat3 {
        cols: [Vec3::ZERO; 3],
    };

    /// 由三个列向量构造
    pub fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Mat3 { cols: [c0, c1, c2] }
    }

    /// 对角矩阵 diag(a, b, c)
    pub fn diagonal(a: f64, b: f64, c: f64) -> Self {
        Mat3::from_columns(
            Vec3::new(a, 0.0, 0.0),
            Vec3::new(0.0, b, 0.0),
            Vec3::new(0.0, 0.0, c),
        )
    }

    /// 第 `i` 列（i ∈ 0..3）
    pub fn column(&self, i: usize) -> Vec3 {
        self.cols[i]
    }

    pub fn columns(&self) -> [Vec3; 3] {
        self.cols
    }

    /// 第 `i` 行（i ∈ 0..3）
    pub fn row(&self, i: usize) -> Vec3 {
        let [c0, c1, c2] = self.cols;
        match i {
            0 => Vec3::new(c0.x, c1.x, c2.x),
            1 => Vec3::new(c0.y, c1.y, c2.y),
            2 => Vec3::new(c0.z, c1.z, c2.z),
            _ => panic!("Mat3 row index out of range: {}", i),
        }
    }

    /// 矩阵乘列向量：Σ v_i · col_i
    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// 行列式 = c0 · (c1 × c2)
    pub fn determinant(&self) -> f64 {
        self.cols[0].dot(self.cols[1].cross(self.cols[2]))
    }
}

/// Miller 指数 (h, k, l)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hkl([i32; 3]);

impl Hkl {
    pub const fn new(h: i32, k: i32, l: i32) -> Self {
        Hkl([h, k, l])
    }

    pub fn h(self) -> i32 {
        self.0[0]
    }

    pub fn k(self) -> i32 {
        self.0[1]
    }

    pub fn l(self) -> i32 {
        self.0[2]
    }

    /// 按下标取分量（0 → h, 1 → k, 2 → l）
    pub fn component(self, i: usize) -> i32 {
        self.0[i]
    }

    pub fn components(self) -> [i32; 3] {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == [0, 0, 0]
    }

    /// 整数点积，晶带定律 h·u + k·v + l·w
    ///
    /// 在 i128 中求和：单个 i32 乘积可达 2^62，三项之和超出 i64。
    pub fn dot(self, other: Hkl) -> i128 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| i128::from(a) * i128::from(b))
            .sum()
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.h() as f64, self.k() as f64, self.l() as f64)
    }
}

impl fmt::Display for Hkl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.h(), self.k(), self.l())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec3::new(1e-13, 0.0, 0.0).normalize(), Vec3::ZERO);

        let n = Vec3::new(3.0, 4.0, 0.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_project() {
        let p = Vec3::new(2.0, 3.0, 4.0).project(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(p, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(Vec3::X.project(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_unit_normal_is_perpendicular() {
        for n in [
            Vec3::X,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.3, -2.0, 0.7),
            Vec3::new(0.0, 0.0, -4.0),
        ] {
            let e = n.unit_normal();
            assert!(e.dot(n).abs() < 1e-12);
            assert!((e.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_mat3_columns_and_rows() {
        let m = Mat3::from_columns(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(m.column(1), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.row(0), Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(m.row(2), Vec3::new(3.0, 6.0, 9.0));
        assert_eq!(m.mul_vec(Vec3::Y), Vec3::new(4.0, 5.0, 6.0));
        assert!((Mat3::diagonal(2.0, 3.0, 4.0).determinant() - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_hkl_arithmetic() {
        assert_eq!(Hkl::new(1, -1, 0).dot(Hkl::new(1, 1, 1)), 0);
        assert_eq!(Hkl::new(2, -3, 5).component(1), -3);
        assert_eq!(Hkl::new(1, -1, 2).to_string(), "(1 -1 2)");
        assert!(Hkl::default().is_zero());
    }

    #[test]
    fn test_hkl_dot_extreme_indices() {
        let big = Hkl::new(i32::MAX, 1, 0);
        assert_eq!(big.dot(Hkl::new(1, 1, 0)), i128::from(i32::MAX) + 1);
        assert_eq!(big.dot(Hkl::new(0, 0, 7)), 0);

        let min = Hkl::new(i32::MIN, i32::MIN, i32::MIN);
        assert_eq!(min.dot(min), 3 * i128::from(i32::MIN) * i128::from(i32::MIN));
    }
}
