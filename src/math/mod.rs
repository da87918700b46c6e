//! # 线性代数模块
//!
//! 提供晶格与倒格子计算所需的向量、矩阵和 Miller 指数类型。
//!
//! ## 依赖关系
//! - 被 `models/` 和 `diffraction/` 使用
//! - 子模块: vector

pub mod vector;

pub use vector::{Hkl, Mat3, Vec3};
