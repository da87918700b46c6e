//! # relp - 单晶晶带倒格点图样
//!
//! 给定晶系、格心类型、晶格参数和晶带轴，计算晶带平面内的倒格点、
//! 二维投影坐标与运动学衍射强度；晶格参数的编辑以事务方式提交或回滚。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── math/         (向量、矩阵、Miller 指数)
//!   ├── models/       (晶系、晶格参数、晶体数据模型)
//!   ├── diffraction/  (晶胞构建、倒格矢、晶带枚举、约束、事务)
//!   └── error.rs      (错误处理)
//! ```

pub mod diffraction;
pub mod error;
pub mod math;
pub mod models;

pub use diffraction::{
    allowed_basis_types, basis_allowed, CommittedSnapshot, CrystalState, EditRequest,
    UpdateOutcome, ZoneEnumerator,
};
pub use error::{RelpError, Result};
pub use math::{Hkl, Mat3, Vec3};
pub use models::{
    BasisType, Crystal, Field, Lattice, LatticeParameters, ReciprocalPoint, ReciprocalSpace,
    System, ZoneAxis,
};
