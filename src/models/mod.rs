//! # 数据模型模块
//!
//! 定义晶系、晶格参数、原子基元和倒空间数据模型。
//!
//! ## 依赖关系
//! - 被 `diffraction/` 和 `commands/` 使用
//! - 子模块: lattice, structure

pub mod lattice;
pub mod structure;

pub use lattice::{BasisType, Field, Lattice, LatticeParameters, System};
pub use structure::{
    parse_hkl, Atom, AtomicBasis, Crystal, ReciprocalPoint, ReciprocalSpace, ZoneAxis,
    INTENSITY_THRESHOLD,
};
