//! # 晶带衍射计算模块
//!
//! 由晶系约束的晶格参数计算单晶的晶带倒格点图样。
//!
//! ## 子模块
//! - `cell`: 正空间晶胞与原子基元构建，晶系/格心兼容表
//! - `reciprocal`: 倒格矢推导
//! - `structure_factor`: 运动学结构因子
//! - `zone`: 晶带倒格点枚举与二维投影
//! - `constraints`: 晶格参数校验与耦合
//! - `state`: 事务式编辑与回滚
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 和 `math/`

pub mod cell;
pub mod constraints;
pub mod reciprocal;
pub mod state;
pub mod structure_factor;
pub mod zone;

pub use cell::{allowed_basis_types, basis_allowed, build_cell, build_lattice};
pub use constraints::{couple, validate};
pub use reciprocal::derive_reciprocal;
pub use state::{CommittedSnapshot, CrystalState, EditRequest, UpdateOutcome};
pub use structure_factor::intensity;
pub use zone::{
    limiting_sphere_radius, ZoneEnumerator, CU_K_ALPHA, DEFAULT_SEARCH_RADIUS, MAX_SEARCH_RADIUS,
};
