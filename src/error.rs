//! # 统一错误处理模块
//!
//! 定义 relp 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 引擎错误：晶系/格心不兼容、晶格参数无效、晶带轴退化、晶胞退化
//! - 命令行外壳错误：文件读写、CSV、参数解析
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `models/lattice.rs` 的 System, BasisType

use crate::math::Hkl;
use crate::models::{BasisType, System};

use thiserror::Error;

/// relp 统一错误类型
#[derive(Error, Debug)]
pub enum RelpError {
    // ─────────────────────────────────────────────────────────────
    // 引擎错误
    // ─────────────────────────────────────────────────────────────
    #[error("Basis {basis} is not compatible with the {system} system")]
    IncompatibleBasis { system: System, basis: BasisType },

    #[error("Invalid lattice parameters for the {system} system: {reason}")]
    InvalidParameters { system: System, reason: String },

    #[error("Degenerate zone axis {zone}")]
    DegenerateZone { zone: Hkl },

    #[error("Degenerate unit cell (volume = {volume:e})")]
    DegenerateCell { volume: f64 },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl RelpError {
    /// 是否为可恢复的编辑错误（回滚即可，模型保持不变）
    ///
    /// `DegenerateCell` 在有效角度范围内不应出现，视为断言式失败。
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RelpError::IncompatibleBasis { .. }
                | RelpError::InvalidParameters { .. }
                | RelpError::DegenerateZone { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, RelpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let err = RelpError::IncompatibleBasis {
            system: System::Hexagonal,
            basis: BasisType::FaceCentered,
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("HEXAGONAL"));

        let err = RelpError::DegenerateZone {
            zone: Hkl::new(0, 0, 0),
        };
        assert!(err.is_recoverable());

        let err = RelpError::DegenerateCell { volume: 0.0 };
        assert!(!err.is_recoverable());
    }
}
