//! # Systems 子命令实现
//!
//! 列出七个晶系的允许格心与独立参数。
//!
//! ## 依赖关系
//! - 使用 relp 库的 `System`, `allowed_basis_types`

use crate::utils::output;

use relp::{allowed_basis_types, Result, System};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SystemRow {
    #[tabled(rename = "System")]
    system: String,
    #[tabled(rename = "Centerings")]
    centerings: String,
    #[tabled(rename = "Independent parameters")]
    fields: String,
    #[tabled(rename = "Canonical cell (a = 5)")]
    canonical: String,
}

/// 执行 systems 子命令
pub fn execute() -> Result<()> {
    let rows: Vec<SystemRow> = System::ALL
        .into_iter()
        .map(|system| SystemRow {
            system: system.to_string(),
            centerings: allowed_basis_types(system)
                .iter()
                .map(|b| format!("{} ({})", b, b.symbol()))
                .collect::<Vec<_>>()
                .join(", "),
            fields: system
                .editable_fields()
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            canonical: system.canonical_parameters(5.0).to_string(),
        })
        .collect();

    output::print_header("Crystal Systems");
    println!("{}", Table::new(&rows));

    Ok(())
}
