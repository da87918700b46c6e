//! # relp - 单晶晶带倒格点图样命令行工具
//!
//! 在 relp 库之上提供命令行外壳：提交晶格编辑、打印反射表、
//! 输出 PNG/SVG/CSV 图样，以及批量并行输出多个晶带轴。
//!
//! ## 子命令
//! - `pattern` - 单个晶带轴的图样
//! - `systems` - 晶系、允许的格心与独立参数
//! - `session` - 重放编辑脚本（事务式提交/回滚）
//! - `zones`   - 并行输出多个晶带轴
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── render/ (绘图、CSV 导出、终端表格)
//!   │     └── batch/  (并行批处理)
//!   ├── utils/      (输出样式、进度条)
//!   └── relp 库     (晶体模型与衍射计算)
//! ```

mod batch;
mod cli;
mod commands;
mod render;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
