//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `render/`, `batch/`, `utils/` 与 relp 库
//! - 子模块: pattern, session, systems, zones

pub mod pattern;
pub mod session;
pub mod systems;
pub mod zones;

use crate::cli::lattice::{LatticeArgs, PatternFormat, RenderArgs};
use crate::cli::Commands;
use crate::render::{export, plot};
use crate::utils::output;

use relp::{
    Crystal, CrystalState, EditRequest, Hkl, LatticeParameters, RelpError, Result,
    UpdateOutcome, ZoneEnumerator,
};
use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Pattern(args) => pattern::execute(args),
        Commands::Systems => systems::execute(),
        Commands::Session(args) => session::execute(args),
        Commands::Zones(args) => zones::execute(args),
    }
}

/// 从立方默认值出发，将命令行给出的晶格作为一次事务提交
///
/// 回滚时打印原因并返回错误，已提交的默认晶体不会被输出。
fn commit_lattice(lattice: &LatticeArgs, zone: Hkl) -> Result<CrystalState> {
    let enumerator = ZoneEnumerator::new().with_search_radius(lattice.search_radius);
    let mut state = CrystalState::init_with(LatticeParameters::default(), enumerator)?;

    let request = EditRequest {
        system: lattice.system,
        basis: lattice.basis,
        params: lattice.parameters(),
        zone,
        edited: lattice.edited,
    };

    match state.update(&request)? {
        UpdateOutcome::Committed { params, basis, .. } => {
            if basis != request.basis {
                output::print_warning(&format!(
                    "{} is not allowed for {}, using {}",
                    request.basis, request.system, basis
                ));
            }
            if params != request.params {
                output::print_warning(&format!("Parameters coupled to {}", params));
            }
            if zone.is_zero() {
                output::print_warning("Zero zone axis replaced by [1 0 0]");
            }
            output::print_success(&format!(
                "Committed {} ({})",
                state.crystal().label(),
                state.parameters()
            ));
            Ok(state)
        }
        UpdateOutcome::RolledBack { reason, restored } => {
            output::print_rollback(
                &reason.to_string(),
                &format!("{} {} {}", restored.system, restored.basis, restored.params),
            );
            Err(reason)
        }
    }
}

/// 解析波长参数
fn resolve_wavelength(render: &RenderArgs) -> Result<f64> {
    crate::cli::lattice::parse_wavelength(&render.wavelength).map_err(RelpError::InvalidArgument)
}

/// 按格式输出一个晶带图样
fn write_pattern(
    crystal: &Crystal,
    path: &Path,
    format: PatternFormat,
    render: &RenderArgs,
    wavelength: f64,
) -> Result<()> {
    match format {
        PatternFormat::Csv => export::to_csv(crystal, path),
        PatternFormat::Png | PatternFormat::Svg => {
            let options = plot::PlotOptions {
                width: render.width,
                height: render.height,
                wavelength,
                extent: render.extent,
                label_count: render.label_count,
                use_svg: format == PatternFormat::Svg,
            };
            let title = format!("{} zone {}", crystal.label(), crystal.space.zone());
            plot::generate_pattern_plot(crystal, path, &title, &options)
        }
    }
}

/// 由输出文件扩展名推断格式
fn guess_format(path: &Path) -> Option<PatternFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some(PatternFormat::Png),
        "svg" => Some(PatternFormat::Svg),
        "csv" => Some(PatternFormat::Csv),
        _ => None,
    }
}
