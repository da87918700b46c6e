//! # Zones 子命令实现
//!
//! 对同一晶体的多个晶带轴并行输出图样。
//!
//! ## 流程
//! 1. 提交命令行给出的晶格，得到基准 `CrystalState`
//! 2. 每个晶带轴一个任务：克隆基准状态，只修改晶带轴后提交并输出
//! 3. 汇总成功/跳过/失败
//!
//! 引擎本身保持单线程；并行只发生在相互独立的状态副本之间。
//!
//! ## 依赖关系
//! - 使用 `cli/zones.rs` 定义的 ZonesArgs
//! - 使用 `batch/` 模块进行并行处理
//! - 使用 `render/` 输出

use super::{commit_lattice, resolve_wavelength, write_pattern};
use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::lattice::{PatternFormat, RenderArgs};
use crate::cli::zones::ZonesArgs;
use crate::utils::output;

use relp::models::parse_hkl;
use relp::{CrystalState, EditRequest, Hkl, RelpError, Result, UpdateOutcome, ZoneAxis};
use std::fs;
use std::path::{Path, PathBuf};

/// 批量任务共享配置
struct ZoneJobConfig<'a> {
    base: &'a CrystalState,
    output_dir: PathBuf,
    format: PatternFormat,
    render: RenderArgs,
    wavelength: f64,
    overwrite: bool,
}

/// 执行 zones 子命令
pub fn execute(args: ZonesArgs) -> Result<()> {
    output::print_header("Zone Axis Batch");

    let zones = parse_zone_list(&args.zones)?;
    let wavelength = resolve_wavelength(&args.render)?;
    let base = commit_lattice(&args.lattice, zones[0])?;

    fs::create_dir_all(&args.output).map_err(|e| RelpError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let runner = BatchRunner::new(args.jobs.unwrap_or(0));
    output::print_info(&format!(
        "{} zone axes -> '{}' ({:?}, {} jobs)",
        zones.len(),
        args.output.display(),
        args.format,
        runner.jobs()
    ));

    let config = ZoneJobConfig {
        base: &base,
        output_dir: args.output.clone(),
        format: args.format,
        render: args.render.clone(),
        wavelength,
        overwrite: args.overwrite,
    };

    let result = runner.run(&zones, |zone| process_zone(*zone, &config))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} zones, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed zones:");
        for (zone, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", zone, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理单个晶带轴；文件按实际提交的晶带轴命名（零轴即 [1 0 0]）
fn process_zone(zone: Hkl, config: &ZoneJobConfig) -> ProcessResult {
    let zone = ZoneAxis::or_default(zone).hkl();
    let output_file = config
        .output_dir
        .join(zone_file_name(zone, config.format.extension()));

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match render_zone(zone, &output_file, config) {
        Ok(_) => ProcessResult::Success(format!("{} -> {}", zone, output_file.display())),
        Err(e) => ProcessResult::Failed(zone.to_string(), e.to_string()),
    }
}

/// 在基准状态的副本上切换晶带轴并输出
fn render_zone(zone: Hkl, output: &Path, config: &ZoneJobConfig) -> Result<()> {
    let mut state = config.base.clone();
    let mut request = EditRequest::from_snapshot(state.snapshot());
    request.zone = zone;

    match state.update(&request)? {
        UpdateOutcome::Committed { .. } => write_pattern(
            state.crystal(),
            output,
            config.format,
            &config.render,
            config.wavelength,
        ),
        UpdateOutcome::RolledBack { reason, .. } => Err(reason),
    }
}

/// 解析 "1,0,0;1,1,0" 形式的晶带轴列表
fn parse_zone_list(input: &str) -> Result<Vec<Hkl>> {
    let zones = input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_hkl)
        .collect::<Result<Vec<Hkl>>>()?;

    if zones.is_empty() {
        return Err(RelpError::InvalidArgument(
            "No zone axes given (expected e.g. \"1,0,0;1,1,0\")".to_string(),
        ));
    }
    Ok(zones)
}

/// 输出文件名，负指数写作 m1：[1 -1 0] -> zone_1_m1_0.png
fn zone_file_name(zone: Hkl, ext: &str) -> String {
    let parts: Vec<String> = zone
        .components()
        .iter()
        .map(|i| {
            if *i < 0 {
                format!("m{}", -i)
            } else {
                i.to_string()
            }
        })
        .collect();
    format!("zone_{}.{}", parts.join("_"), ext)
}
