//! # 晶格与输出的共享参数
//!
//! `pattern` 与 `zones` 子命令共用的晶格参数组和图样输出参数组。
//!
//! ## 依赖关系
//! - 被 `cli/pattern.rs`, `cli/zones.rs` 使用
//! - 参数传递给 `commands/` 相应模块

use clap::{Args, ValueEnum};
use relp::{BasisType, Field, LatticeParameters, System};

/// 晶格参数组
#[derive(Args, Debug, Clone)]
pub struct LatticeArgs {
    /// Crystal system (cubic, tetragonal, hexagonal, orthorhombic, rhombohedral, monoclinic, triclinic)
    #[arg(long, env = "RELP_SYSTEM", default_value = "cubic")]
    pub system: System,

    /// Lattice centering: primitive (p), body (i), face (f), base (c)
    #[arg(long, env = "RELP_BASIS", default_value = "primitive")]
    pub basis: BasisType,

    /// Lattice length a (Å)
    #[arg(short = 'a', long = "a", default_value_t = 5.0)]
    pub a: f64,

    /// Lattice length b (Å), defaults to a
    #[arg(short = 'b', long = "b")]
    pub b: Option<f64>,

    /// Lattice length c (Å), defaults to a
    #[arg(short = 'c', long = "c")]
    pub c: Option<f64>,

    /// Angle α between b and c (degrees)
    #[arg(long, default_value_t = 90.0)]
    pub alpha: f64,

    /// Angle β between a and c (degrees)
    #[arg(long, default_value_t = 90.0)]
    pub beta: f64,

    /// Angle γ between a and b (degrees)
    #[arg(long, default_value_t = 90.0)]
    pub gamma: f64,

    /// Parameter that was edited last; its value wins when parameters are coupled
    #[arg(long, default_value = "none")]
    pub edited: Field,

    /// Half-range H of the Miller index search (each index in [-H, H])
    #[arg(
        long,
        env = "RELP_SEARCH_RADIUS",
        default_value_t = relp::diffraction::DEFAULT_SEARCH_RADIUS,
        value_parser = clap::value_parser!(i32).range(1..=relp::diffraction::MAX_SEARCH_RADIUS as i64)
    )]
    pub search_radius: i32,
}

impl LatticeArgs {
    pub fn parameters(&self) -> LatticeParameters {
        LatticeParameters::new(
            self.a,
            self.b.unwrap_or(self.a),
            self.c.unwrap_or(self.a),
            self.alpha,
            self.beta,
            self.gamma,
        )
    }
}

/// 图样输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PatternFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file (h, k, l, u, v, intensity)
    Csv,
}

impl PatternFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PatternFormat::Png => "png",
            PatternFormat::Svg => "svg",
            PatternFormat::Csv => "csv",
        }
    }
}

/// 图样渲染参数组
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// X-ray wavelength for the limiting sphere: source name (cu-ka, mo-ka, ...) or value in Å
    #[arg(short, long, env = "RELP_WAVELENGTH", default_value = "1.54")]
    pub wavelength: String,

    /// Half-width of the plotted region in Å⁻¹ (default: 1.15 × limiting sphere radius)
    #[arg(long)]
    pub extent: Option<f64>,

    /// Number of reflections nearest the origin to label with (hkl)
    #[arg(long, default_value_t = 24)]
    pub label_count: usize,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 900)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 900)]
    pub height: u32,
}

/// 预定义辐射源波长 (Å)
pub fn get_predefined_wavelength(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "cu-ka" | "cuka" => Some(1.5418),
        "cu-ka1" | "cuka1" => Some(1.5406),
        "mo-ka" | "moka" => Some(0.7107),
        "co-ka" | "coka" => Some(1.7903),
        "fe-ka" | "feka" => Some(1.9373),
        "cr-ka" | "crka" => Some(2.2910),
        "ag-ka" | "agka" => Some(0.5609),
        _ => None,
    }
}

/// 解析波长输入（辐射源名称或数值）
pub fn parse_wavelength(input: &str) -> Result<f64, String> {
    if let Some(wl) = get_predefined_wavelength(input) {
        return Ok(wl);
    }
    match input.parse::<f64>() {
        Ok(wl) if wl > 0.0 && wl.is_finite() => Ok(wl),
        _ => Err(format!(
            "Invalid wavelength '{}'. Use a positive number (e.g., 1.54) or a name: cu-ka, mo-ka, co-ka, fe-ka, cr-ka, ag-ka",
            input
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wavelength() {
        assert_eq!(parse_wavelength("Cu-Ka"), Ok(1.5418));
        assert_eq!(parse_wavelength("0.5"), Ok(0.5));
        assert!(parse_wavelength("-1").is_err());
        assert!(parse_wavelength("xray").is_err());
    }
}
