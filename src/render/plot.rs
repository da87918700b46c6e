//! # 晶带图样绘制
//!
//! 使用 `plotters` 绘制晶带平面内的倒格点图样。
//!
//! ## 功能
//! - 可观测倒格点散点（原点单独着色）
//! - 离原点最近的若干点标注 (hkl)
//! - 极限球截面圆 (半径 2π/λ)
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/pattern.rs`, `commands/zones.rs` 调用
//! - 使用 `render/mod.rs` 的 nearest_reflections
//! - 使用 `plotters` 渲染图表

use super::nearest_reflections;

use plotters::prelude::*;
use relp::diffraction::limiting_sphere_radius;
use relp::{Crystal, RelpError, Result};
use std::path::Path;

/// 默认视野相对极限球半径的放大系数
const EXTENT_MARGIN: f64 = 1.15;

/// 绘图选项
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    /// 波长 (Å)
    pub wavelength: f64,
    /// 视野半宽 (Å⁻¹)；None 时取极限球半径的 1.15 倍
    pub extent: Option<f64>,
    pub label_count: usize,
    pub use_svg: bool,
}

impl PlotOptions {
    pub fn half_width(&self) -> f64 {
        self.extent
            .filter(|e| *e > 0.0 && e.is_finite())
            .unwrap_or_else(|| EXTENT_MARGIN * limiting_sphere_radius(self.wavelength))
    }
}

/// 生成晶带图样图表
pub fn generate_pattern_plot(
    crystal: &Crystal,
    output_path: &Path,
    title: &str,
    options: &PlotOptions,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_pattern(&root, crystal, title, options)?;
        root.present()
            .map_err(|e| RelpError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_pattern(&root, crystal, title, options)?;
        root.present()
            .map_err(|e| RelpError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 绘制图样的核心逻辑
fn draw_pattern<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    crystal: &Crystal,
    title: &str,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| RelpError::Other(format!("{:?}", e)))?;

    let r = options.half_width();

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-r..r, -r..r)
        .map_err(|e| RelpError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("u (Å⁻¹)")
        .y_desc("v (Å⁻¹)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| RelpError::Other(format!("{:?}", e)))?;

    // 极限球截面
    let sphere = limiting_sphere_radius(options.wavelength);
    let circle: Vec<(f64, f64)> = (0..=360)
        .map(|deg| {
            let t = (deg as f64).to_radians();
            (sphere * t.cos(), sphere * t.sin())
        })
        .collect();
    chart
        .draw_series(std::iter::once(PathElement::new(
            circle,
            RGBColor(230, 120, 20).stroke_width(2),
        )))
        .map_err(|e| RelpError::Other(format!("{:?}", e)))?;

    let inside = |u: f64, v: f64| u.abs() <= r && v.abs() <= r;
    let point_color = RGBColor(0, 102, 204);

    chart
        .draw_series(
            crystal
                .space
                .observable()
                .filter(|p| !p.hkl.is_zero() && inside(p.u, p.v))
                .map(|p| Circle::new((p.u, p.v), 5, point_color.filled())),
        )
        .map_err(|e| RelpError::Other(format!("{:?}", e)))?;

    chart
        .draw_series(std::iter::once(Circle::new((0.0, 0.0), 6, RED.filled())))
        .map_err(|e| RelpError::Other(format!("{:?}", e)))?;

    // 标注最近的倒格点
    let offset = r * 0.015;
    for point in nearest_reflections(&crystal.space, options.label_count) {
        if !inside(point.u, point.v) {
            continue;
        }

        let text_style = ("sans-serif", 12).into_font().color(&BLACK);
        chart
            .draw_series(std::iter::once(Text::new(
                point.hkl.to_string(),
                (point.u + offset, point.v + offset),
                text_style,
            )))
            .map_err(|e| RelpError::Other(format!("{:?}", e)))?;
    }

    let info_text = format!(
        "zone {}   λ = {:.4} Å",
        crystal.space.zone(),
        options.wavelength
    );
    chart
        .draw_series(std::iter::once(Text::new(
            info_text,
            (-r * 0.95, r * 0.95),
            ("sans-serif", 14).into_font().color(&BLACK),
        )))
        .map_err(|e| RelpError::Other(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extent_follows_wavelength() {
        let options = PlotOptions {
            width: 100,
            height: 100,
            wavelength: 1.54,
            extent: None,
            label_count: 0,
            use_svg: true,
        };
        let expected = EXTENT_MARGIN * limiting_sphere_radius(1.54);
        assert!((options.half_width() - expected).abs() < 1e-12);

        let fixed = PlotOptions {
            extent: Some(2.0),
            ..options
        };
        assert_eq!(fixed.half_width(), 2.0);
    }
}
