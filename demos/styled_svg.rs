//! Writes a styled symbol out as an SVG document, mapping every shape
//! primitive to its SVG element by hand.
//!
//! Run with: cargo run --example styled_svg

use std::fmt::Write as _;
use std::fs;

use qrvec::{
    render, CurveConfig, FunctionGrid, MergeConfig, ModuleType, PathSegment, RenderConfig, Shape,
    Style, StyledPrimitive, Version,
};

const SCALE: f32 = 10.0;
const QUIET_ZONE: f32 = 4.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut fg = FunctionGrid::new(Version::Normal(3));
    fg.fill_data(7);

    let mut config = RenderConfig::new();
    config
        .style(ModuleType::Data, Style::ExtraRounded)
        .roundness(ModuleType::Data, 0.8)
        .style(ModuleType::Timing, Style::Dot)
        .merge(
            ModuleType::Finder,
            MergeConfig {
                curve: CurveConfig { tension: 0.6, point_reduction: 0.5, ..CurveConfig::default() },
                ..MergeConfig::default()
            },
        );

    let out = render(fg.grid(), &fg, &config);

    let side = (fg.width() as f32 + 2.0 * QUIET_ZONE) * SCALE;
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" viewBox="0 0 {side} {side}">"#
    )?;
    writeln!(svg, r#"<rect width="{side}" height="{side}" fill="white"/>"#)?;
    for p in &out.primitives {
        writeln!(svg, "{}", element(p))?;
    }
    writeln!(svg, "</svg>")?;

    fs::write("styled.svg", svg)?;
    println!("wrote styled.svg ({} primitives)", out.primitives.len());
    Ok(())
}

fn tx(v: f32) -> f32 {
    (v + QUIET_ZONE) * SCALE
}

fn element(p: &StyledPrimitive) -> String {
    match &p.shape {
        Shape::Rect { x, y, w, h } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
            tx(*x),
            tx(*y),
            w * SCALE,
            h * SCALE
        ),
        Shape::Circle { cx, cy, r } => {
            format!(r#"<circle cx="{}" cy="{}" r="{}"/>"#, tx(*cx), tx(*cy), r * SCALE)
        }
        Shape::Path { subpaths } => {
            let mut d = String::new();
            for path in subpaths {
                write!(d, "M {} {} ", tx(path.start.x), tx(path.start.y)).unwrap();
                for seg in &path.segments {
                    match seg {
                        PathSegment::Line { to } => {
                            write!(d, "L {} {} ", tx(to.x), tx(to.y)).unwrap()
                        }
                        PathSegment::Quad { ctrl, to } => {
                            write!(d, "Q {} {} {} {} ", tx(ctrl.x), tx(ctrl.y), tx(to.x), tx(to.y))
                                .unwrap()
                        }
                        PathSegment::Cubic { ctrl1, ctrl2, to } => write!(
                            d,
                            "C {} {} {} {} {} {} ",
                            tx(ctrl1.x),
                            tx(ctrl1.y),
                            tx(ctrl2.x),
                            tx(ctrl2.y),
                            tx(to.x),
                            tx(to.y)
                        )
                        .unwrap(),
                        // Clockwise quarter arc: sweep flag set, no large arc.
                        PathSegment::Arc { radius, to } => {
                            let r = radius * SCALE;
                            write!(d, "A {r} {r} 0 0 1 {} {} ", tx(to.x), tx(to.y)).unwrap()
                        }
                    }
                }
                d.push_str("Z ");
            }
            format!(r#"<path d="{}" fill-rule="evenodd"/>"#, d.trim_end())
        }
    }
}
