//! Rasterizes a symbol to a PNG preview using the square and dot styles,
//! which map directly onto pixel fills.
//!
//! Run with: cargo run --example grid_preview

use image::{Rgb, RgbImage};
use qrvec::{render, FunctionGrid, ModuleType, RenderConfig, Shape, Style, Version};

const SCALE: u32 = 8;
const QUIET_ZONE: u32 = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut fg = FunctionGrid::new(Version::Normal(2));
    fg.fill_data(1234);

    let mut config = RenderConfig::new();
    config.style(ModuleType::Data, Style::Dot).size_ratio(ModuleType::Data, 0.85);

    let out = render(fg.grid(), &fg, &config);

    let side = (fg.width() as u32 + 2 * QUIET_ZONE) * SCALE;
    let mut img = RgbImage::from_pixel(side, side, Rgb([255, 255, 255]));

    for p in &out.primitives {
        match p.shape {
            Shape::Rect { x, y, w, h } => fill_rect(&mut img, x, y, w, h),
            Shape::Circle { cx, cy, r } => fill_circle(&mut img, cx, cy, r),
            // Curved outlines need a real rasterizer; the preview sticks to
            // styles that never produce them.
            Shape::Path { .. } => unreachable!("square and dot styles emit no paths"),
        }
    }

    img.save("preview.png")?;
    println!("wrote preview.png ({side}x{side})");
    Ok(())
}

fn to_px(v: f32) -> f32 {
    (v + QUIET_ZONE as f32) * SCALE as f32
}

fn fill_rect(img: &mut RgbImage, x: f32, y: f32, w: f32, h: f32) {
    let (x0, y0) = (to_px(x), to_px(y));
    let (x1, y1) = (to_px(x + w), to_px(y + h));
    for py in y0.round() as u32..y1.round() as u32 {
        for px in x0.round() as u32..x1.round() as u32 {
            img.put_pixel(px, py, Rgb([0, 0, 0]));
        }
    }
}

fn fill_circle(img: &mut RgbImage, cx: f32, cy: f32, r: f32) {
    let (cx, cy, r) = (to_px(cx), to_px(cy), r * SCALE as f32);
    let (x0, x1) = ((cx - r).floor() as u32, (cx + r).ceil() as u32);
    let (y0, y1) = ((cy - r).floor() as u32, (cy + r).ceil() as u32);
    for py in y0..=y1 {
        for px in x0..=x1 {
            let (dx, dy) = (px as f32 + 0.5 - cx, py as f32 + 0.5 - cy);
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(px, py, Rgb([0, 0, 0]));
            }
        }
    }
}
