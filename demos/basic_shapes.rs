//! Renders a small symbol with a mix of per-cell styles and merged phases,
//! then prints a summary of the primitives that come out.
//!
//! Run with: cargo run --example basic_shapes

use qrvec::{
    render, FunctionGrid, MergeConfig, ModuleType, RenderConfig, Shape, Style, Version,
};

fn main() {
    let mut fg = FunctionGrid::new(Version::Normal(2));
    fg.fill_data(42);

    let mut config = RenderConfig::new();
    config
        .style(ModuleType::Data, Style::Rounded)
        .size_ratio(ModuleType::Data, 0.9)
        .style(ModuleType::Timing, Style::Dot)
        .merge(ModuleType::Finder, MergeConfig::default())
        .merge(ModuleType::Alignment, MergeConfig::default());

    let out = render(fg.grid(), &fg, &config);

    println!("{} active modules -> {} primitives", fg.grid().active_count(), out.primitives.len());
    for mt in ModuleType::ALL {
        let (merged, single): (Vec<_>, Vec<_>) =
            out.primitives.iter().filter(|p| p.module_type == mt).partition(|p| p.merged);
        println!("{mt:?}: {} merged outlines, {} cell shapes", merged.len(), single.len());
    }

    for p in out.primitives.iter().take(5) {
        match &p.shape {
            Shape::Rect { x, y, w, h } => println!("rect at ({x}, {y}) size {w}x{h}"),
            Shape::Circle { cx, cy, r } => println!("circle at ({cx}, {cy}) radius {r}"),
            Shape::Path { subpaths } => {
                let segs: usize = subpaths.iter().map(|s| s.segments.len()).sum();
                println!("path with {} subpath(s), {segs} segments", subpaths.len());
            }
        }
    }

    for w in &out.warnings {
        eprintln!("warning: {w}");
    }
}
