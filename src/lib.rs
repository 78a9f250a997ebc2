//! # qrvec
//!
//! A Rust library for turning QR module grids into vector shape primitives.
//! The input is a square boolean matrix plus a classifier that assigns each
//! cell a functional role (finder, timing, alignment, format, version, data);
//! the output is a flat list of rects, circles and curve paths ready for an
//! SVG writer, a rasterizer or a plotter.
//!
//! ## Features
//!
//! - **Neighbor-aware cell styles**: square, dot, rounded, extra-rounded,
//!   classy and classy-rounded renderers that adapt each cell's corners to
//!   its neighborhood
//! - **Cluster merging**: connected components of same-type cells can be
//!   rendered as single outlines instead of individual cells
//! - **Contour extraction**: boundary tracing with four- or eight-way saddle
//!   resolution, holes included
//! - **Curve fitting**: point reduction and cubic corner rounding over merged
//!   outlines, with tension, smoothing and optimization-level knobs
//! - **Per-module-type phases**: every functional region gets its own style
//!   and merge configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use qrvec::{render, FunctionGrid, ModuleType, RenderConfig, Style, Version};
//!
//! // Lay out the function patterns of a version 2 symbol and fill the data
//! // region with a deterministic test pattern.
//! let mut fg = FunctionGrid::new(Version::Normal(2));
//! fg.fill_data(42);
//!
//! let mut config = RenderConfig::new();
//! config.style(ModuleType::Data, Style::Rounded).size_ratio(ModuleType::Data, 0.9);
//!
//! let out = render(fg.grid(), &fg, &config);
//! assert_eq!(out.primitives.len(), fg.grid().active_count());
//! ```
//!
//! ## Merged rendering
//!
//! ```rust
//! use qrvec::{render, FunctionGrid, MergeConfig, ModuleType, RenderConfig, Shape, Version};
//!
//! let mut fg = FunctionGrid::new(Version::Normal(1));
//! fg.fill_data(1);
//!
//! // Render the finder rings as merged outlines; everything else per cell.
//! let mut config = RenderConfig::new();
//! config.merge(ModuleType::Finder, MergeConfig::default());
//!
//! let out = render(fg.grid(), &fg, &config);
//! assert!(out.primitives.iter().any(|p| p.merged && matches!(p.shape, Shape::Path { .. })));
//! ```
//!
//! Grids from an external encoder enter through [`Grid::from_bits`] and any
//! `Fn(usize, usize) -> ModuleType` closure serves as the classifier.

pub(crate) mod common;
pub mod grid;
pub mod pattern;
pub mod render;

pub use common::error::{RenderError, RenderResult, RenderWarning};
pub use common::metadata::{Connectivity, ModuleType, OptimizationLevel, Style, Version};
pub use grid::{Grid, NeighborMask};
pub use pattern::FunctionGrid;
pub use render::{
    render, Classify, CurveConfig, CurvePath, MergeConfig, MergeThresholds, PathSegment,
    PhaseConfig, Point, Polygon, RenderConfig, RenderOutput, Shape, StyledPrimitive,
};
