use crate::common::Style;
use crate::grid::NeighborMask;
use crate::render::config::PhaseConfig;
use crate::render::geometry::{CurvePath, PathSegment, Point, Shape};

// Cell frame
//------------------------------------------------------------------------------

/// Screen-space square a single cell renders into, already inset by the
/// phase's size ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFrame {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl CellFrame {
    /// Frame for grid cell `(r, c)` with the given size ratio.
    pub fn at(r: usize, c: usize, size_ratio: f32) -> Self {
        let inset = (1.0 - size_ratio) * 0.5;
        Self { x: c as f32 + inset, y: r as f32 + inset, size: size_ratio }
    }
}

// Style registry
//------------------------------------------------------------------------------

pub type CellShapeFn = fn(CellFrame, NeighborMask, &PhaseConfig) -> Shape;

/// Fixed map from style to its cell renderer. Owned by the pipeline and
/// constructed once; no global state.
pub struct StyleRegistry {
    entries: [CellShapeFn; 6],
}

impl StyleRegistry {
    pub fn new() -> Self {
        let mut entries: [CellShapeFn; 6] = [square_cell; 6];
        entries[Style::Square.index()] = square_cell;
        entries[Style::Dot.index()] = dot_cell;
        entries[Style::Rounded.index()] = rounded_cell;
        entries[Style::ExtraRounded.index()] = extra_rounded_cell;
        entries[Style::Classy.index()] = classy_cell;
        entries[Style::ClassyRounded.index()] = classy_rounded_cell;
        entries.into()
    }

    pub fn shape_fn(&self, style: Style) -> CellShapeFn {
        self.entries[style.index()]
    }
}

impl From<[CellShapeFn; 6]> for StyleRegistry {
    fn from(entries: [CellShapeFn; 6]) -> Self {
        Self { entries }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Corner rounding
//------------------------------------------------------------------------------

// Corners in clockwise order starting top-left.
const TL: usize = 0;
const TR: usize = 1;
const BR: usize = 2;
const BL: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RoundKind {
    /// Circular quarter arc.
    Arc,
    /// Quadratic curve with the control point pinned on the corner.
    Quad,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CornerRound {
    kind: RoundKind,
    radius: f32,
}

const GEOM_EPS: f32 = 1e-5;

/// Builds a clockwise cell outline with the requested corners cut. The
/// radius at a corner consumes that much of each adjoining edge.
fn cell_path(f: CellFrame, rounds: [Option<CornerRound>; 4]) -> Shape {
    let s = f.size;
    let p = [
        Point::new(f.x, f.y),
        Point::new(f.x + s, f.y),
        Point::new(f.x + s, f.y + s),
        Point::new(f.x, f.y + s),
    ];
    let dir_out =
        [Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(-1.0, 0.0), Point::new(0.0, -1.0)];

    let radius = |i: usize| rounds[i].map_or(0.0, |r| r.radius);
    let exit = |i: usize| p[i] + dir_out[i] * radius(i);
    let entry = |i: usize| p[i] + dir_out[(i + 3) % 4] * -radius(i);

    for i in 0..4 {
        debug_assert!(
            radius(i) + radius((i + 1) % 4) <= s + GEOM_EPS,
            "Corner radii overflow the cell edge"
        );
    }

    let start = exit(TL);
    let mut cur = start;
    let mut segments = Vec::with_capacity(8);
    for k in 1..=4 {
        let i = k % 4;
        let e = entry(i);
        if e.dist(cur) > GEOM_EPS {
            segments.push(PathSegment::Line { to: e });
            cur = e;
        }
        if let Some(round) = rounds[i] {
            let x = exit(i);
            match round.kind {
                RoundKind::Arc => segments.push(PathSegment::Arc { radius: round.radius, to: x }),
                RoundKind::Quad => segments.push(PathSegment::Quad { ctrl: p[i], to: x }),
            }
            cur = x;
        }
    }

    Shape::Path { subpaths: vec![CurvePath { start, segments, closed: true }] }
}

fn round(kind: RoundKind, radius: f32) -> Option<CornerRound> {
    Some(CornerRound { kind, radius })
}

// Style renderers
//------------------------------------------------------------------------------

// Every renderer is a pure function of the frame, the neighbor mask and the
// phase parameters, so per-cell decisions are freely parallelizable.

fn square_cell(f: CellFrame, _: NeighborMask, _: &PhaseConfig) -> Shape {
    Shape::Rect { x: f.x, y: f.y, w: f.size, h: f.size }
}

fn dot_cell(f: CellFrame, _: NeighborMask, _: &PhaseConfig) -> Shape {
    let half = f.size * 0.5;
    Shape::Circle { cx: f.x + half, cy: f.y + half, r: half }
}

/// Far-side corner pair for a cell whose only neighbor sits on one side.
fn cap_corners(m: NeighborMask) -> [usize; 2] {
    if m.left {
        [TR, BR]
    } else if m.right {
        [BL, TL]
    } else if m.top {
        [BR, BL]
    } else {
        [TL, TR]
    }
}

/// Corner diagonally opposite two perpendicular neighbors.
fn open_corner(m: NeighborMask) -> usize {
    match (m.top, m.right, m.bottom, m.left) {
        (_, true, true, _) => TL,
        (_, _, true, true) => TR,
        (true, _, _, true) => BR,
        _ => BL,
    }
}

fn neighbor_aware_cell(f: CellFrame, m: NeighborMask, cfg: &PhaseConfig, kind: RoundKind) -> Shape {
    let rr = 0.5 * cfg.roundness * f.size;
    match m.orthogonal_count() {
        0 if kind == RoundKind::Arc => dot_cell(f, m, cfg),
        // Isolated capsule: two opposite corners cut with arcs.
        0 => {
            let mut rounds = [None; 4];
            rounds[TL] = round(RoundKind::Arc, rr);
            rounds[BR] = round(RoundKind::Arc, rr);
            cell_path(f, rounds)
        }
        // Terminal cell: cap the side opposite the neighbor.
        1 => {
            let mut rounds = [None; 4];
            for i in cap_corners(m) {
                rounds[i] = round(kind, rr);
            }
            cell_path(f, rounds)
        }
        2 if !m.has_opposite_pair() => {
            let mut rounds = [None; 4];
            match kind {
                RoundKind::Arc => rounds[open_corner(m)] = round(kind, rr),
                // Pronounced variant sweeps the whole cell corner.
                RoundKind::Quad => rounds[open_corner(m)] = round(kind, cfg.roundness * f.size),
            }
            cell_path(f, rounds)
        }
        // Structurally interior: tile without gaps.
        _ => square_cell(f, m, cfg),
    }
}

fn rounded_cell(f: CellFrame, m: NeighborMask, cfg: &PhaseConfig) -> Shape {
    neighbor_aware_cell(f, m, cfg, RoundKind::Arc)
}

fn extra_rounded_cell(f: CellFrame, m: NeighborMask, cfg: &PhaseConfig) -> Shape {
    neighbor_aware_cell(f, m, cfg, RoundKind::Quad)
}

/// Boundary-only rounding: top-left corner when nothing sits above or left,
/// bottom-right when nothing sits below or right. Interior joints stay sharp.
fn classy_style_cell(f: CellFrame, m: NeighborMask, cfg: &PhaseConfig, kind: RoundKind) -> Shape {
    let rr = 0.5 * cfg.roundness * f.size;
    let mut rounds = [None; 4];
    if m.is_isolated() {
        rounds[TL] = round(kind, rr);
        rounds[BR] = round(kind, rr);
        return cell_path(f, rounds);
    }
    if !m.top && !m.left {
        rounds[TL] = round(kind, rr);
    }
    if !m.bottom && !m.right {
        rounds[BR] = round(kind, rr);
    }
    if rounds.iter().all(Option::is_none) {
        return square_cell(f, m, cfg);
    }
    cell_path(f, rounds)
}

fn classy_cell(f: CellFrame, m: NeighborMask, cfg: &PhaseConfig) -> Shape {
    classy_style_cell(f, m, cfg, RoundKind::Quad)
}

fn classy_rounded_cell(f: CellFrame, m: NeighborMask, cfg: &PhaseConfig) -> Shape {
    classy_style_cell(f, m, cfg, RoundKind::Arc)
}
