use crate::common::OptimizationLevel;
use crate::render::geometry::{CurvePath, PathSegment, Point, Polygon};

// Curve fitting
//------------------------------------------------------------------------------

/// Smoothing knobs for merged-cluster outlines. The numeric fields are
/// expected in [0, 1]; the configuration layer clamps them and this module
/// does not re-validate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveConfig {
    /// How far control points pull the outline away from each corner.
    pub tension: f32,
    /// Blends each corner's cut length with its neighbors'.
    pub smoothing: f32,
    /// Drop near-collinear vertices below this deviation share before fitting.
    pub point_reduction: f32,
    pub optimization: OptimizationLevel,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            tension: 0.5,
            smoothing: 0.0,
            point_reduction: 0.0,
            optimization: OptimizationLevel::Medium,
        }
    }
}

// Circle-approximation factor for cubic corner rounding.
const KAPPA: f32 = 0.552_284_8;
const CURVE_EPS: f32 = 1e-6;

/// Replaces a polygon loop with a smoothed path: point reduction first, then
/// a cubic fit at every remaining corner. Zero tension degenerates to the
/// plain polygon as line segments.
///
/// Aggressive settings on concave outlines can produce a self-intersecting
/// path; callers get the curve as-is.
pub fn smooth(poly: &Polygon, cfg: &CurveConfig) -> CurvePath {
    if poly.len() < 3 {
        return CurvePath { start: Point::new(0.0, 0.0), segments: Vec::new(), closed: false };
    }

    let verts = reduce_points(poly, cfg);
    let n = verts.len();

    // Cut length per corner, tension-scaled and capped at half the shorter
    // adjoining edge so neighboring cuts never overlap.
    let mut cut = vec![0.0f32; n];
    for i in 0..n {
        let prev = verts[(i + n - 1) % n];
        let next = verts[(i + 1) % n];
        cut[i] = cfg.tension * 0.5 * verts[i].dist(prev).min(verts[i].dist(next));
    }
    if cfg.smoothing > 0.0 {
        let raw = cut.clone();
        for i in 0..n {
            let around = (raw[(i + n - 1) % n] + raw[i] + raw[(i + 1) % n]) / 3.0;
            cut[i] += (around - cut[i]) * cfg.smoothing;
        }
    }

    let entry = |i: usize| {
        let d = direction(verts[(i + n - 1) % n], verts[i]);
        verts[i] - d * cut[i]
    };
    let exit = |i: usize| {
        let d = direction(verts[i], verts[(i + 1) % n]);
        verts[i] + d * cut[i]
    };

    let start = entry(0);
    let mut cur = start;
    let mut segments = Vec::with_capacity(2 * n);
    for i in 0..n {
        if cut[i] < CURVE_EPS {
            push_line(&mut segments, &mut cur, verts[i]);
        } else {
            let (a, b) = (entry(i), exit(i));
            push_line(&mut segments, &mut cur, a);
            segments.push(PathSegment::Cubic {
                ctrl1: a.lerp(verts[i], KAPPA),
                ctrl2: b.lerp(verts[i], KAPPA),
                to: b,
            });
            cur = b;
        }
        let next_entry = entry((i + 1) % n);
        push_line(&mut segments, &mut cur, next_entry);
    }

    CurvePath { start, segments, closed: true }
}

fn push_line(segments: &mut Vec<PathSegment>, cur: &mut Point<f32>, to: Point<f32>) {
    if cur.dist(to) > CURVE_EPS {
        segments.push(PathSegment::Line { to });
        *cur = to;
    }
}

fn direction(from: Point<f32>, to: Point<f32>) -> Point<f32> {
    let d = to - from;
    let len = d.length();
    if len < CURVE_EPS {
        Point::new(0.0, 0.0)
    } else {
        d * (1.0 / len)
    }
}

// Drops vertices whose perpendicular deviation from the neighbor chord falls
// under the configured epsilon. Corners of rectangles two cells or longer
// deviate past the maximum epsilon, so their outlines keep all four corners;
// anything that would collapse below a closed loop falls back unreduced.
fn reduce_points(poly: &Polygon, cfg: &CurveConfig) -> Vec<Point<f32>> {
    let verts: Vec<Point<f32>> = poly.verts().iter().map(|v| v.to_f32()).collect();
    let eps = cfg.point_reduction * cfg.optimization.reduction_scale();
    if eps <= 0.0 {
        return verts;
    }

    let n = verts.len();
    let mut kept = Vec::with_capacity(n);
    kept.push(verts[0]);
    for i in 1..n {
        let prev = *kept.last().expect("seeded with the first vertex");
        let next = verts[(i + 1) % n];
        if chord_deviation(prev, verts[i], next) >= eps {
            kept.push(verts[i]);
        }
    }
    if kept.len() < 3 {
        return verts;
    }
    kept
}

fn chord_deviation(a: Point<f32>, v: Point<f32>, b: Point<f32>) -> f32 {
    let chord = b - a;
    let len = chord.length();
    if len < CURVE_EPS {
        return v.dist(a);
    }
    let off = v - a;
    (chord.x * off.y - chord.y * off.x).abs() / len
}
