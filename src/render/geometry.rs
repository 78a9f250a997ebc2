use std::ops::{Add, Mul, Sub};

use num_traits::{NumCast, ToPrimitive};

use crate::common::ModuleType;

// Point
//------------------------------------------------------------------------------

/// Grid-space point. Integer-typed while walking cell boundaries, `f32` once
/// geometry leaves the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: ToPrimitive + Copy> Point<T> {
    pub fn to_f32(self) -> Point<f32> {
        Point::new(
            NumCast::from(self.x).expect("Lattice coordinate fits in f32"),
            NumCast::from(self.y).expect("Lattice coordinate fits in f32"),
        )
    }
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Point<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point<f32> {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Point<f32> {
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dist(self, other: Self) -> f32 {
        (other - self).length()
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

// Polygon
//------------------------------------------------------------------------------

/// Closed loop of lattice vertices. Outer boundaries wind clockwise in screen
/// coordinates (y down), holes counter-clockwise; the signed area tells the
/// two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    verts: Vec<Point<i32>>,
}

impl Polygon {
    pub fn new(verts: Vec<Point<i32>>) -> Self {
        Self { verts }
    }

    pub fn verts(&self) -> &[Point<i32>] {
        &self.verts
    }

    pub fn len(&self) -> usize {
        self.verts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Twice the shoelace area; positive for clockwise loops (screen coords).
    pub fn signed_area_doubled(&self) -> i64 {
        let n = self.verts.len();
        let mut sum = 0i64;
        for i in 0..n {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % n];
            sum += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
        }
        sum
    }

    pub fn is_hole(&self) -> bool {
        self.signed_area_doubled() < 0
    }
}

// Curve path
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Line { to: Point<f32> },
    /// Quadratic Bezier.
    Quad { ctrl: Point<f32>, to: Point<f32> },
    /// Cubic Bezier.
    Cubic { ctrl1: Point<f32>, ctrl2: Point<f32>, to: Point<f32> },
    /// Circular arc swept clockwise (screen coords) from the current point.
    Arc { radius: f32, to: Point<f32> },
}

impl PathSegment {
    pub fn end(&self) -> Point<f32> {
        match *self {
            Self::Line { to }
            | Self::Quad { to, .. }
            | Self::Cubic { to, .. }
            | Self::Arc { to, .. } => to,
        }
    }
}

/// Smoothed (or plain) outline, one per polygon loop.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePath {
    pub start: Point<f32>,
    pub segments: Vec<PathSegment>,
    pub closed: bool,
}

impl CurvePath {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// Shape primitives
//------------------------------------------------------------------------------

/// Terminal geometry unit handed to the downstream serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Circle { cx: f32, cy: f32, r: f32 },
    /// Outline plus any holes; the first subpath is the outer loop.
    Path { subpaths: Vec<CurvePath> },
}

/// A shape primitive paired with the styling knobs the serializer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledPrimitive {
    pub shape: Shape,
    pub module_type: ModuleType,
    /// True when the geometry covers a merged cluster rather than one cell.
    pub merged: bool,
    pub size_ratio: f32,
    pub roundness: f32,
    pub stroke_width: f32,
}
