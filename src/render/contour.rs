use std::collections::HashMap;

use crate::common::Connectivity;
use crate::render::cluster::CellMask;
use crate::render::geometry::{Point, Polygon};

// Contour extraction
//------------------------------------------------------------------------------

// Directed boundary edge between lattice corners. Walking keeps the active
// region on the right, so outer loops come out clockwise (screen coords) and
// holes counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    from: Point<i32>,
    to: Point<i32>,
}

impl Edge {
    fn dir(&self) -> (i32, i32) {
        (self.to.x - self.from.x, self.to.y - self.from.y)
    }
}

/// Walks the active/inactive transitions of a cell mask into closed polygon
/// loops: one outer boundary per component plus any interior holes.
///
/// Saddle corners (two diagonally-active cells meeting at a vertex) resolve
/// by connectivity: four-way turns right and separates the loops, eight-way
/// turns left and joins them. An empty mask yields no polygons.
pub fn trace(mask: &CellMask, conn: Connectivity) -> Vec<Polygon> {
    let edges = boundary_edges(mask);
    if edges.is_empty() {
        return Vec::new();
    }

    let mut by_start: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
    for (i, e) in edges.iter().enumerate() {
        by_start.entry((e.from.x, e.from.y)).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut polys = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        let mut verts = Vec::new();
        let mut cur = start;
        loop {
            used[cur] = true;
            verts.push(edges[cur].from);
            let next = successor(&edges, &by_start, cur, conn);
            if next == start {
                break;
            }
            debug_assert!(!used[next], "Boundary walk revisited an edge before closing");
            cur = next;
        }
        polys.push(Polygon::new(merge_collinear(verts)));
    }
    polys
}

// One directed edge per cell side facing an inactive cell (or the outside),
// emitted in row-major cell order for deterministic loop seeds.
fn boundary_edges(mask: &CellMask) -> Vec<Edge> {
    let (or, oc) = mask.origin;
    let mut edges = Vec::new();
    for r in 0..mask.h {
        for c in 0..mask.w {
            if !mask.get(r, c) {
                continue;
            }
            let (ri, ci) = (r as i32, c as i32);
            let x = (oc + c) as i32;
            let y = (or + r) as i32;
            if !mask.get_signed(ri - 1, ci) {
                edges.push(Edge { from: Point::new(x, y), to: Point::new(x + 1, y) });
            }
            if !mask.get_signed(ri, ci + 1) {
                edges.push(Edge { from: Point::new(x + 1, y), to: Point::new(x + 1, y + 1) });
            }
            if !mask.get_signed(ri + 1, ci) {
                edges.push(Edge { from: Point::new(x + 1, y + 1), to: Point::new(x, y + 1) });
            }
            if !mask.get_signed(ri, ci - 1) {
                edges.push(Edge { from: Point::new(x, y + 1), to: Point::new(x, y) });
            }
        }
    }
    edges
}

fn successor(
    edges: &[Edge],
    by_start: &HashMap<(i32, i32), Vec<usize>>,
    cur: usize,
    conn: Connectivity,
) -> usize {
    let end = edges[cur].to;
    let candidates = &by_start[&(end.x, end.y)];
    if candidates.len() == 1 {
        return candidates[0];
    }

    // Saddle: two outgoing edges, one a right turn and one a left turn.
    debug_assert_eq!(candidates.len(), 2, "At most two boundary edges leave a vertex");
    let (dx, dy) = edges[cur].dir();
    let wanted = match conn {
        Connectivity::Four => (-dy, dx),
        Connectivity::Eight => (dy, -dx),
    };
    *candidates
        .iter()
        .find(|&&i| edges[i].dir() == wanted)
        .expect("Saddle vertex is missing its turn edge")
}

fn merge_collinear(verts: Vec<Point<i32>>) -> Vec<Point<i32>> {
    let n = verts.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let a = verts[(i + n - 1) % n];
        let b = verts[i];
        let c = verts[(i + 1) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross != 0 {
            out.push(b);
        }
    }
    out
}
