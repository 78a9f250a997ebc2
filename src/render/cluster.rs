use crate::common::{Connectivity, ModuleType};
use crate::grid::Grid;
use crate::render::Classify;

// Thresholds
//------------------------------------------------------------------------------

/// Acceptance screen applied to every connected component. Components that
/// fail any check fall back to per-cell rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeThresholds {
    pub min_cluster_size: usize,
    /// Minimum active-cell share of the bounding box.
    pub density_threshold: f32,
    /// Maximum allowed `aspect_ratio - 1.0`. `INFINITY` disables the check.
    pub aspect_ratio_tolerance: f32,
}

impl Default for MergeThresholds {
    fn default() -> Self {
        Self { min_cluster_size: 3, density_threshold: 0.0, aspect_ratio_tolerance: f32::INFINITY }
    }
}

// Cluster
//------------------------------------------------------------------------------

/// Maximal connected component of same-type active cells. Never mutated
/// after the clustering pass that builds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    module_type: ModuleType,
    cells: Vec<(usize, usize)>,
    bbox: BBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BBox {
    r0: usize,
    c0: usize,
    r1: usize,
    c1: usize,
}

impl Cluster {
    fn new(module_type: ModuleType, mut cells: Vec<(usize, usize)>) -> Self {
        debug_assert!(!cells.is_empty(), "Cluster can't be empty");
        cells.sort_unstable();
        let mut bbox = BBox { r0: usize::MAX, c0: usize::MAX, r1: 0, c1: 0 };
        for &(r, c) in &cells {
            bbox.r0 = bbox.r0.min(r);
            bbox.c0 = bbox.c0.min(c);
            bbox.r1 = bbox.r1.max(r);
            bbox.c1 = bbox.c1.max(c);
        }
        Self { module_type, cells, bbox }
    }

    pub fn module_type(&self) -> ModuleType {
        self.module_type
    }

    /// Member cells in row-major order.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// `(top row, left col, bottom row, right col)`, inclusive.
    pub fn bbox(&self) -> (usize, usize, usize, usize) {
        (self.bbox.r0, self.bbox.c0, self.bbox.r1, self.bbox.c1)
    }

    fn bbox_dims(&self) -> (usize, usize) {
        (self.bbox.r1 - self.bbox.r0 + 1, self.bbox.c1 - self.bbox.c0 + 1)
    }

    pub fn density(&self) -> f32 {
        let (h, w) = self.bbox_dims();
        self.cells.len() as f32 / (h * w) as f32
    }

    /// Long side over short side; always >= 1.
    pub fn aspect_ratio(&self) -> f32 {
        let (h, w) = self.bbox_dims();
        h.max(w) as f32 / h.min(w) as f32
    }

    fn accepts(&self, th: &MergeThresholds) -> bool {
        self.size() >= th.min_cluster_size
            && self.density() >= th.density_threshold
            && self.aspect_ratio() - 1.0 <= th.aspect_ratio_tolerance
    }

    /// Tight boolean mask over the bounding box, for contour extraction.
    pub fn mask(&self) -> CellMask {
        let (h, w) = self.bbox_dims();
        let mut mask = CellMask {
            origin: (self.bbox.r0, self.bbox.c0),
            w,
            h,
            bits: vec![false; w * h],
        };
        for &(r, c) in &self.cells {
            mask.set(r - self.bbox.r0, c - self.bbox.c0, true);
        }
        mask
    }
}

// Cell mask
//------------------------------------------------------------------------------

/// Local boolean mask with its offset into the full grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMask {
    pub origin: (usize, usize),
    pub w: usize,
    pub h: usize,
    bits: Vec<bool>,
}

impl CellMask {
    pub fn empty() -> Self {
        Self { origin: (0, 0), w: 0, h: 0, bits: Vec::new() }
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        self.bits[r * self.w + c]
    }

    fn set(&mut self, r: usize, c: usize, active: bool) {
        self.bits[r * self.w + c] = active;
    }

    pub fn active_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    // Off-mask lookups are inactive, which keeps boundary walks branch-free.
    pub(crate) fn get_signed(&self, r: i32, c: i32) -> bool {
        0 <= r && (r as usize) < self.h && 0 <= c && (c as usize) < self.w && self.get(r as usize, c as usize)
    }
}

// Clustering pass
//------------------------------------------------------------------------------

/// Partitions the active cells of one module type into maximal connected
/// components and screens them. Returns accepted clusters plus the cells of
/// rejected ones, both in deterministic row-major order.
pub fn cluster<C: Classify + ?Sized>(
    grid: &Grid,
    classifier: &C,
    module_type: ModuleType,
    conn: Connectivity,
    thresholds: &MergeThresholds,
) -> (Vec<Cluster>, Vec<(usize, usize)>) {
    let w = grid.width();
    let matches = |r: usize, c: usize| grid.get(r, c) && classifier.module_type(r, c) == module_type;

    let mut visited = vec![false; w * w];
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for r in 0..w {
        for c in 0..w {
            if visited[r * w + c] || !matches(r, c) {
                continue;
            }

            // Flood fill from the seed over mode-defined adjacency.
            let mut cells = Vec::new();
            let mut stack = vec![(r, c)];
            visited[r * w + c] = true;
            while let Some((cr, cc)) = stack.pop() {
                cells.push((cr, cc));
                for &(dr, dc) in conn.offsets() {
                    let (nr, nc) = (cr as i32 + dr, cc as i32 + dc);
                    if nr < 0 || nc < 0 || nr >= w as i32 || nc >= w as i32 {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    if !visited[nr * w + nc] && matches(nr, nc) {
                        visited[nr * w + nc] = true;
                        stack.push((nr, nc));
                    }
                }
            }

            let cl = Cluster::new(module_type, cells);
            if cl.accepts(thresholds) {
                accepted.push(cl);
            } else {
                rejected.extend_from_slice(cl.cells());
            }
        }
    }

    rejected.sort_unstable();
    (accepted, rejected)
}

#[cfg(test)]
mod cluster_tests {
    use super::*;
    use crate::common::{Connectivity, ModuleType, Version};
    use crate::grid::Grid;

    fn data_only(_: usize, _: usize) -> ModuleType {
        ModuleType::Data
    }

    fn grid_with(cells: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(Version::Micro(1));
        for &(r, c) in cells {
            grid.set(r, c, true);
        }
        grid
    }

    #[test]
    fn test_min_size_rejection() {
        let grid = grid_with(&[(2, 2), (2, 3)]);
        let th = MergeThresholds { min_cluster_size: 3, ..MergeThresholds::default() };
        let (accepted, rejected) =
            cluster(&grid, &data_only, ModuleType::Data, Connectivity::Four, &th);
        assert!(accepted.is_empty());
        assert_eq!(rejected, vec![(2, 2), (2, 3)]);
    }

    #[test]
    fn test_acceptance_and_metrics() {
        // 2x3 solid block.
        let grid = grid_with(&[(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)]);
        let (accepted, rejected) = cluster(
            &grid,
            &data_only,
            ModuleType::Data,
            Connectivity::Four,
            &MergeThresholds::default(),
        );
        assert!(rejected.is_empty());
        assert_eq!(accepted.len(), 1);
        let cl = &accepted[0];
        assert_eq!(cl.size(), 6);
        assert_eq!(cl.bbox(), (1, 1, 2, 3));
        assert_eq!(cl.density(), 1.0);
        assert_eq!(cl.aspect_ratio(), 1.5);
    }

    #[test]
    fn test_density_rejection() {
        // Diagonal staircase under eight-way: connected but sparse.
        let cells = [(0, 0), (1, 1), (2, 2), (3, 3)];
        let grid = grid_with(&cells);
        let th = MergeThresholds {
            min_cluster_size: 2,
            density_threshold: 0.5,
            ..MergeThresholds::default()
        };
        let (accepted, rejected) =
            cluster(&grid, &data_only, ModuleType::Data, Connectivity::Eight, &th);
        assert!(accepted.is_empty());
        assert_eq!(rejected.len(), 4);
    }

    #[test]
    fn test_aspect_rejection() {
        // 1x5 bar with a tight squareness requirement.
        let grid = grid_with(&[(4, 0), (4, 1), (4, 2), (4, 3), (4, 4)]);
        let th = MergeThresholds {
            min_cluster_size: 2,
            aspect_ratio_tolerance: 0.5,
            ..MergeThresholds::default()
        };
        let (accepted, rejected) =
            cluster(&grid, &data_only, ModuleType::Data, Connectivity::Four, &th);
        assert!(accepted.is_empty());
        assert_eq!(rejected.len(), 5);
    }

    #[test]
    fn test_connectivity_splits_diagonals() {
        let grid = grid_with(&[(0, 0), (1, 1)]);
        let th = MergeThresholds { min_cluster_size: 1, ..MergeThresholds::default() };

        let (four, _) = cluster(&grid, &data_only, ModuleType::Data, Connectivity::Four, &th);
        assert_eq!(four.len(), 2);

        let (eight, _) = cluster(&grid, &data_only, ModuleType::Data, Connectivity::Eight, &th);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].cells(), &[(0, 0), (1, 1)]);
    }

    #[test]
    fn test_partition_invariant() {
        // Accepted clusters plus rejected singles exactly cover the active set.
        let cells = [(0, 0), (0, 1), (1, 0), (1, 1), (5, 5), (8, 2), (8, 3)];
        let grid = grid_with(&cells);
        let th = MergeThresholds { min_cluster_size: 3, ..MergeThresholds::default() };
        let (accepted, rejected) =
            cluster(&grid, &data_only, ModuleType::Data, Connectivity::Four, &th);

        let mut all: Vec<_> = accepted.iter().flat_map(|cl| cl.cells().to_vec()).collect();
        all.extend_from_slice(&rejected);
        all.sort_unstable();
        let mut expected = cells.to_vec();
        expected.sort_unstable();
        assert_eq!(all, expected);

        // Pairwise disjoint by construction: no duplicates after sorting.
        all.dedup();
        assert_eq!(all.len(), cells.len());
    }

    #[test]
    fn test_type_filter() {
        let grid = grid_with(&[(0, 0), (0, 1)]);
        let split =
            |_: usize, c: usize| if c == 0 { ModuleType::Finder } else { ModuleType::Data };
        let th = MergeThresholds { min_cluster_size: 1, ..MergeThresholds::default() };
        let (accepted, _) = cluster(&grid, &split, ModuleType::Finder, Connectivity::Four, &th);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].cells(), &[(0, 0)]);
    }

    #[test]
    fn test_mask_roundtrip() {
        let grid = grid_with(&[(2, 3), (2, 4), (3, 3)]);
        let th = MergeThresholds::default();
        let (accepted, _) =
            cluster(&grid, &data_only, ModuleType::Data, Connectivity::Four, &th);
        let mask = accepted[0].mask();
        assert_eq!(mask.origin, (2, 3));
        assert_eq!((mask.h, mask.w), (2, 2));
        assert!(mask.get(0, 0) && mask.get(0, 1) && mask.get(1, 0));
        assert!(!mask.get(1, 1));
        assert_eq!(mask.active_count(), 3);
    }
}
