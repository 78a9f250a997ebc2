use crate::common::{Connectivity, RenderError, RenderResult, Version};

// Grid
//------------------------------------------------------------------------------

/// Square boolean matrix of active/inactive modules.
///
/// Construction validates the QR size envelope; coordinate access past the
/// edge is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    w: usize,
    bits: Vec<bool>,
}

impl Grid {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        Self { w, bits: vec![false; w * w] }
    }

    /// Builds a grid from a row-major buffer of module states.
    pub fn from_bits(width: usize, bits: Vec<bool>) -> RenderResult<Self> {
        if bits.is_empty() {
            return Err(RenderError::EmptyGrid);
        }
        if Version::from_width(width).is_none() {
            return Err(RenderError::InvalidGridSize(width));
        }
        if bits.len() != width * width {
            return Err(RenderError::NonSquareGrid { len: bits.len(), width });
        }
        Ok(Self { w: width, bits })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn version(&self) -> Version {
        Version::from_width(self.w).expect("Grid width is validated at construction")
    }

    fn coord_to_index(&self, r: usize, c: usize) -> usize {
        assert!(r < self.w && c < self.w, "Module index ({r}, {c}) out of bounds for width {}", self.w);
        r * self.w + c
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        self.bits[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: usize, c: usize, active: bool) {
        let index = self.coord_to_index(r, c);
        self.bits[index] = active;
    }

    pub fn active_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.w;
        self.bits.iter().enumerate().filter(|(_, &b)| b).map(move |(i, _)| (i / w, i % w))
    }

    // Off-grid neighbors count as inactive.
    fn active_at(&self, r: i32, c: i32) -> bool {
        let w = self.w as i32;
        0 <= r && r < w && 0 <= c && c < w && self.bits[(r * w + c) as usize]
    }

    /// Reports which adjacent cells share the active state of `(r, c)`.
    /// Diagonal flags are filled only under eight-way connectivity.
    pub fn neighbors(&self, r: usize, c: usize, conn: Connectivity) -> NeighborMask {
        let state = self.get(r, c);
        let (r, c) = (r as i32, c as i32);
        let at = |dr: i32, dc: i32| self.active_at(r + dr, c + dc) == state;

        let mut mask = NeighborMask {
            top: at(-1, 0),
            right: at(0, 1),
            bottom: at(1, 0),
            left: at(0, -1),
            ..NeighborMask::default()
        };
        if conn == Connectivity::Eight {
            mask.top_left = at(-1, -1);
            mask.top_right = at(-1, 1);
            mask.bottom_left = at(1, -1);
            mask.bottom_right = at(1, 1);
        }
        mask
    }
}

// Neighbor mask
//------------------------------------------------------------------------------

/// Active-state flags for the cells adjacent to one module. Consumed
/// transiently by the shape decision engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NeighborMask {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl NeighborMask {
    pub fn orthogonal_count(&self) -> usize {
        self.top as usize + self.right as usize + self.bottom as usize + self.left as usize
    }

    pub fn is_isolated(&self) -> bool {
        self.orthogonal_count() == 0
    }

    /// Both horizontal or both vertical neighbors present.
    pub fn has_opposite_pair(&self) -> bool {
        (self.top && self.bottom) || (self.left && self.right)
    }
}
