use crate::common::{ModuleType, Version};
use crate::grid::Grid;
use crate::render::Classify;

// Function pattern grid
//------------------------------------------------------------------------------

/// Stand-in for the upstream encoder: lays out the function patterns of a QR
/// symbol (finder, timing, alignment, format and version regions) and
/// classifies every cell, so the render pipeline can be driven without a
/// payload encoder. Data modules start inactive and can be filled with a
/// deterministic pseudo-random pattern.
#[derive(Debug, Clone)]
pub struct FunctionGrid {
    ver: Version,
    grid: Grid,
    types: Vec<ModuleType>,
}

impl FunctionGrid {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        let mut fg = Self { ver, grid: Grid::new(ver), types: vec![ModuleType::Data; w * w] };
        fg.draw_finder_patterns();
        fg.draw_timing_pattern();
        fg.draw_alignment_patterns();
        fg.draw_format_area();
        fg.draw_version_area();
        fg
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn module_type(&self, r: usize, c: usize) -> ModuleType {
        self.types[r * self.grid.width() + c]
    }

    /// Borrowing closure form for callers that want a plain classifier fn.
    pub fn classifier(&self) -> impl Fn(usize, usize) -> ModuleType + '_ {
        move |r, c| self.module_type(r, c)
    }

    /// Fills the data region with a deterministic xorshift bit pattern.
    pub fn fill_data(&mut self, seed: u64) {
        let w = self.grid.width();
        let mut state = seed | 1;
        for r in 0..w {
            for c in 0..w {
                if self.types[r * w + c] == ModuleType::Data {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    self.grid.set(r, c, state & 1 == 1);
                }
            }
        }
    }

    // Negative indices wrap from the far edge, so the same coordinate tables
    // serve every version.
    fn set(&mut self, r: i16, c: i16, active: bool, mt: ModuleType) {
        let w = self.grid.width() as i16;
        debug_assert!(-w <= r && r < w, "row out of range");
        debug_assert!(-w <= c && c < w, "column out of range");

        let r = if r < 0 { r + w } else { r } as usize;
        let c = if c < 0 { c + w } else { c } as usize;
        self.grid.set(r, c, active);
        self.types[r * self.grid.width() + c] = mt;
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.grid.width();
        let mut res = String::with_capacity(w * (w + 1) + 1);
        res.push('\n');
        for r in 0..w {
            for c in 0..w {
                let active = self.grid.get(r, c);
                let ch = match (self.module_type(r, c), active) {
                    (ModuleType::Finder, true) => 'f',
                    (ModuleType::Finder, false) => 'F',
                    (ModuleType::Timing, true) => 't',
                    (ModuleType::Timing, false) => 'T',
                    (ModuleType::Alignment, true) => 'a',
                    (ModuleType::Alignment, false) => 'A',
                    (ModuleType::Format, true) => 'm',
                    (ModuleType::Format, false) => 'M',
                    (ModuleType::Version, true) => 'v',
                    (ModuleType::Version, false) => 'V',
                    (ModuleType::Data, true) => 'd',
                    (ModuleType::Data, false) => '.',
                };
                res.push(ch);
            }
            res.push('\n');
        }
        res
    }
}

impl Classify for FunctionGrid {
    fn module_type(&self, r: usize, c: usize) -> ModuleType {
        FunctionGrid::module_type(self, r, c)
    }
}

// Finder patterns
//------------------------------------------------------------------------------

impl FunctionGrid {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        match self.ver {
            Version::Micro(_) => {}
            Version::Normal(_) => {
                self.draw_finder_pattern_at(3, -4);
                self.draw_finder_pattern_at(-4, 3);
            }
        }
    }

    // 7x7 ring plus the light separator strip facing the symbol interior.
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                let active = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => false,
                    (3 | -3, _) | (_, 3 | -3) => true,
                    (2 | -2, _) | (_, 2 | -2) => false,
                    _ => true,
                };
                self.set(r + i, c + j, active, ModuleType::Finder);
            }
        }
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl FunctionGrid {
    fn draw_timing_pattern(&mut self) {
        let w = self.grid.width() as i16;
        let (off, last) = match self.ver {
            Version::Micro(_) => (0, w - 1),
            Version::Normal(_) => (6, w - 9),
        };
        self.draw_line(off, 8, off, last);
        self.draw_line(8, off, last, off);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, j & 1 == 0, ModuleType::Timing);
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, i & 1 == 0, ModuleType::Timing);
            }
        }
    }
}

// Alignment patterns
//------------------------------------------------------------------------------

impl FunctionGrid {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c);
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.grid.width() as i16;
        // Skip centers that collide with the finder corners.
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                let active = matches!((i, j), (-2 | 2, _) | (_, -2 | 2) | (0, 0));
                self.set(r + i, c + j, active, ModuleType::Alignment);
            }
        }
    }
}

// Format and version areas
//------------------------------------------------------------------------------

impl FunctionGrid {
    // Reserved, left inactive; the dark module next to the bottom-left finder
    // is the one fixed lit cell.
    fn draw_format_area(&mut self) {
        match self.ver {
            Version::Micro(_) => {
                for &(r, c) in &FORMAT_INFO_COORDS_MICRO {
                    self.set(r, c, false, ModuleType::Format);
                }
            }
            Version::Normal(_) => {
                for &(r, c) in FORMAT_INFO_COORDS_MAIN.iter().chain(&FORMAT_INFO_COORDS_SIDE) {
                    self.set(r, c, false, ModuleType::Format);
                }
                self.set(-8, 8, true, ModuleType::Format);
            }
        }
    }

    fn draw_version_area(&mut self) {
        match self.ver {
            Version::Micro(_) | Version::Normal(1..=6) => {}
            Version::Normal(_) => {
                for &(r, c) in VERSION_INFO_COORDS_BL.iter().chain(&VERSION_INFO_COORDS_TR) {
                    self.set(r, c, false, ModuleType::Version);
                }
            }
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (-8, 8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];

static FORMAT_INFO_COORDS_MICRO: [(i16, i16); 15] = [
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (6, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 6),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
];

static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];
