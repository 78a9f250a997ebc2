// Version
//------------------------------------------------------------------------------

/// QR symbol version. Determines the side length of the module grid:
/// `9 + 2v` for micro symbols and `17 + 4v` for normal ones.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum Version {
    Micro(usize),
    Normal(usize),
}

impl Version {
    pub const fn width(self) -> usize {
        match self {
            Version::Micro(v) => 9 + 2 * v,
            Version::Normal(v) => 17 + 4 * v,
        }
    }

    /// Maps a grid side length back to its version. `None` for widths outside
    /// the size envelope.
    pub fn from_width(w: usize) -> Option<Self> {
        match w {
            11 | 13 | 15 | 17 => Some(Version::Micro((w - 9) / 2)),
            21..=177 if (w - 17) % 4 == 0 => Some(Version::Normal((w - 17) / 4)),
            _ => None,
        }
    }

    /// Row/column coordinates of alignment pattern centers.
    pub fn alignment_pattern(self) -> &'static [i16] {
        match self {
            Version::Micro(_) => &[],
            Version::Normal(v) => {
                debug_assert!((1..=40).contains(&v), "Invalid version");
                ALIGNMENT_PATTERN_POSITIONS[v - 1]
            }
        }
    }
}

static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Module type
//------------------------------------------------------------------------------

/// Functional classification of one grid cell.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum ModuleType {
    Finder,
    Timing,
    Alignment,
    Format,
    Version,
    Data,
}

impl ModuleType {
    /// Fixed rendering order of the pipeline phases.
    pub const ALL: [ModuleType; 6] = [
        ModuleType::Finder,
        ModuleType::Timing,
        ModuleType::Alignment,
        ModuleType::Format,
        ModuleType::Version,
        ModuleType::Data,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn resolve(name: &str) -> Option<Self> {
        lookup(MODULE_TYPE_ALIASES, name)
    }
}

// Connectivity
//------------------------------------------------------------------------------

/// Whether diagonal neighbors count as adjacent. Drives the neighbor mask,
/// cluster adjacency and contour saddle resolution alike.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Connectivity {
    Four,
    Eight,
}

impl Connectivity {
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &FOUR_WAY_OFFSETS,
            Connectivity::Eight => &EIGHT_WAY_OFFSETS,
        }
    }

    pub fn resolve(name: &str) -> Option<Self> {
        lookup(CONNECTIVITY_ALIASES, name)
    }
}

static FOUR_WAY_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

static EIGHT_WAY_OFFSETS: [(i32, i32); 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

// Style
//------------------------------------------------------------------------------

/// Per-cell rendering style. The closed set over which the shape registry is
/// built.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Style {
    Square,
    Dot,
    Rounded,
    ExtraRounded,
    Classy,
    ClassyRounded,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Square,
        Style::Dot,
        Style::Rounded,
        Style::ExtraRounded,
        Style::Classy,
        Style::ClassyRounded,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn resolve(name: &str) -> Option<Self> {
        lookup(STYLE_ALIASES, name)
    }
}

// Optimization level
//------------------------------------------------------------------------------

/// Fidelity/segment-count trade-off for curve fitting. Higher levels permit
/// more aggressive point reduction before corners are fitted.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum OptimizationLevel {
    Low,
    Medium,
    High,
}

impl OptimizationLevel {
    /// Maximum chord-deviation epsilon for point reduction. Only the high
    /// level reaches past the unit-staircase deviation of `1/sqrt(2)`.
    pub fn reduction_scale(self) -> f32 {
        match self {
            OptimizationLevel::Low => 0.3,
            OptimizationLevel::Medium => 0.55,
            OptimizationLevel::High => 0.8,
        }
    }

    pub fn resolve(name: &str) -> Option<Self> {
        lookup(OPTIMIZATION_ALIASES, name)
    }
}

// Alias tables
//------------------------------------------------------------------------------

// Canonical value => accepted aliases, resolved once at configuration time.
// Lookup is case-insensitive and ignores `-`, `_` and spaces.

static STYLE_ALIASES: &[(Style, &[&str])] = &[
    (Style::Square, &["square", "plain", "default"]),
    (Style::Dot, &["dot", "dots", "circle", "circles"]),
    (Style::Rounded, &["rounded", "round", "connected"]),
    (Style::ExtraRounded, &["extrarounded", "extraround", "fluid"]),
    (Style::Classy, &["classy", "jewel"]),
    (Style::ClassyRounded, &["classyrounded", "jewelrounded"]),
];

static CONNECTIVITY_ALIASES: &[(Connectivity, &[&str])] = &[
    (Connectivity::Four, &["4", "four", "fourway", "orthogonal", "vonneumann"]),
    (Connectivity::Eight, &["8", "eight", "eightway", "diagonal", "moore"]),
];

static MODULE_TYPE_ALIASES: &[(ModuleType, &[&str])] = &[
    (ModuleType::Finder, &["finder", "eye", "positiondetection"]),
    (ModuleType::Timing, &["timing", "clock"]),
    (ModuleType::Alignment, &["alignment", "align"]),
    (ModuleType::Format, &["format", "formatinfo"]),
    (ModuleType::Version, &["version", "versioninfo"]),
    (ModuleType::Data, &["data", "body", "payload"]),
];

static OPTIMIZATION_ALIASES: &[(OptimizationLevel, &[&str])] = &[
    (OptimizationLevel::Low, &["low", "min", "minimal"]),
    (OptimizationLevel::Medium, &["medium", "med", "mid", "balanced"]),
    (OptimizationLevel::High, &["high", "max", "aggressive"]),
];

fn lookup<T: Copy>(table: &[(T, &[&str])], name: &str) -> Option<T> {
    let key: String =
        name.chars().filter(|c| !matches!(c, '-' | '_' | ' ')).flat_map(char::to_lowercase).collect();
    table
        .iter()
        .find(|(_, aliases)| aliases.contains(&key.as_str()))
        .map(|&(canonical, _)| canonical)
}

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_version_width() {
        assert_eq!(Version::Micro(1).width(), 11);
        assert_eq!(Version::Micro(4).width(), 17);
        assert_eq!(Version::Normal(1).width(), 21);
        assert_eq!(Version::Normal(40).width(), 177);
    }

    #[test]
    fn test_version_from_width() {
        assert_eq!(Version::from_width(11), Some(Version::Micro(1)));
        assert_eq!(Version::from_width(21), Some(Version::Normal(1)));
        assert_eq!(Version::from_width(177), Some(Version::Normal(40)));
        assert_eq!(Version::from_width(20), None);
        assert_eq!(Version::from_width(181), None);
        assert_eq!(Version::from_width(0), None);
    }

    #[test]
    fn test_alignment_pattern() {
        assert!(Version::Normal(1).alignment_pattern().is_empty());
        assert_eq!(Version::Normal(7).alignment_pattern(), &[6, 22, 38]);
        assert!(Version::Micro(2).alignment_pattern().is_empty());
    }

    #[test_case("rounded", Some(Style::Rounded); "canonical")]
    #[test_case("Extra-Rounded", Some(Style::ExtraRounded); "mixed case and dash")]
    #[test_case("extra_rounded", Some(Style::ExtraRounded); "underscore")]
    #[test_case("CLASSY ROUNDED", Some(Style::ClassyRounded); "space separated")]
    #[test_case("jewel", Some(Style::Classy); "alias")]
    #[test_case("blobby", None; "unknown")]
    fn test_style_resolve(name: &str, expected: Option<Style>) {
        assert_eq!(Style::resolve(name), expected);
    }

    #[test_case("4", Some(Connectivity::Four))]
    #[test_case("von-neumann", Some(Connectivity::Four))]
    #[test_case("Moore", Some(Connectivity::Eight))]
    #[test_case("16", None)]
    fn test_connectivity_resolve(name: &str, expected: Option<Connectivity>) {
        assert_eq!(Connectivity::resolve(name), expected);
    }

    #[test]
    fn test_module_type_order_matches_index() {
        for (i, mt) in ModuleType::ALL.iter().enumerate() {
            assert_eq!(mt.index(), i);
        }
    }
}
