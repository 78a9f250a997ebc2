use crate::common::{Connectivity, ModuleType, RenderWarning};
use crate::grid::Grid;

pub mod cluster;
pub mod config;
pub mod contour;
pub mod curve;
pub mod geometry;
pub mod shape;

pub use cluster::{Cluster, MergeThresholds};
pub use config::{MergeConfig, PhaseConfig, RenderConfig};
pub use curve::CurveConfig;
pub use geometry::{CurvePath, PathSegment, Point, Polygon, Shape, StyledPrimitive};
pub use shape::{CellFrame, CellShapeFn, StyleRegistry};

// Classifier
//------------------------------------------------------------------------------

/// Maps grid coordinates to the functional role of that module. Implemented
/// by [`crate::pattern::FunctionGrid`] and, blanket, by any matching closure.
pub trait Classify {
    fn module_type(&self, r: usize, c: usize) -> ModuleType;
}

impl<F: Fn(usize, usize) -> ModuleType> Classify for F {
    fn module_type(&self, r: usize, c: usize) -> ModuleType {
        self(r, c)
    }
}

// Pipeline
//------------------------------------------------------------------------------

/// Geometry produced by one render pass, plus any configuration fallbacks
/// that fired while the config was built.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub primitives: Vec<StyledPrimitive>,
    pub warnings: Vec<RenderWarning>,
}

/// Converts a module grid into vector shape primitives.
///
/// Runs one phase per module type, in [`ModuleType::ALL`] order. A phase with
/// merging enabled clusters its active cells, traces every accepted cluster's
/// outline into a curve path and falls back to per-cell shapes for rejected
/// cells; a plain phase renders each active cell through the style registry.
/// Output order is deterministic: phases in order, clusters before fallback
/// cells, everything row-major within its group.
pub fn render<C: Classify + ?Sized>(
    grid: &Grid,
    classifier: &C,
    config: &RenderConfig,
) -> RenderOutput {
    let registry = StyleRegistry::new();
    let conn = config.connectivity;
    let mut primitives = Vec::new();

    for mt in ModuleType::ALL {
        let phase = config.phase(mt);
        match &phase.merge {
            Some(merge) => {
                let (accepted, rejected) =
                    cluster::cluster(grid, classifier, mt, conn, &merge.thresholds);
                for cl in &accepted {
                    let subpaths: Vec<CurvePath> = contour::trace(&cl.mask(), conn)
                        .iter()
                        .map(|poly| curve::smooth(poly, &merge.curve))
                        .filter(|path| !path.is_empty())
                        .collect();
                    if subpaths.is_empty() {
                        continue;
                    }
                    primitives.push(StyledPrimitive {
                        shape: Shape::Path { subpaths },
                        module_type: mt,
                        merged: true,
                        size_ratio: 1.0,
                        roundness: phase.roundness,
                        stroke_width: phase.stroke_width,
                    });
                }
                for &(r, c) in &rejected {
                    primitives.push(cell_primitive(grid, r, c, mt, phase, &registry, conn));
                }
            }
            None => {
                for (r, c) in grid.active_cells() {
                    if classifier.module_type(r, c) == mt {
                        primitives.push(cell_primitive(grid, r, c, mt, phase, &registry, conn));
                    }
                }
            }
        }
    }

    RenderOutput { primitives, warnings: config.warnings().to_vec() }
}

fn cell_primitive(
    grid: &Grid,
    r: usize,
    c: usize,
    mt: ModuleType,
    phase: &PhaseConfig,
    registry: &StyleRegistry,
    conn: Connectivity,
) -> StyledPrimitive {
    let frame = CellFrame::at(r, c, phase.size_ratio);
    let mask = grid.neighbors(r, c, conn);
    StyledPrimitive {
        shape: registry.shape_fn(phase.style)(frame, mask, phase),
        module_type: mt,
        merged: false,
        size_ratio: phase.size_ratio,
        roundness: phase.roundness,
        stroke_width: phase.stroke_width,
    }
}
