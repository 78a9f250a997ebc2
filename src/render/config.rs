use crate::common::{Connectivity, ModuleType, OptimizationLevel, RenderWarning, Style};
use crate::render::cluster::MergeThresholds;
use crate::render::curve::CurveConfig;

// Phase configuration
//------------------------------------------------------------------------------

/// Per-module-type rendering knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseConfig {
    pub style: Style,
    /// Cell shrink factor in (0, 1]; per-cell shapes only.
    pub size_ratio: f32,
    /// Scales the corner radii of the neighbor-aware styles.
    pub roundness: f32,
    pub stroke_width: f32,
    /// Enables merged rendering for this phase.
    pub merge: Option<MergeConfig>,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self { style: Style::Square, size_ratio: 1.0, roundness: 1.0, stroke_width: 0.0, merge: None }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeConfig {
    pub thresholds: MergeThresholds,
    pub curve: CurveConfig,
}

// Render configuration
//------------------------------------------------------------------------------

/// Full configuration bundle for one render pass. String-based setters
/// resolve aliases case-insensitively and fall back to documented defaults,
/// recording a warning instead of failing; numeric setters clamp to range.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub connectivity: Connectivity,
    phases: [PhaseConfig; 6],
    warnings: Vec<RenderWarning>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Four,
            phases: Default::default(),
            warnings: Vec::new(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, mt: ModuleType) -> &PhaseConfig {
        &self.phases[mt.index()]
    }

    pub fn phase_mut(&mut self, mt: ModuleType) -> &mut PhaseConfig {
        &mut self.phases[mt.index()]
    }

    /// Fallback warnings accumulated while building this configuration.
    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    pub fn connectivity(&mut self, conn: Connectivity) -> &mut Self {
        self.connectivity = conn;
        self
    }

    pub fn connectivity_named(&mut self, name: &str) -> &mut Self {
        match Connectivity::resolve(name) {
            Some(conn) => self.connectivity = conn,
            None => {
                self.connectivity = Connectivity::Four;
                self.warnings.push(RenderWarning::UnknownConnectivity { requested: name.into() });
            }
        }
        self
    }

    pub fn style(&mut self, mt: ModuleType, style: Style) -> &mut Self {
        self.phase_mut(mt).style = style;
        self
    }

    pub fn style_named(&mut self, mt: ModuleType, name: &str) -> &mut Self {
        match Style::resolve(name) {
            Some(style) => self.phase_mut(mt).style = style,
            None => {
                self.phase_mut(mt).style = Style::Square;
                self.warnings.push(RenderWarning::UnknownStyle { requested: name.into() });
            }
        }
        self
    }

    /// Applies one style to every phase.
    pub fn style_all(&mut self, style: Style) -> &mut Self {
        for mt in ModuleType::ALL {
            self.phase_mut(mt).style = style;
        }
        self
    }

    pub fn size_ratio(&mut self, mt: ModuleType, ratio: f32) -> &mut Self {
        let clamped = self.clamp01("size_ratio", ratio);
        self.phase_mut(mt).size_ratio = clamped;
        self
    }

    pub fn roundness(&mut self, mt: ModuleType, roundness: f32) -> &mut Self {
        let clamped = self.clamp01("roundness", roundness);
        self.phase_mut(mt).roundness = clamped;
        self
    }

    pub fn stroke_width(&mut self, mt: ModuleType, width: f32) -> &mut Self {
        self.phase_mut(mt).stroke_width = width.max(0.0);
        self
    }

    pub fn merge(&mut self, mt: ModuleType, merge: MergeConfig) -> &mut Self {
        self.phase_mut(mt).merge = Some(merge);
        self
    }

    /// Sets (and clamps) curve parameters, enabling merging for the phase if
    /// it wasn't already.
    pub fn curve_params(
        &mut self,
        mt: ModuleType,
        tension: f32,
        smoothing: f32,
        point_reduction: f32,
    ) -> &mut Self {
        let curve = CurveConfig {
            tension: self.clamp01("tension", tension),
            smoothing: self.clamp01("smoothing", smoothing),
            point_reduction: self.clamp01("point_reduction", point_reduction),
            ..self.phase(mt).merge.as_ref().map_or_else(CurveConfig::default, |m| m.curve)
        };
        self.phase_mut(mt).merge.get_or_insert_with(MergeConfig::default).curve = curve;
        self
    }

    pub fn optimization_named(&mut self, mt: ModuleType, name: &str) -> &mut Self {
        let level = match OptimizationLevel::resolve(name) {
            Some(level) => level,
            None => {
                self.warnings.push(RenderWarning::UnknownOptimization { requested: name.into() });
                OptimizationLevel::Medium
            }
        };
        self.phase_mut(mt).merge.get_or_insert_with(MergeConfig::default).curve.optimization =
            level;
        self
    }

    fn clamp01(&mut self, name: &'static str, v: f32) -> f32 {
        if (0.0..=1.0).contains(&v) {
            v
        } else {
            self.warnings.push(RenderWarning::ParameterClamped { name, requested: v });
            v.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::common::{Connectivity, ModuleType, RenderWarning, Style};

    #[test]
    fn test_style_fallback_warns() {
        let mut cfg = RenderConfig::new();
        cfg.style_named(ModuleType::Data, "blobby");
        assert_eq!(cfg.phase(ModuleType::Data).style, Style::Square);
        assert_eq!(
            cfg.warnings(),
            &[RenderWarning::UnknownStyle { requested: "blobby".into() }]
        );
    }

    #[test]
    fn test_style_alias_accepted_silently() {
        let mut cfg = RenderConfig::new();
        cfg.style_named(ModuleType::Finder, "Extra-Rounded");
        assert_eq!(cfg.phase(ModuleType::Finder).style, Style::ExtraRounded);
        assert!(cfg.warnings().is_empty());
    }

    #[test]
    fn test_connectivity_fallback() {
        let mut cfg = RenderConfig::new();
        cfg.connectivity_named("moore").connectivity_named("hex");
        // Unknown name falls back to four-way after the valid eight-way.
        assert_eq!(cfg.connectivity, Connectivity::Four);
        assert_eq!(cfg.warnings().len(), 1);
    }

    #[test]
    fn test_curve_params_clamped() {
        let mut cfg = RenderConfig::new();
        cfg.curve_params(ModuleType::Data, 1.5, -0.2, 0.4);
        let merge = cfg.phase(ModuleType::Data).merge.as_ref().unwrap();
        assert_eq!(merge.curve.tension, 1.0);
        assert_eq!(merge.curve.smoothing, 0.0);
        assert_eq!(merge.curve.point_reduction, 0.4);
        assert_eq!(cfg.warnings().len(), 2);
    }

    #[test]
    fn test_chained_setters() {
        let mut cfg = RenderConfig::new();
        cfg.style(ModuleType::Data, Style::Rounded)
            .size_ratio(ModuleType::Data, 0.9)
            .connectivity(Connectivity::Eight);
        assert_eq!(cfg.phase(ModuleType::Data).style, Style::Rounded);
        assert_eq!(cfg.phase(ModuleType::Data).size_ratio, 0.9);
        assert_eq!(cfg.connectivity, Connectivity::Eight);
        assert_eq!(cfg.phase(ModuleType::Finder).style, Style::Square);
    }
}
