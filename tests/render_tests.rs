#[cfg(test)]
mod render_proptests {
    use proptest::prelude::*;

    use qrvec::*;

    pub fn version_strategy() -> BoxedStrategy<Version> {
        prop_oneof![(1usize..=4).prop_map(Version::Micro), (1usize..=10).prop_map(Version::Normal)]
            .boxed()
    }

    pub fn grid_strategy() -> impl Strategy<Value = (Version, u64)> {
        (version_strategy(), any::<u64>())
    }

    fn merge_everything(config: &mut RenderConfig) {
        // Accept every cluster and keep the outlines as plain polylines so
        // their areas stay exact.
        let merge = MergeConfig {
            thresholds: MergeThresholds { min_cluster_size: 1, ..MergeThresholds::default() },
            curve: CurveConfig { tension: 0.0, ..CurveConfig::default() },
        };
        for mt in ModuleType::ALL {
            config.merge(mt, merge.clone());
        }
    }

    // Twice the shoelace area of a polyline path; positive for outer loops.
    fn path_area_doubled(path: &CurvePath) -> f64 {
        let mut pts = vec![path.start];
        for seg in &path.segments {
            match seg {
                PathSegment::Line { to } => pts.push(*to),
                other => panic!("zero tension must yield polylines, got {other:?}"),
            }
        }
        let n = pts.len();
        let mut sum = 0.0f64;
        for i in 0..n {
            let (a, b) = (pts[i], pts[(i + 1) % n]);
            sum += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
        }
        sum
    }

    proptest! {
        #[test]
        fn proptest_per_cell_covers_active_modules((ver, seed) in grid_strategy()) {
            let mut fg = FunctionGrid::new(ver);
            fg.fill_data(seed);
            let out = render(fg.grid(), &fg, &RenderConfig::default());
            prop_assert_eq!(out.primitives.len(), fg.grid().active_count());
            prop_assert!(out.primitives.iter().all(|p| !p.merged));
        }

        #[test]
        fn proptest_merged_area_equals_active_cells((ver, seed) in grid_strategy()) {
            let mut fg = FunctionGrid::new(ver);
            fg.fill_data(seed);
            let mut config = RenderConfig::new();
            merge_everything(&mut config);

            let out = render(fg.grid(), &fg, &config);
            prop_assert!(out.primitives.iter().all(|p| p.merged));

            // Outer loops count positive, holes negative; the union of all
            // merged outlines tiles the active cells exactly once.
            let mut area2 = 0.0f64;
            for p in &out.primitives {
                let Shape::Path { subpaths } = &p.shape else {
                    panic!("merged primitive must be a path")
                };
                for path in subpaths {
                    area2 += path_area_doubled(path);
                }
            }
            let expected = 2.0 * fg.grid().active_count() as f64;
            prop_assert!((area2 - expected).abs() < 1e-3, "area {area2} != {expected}");
        }

        #[test]
        fn proptest_render_deterministic((ver, seed) in grid_strategy()) {
            let mut fg = FunctionGrid::new(ver);
            fg.fill_data(seed);
            let mut config = RenderConfig::new();
            config
                .style(ModuleType::Data, Style::ExtraRounded)
                .merge(ModuleType::Finder, MergeConfig::default())
                .connectivity(Connectivity::Eight);
            prop_assert_eq!(render(fg.grid(), &fg, &config), render(fg.grid(), &fg, &config));
        }
    }
}

#[cfg(test)]
mod render_geo_tests {
    use geo::{Contains, LineString, Point as GeoPoint, Polygon as GeoPolygon};

    use qrvec::*;

    fn polyline(path: &CurvePath) -> LineString<f64> {
        let mut pts = vec![(path.start.x as f64, path.start.y as f64)];
        for seg in &path.segments {
            match seg {
                PathSegment::Line { to } => pts.push((to.x as f64, to.y as f64)),
                other => panic!("zero tension must yield polylines, got {other:?}"),
            }
        }
        pts.push(pts[0]);
        LineString::from(pts)
    }

    fn doubled_area(ls: &LineString<f64>) -> f64 {
        let pts = &ls.0;
        let mut sum = 0.0;
        for w in pts.windows(2) {
            sum += w[0].x * w[1].y - w[1].x * w[0].y;
        }
        sum
    }

    #[test]
    fn test_finder_ring_outline_contains_ring_not_hole() {
        let fg = FunctionGrid::new(Version::Normal(1));
        let mut config = RenderConfig::new();
        config.merge(
            ModuleType::Finder,
            MergeConfig {
                thresholds: MergeThresholds::default(),
                curve: CurveConfig { tension: 0.0, ..CurveConfig::default() },
            },
        );
        let out = render(fg.grid(), &fg, &config);

        // Find the merged outline that carries a hole: the top-left finder
        // ring. Outer loop has positive area in screen coords.
        let ring = out
            .primitives
            .iter()
            .filter(|p| p.merged)
            .find_map(|p| {
                let Shape::Path { subpaths } = &p.shape else { return None };
                let (mut outer, holes): (Vec<_>, Vec<_>) =
                    subpaths.iter().map(polyline).partition(|ls| doubled_area(ls) > 0.0);
                if holes.is_empty() || outer.len() != 1 {
                    return None;
                }
                let poly = GeoPolygon::new(outer.pop().unwrap(), holes);
                poly.contains(&GeoPoint::new(0.5, 0.5)).then_some(poly)
            })
            .expect("top-left finder ring renders as an outline with a hole");

        // Ring cells are inside, the separator and the 3x3 center are not.
        assert!(ring.contains(&GeoPoint::new(0.5, 0.5)));
        assert!(ring.contains(&GeoPoint::new(6.5, 6.5)));
        assert!(!ring.contains(&GeoPoint::new(3.5, 3.5)), "center cluster sits in the hole");
        assert!(!ring.contains(&GeoPoint::new(7.5, 7.5)), "separator is inactive");
    }

    #[test]
    fn test_parallel_renders_agree() {
        use rand::{Rng, SeedableRng};
        use rayon::prelude::*;

        let seed = rand::rngs::StdRng::seed_from_u64(9).random::<u64>();
        let mut fg = FunctionGrid::new(Version::Normal(3));
        fg.fill_data(seed);
        let mut config = RenderConfig::new();
        config
            .style(ModuleType::Data, Style::Rounded)
            .merge(ModuleType::Alignment, MergeConfig::default());

        let outs: Vec<RenderOutput> =
            (0..8).into_par_iter().map(|_| render(fg.grid(), &fg, &config)).collect();
        assert!(outs.windows(2).all(|w| w[0] == w[1]));
    }
}

#[cfg(test)]
mod render_style_tests {
    use test_case::test_case;

    use qrvec::*;

    #[test_case("square"; "test_style_square")]
    #[test_case("dot"; "test_style_dot")]
    #[test_case("rounded"; "test_style_rounded")]
    #[test_case("extra-rounded"; "test_style_extra_rounded")]
    #[test_case("classy"; "test_style_classy")]
    #[test_case("classy_rounded"; "test_style_classy_rounded")]
    fn test_named_style_renders_every_module(name: &str) {
        let mut fg = FunctionGrid::new(Version::Normal(2));
        fg.fill_data(3);
        let mut config = RenderConfig::new();
        for mt in ModuleType::ALL {
            config.style_named(mt, name);
        }
        let out = render(fg.grid(), &fg, &config);
        assert!(out.warnings.is_empty(), "{name} is a known style");
        assert_eq!(out.primitives.len(), fg.grid().active_count());
    }

    #[test]
    fn test_unknown_names_fall_back_with_warnings() {
        let mut fg = FunctionGrid::new(Version::Micro(3));
        fg.fill_data(5);
        let mut config = RenderConfig::new();
        config.style_named(ModuleType::Data, "blobby").connectivity_named("hex");
        let out = render(fg.grid(), &fg, &config);

        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.primitives.len(), fg.grid().active_count());
        // The fallback style is square.
        assert!(out
            .primitives
            .iter()
            .filter(|p| p.module_type == ModuleType::Data)
            .all(|p| matches!(p.shape, Shape::Rect { .. })));
    }

    #[test]
    fn test_from_bits_grid_with_closure_classifier() {
        let width = 21;
        let bits: Vec<bool> = (0..width * width).map(|i| i % 3 == 0).collect();
        let grid = Grid::from_bits(width, bits).unwrap();
        let everything_data = |_: usize, _: usize| ModuleType::Data;
        let out = render(&grid, &everything_data, &RenderConfig::default());
        assert_eq!(out.primitives.len(), grid.active_count());
    }
}
