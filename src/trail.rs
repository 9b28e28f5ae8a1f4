//! Ground line drawn along the path.
//!
//! Two polylines hug the terrain under the curve: a dark outline and a
//! slightly higher bright core drawn on top of it. They are rebuilt only
//! when the curve or the noise source behind the heightfield changes.

use std::sync::Arc;

use glam::Vec3;

use crate::heightfield::Heightfield;
use crate::params::TrailParams;
use crate::path::PathCurve;

pub struct PathTrail {
    params: TrailParams,
    outline: Vec<Vec3>,
    core: Vec<Vec3>,
    source: Option<(Arc<PathCurve>, Heightfield)>,
}

impl PathTrail {
    pub fn new(params: TrailParams) -> Self {
        Self {
            params,
            outline: Vec::new(),
            core: Vec::new(),
            source: None,
        }
    }

    /// Rebuild the polylines if the inputs changed since the last call
    ///
    /// # Returns
    /// `true` when the polylines were rebuilt
    pub fn sync(&mut self, curve: &Arc<PathCurve>, heightfield: &Heightfield) -> bool {
        if let Some((last_curve, last_field)) = &self.source {
            if Arc::ptr_eq(last_curve, curve) && last_field.same_source(heightfield) {
                return false;
            }
        }

        self.outline.clear();
        self.core.clear();

        // Nothing to draw on until there is ground to follow
        if heightfield.has_noise() {
            for p in curve.sample_points(self.params.divisions) {
                let ground = heightfield.elevation(p.x, p.z);
                self.outline
                    .push(Vec3::new(p.x, ground + self.params.outline_lift_m, p.z));
                self.core
                    .push(Vec3::new(p.x, ground + self.params.core_lift_m, p.z));
            }
        }

        log::debug!("Trail rebuilt: {} points", self.core.len());
        self.source = Some((Arc::clone(curve), heightfield.clone()));
        true
    }

    /// Wide dark stroke, drawn first
    pub fn outline(&self) -> &[Vec3] {
        &self.outline
    }

    /// Narrow bright stroke, drawn on top
    pub fn core(&self) -> &[Vec3] {
        &self.core
    }

    pub fn params(&self) -> &TrailParams {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseSource;
    use crate::params::{HeightfieldParams, PathParams};

    fn curve() -> Arc<PathCurve> {
        let p = PathParams::default();
        Arc::new(PathCurve::new(p.control_points, p.arc_length_divisions).unwrap())
    }

    fn seeded() -> Heightfield {
        Heightfield::new(
            Some(Arc::new(NoiseSource::new(42))),
            HeightfieldParams::default(),
        )
    }

    #[test]
    fn test_polylines_follow_ground() {
        let curve = curve();
        let field = seeded();
        let mut trail = PathTrail::new(TrailParams::default());
        assert!(trail.sync(&curve, &field));

        assert_eq!(trail.core().len(), 801);
        assert_eq!(trail.outline().len(), 801);
        for (o, c) in trail.outline().iter().zip(trail.core()) {
            let ground = field.elevation(c.x, c.z);
            assert_eq!((o.x, o.z), (c.x, c.z));
            assert!((o.y - (ground + 0.35)).abs() < 1e-5);
            assert!((c.y - (ground + 0.4)).abs() < 1e-5);
            assert!(c.y > o.y, "core must sit above the outline");
        }
        assert_eq!(trail.core()[0].x, curve.point_at(0.0).x);
    }

    #[test]
    fn test_rebuild_only_on_identity_change() {
        let curve = curve();
        let field = seeded();
        let mut trail = PathTrail::new(TrailParams::default());

        assert!(trail.sync(&curve, &field));
        assert!(!trail.sync(&curve, &field.clone()), "clone shares the noise source");

        // Same control points, but a different curve instance
        let other_curve = self::curve();
        assert!(trail.sync(&other_curve, &field));

        // Same seed, different noise instance
        let other_field = seeded();
        assert!(trail.sync(&other_curve, &other_field));
        assert!(!trail.sync(&other_curve, &other_field));
    }

    #[test]
    fn test_no_noise_no_trail() {
        let curve = curve();
        let mut trail = PathTrail::new(TrailParams::default());
        trail.sync(&curve, &Heightfield::flat(HeightfieldParams::default()));
        assert!(trail.is_empty());
        assert!(trail.outline().is_empty());

        // Noise arriving later fills it in
        assert!(trail.sync(&curve, &seeded()));
        assert!(!trail.is_empty());
    }
}
