//! Journey path: a centripetal Catmull-Rom spline through fixed waypoints.
//!
//! The curve is parametrized uniformly per segment: `t` in [0, 1] maps to
//! segment `floor(t * (n - 1))`, so equal steps in `t` are not equal steps in
//! distance. Arc length is tracked separately for rolling.

use glam::Vec3;
use thiserror::Error;

/// Smallest knot spacing before it is treated as a repeated point
const MIN_KNOT_SPACING: f32 = 1e-4;

/// Step used when the analytic derivative vanishes
const TANGENT_STEP: f32 = 1e-4;

/// Curve construction failures
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("path needs at least 4 control points, got {got}")]
    TooFewControlPoints { got: usize },

    #[error("control point {index} is not finite")]
    NonFiniteControlPoint { index: usize },
}

/// Cubic c0 + c1 u + c2 u² + c3 u³ for one span
#[derive(Debug, Clone, Copy)]
struct CubicSegment {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSegment {
    /// Span p1 → p2 with neighbours p0, p3, knots spaced by sqrt(distance)
    fn centripetal(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);

        if dt1 < MIN_KNOT_SPACING {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_SPACING {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_SPACING {
            dt2 = dt1;
        }

        // Tangents at p1 and p2, rescaled to the [0, 1] span
        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        Self {
            c0: p1,
            c1: t1,
            c2: -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
            c3: 2.0 * p1 - 2.0 * p2 + t1 + t2,
        }
    }

    fn eval(&self, u: f32) -> Vec3 {
        self.c0 + u * (self.c1 + u * (self.c2 + u * self.c3))
    }

    fn derivative(&self, u: f32) -> Vec3 {
        self.c1 + u * (2.0 * self.c2 + u * 3.0 * self.c3)
    }
}

/// Immutable smooth path through the journey waypoints
#[derive(Debug, Clone)]
pub struct PathCurve {
    control_points: Vec<Vec3>,
    segments: Vec<CubicSegment>,
    /// Cumulative chord length at `i / divisions`
    cumulative_lengths: Vec<f32>,
}

impl PathCurve {
    /// Build the curve; fails on fewer than 4 or non-finite control points
    pub fn new(control_points: Vec<Vec3>, arc_length_divisions: usize) -> Result<Self, PathError> {
        if control_points.len() < 4 {
            return Err(PathError::TooFewControlPoints {
                got: control_points.len(),
            });
        }
        if let Some(index) = control_points.iter().position(|p| !p.is_finite()) {
            return Err(PathError::NonFiniteControlPoint { index });
        }

        let n = control_points.len();
        let segments = (0..n - 1)
            .map(|i| {
                let p1 = control_points[i];
                let p2 = control_points[i + 1];
                // Open curve: mirror the missing neighbour across the endpoint
                let p0 = if i > 0 {
                    control_points[i - 1]
                } else {
                    2.0 * p1 - p2
                };
                let p3 = if i + 2 < n {
                    control_points[i + 2]
                } else {
                    2.0 * p2 - p1
                };
                CubicSegment::centripetal(p0, p1, p2, p3)
            })
            .collect();

        let mut curve = Self {
            control_points,
            segments,
            cumulative_lengths: Vec::new(),
        };
        curve.cumulative_lengths = curve.measure(arc_length_divisions.max(1));
        Ok(curve)
    }

    fn measure(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut total = 0.0;
        let mut last = self.point_at(0.0);
        lengths.push(0.0);
        for i in 1..=divisions {
            let p = self.point_at(i as f32 / divisions as f32);
            total += p.distance(last);
            lengths.push(total);
            last = p;
        }
        lengths
    }

    /// Segment index and local parameter for `t`, clamped to the curve
    fn locate(&self, t: f32) -> (usize, f32) {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let spans = self.segments.len();
        let p = t * spans as f32;
        let index = (p.floor() as usize).min(spans - 1);
        (index, p - index as f32)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Position at parameter `t` (clamped to [0, 1])
    pub fn point_at(&self, t: f32) -> Vec3 {
        let (index, u) = self.locate(t);
        self.segments[index].eval(u)
    }

    /// Unit direction of travel at parameter `t`
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (index, u) = self.locate(t);
        self.segments[index]
            .derivative(u)
            .try_normalize()
            .unwrap_or_else(|| {
                let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
                let ahead = self.point_at((t + TANGENT_STEP).min(1.0));
                let behind = self.point_at((t - TANGENT_STEP).max(0.0));
                (ahead - behind).normalize_or_zero()
            })
    }

    /// Total arc length (meters)
    pub fn length(&self) -> f32 {
        self.cumulative_lengths.last().copied().unwrap_or(0.0)
    }

    /// `divisions + 1` evenly parametrized points, both endpoints included
    pub fn sample_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }
}
