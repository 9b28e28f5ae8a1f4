//! Rolling rock character that leads the camera along the path.
//!
//! Position and rolling angle are pure functions of the scroll offset. The up
//! vector is the one piece of frame-persistent state: it eases toward the
//! local surface normal so the rock tilts smoothly over bumps.

use std::sync::Arc;

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

use crate::heightfield::Heightfield;
use crate::params::RockParams;
use crate::path::PathCurve;
use crate::scroll::path_param;

/// Rock transform for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockPose {
    /// Path parameter the rock sits at
    pub path_param: f32,

    /// Body center, grounded on the terrain
    pub position: Vec3,

    /// Heading along the path, tilted to the smoothed up-vector
    pub orientation: Quat,

    /// Smoothed up-vector used for `orientation`
    pub up: Vec3,

    /// Distance rolled along the path (meters)
    pub distance: f32,

    /// Rotation about the rolling axis (radians)
    pub rolling_angle: f32,

    /// Rolling plus cosmetic wobble, in the rock's local frame
    pub spin: Quat,
}

/// Character agent
pub struct RockRig {
    curve: Arc<PathCurve>,
    heightfield: Heightfield,
    params: RockParams,
    curve_length: f32,
    up: Vec3,
}

impl RockRig {
    pub fn new(curve: Arc<PathCurve>, heightfield: Heightfield, params: RockParams) -> Self {
        let curve_length = curve.length();
        Self {
            curve,
            heightfield,
            params,
            curve_length,
            up: Vec3::Y,
        }
    }

    pub fn params(&self) -> &RockParams {
        &self.params
    }

    /// Current smoothed up-vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Advance one frame at the given scroll offset
    pub fn update(&mut self, scroll_offset: f32) -> RockPose {
        let t = path_param(scroll_offset, self.params.lead);
        let point = self.curve.point_at(t);
        let tangent = self.curve.tangent_at(t);

        // Grounding
        let ground = self.heightfield.elevation(point.x, point.z);
        let position = Vec3::new(point.x, ground + self.params.hover_m, point.z);

        // Slope alignment, eased rather than snapped
        let normal = self.surface_normal(point.x, point.z, ground);
        self.up = self
            .up
            .lerp(normal, self.params.up_smoothing)
            .try_normalize()
            .unwrap_or(Vec3::Y);
        let orientation = facing(tangent, self.up);

        // Rolling
        let distance = t * self.curve_length;
        let rolling_angle = distance / self.params.body_radius_m;
        let spin = self.spin(rolling_angle);

        RockPose {
            path_param: t,
            position,
            orientation,
            up: self.up,
            distance,
            rolling_angle,
            spin,
        }
    }

    /// Surface normal from forward differences along +X and +Z
    pub fn surface_normal(&self, x: f32, z: f32, ground: f32) -> Vec3 {
        let d = self.params.normal_step_m;
        let east = self.heightfield.elevation(x + d, z);
        let south = self.heightfield.elevation(x, z + d);

        let along_x = Vec3::new(d, east - ground, 0.0);
        let along_z = Vec3::new(0.0, south - ground, d);
        along_z.cross(along_x).try_normalize().unwrap_or(Vec3::Y)
    }

    fn spin(&self, rolling_angle: f32) -> Quat {
        let wobble = self.params.wobble_amplitude_rad;
        let yaw = (rolling_angle * self.params.wobble_y_rate).cos() * wobble;
        let roll = (rolling_angle * self.params.wobble_z_rate).sin() * wobble;
        Quat::from_euler(EulerRot::XYZ, rolling_angle, yaw, roll)
    }

    /// Model matrix of the rock body for rendering
    pub fn model_matrix(&self, pose: &RockPose) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.params.model_scale),
            pose.orientation,
            pose.position,
        ) * Mat4::from_quat(pose.spin)
    }
}

/// Rotation whose local +Z points along `forward` and whose +Y leans to `up`
fn facing(forward: Vec3, up: Vec3) -> Quat {
    let Some(mut z) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };

    let mut x = up.cross(z);
    if x.length_squared() < 1e-12 {
        // up parallel to forward: nudge forward off the axis
        if up.z.abs() > 0.9999 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}
