//! Scroll-driven camera rig riding the journey path.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::heightfield::Heightfield;
use crate::params::{CameraRigParams, RenderConfig};
use crate::path::PathCurve;
use crate::scroll::path_param;

/// Camera eye and look-at target for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Camera rig: position on the path, gaze on the ground ahead
///
/// Stateless: the pose depends only on the scroll offset.
pub struct CameraRig {
    curve: Arc<PathCurve>,
    heightfield: Heightfield,
    params: CameraRigParams,
}

impl CameraRig {
    pub fn new(curve: Arc<PathCurve>, heightfield: Heightfield, params: CameraRigParams) -> Self {
        Self {
            curve,
            heightfield,
            params,
        }
    }

    /// Compute camera position and look-at target for a scroll offset
    ///
    /// The eye sits on the path at the scroll offset itself. The target is the
    /// ground point under the path `look_lead` further on, raised by
    /// `look_height_m`, which is where the rock rolls.
    pub fn compute_pose(&self, scroll_offset: f32) -> CameraPose {
        let eye = self.curve.point_at(path_param(scroll_offset, 0.0));

        let ahead = self
            .curve
            .point_at(path_param(scroll_offset, self.params.look_lead));
        let ground = self.heightfield.elevation(ahead.x, ahead.z);
        let target = Vec3::new(ahead.x, ground + self.params.look_height_m, ahead.z);

        CameraPose { eye, target }
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(
        &self,
        pose: &CameraPose,
        render_config: &RenderConfig,
    ) -> (Mat4, Vec3) {
        let forward = pose.target - pose.eye;

        // Y up, unless looking straight down where it degenerates
        let up = if forward.normalize_or_zero().cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };

        let view = Mat4::look_at_rh(pose.eye, pose.target, up);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );

        (proj * view, pose.eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseSource;
    use crate::params::{HeightfieldParams, PathParams};

    fn rig(noise: bool) -> (CameraRig, Arc<PathCurve>, Heightfield) {
        let params = PathParams::default();
        let curve = Arc::new(PathCurve::new(params.control_points, 200).unwrap());
        let source = noise.then(|| Arc::new(NoiseSource::new(42)));
        let heightfield = Heightfield::new(source, HeightfieldParams::default());
        let rig = CameraRig::new(curve.clone(), heightfield.clone(), CameraRigParams::default());
        (rig, curve, heightfield)
    }

    #[test]
    fn test_camera_rides_path_endpoints() {
        let (rig, curve, _) = rig(true);
        let first = curve.control_points()[0];
        let last = *curve.control_points().last().unwrap();

        assert!(rig.compute_pose(0.0).eye.abs_diff_eq(first, 1e-3));
        assert!(rig.compute_pose(1.0).eye.abs_diff_eq(last, 1e-3));
    }

    #[test]
    fn test_camera_looks_at_ground_ahead() {
        let (rig, curve, heightfield) = rig(true);
        for i in 0..=20 {
            let s = i as f32 / 20.0;
            let pose = rig.compute_pose(s);
            let ahead = curve.point_at(path_param(s, 0.08));

            assert_eq!(pose.target.x, ahead.x);
            assert_eq!(pose.target.z, ahead.z);
            assert_eq!(pose.target.y, heightfield.elevation(ahead.x, ahead.z) + 1.0);
        }
    }

    #[test]
    fn test_pose_is_stateless() {
        let (rig, _, _) = rig(true);
        let a = rig.compute_pose(0.37);
        let _ = rig.compute_pose(0.9);
        assert_eq!(a, rig.compute_pose(0.37));
    }

    #[test]
    fn test_flat_ground_target_height() {
        let (rig, _, _) = rig(false);
        assert_eq!(rig.compute_pose(0.5).target.y, 1.0);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let (rig, _, _) = rig(true);
        let render_config = RenderConfig::default();

        let pose = rig.compute_pose(0.25);
        let (view_proj, eye_pos) = rig.create_view_proj_matrix(&pose, &render_config);

        // Matrix should not be identity or zero
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(view_proj.is_finite());
        assert_eq!(eye_pos, pose.eye);

        // Target projects in front of the camera, near screen center
        let clip = view_proj * pose.target.extend(1.0);
        assert!(clip.w > 0.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
    }

    #[test]
    fn test_straight_down_view_stays_finite() {
        let (rig, _, _) = rig(true);
        let pose = CameraPose {
            eye: Vec3::new(0.0, 20.0, 0.0),
            target: Vec3::ZERO,
        };
        let (view_proj, _) = rig.create_view_proj_matrix(&pose, &RenderConfig::default());
        assert!(view_proj.is_finite());
    }
}
