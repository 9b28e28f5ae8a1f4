//! Scene composition: builds the shared resources once and hands them to
//! every agent.
//!
//! There is exactly one `PathCurve` and one `Heightfield` per scene. The
//! camera, rock, terrain, and trail all read from those instances.

use std::sync::Arc;

use glam::Vec3;

use crate::camera::{CameraPose, CameraRig};
use crate::heightfield::Heightfield;
use crate::noise::NoiseSource;
use crate::params::SceneParams;
use crate::path::{PathCurve, PathError};
use crate::rock::{RockPose, RockRig};
use crate::snow::SnowField;
use crate::terrain::Terrain;
use crate::trail::PathTrail;

/// Agent outputs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    pub camera: CameraPose,
    pub rock: RockPose,

    /// Trail polylines changed this frame and need re-uploading
    pub trail_rebuilt: bool,
}

pub struct Scene {
    curve: Arc<PathCurve>,
    heightfield: Heightfield,
    pub terrain: Terrain,
    pub camera: CameraRig,
    pub rock: RockRig,
    pub trail: PathTrail,
    pub snow: SnowField,
}

impl Scene {
    /// Build the terrain, the path, and all agents
    ///
    /// Fails only when the path cannot be built; a missing noise seed gives
    /// flat ground instead.
    pub fn new(params: &SceneParams) -> Result<Self, PathError> {
        let curve = Arc::new(PathCurve::new(
            params.path.control_points.clone(),
            params.path.arc_length_divisions,
        )?);
        log::info!(
            "Path: {} waypoints, {:.1}m long",
            curve.control_points().len(),
            curve.length()
        );

        let noise = match params.noise_seed {
            Some(seed) => {
                let noise = NoiseSource::new(seed);
                log::info!("Noise seed: {}", noise.seed());
                Some(Arc::new(noise))
            }
            None => {
                log::warn!("No noise source, terrain is flat");
                None
            }
        };
        let heightfield = Heightfield::new(noise, params.heightfield.clone());

        let terrain = Terrain::generate(&heightfield, params.terrain.clone(), params.scatter_seed);
        let camera = CameraRig::new(curve.clone(), heightfield.clone(), params.camera.clone());
        let rock = RockRig::new(curve.clone(), heightfield.clone(), params.rock.clone());

        let mut trail = PathTrail::new(params.trail.clone());
        trail.sync(&curve, &heightfield);

        let snow = SnowField::new(params.snow.clone());
        log::info!("Snow: {} flakes", snow.len());

        Ok(Self {
            curve,
            heightfield,
            terrain,
            camera,
            rock,
            trail,
            snow,
        })
    }

    pub fn curve(&self) -> &Arc<PathCurve> {
        &self.curve
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    /// Advance every agent one frame
    ///
    /// # Arguments
    /// * `scroll_offset` - Journey progress in [0, 1]
    /// * `dt_s` - Frame time (seconds)
    pub fn update(&mut self, scroll_offset: f32, dt_s: f32) -> FrameState {
        let camera = self.camera.compute_pose(scroll_offset);
        let rock = self.rock.update(scroll_offset);
        let trail_rebuilt = self.trail.sync(&self.curve, &self.heightfield);
        self.snow.update(dt_s, camera.eye.z);

        FrameState {
            camera,
            rock,
            trail_rebuilt,
        }
    }

    /// Snow positions to draw at `time_s`
    pub fn snow_positions(&self, time_s: f32) -> Vec<Vec3> {
        self.snow.positions(time_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TerrainParams;

    fn params(noise_seed: Option<u32>) -> SceneParams {
        SceneParams {
            noise_seed,
            terrain: TerrainParams {
                segments: 48,
                ..TerrainParams::default()
            },
            ..SceneParams::default()
        }
    }

    #[test]
    fn test_camera_at_journey_ends() {
        let p = params(Some(42));
        let mut scene = Scene::new(&p).unwrap();
        let first = p.path.control_points[0];
        let last = p.path.control_points[6];

        let start = scene.update(0.0, 1.0 / 60.0);
        assert!(start.camera.eye.abs_diff_eq(first, 1e-3), "{:?}", start.camera.eye);

        let end = scene.update(1.0, 1.0 / 60.0);
        assert!(end.camera.eye.abs_diff_eq(last, 1e-3), "{:?}", end.camera.eye);
    }

    #[test]
    fn test_flat_scene_keeps_rock_at_hover_height() {
        let mut scene = Scene::new(&params(None)).unwrap();
        assert!(scene.trail.is_empty());
        for i in 0..=20 {
            let pose = scene.update(i as f32 / 20.0, 1.0 / 60.0).rock;
            let on_path = scene.curve().point_at(pose.path_param);
            assert_eq!(pose.position.y, 0.35);
            assert_eq!((pose.position.x, pose.position.z), (on_path.x, on_path.z));
        }
    }

    #[test]
    fn test_rock_rolls_full_length_at_end() {
        let mut scene = Scene::new(&params(Some(42))).unwrap();
        let pose = scene.update(1.0, 1.0 / 60.0).rock;
        let length = scene.curve().length();
        assert_eq!(pose.path_param, 1.0);
        assert!((pose.distance - length).abs() < 1e-4);
        assert!((pose.rolling_angle - length / 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_trail_is_stable_across_frames() {
        let mut scene = Scene::new(&params(Some(42))).unwrap();
        let before = scene.trail.core().to_vec();
        assert!(!scene.update(0.5, 1.0 / 60.0).trail_rebuilt);
        assert!(!scene.trail.sync(&scene.curve.clone(), &scene.heightfield.clone()));
        assert_eq!(before, scene.trail.core());
    }

    #[test]
    fn test_camera_looks_at_rock_ground() {
        let mut scene = Scene::new(&params(Some(42))).unwrap();
        let frame = scene.update(0.3, 1.0 / 60.0);
        let ground = scene
            .heightfield()
            .elevation(frame.rock.position.x, frame.rock.position.z);
        assert_eq!(
            (frame.camera.target.x, frame.camera.target.z),
            (frame.rock.position.x, frame.rock.position.z)
        );
        assert!((frame.camera.target.y - (ground + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_snow_count_follows_params() {
        let mut p = params(None);
        p.snow.count = 25;
        let scene = Scene::new(&p).unwrap();
        assert_eq!(scene.snow.len(), 25);
        assert_eq!(scene.snow_positions(0.0).len(), 25);

        p.snow.count = 0;
        let mut scene = Scene::new(&p).unwrap();
        assert!(scene.snow.is_empty());
        scene.update(0.5, 1.0 / 60.0);
        assert!(scene.snow_positions(1.0).is_empty());
    }

    #[test]
    fn test_too_few_waypoints_fail_fast() {
        let mut p = params(Some(42));
        p.path.control_points.truncate(3);
        assert_eq!(
            Scene::new(&p).err(),
            Some(PathError::TooFewControlPoints { got: 3 })
        );
    }
}
