//! Snowfall particles.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::SnowParams;

#[derive(Debug, Clone, Copy)]
struct Flake {
    position: Vec3,
    speed: f32,
}

/// Falling flakes that respawn overhead, near the camera
pub struct SnowField {
    params: SnowParams,
    flakes: Vec<Flake>,
    rng: StdRng,
}

impl SnowField {
    pub fn new(params: SnowParams) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let flakes = (0..params.count)
            .map(|_| Flake {
                position: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * params.spread_m,
                    rng.gen::<f32>() * params.ceiling_m,
                    (rng.gen::<f32>() - 0.5) * params.spread_m,
                ),
                speed: params.min_speed + rng.gen::<f32>() * params.speed_jitter,
            })
            .collect();

        Self {
            params,
            flakes,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    /// Let every flake fall for `dt_s` seconds
    ///
    /// Flakes that drop below the floor reappear at the ceiling, spread
    /// around the camera's current z so the snow follows the journey.
    pub fn update(&mut self, dt_s: f32, camera_z: f32) {
        let p = &self.params;
        for flake in &mut self.flakes {
            flake.position.y -= flake.speed * p.fall_scale * dt_s;
            if flake.position.y < p.floor_m {
                flake.position.y = p.ceiling_m;
                flake.position.x = (self.rng.gen::<f32>() - 0.5) * p.spread_m;
                flake.position.z = camera_z + (self.rng.gen::<f32>() - 0.5) * p.spread_m;
            }
        }
    }

    /// Render positions at `time_s`, with per-flake horizontal sway
    pub fn positions(&self, time_s: f32) -> Vec<Vec3> {
        let sway = self.params.sway_m;
        self.flakes
            .iter()
            .enumerate()
            .map(|(i, flake)| {
                let phase = i as f32;
                flake.position
                    + Vec3::new(
                        (time_s * 0.5 + phase).sin() * sway,
                        0.0,
                        (time_s * 0.3 + phase).cos() * sway,
                    )
            })
            .collect()
    }

    pub fn params(&self) -> &SnowParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SnowParams {
        SnowParams {
            count: 200,
            ..SnowParams::default()
        }
    }

    #[test]
    fn test_initial_volume() {
        let snow = SnowField::new(small());
        assert_eq!(snow.len(), 200);
        for f in &snow.flakes {
            assert!(f.position.x.abs() <= 40.0);
            assert!(f.position.z.abs() <= 40.0);
            assert!(f.position.y >= 0.0 && f.position.y <= 40.0);
            assert!(f.speed >= 0.05 && f.speed <= 0.15);
        }
    }

    #[test]
    fn test_flakes_fall() {
        let mut snow = SnowField::new(small());
        let before: Vec<f32> = snow.flakes.iter().map(|f| f.position.y).collect();
        snow.update(0.1, 0.0);
        for (f, y0) in snow.flakes.iter().zip(before) {
            let expected = y0 - f.speed * 10.0 * 0.1;
            assert!((f.position.y - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_respawn_near_camera() {
        let mut snow = SnowField::new(small());
        // Long enough for every flake to pass the floor
        snow.update(100.0, -30.0);
        for f in &snow.flakes {
            assert_eq!(f.position.y, 40.0);
            assert!((f.position.z + 30.0).abs() <= 40.0, "flake z {}", f.position.z);
        }
    }

    #[test]
    fn test_sway_is_bounded() {
        let snow = SnowField::new(small());
        let rest = snow.positions(0.0);
        let later = snow.positions(12.3);
        for (a, b) in rest.iter().zip(&later) {
            assert_eq!(a.y, b.y);
            assert!((a.x - b.x).abs() <= 1.0 + 1e-5);
            assert!((a.z - b.z).abs() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_seeded_spawn_is_reproducible() {
        let a = SnowField::new(small()).positions(1.0);
        let b = SnowField::new(small()).positions(1.0);
        assert_eq!(a, b);
    }
}
