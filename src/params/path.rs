//! Path curve and the agents that ride it.

use glam::Vec3;

/// Fixed journey path
#[derive(Debug, Clone)]
pub struct PathParams {
    /// Waypoints the spline passes through, in order (meters)
    pub control_points: Vec<Vec3>,

    /// Chords used to approximate arc length
    pub arc_length_divisions: usize,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            control_points: vec![
                Vec3::new(0.0, 25.0, 25.0),  // Intro, high enough to clear the ridge
                Vec3::new(5.0, 12.0, 10.0),  // About
                Vec3::new(-2.0, 14.0, 5.0),  // Skills
                Vec3::new(4.0, 13.0, 2.0),   // Certifications
                Vec3::new(-5.0, 14.0, 0.0),  // Experience, side view
                Vec3::new(0.0, 20.0, -20.0), // Projects, over the mountains
                Vec3::new(0.0, 15.0, -40.0), // Contact, low valley
            ],
            arc_length_divisions: 200,
        }
    }
}

/// Camera rig: rides the path at lead 0 and looks at the rock
#[derive(Debug, Clone)]
pub struct CameraRigParams {
    /// Path-parameter lead of the look target (matches the rock's lead)
    pub look_lead: f32,

    /// Look target height above the ground (meters)
    pub look_height_m: f32,
}

impl Default for CameraRigParams {
    fn default() -> Self {
        Self {
            look_lead: 0.08,
            look_height_m: 1.0,
        }
    }
}

/// Rolling rock character
#[derive(Debug, Clone)]
pub struct RockParams {
    /// Path-parameter lead ahead of the camera
    pub lead: f32,

    /// Body center height above the ground (meters)
    pub hover_m: f32,

    /// Finite-difference step for the surface normal (meters)
    pub normal_step_m: f32,

    /// Per-frame lerp factor of the up-vector toward the surface normal
    pub up_smoothing: f32,

    /// Rolling radius (meters): 0.5 geometry radius at 0.5 scale
    pub body_radius_m: f32,

    /// Uniform scale of the rock group
    pub model_scale: f32,

    /// Peak wobble on the secondary axes (radians)
    pub wobble_amplitude_rad: f32,

    /// Wobble rate about Z relative to the rolling angle
    pub wobble_z_rate: f32,

    /// Wobble rate about Y relative to the rolling angle
    pub wobble_y_rate: f32,

    /// Albedo (#ffd700)
    pub color: [f32; 3],

    pub roughness: f32,

    /// Emissive strength of the glow
    pub emissive: f32,
}

impl Default for RockParams {
    fn default() -> Self {
        Self {
            lead: 0.08,
            hover_m: 0.35,
            normal_step_m: 0.5,
            up_smoothing: 0.1,
            body_radius_m: 0.25,
            model_scale: 0.5,
            wobble_amplitude_rad: 0.2,
            wobble_z_rate: 0.5,
            wobble_y_rate: 0.3,
            color: [1.0, 0.843, 0.0],
            roughness: 0.2,
            emissive: 2.0,
        }
    }
}

/// Ground-hugging trail drawn along the path
#[derive(Debug, Clone)]
pub struct TrailParams {
    /// Curve divisions (points = divisions + 1)
    pub divisions: usize,

    /// Lift of the dark outline stroke above the ground (meters)
    pub outline_lift_m: f32,

    /// Lift of the bright core stroke above the ground (meters)
    pub core_lift_m: f32,

    pub outline_color: [f32; 4],

    pub core_color: [f32; 4],
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            divisions: 800,
            outline_lift_m: 0.35,
            core_lift_m: 0.4,
            outline_color: [0.0, 0.0, 0.0, 1.0],
            core_color: [1.0, 0.843, 0.0, 1.0],
        }
    }
}
