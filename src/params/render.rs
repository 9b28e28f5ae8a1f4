//! Rendering and recording configuration.
//!
//! Colors are authored in sRGB like CSS hex values and converted to linear
//! light before they reach the shaders.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    /// Terrain is 120m across, so 200m covers it from any waypoint
    pub far_plane_m: f32,

    /// Clear and fog color, deep sunset (#2e1020, sRGB)
    pub background: [f32; 3],

    /// Fog starts at this distance (meters)
    pub fog_near_m: f32,

    /// Fog fully opaque at this distance (meters)
    pub fog_far_m: f32,

    /// Key light direction (points toward the light)
    pub sun_direction: [f32; 3],

    /// Key light color (#ff8800, sRGB)
    pub sun_color: [f32; 3],

    /// Key light intensity
    pub sun_intensity: f32,

    /// Fill light direction
    pub fill_direction: [f32; 3],

    /// Fill light color (#8800ff, sRGB)
    pub fill_color: [f32; 3],

    /// Fill light intensity
    pub fill_intensity: f32,

    /// Ambient color (#402030, sRGB)
    pub ambient_color: [f32; 3],

    /// Ambient intensity
    pub ambient_intensity: f32,

    /// Glow carried by the rolling rock (#ffaa00, sRGB)
    pub rock_light_color: [f32; 3],

    /// Rock light intensity at 1m
    pub rock_light_intensity: f32,

    /// Rock light cutoff distance (meters)
    pub rock_light_range_m: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 45.0,
            near_plane_m: 0.1,
            far_plane_m: 200.0,
            background: hex_color(0x2e1020),
            fog_near_m: 10.0,
            fog_far_m: 50.0,
            sun_direction: [20.0, 10.0, 10.0],
            sun_color: hex_color(0xff8800),
            sun_intensity: 2.0,
            fill_direction: [-10.0, 10.0, -10.0],
            fill_color: hex_color(0x8800ff),
            fill_intensity: 1.0,
            ambient_color: hex_color(0x402030),
            ambient_intensity: 0.6,
            rock_light_color: hex_color(0xffaa00),
            rock_light_intensity: 5.0,
            rock_light_range_m: 8.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    /// Background in linear light
    pub fn background_linear(&self) -> [f32; 3] {
        linear_color(self.background, 1.0)
    }
}

/// Split a 0xRRGGBB literal into sRGB channels in [0, 1]
pub fn hex_color(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// sRGB transfer function inverse for one channel
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linearize an sRGB color and scale it by an intensity
pub fn linear_color(srgb: [f32; 3], intensity: f32) -> [f32; 3] {
    srgb.map(|c| srgb_to_linear(c) * intensity)
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration of the recorded journey (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Fixed timestep between captured frames (seconds)
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }
}

/// Counts frames that actually reached disk during a recording
///
/// A frame whose surface was lost is simulated but not captured, so the
/// file index only moves on success and the sequence has no gaps.
#[derive(Debug, Clone)]
pub struct RecordingProgress {
    captured: usize,
    total: usize,
}

impl RecordingProgress {
    pub fn new(config: &RecordingConfig) -> Self {
        Self {
            captured: 0,
            total: config.total_frames(),
        }
    }

    /// Index the next captured frame will be written under
    pub fn next_index(&self) -> usize {
        self.captured
    }

    pub fn captured(&self) -> usize {
        self.captured
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Record that the frame at `next_index` was written
    pub fn frame_captured(&mut self) {
        self.captured += 1;
    }

    /// Done once every frame is on disk and the journey has reached its end
    pub fn is_complete(&self, journey_done: bool) -> bool {
        self.captured >= self.total && journey_done
    }
}
