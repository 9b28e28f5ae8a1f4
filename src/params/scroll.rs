//! Scroll signal configuration.

/// Overlay sections, one per page, in scroll order
pub const SECTION_TITLES: [&str; 7] = [
    "Intro",
    "About Me",
    "Skills",
    "Certifications",
    "Job Simulations",
    "Featured Projects",
    "Let's Connect",
];

/// Scroll container behaviour
#[derive(Debug, Clone)]
pub struct ScrollParams {
    /// Number of full-height pages the offset spans
    pub pages: usize,

    /// Time constant of the eased offset (seconds)
    pub damping_s: f32,

    /// Offset moved per wheel line
    pub wheel_line_step: f32,
}

impl Default for ScrollParams {
    fn default() -> Self {
        Self {
            pages: SECTION_TITLES.len(),
            damping_s: 0.3,
            wheel_line_step: 0.02,
        }
    }
}
