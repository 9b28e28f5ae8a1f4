//! Scroll signal and its mapping to path parameters.
//!
//! The scroll offset is the only per-frame input of the scene. Input events
//! move a target offset; the visible offset eases toward it.

use crate::params::{ScrollParams, SECTION_TITLES};

/// Path parameter for an agent riding `lead` ahead of the scroll position
///
/// Clamped to [0, 1] so no agent ever extrapolates past the path ends.
pub fn path_param(scroll_offset: f32, lead: f32) -> f32 {
    let t = scroll_offset + lead;
    if t.is_finite() {
        t.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Native stand-in for a paged scroll container
#[derive(Debug, Clone)]
pub struct ScrollController {
    params: ScrollParams,
    target: f32,
    offset: f32,
    /// Full journey duration when scrolling automatically (seconds)
    autoplay_s: Option<f32>,
}

impl ScrollController {
    pub fn new(params: ScrollParams) -> Self {
        Self {
            params,
            target: 0.0,
            offset: 0.0,
            autoplay_s: None,
        }
    }

    /// Scroll from top to bottom on its own over `duration_s`
    pub fn with_autoplay(mut self, duration_s: f32) -> Self {
        if duration_s > 0.0 {
            self.autoplay_s = Some(duration_s);
        }
        self
    }

    /// Current eased offset in [0, 1]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay_s.is_some()
    }

    /// Wheel scrolled by whole lines (positive = down the page)
    pub fn scroll_lines(&mut self, lines: f32) {
        self.set_target(self.target + lines * self.params.wheel_line_step);
    }

    /// Trackpad scrolled by pixels in a viewport of the given height
    pub fn scroll_pixels(&mut self, pixels: f32, viewport_height: f32) {
        let scrollable = viewport_height * (self.params.pages.max(2) - 1) as f32;
        if scrollable > 0.0 {
            self.set_target(self.target + pixels / scrollable);
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = clamp_unit(target);
    }

    /// Jump to the start of a section page
    pub fn jump_to_section(&mut self, section: usize) {
        let last = self.params.pages.max(2) - 1;
        self.set_target(section.min(last) as f32 / last as f32);
    }

    pub fn next_section(&mut self) {
        self.jump_to_section(self.target_section() + 1);
    }

    pub fn previous_section(&mut self) {
        self.jump_to_section(self.target_section().saturating_sub(1));
    }

    /// Advance by `dt_s`; returns the new offset
    pub fn update(&mut self, dt_s: f32) -> f32 {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };

        // Autoplay is already smooth: the offset follows it without easing so
        // the last frame of the run lands exactly on the end of the path
        if let Some(duration) = self.autoplay_s {
            let step = dt_s / duration;
            let next = self.target + step;
            // Less than half a step left is float drift, not distance
            self.set_target(if 1.0 - next <= step * 0.5 { 1.0 } else { next });
            self.offset = self.target;
            return self.offset;
        }

        let alpha = if self.params.damping_s > 0.0 {
            1.0 - (-dt_s / self.params.damping_s).exp()
        } else {
            1.0
        };
        self.offset = clamp_unit(self.offset + (self.target - self.offset) * alpha);
        if (self.target - self.offset).abs() < 1e-5 {
            self.offset = self.target;
        }
        self.offset
    }

    /// Section page nearest to the visible offset
    pub fn section(&self) -> usize {
        self.section_at(self.offset)
    }

    fn target_section(&self) -> usize {
        self.section_at(self.target)
    }

    fn section_at(&self, offset: f32) -> usize {
        let last = self.params.pages.max(2) - 1;
        ((offset * last as f32).round() as usize).min(last)
    }

    pub fn section_title(&self) -> &'static str {
        SECTION_TITLES
            .get(self.section())
            .copied()
            .unwrap_or("Unknown")
    }

    /// Offset reached the end of the page
    pub fn at_end(&self) -> bool {
        self.offset >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RecordingConfig;

    #[test]
    fn test_path_param_clamps_and_is_monotonic() {
        for lead in [0.0, 0.08, 0.5, 1.0] {
            let mut last = path_param(0.0, lead);
            for i in 0..=1000 {
                let s = i as f32 / 1000.0;
                let t = path_param(s, lead);
                assert!(t <= 1.0, "t={} above 1 for s={} lead={}", t, s, lead);
                assert!(t >= last, "t decreased at s={} lead={}", s, lead);
                last = t;
            }
        }
    }

    #[test]
    fn test_path_param_values() {
        assert_eq!(path_param(0.0, 0.0), 0.0);
        assert!((path_param(0.5, 0.08) - 0.58).abs() < 1e-6);
        assert_eq!(path_param(0.95, 0.08), 1.0);
        assert_eq!(path_param(-0.3, 0.0), 0.0);
        assert_eq!(path_param(f32::NAN, 0.08), 0.0);
    }

    #[test]
    fn test_offset_eases_toward_target() {
        let mut scroll = ScrollController::new(ScrollParams::default());
        scroll.set_target(1.0);

        let first = scroll.update(1.0 / 60.0);
        assert!(first > 0.0 && first < 1.0, "first step {}", first);

        let mut last = first;
        for _ in 0..600 {
            let next = scroll.update(1.0 / 60.0);
            assert!(next >= last);
            last = next;
        }
        assert_eq!(scroll.offset(), 1.0);
        assert!(scroll.at_end());
    }

    #[test]
    fn test_wheel_and_pixels_clamp_target() {
        let mut scroll = ScrollController::new(ScrollParams::default());
        scroll.scroll_lines(-10.0);
        assert_eq!(scroll.target(), 0.0);

        scroll.scroll_lines(5.0);
        assert!((scroll.target() - 0.1).abs() < 1e-6);

        // Six viewports of scrollable height
        scroll.scroll_pixels(720.0 * 3.0, 720.0);
        assert!((scroll.target() - 0.6).abs() < 1e-5);

        scroll.scroll_pixels(1e9, 720.0);
        assert_eq!(scroll.target(), 1.0);
    }

    #[test]
    fn test_sections_follow_offset() {
        let mut scroll = ScrollController::new(ScrollParams::default());
        assert_eq!(scroll.section_title(), "Intro");

        scroll.jump_to_section(2);
        assert!((scroll.target() - 2.0 / 6.0).abs() < 1e-6);
        scroll.next_section();
        assert!((scroll.target() - 0.5).abs() < 1e-6);
        scroll.previous_section();
        scroll.previous_section();
        assert!((scroll.target() - 1.0 / 6.0).abs() < 1e-6);

        scroll.jump_to_section(99);
        for _ in 0..600 {
            scroll.update(1.0 / 60.0);
        }
        assert_eq!(scroll.section(), 6);
        assert_eq!(scroll.section_title(), "Let's Connect");
    }

    #[test]
    fn test_autoplay_reaches_end_on_last_recorded_frame() {
        for duration in [1.01, 2.0, 5.0, 10.0, 30.0] {
            let recording = RecordingConfig::new(duration);
            let mut scroll =
                ScrollController::new(ScrollParams::default()).with_autoplay(duration);
            assert!(scroll.is_autoplaying());

            let frames = recording.total_frames();
            for _ in 0..frames - 1 {
                scroll.update(recording.frame_dt());
            }
            assert!(!scroll.at_end(), "{}s run ended a frame early", duration);

            scroll.update(recording.frame_dt());
            assert_eq!(scroll.offset(), 1.0, "{}s run stopped short", duration);
            assert!(scroll.at_end());
        }
    }

    #[test]
    fn test_autoplay_is_linear_in_time() {
        let mut scroll = ScrollController::new(ScrollParams::default()).with_autoplay(4.0);
        for _ in 0..120 {
            scroll.update(1.0 / 60.0);
        }
        assert!((scroll.offset() - 0.5).abs() < 1e-4, "offset {}", scroll.offset());
        assert_eq!(scroll.offset(), scroll.target());
    }
}
