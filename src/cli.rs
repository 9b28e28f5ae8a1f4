//! Command-line argument parsing.

use clap::Parser;

use crate::params::{RecordingConfig, SceneParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Snowline")]
#[command(about = "Scroll-driven flight over procedural snowy terrain", long_about = None)]
pub struct Args {
    /// Terrain noise seed
    #[arg(long, value_name = "SEED", default_value = "42")]
    pub seed: u32,

    /// Run without a noise source (flat ground, no trail)
    #[arg(long)]
    pub flat: bool,

    /// Scroll through the whole journey automatically (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub autoplay: Option<f32>,

    /// Record the journey to PNG frames (duration in seconds, implies autoplay)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Number of snowflakes
    #[arg(long, value_name = "COUNT")]
    pub snow: Option<usize>,
}

impl Args {
    /// Fold the arguments into scene parameters
    pub fn apply(&self, params: &mut SceneParams) {
        params.noise_seed = (!self.flat).then_some(self.seed);
        params.scatter_seed = self.seed as u64;
        if let Some(count) = self.snow {
            params.snow.count = count;
        }
    }

    /// Seconds to scroll start to end, if scrolling is automatic
    pub fn autoplay_duration(&self) -> Option<f32> {
        self.record
            .or(self.autoplay)
            .filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> std::io::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration);

        // Create output directories
        std::fs::create_dir_all(config.frames_dir())?;
        std::fs::create_dir_all(&config.output_dir)?;

        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("snowline").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        let mut params = SceneParams::default();
        args.apply(&mut params);
        assert_eq!(params.noise_seed, Some(42));
        assert_eq!(params.snow.count, 2000);
        assert_eq!(args.autoplay_duration(), None);
    }

    #[test]
    fn test_flat_drops_noise_source() {
        let mut params = SceneParams::default();
        parse(&["--flat", "--seed", "7"]).apply(&mut params);
        assert_eq!(params.noise_seed, None);
        assert_eq!(params.scatter_seed, 7);
    }

    #[test]
    fn test_record_implies_autoplay() {
        let args = parse(&["--record", "12", "--autoplay", "30", "--snow", "10"]);
        assert_eq!(args.autoplay_duration(), Some(12.0));
        let mut params = SceneParams::default();
        args.apply(&mut params);
        assert_eq!(params.snow.count, 10);
    }
}
