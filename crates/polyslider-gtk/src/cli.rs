use clap::{Args, Parser};
use polyslider::SliderConfig;

#[derive(Parser, Debug)]
#[command(name = "polyslider", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    pub write_config: bool,
}

/// Command line values that take precedence over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Number of concentric levels
    #[arg(short = 'l', long = "levels")]
    pub level_count: Option<usize>,

    /// Number of options (markers)
    #[arg(short = 'o', long = "options")]
    pub option_count: Option<usize>,

    /// Distance between consecutive levels
    #[arg(short = 'r', long)]
    pub radius_delta: Option<f64>,

    /// Level every marker starts on
    #[arg(short = 's', long)]
    pub start_level: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: SliderConfig) -> SliderConfig {
        SliderConfig {
            radius_delta: self.radius_delta.unwrap_or(config.radius_delta),
            level_count: self.level_count.unwrap_or(config.level_count),
            option_count: self.option_count.unwrap_or(config.option_count),
            start_level: self.start_level.or(config.start_level),
        }
    }
}
