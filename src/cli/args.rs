//! Command-line argument parsing for convergeviz
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::cli::config::Config;
use crate::series::SeriesKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// convergeviz - Watch a convergent series approach its limit
#[derive(Parser, Debug)]
#[command(name = "convergeviz")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(about = "Step a convergent series to its limit and animate the partial sums", long_about = None)]
pub struct Args {
    /// Number of terms to sum (the timeline's max index)
    #[arg(short = 'n', long)]
    pub max_index: Option<u64>,

    /// Series to sum
    #[arg(long, value_enum)]
    pub series: Option<SeriesArg>,

    /// Exponent for the p-series (implies --series p-series)
    #[arg(long)]
    pub exponent: Option<f64>,

    /// Ratio for the geometric series (implies --series geometric)
    #[arg(long)]
    pub ratio: Option<f64>,

    /// Playback speed multiplier (0 = no pacing, otherwise at least 0.001)
    #[arg(long)]
    pub speed: Option<f64>,

    /// Record render commands instead of drawing them
    #[arg(long)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress everything but the animation or export)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Animate the partial sums in the terminal (default)
    Play,

    /// Compute every frame and export them
    Frames {
        /// Output format
        #[arg(long, value_enum, default_value_t = FrameFormat::Json)]
        format: FrameFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display current configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Series names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesArg {
    Basel,
    PSeries,
    Geometric,
}

/// Frame export formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    Json,
    Table,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Check flag combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose > 0 {
            return Err("Cannot combine --quiet with --verbose.".to_string());
        }

        if self.exponent.is_some() && self.ratio.is_some() {
            return Err("--exponent and --ratio select different series; pass only one.".to_string());
        }

        match (self.series, self.exponent, self.ratio) {
            (Some(SeriesArg::Basel), Some(_), _) | (Some(SeriesArg::Basel), _, Some(_)) => {
                return Err("The basel series takes no --exponent or --ratio.".to_string());
            }
            (Some(SeriesArg::PSeries), _, Some(_)) => {
                return Err("--ratio does not apply to the p-series.".to_string());
            }
            (Some(SeriesArg::Geometric), Some(_), _) => {
                return Err("--exponent does not apply to the geometric series.".to_string());
            }
            _ => {}
        }

        Ok(())
    }

    /// Series selected on the command line, if any
    pub fn series_override(&self) -> Option<SeriesKind> {
        match self.series {
            Some(SeriesArg::Basel) => Some(SeriesKind::Basel),
            Some(SeriesArg::PSeries) => Some(SeriesKind::PSeries {
                p: self.exponent.unwrap_or(2.0),
            }),
            Some(SeriesArg::Geometric) => Some(SeriesKind::Geometric {
                ratio: self.ratio.unwrap_or(0.5),
            }),
            None => match (self.exponent, self.ratio) {
                (Some(p), _) => Some(SeriesKind::PSeries { p }),
                (None, Some(ratio)) => Some(SeriesKind::Geometric { ratio }),
                (None, None) => None,
            },
        }
    }

    /// Overlay command-line flags onto a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(max_index) = self.max_index {
            config.timeline.max_index = max_index;
        }
        if let Some(series) = self.series_override() {
            config.timeline.series = series;
        }
        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }
        if self.no_color {
            config.display.color_output = false;
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the config-file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show progress bars and summaries
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show detailed events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Check if should print the per-index sum trace
    pub fn show_trace(&self) -> bool {
        matches!(self, Verbosity::VeryVerbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbosity_quiet() {
        assert_eq!(parse(&["convergeviz", "-q"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["convergeviz"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["convergeviz", "-v"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["convergeviz", "-vv"]).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(parse(&["convergeviz", "play"]).command, Some(Commands::Play));
        assert_eq!(
            parse(&["convergeviz", "frames", "--format", "table"]).command,
            Some(Commands::Frames {
                format: FrameFormat::Table,
                output: None
            })
        );
        assert_eq!(
            parse(&["convergeviz", "config", "--init"]).command,
            Some(Commands::Config { init: true })
        );
        assert!(parse(&["convergeviz"]).command.is_none());
    }

    #[test]
    fn test_validate_quiet_and_verbose() {
        assert!(parse(&["convergeviz", "-q", "-v"]).validate().is_err());
    }

    #[test]
    fn test_validate_series_params() {
        assert!(parse(&["convergeviz", "--exponent", "3", "--ratio", "0.5"])
            .validate()
            .is_err());
        assert!(parse(&["convergeviz", "--series", "basel", "--exponent", "3"])
            .validate()
            .is_err());
        assert!(parse(&["convergeviz", "--series", "geometric", "--exponent", "3"])
            .validate()
            .is_err());
        assert!(parse(&["convergeviz", "--series", "p-series", "--exponent", "3"])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_series_override() {
        assert_eq!(parse(&["convergeviz"]).series_override(), None);
        assert_eq!(
            parse(&["convergeviz", "--exponent", "4"]).series_override(),
            Some(SeriesKind::PSeries { p: 4.0 })
        );
        assert_eq!(
            parse(&["convergeviz", "--series", "geometric"]).series_override(),
            Some(SeriesKind::Geometric { ratio: 0.5 })
        );
    }

    #[test]
    fn test_apply_to_config() {
        let mut config = Config::default();
        let args = parse(&["convergeviz", "-n", "25", "--speed", "0", "--no-color"]);
        args.apply_to(&mut config);

        assert_eq!(config.timeline.max_index, 25);
        assert_eq!(config.playback.speed, 0.0);
        assert!(!config.display.color_output);
        assert_eq!(config.timeline.series, SeriesKind::Basel);
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());

        assert!(!Verbosity::Normal.show_events());
        assert!(Verbosity::Verbose.show_events());

        assert!(!Verbosity::Verbose.show_trace());
        assert!(Verbosity::VeryVerbose.show_trace());
    }

    #[test]
    fn test_verbosity_names() {
        for v in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::VeryVerbose,
        ] {
            assert_eq!(Verbosity::from_name(v.as_str()), Some(v));
        }
        assert_eq!(Verbosity::from_name("loud"), None);
    }
}
