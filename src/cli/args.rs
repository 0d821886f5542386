use std::path::PathBuf;
use std::time::Duration;
use clap::{ArgAction, Parser};
use crate::models::config::DEFAULT_TOOL_TIMEOUT_SECS;
use crate::models::Config;

/// FontPack command-line arguments
///
/// Examples:
///   FontPack                               # ./fonts -> ./output
///   FontPack -d ~/Fonts/Alpha -o site/fonts
///   FontPack --force --no-woff2            # rebuild without compression
#[derive(Parser, Debug, Clone)]
#[command(
    name = "FontPack",
    version,
    disable_version_flag = true,
    about = "Package a directory of fonts for self-hosting on the web",
    long_about = "Reads the name table of every .ttf/.otf font in a directory, copies the fonts \
                  (plus WOFF2 versions) into an output directory, and writes a fonts.css stylesheet \
                  and a README.md manifest with checksums and Content-Security-Policy hashes."
)]
pub struct Cli {
    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Directory containing the font files
    #[arg(short = 'd', long = "dir", value_name = "DIR", default_value = "./fonts")]
    pub dir: PathBuf,

    /// Directory the package is written to
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = "./output")]
    pub output: PathBuf,

    /// Replace the output directory if it already exists
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Skip WOFF2 conversion
    #[arg(long = "no-woff2")]
    pub no_woff2: bool,

    /// Show debug output
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Read name tables in-process instead of running ttx
    #[arg(long = "builtin-dump")]
    pub builtin_dump: bool,

    /// Number of fonts processed at once
    #[arg(short = 'j', long = "jobs", value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// Seconds each external tool may run before it is killed
    #[arg(long = "timeout", value_name = "SECS", default_value_t = DEFAULT_TOOL_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Cli {
    /// Build the run configuration from parsed arguments
    pub fn into_config(self) -> Config {
        Config {
            input_dir: self.dir,
            output_dir: self.output,
            force: self.force,
            convert_woff2: !self.no_woff2,
            verbose: self.verbose,
            builtin_dump: self.builtin_dump,
            jobs: self.jobs.max(1),
            tool_timeout: Duration::from_secs(self.timeout.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults() {
        let config = Cli::try_parse_from(["FontPack"]).unwrap().into_config();
        assert_eq!(config.input_dir, PathBuf::from("./fonts"));
        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert!(!config.force);
        assert!(config.convert_woff2);
        assert!(!config.verbose);
        assert_eq!(config.jobs, 1);
        assert_eq!(config.tool_timeout, Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS));
    }

    #[test]
    fn short_and_long_flags() {
        let config = Cli::try_parse_from([
            "FontPack", "-d", "in", "-o", "out", "-f", "--no-woff2", "--verbose", "-j", "0",
        ])
        .unwrap()
        .into_config();
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.force);
        assert!(!config.convert_woff2);
        assert!(config.verbose);
        assert_eq!(config.jobs, 1);
    }

    #[test]
    fn help_and_version_short_circuit() {
        let err = Cli::try_parse_from(["FontPack", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        let err = Cli::try_parse_from(["FontPack", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["FontPack", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
