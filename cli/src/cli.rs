use std::path::PathBuf;

use clap::{Parser, Subcommand};

use snapimg_core::config::{ProcessingConfig, TargetFormat, DEFAULT_ARCHIVE_NAME};

/// Batch image converter: JPG, PNG or WebP, one file or a ZIP archive out
#[derive(Debug, Parser)]
#[command(name = "snapimg", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert images and save the result (a single file, or a ZIP for several)
    Convert {
        /// Input files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Target format (jpg, png, webp)
        #[arg(long, short = 't', value_name = "FORMAT", default_value_t = TargetFormat::Jpg)]
        to: TargetFormat,

        /// Quality for lossy formats (0-100)
        #[arg(short, long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(0..=100))]
        quality: u8,

        /// Number of files converted at the same time (default: one per CPU)
        #[arg(short = 'j', long, value_parser = clap::value_parser!(u16).range(1..))]
        jobs: Option<u16>,

        /// Drop the file at this position (0-based, as listed by `preview`) before converting
        #[arg(long, value_name = "INDEX")]
        exclude: Vec<usize>,

        /// Name of the archive written when more than one file converts
        #[arg(long, default_value = DEFAULT_ARCHIVE_NAME)]
        archive_name: String,

        /// Process directories recursively
        #[arg(short, long)]
        recursive: bool,
    },

    /// Write a PNG thumbnail for every input and list selection indexes
    Preview {
        /// Input files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory for thumbnails
        #[arg(short, long)]
        output: PathBuf,

        /// Longest thumbnail edge in pixels
        #[arg(long, default_value_t = 160)]
        size: u32,

        /// Process directories recursively
        #[arg(short, long)]
        recursive: bool,
    },

    /// List the available conversion tools
    Tools,
}

impl Cli {
    pub fn to_config(&self, cmd_quality: u8, cmd_jobs: Option<u16>, cmd_archive_name: &str) -> ProcessingConfig {
        let defaults = ProcessingConfig::default();
        ProcessingConfig {
            quality: cmd_quality,
            concurrency: cmd_jobs.map(usize::from).unwrap_or(defaults.concurrency),
            archive_name: cmd_archive_name.to_string(),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_flags() {
        let cli = Cli::try_parse_from([
            "snapimg", "convert", "a.png", "b.gif", "-t", "webp", "-q", "70", "-j", "2",
            "--exclude", "1", "-o", "out",
        ])
        .unwrap();
        match cli.command {
            Command::Convert {
                inputs,
                to,
                quality,
                jobs,
                exclude,
                archive_name,
                ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(to, TargetFormat::Webp);
                assert_eq!(quality, 70);
                assert_eq!(jobs, Some(2));
                assert_eq!(exclude, [1]);
                assert_eq!(archive_name, DEFAULT_ARCHIVE_NAME);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["snapimg", "convert", "a.png", "-t", "bmp"]).is_err());
    }

    #[test]
    fn config_takes_flag_values() {
        let cli = Cli::try_parse_from(["snapimg", "-v", "tools"]).unwrap();
        let config = cli.to_config(60, Some(3), "batch.zip");
        assert!(cli.verbose);
        assert_eq!(config.quality, 60);
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.archive_name, "batch.zip");
        assert_eq!(config.thumbnail_size, 160);
    }
}
