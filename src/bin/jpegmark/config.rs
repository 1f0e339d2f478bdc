use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};
use log::LevelFilter;

use jpegmark::library::log::LogMode;
use jpegmark::shared::settings::Options;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

// CONFIGURATION //

#[derive(Parser, Debug)]
#[command(name = "jpegmark", version, about = "Show and remove JPEG comments and appended data")]
pub struct Cli {
    /// Show the marker signature of the file
    #[arg(long = "show-sig")]
    pub show_sig: bool,

    /// Print the comment stored in the file
    #[arg(long)]
    pub show_comment: bool,

    /// Print any data appended after the end of the image
    #[arg(long)]
    pub show_tail: bool,

    /// Print the file name in front of its output
    #[arg(long)]
    pub show_filename: bool,

    /// Remove the comment from the file
    #[arg(long)]
    pub delete_comment: bool,

    /// Remove any data appended after the end of the image
    #[arg(long)]
    pub delete_tail: bool,

    /// Keep the modification time of edited files
    #[arg(short = 'k', long = "keepdate")]
    pub keep_date: bool,

    /// Log output: none, file, console, both
    #[arg(short, long, default_value_t = LogMode::Console)]
    pub log: LogMode,

    /// Log file used with --log file or --log both
    #[arg(long, value_name = "PATH", default_value = "jpegmark.log")]
    pub log_file: PathBuf,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// JPEG files to process
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub files: Vec<PathBuf>,
    pub options: Options,
    pub log_mode: LogMode,
    pub log_path: PathBuf,
    pub debug: bool,
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = String;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let any_option = cli.show_sig
            || cli.show_comment
            || cli.show_tail
            || cli.show_filename
            || cli.delete_comment
            || cli.delete_tail;

        let mut options = Options {
            show_signature: cli.show_sig,
            show_comment: cli.show_comment,
            show_tail: cli.show_tail,
            show_filename: cli.show_filename,
            delete_tail: cli.delete_tail,
            delete_comment: cli.delete_comment,
            keep_date: cli.keep_date,
        };

        if any_option {
            validate(&options)?;
        } else {
            options.show_signature = true;
            options.show_filename = true;
        }

        Ok(Config {
            files: cli.files,
            options,
            log_mode: cli.log,
            log_path: cli.log_file,
            debug: cli.debug,
        })
    }
}

/// Rejects option combinations whose output would be unreadable. This is a
/// usability rule of the command line, not a limit of the library.
pub fn validate(options: &Options) -> Result<(), String> {
    if options.show_signature && options.show_comment {
        return Err("Do not show the signature when showing the comment".into());
    }
    if options.show_signature && options.edits() {
        return Err("Show signature makes no sense when deleting anything".into());
    }
    Ok(())
}

fn help_footer() -> String {
    format!(
        "Defaults to --show-filename and --show-sig if no options are given.\n\n{} v{} ({}, {})\n© {} {} - Licensed under {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_TARGET,
        BUILD_YEAR,
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_LICENSE")
    )
}

/// Parses the process arguments. Clap handles `--help`, `--version` and
/// malformed input itself and exits.
pub fn parse_arguments() -> Result<Config, String> {
    let matches = Cli::command().after_help(help_footer()).get_matches();
    let cli = Cli::from_arg_matches(&matches).map_err(|e| e.to_string())?;
    Config::try_from(cli)
}
