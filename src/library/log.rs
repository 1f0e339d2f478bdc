use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    None,
    #[default]
    Console,
    FileOnly,
    Both,
}

impl FromStr for LogMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "none" => Ok(LogMode::None),
            "console" => Ok(LogMode::Console),
            "file" => Ok(LogMode::FileOnly),
            "both" => Ok(LogMode::Both),
            _ => Err("Invalid value for --log (use: none, file, console, both)".into()),
        }
    }
}

impl fmt::Display for LogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogMode::None => "none",
            LogMode::Console => "console",
            LogMode::FileOnly => "file",
            LogMode::Both => "both",
        })
    }
}

/// Initializes logging: console, file, or both.
///
/// Console output goes to stderr so it never mixes with the signature and
/// comment output on stdout.
pub fn init_logging(mode: LogMode, log_file: &Path, level: LevelFilter) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    if matches!(mode, LogMode::Console | LogMode::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    if matches!(mode, LogMode::FileOnly | LogMode::Both) {
        match File::create(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(e) => eprintln!("Failed to create log file at {:?}: {}", log_file, e),
        }
    }

    if loggers.is_empty() {
        return;
    }

    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}
