mod config;

use std::io::{self, Write};
use std::process::ExitCode;

use jpegmark::library::error::{JpegError, Operation};
use jpegmark::library::log::{LogMode, init_logging};
use jpegmark::shared::process::process_file;
use log::{debug, error};

use config::parse_arguments;

fn main() -> ExitCode {
    let config = match parse_arguments() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.log_mode, &config.log_path, config.log_level());
    debug!("Configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;

    // One file at a time; a failure never stops the batch.
    for path in &config.files {
        let result = process_file(path, &config.options, &mut out);
        // Flush the display before any error text goes to stderr.
        if let Err(e) = out.flush() {
            report_failure(config.log_mode, &JpegError::io(Operation::Report, path, e));
            failed = true;
        }

        match result {
            Ok(report) => {
                for e in &report.edit_errors {
                    report_failure(config.log_mode, e);
                }
                failed |= !report.is_clean();
            }
            Err(e) => {
                report_failure(config.log_mode, &e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Makes sure every failure reaches the terminal exactly once.
fn report_failure(mode: LogMode, e: &JpegError) {
    match mode {
        LogMode::Console | LogMode::Both => error!("{}", e),
        LogMode::FileOnly => {
            error!("{}", e);
            eprintln!("[ERROR] {}", e);
        }
        LogMode::None => eprintln!("[ERROR] {}", e),
    }
}
