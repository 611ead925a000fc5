//! Logger initialization for the digest binary.
//!
//! Terminal output goes to stderr so stdout carries only the report. The log
//! file is recreated on every start.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILE: &str = "./news_digest.log";

/// Initialize the global logger on stderr and in the log file at `path`.
///
/// The level comes from `NEWS_DIGEST_LOG`. If the file cannot be created
/// only the terminal logger is installed.
pub fn initialize(path: &Path) {
    let level = digest_logging::level_from_env(LevelFilter::Info);
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![terminal_logger(level, config.clone())];
    if let Some(file_logger) = create_file_logger(path, level, config) {
        loggers.push(file_logger);
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

/// Truncates any previous log so each run starts with an empty file.
fn create_file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_truncated_on_start() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("news_digest.log");
        std::fs::write(&path, "previous run").unwrap();

        let logger = create_file_logger(&path, LevelFilter::Info, build_config());

        assert!(logger.is_some());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn missing_directory_disables_file_logging() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent").join("news_digest.log");
        assert!(create_file_logger(&path, LevelFilter::Info, build_config()).is_none());
    }
}
