//! Terminal logger.
//!
//! Info and debug go to stdout, warnings and errors to stderr. With
//! `--logfile` every line is mirrored to the file with ANSI codes removed.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use crate::CliError;

struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    fn format(&self, record: &Record) -> String {
        let stream = stream_for(record.level());
        let message = record.args().to_string();
        let line = match record.level() {
            Level::Error => format!(
                "{} {}",
                "error:".if_supports_color(stream, |t| t.red()),
                message
            ),
            Level::Warn => format!(
                "{} {}",
                "warning:".if_supports_color(stream, |t| t.yellow()),
                message
            ),
            Level::Info => message,
            Level::Debug | Level::Trace => {
                format!("{}", message.if_supports_color(stream, |t| t.dimmed()))
            }
        };

        if self.timestamps {
            let now = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
            format!("{} {}", now.if_supports_color(stream, |t| t.dimmed()), line)
        } else {
            line
        }
    }
}

fn stream_for(level: Level) -> owo_colors::Stream {
    match level {
        Level::Error | Level::Warn => Stderr,
        _ => Stdout,
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record);
        match stream_for(record.level()) {
            Stderr => eprintln!("{line}"),
            _ => println!("{line}"),
        }
        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let _ = writeln!(f, "{}", strip_ansi_escapes::strip_str(&line));
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let _ = f.flush();
        }
    }
}

fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the logger. `--verbose` wins over `--quiet`.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = level_for(quiet, verbose);
    let file = logfile.map(File::create).transpose()?.map(Mutex::new);

    log::set_boxed_logger(Box::new(CliLogger {
        level,
        timestamps: verbose,
        file,
    }))
    .map_err(|e| CliError::logging(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
