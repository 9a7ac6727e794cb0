//! Logger setup for the `tourbound` binary.
//!
//! Library code logs through the `log` facade only; this module is the one
//! place a backend is installed.

use std::io::{self, Write};

use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter};

/// Verbosity accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    #[must_use]
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

/// Install an stderr logger at `level`. Fails if a logger is already set.
///
/// # Errors
///
/// Returns an I/O error wrapping the `SetLoggerError`.
pub fn init_logger(level: LogLevel) -> io::Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} {} [{}] {}",
                buf.timestamp_millis(),
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });

    builder.try_init().map_err(io::Error::other)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
