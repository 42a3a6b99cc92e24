use std::io::Write;

use anyhow::{anyhow, Result};
use env_logger::{Builder, Target, WriteStyle};

use crate::options::{LogFormat, LogOptions};

/// Installs the global logger on stderr; stdout is reserved for results.
pub fn init_logger(options: &LogOptions) -> Result<()> {
    let LogOptions { level, format, timestamp } = *options;

    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf, record| {
            if timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            if format == LogFormat::Pretty {
                write!(buf, "{:<5} [{}] ", record.level(), record.target())?;
            } else {
                write!(buf, "{} ", record.level())?;
            }
            writeln!(buf, "{}", record.args())
        })
        .try_init()
        .map_err(|e| anyhow!("logger init failed: {e}"))
}
