use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

const RESET: &str = "\x1b[0m";

/// Formats events as `[YYYY-MM-DD HH:MM:SS] [LEVEL] message`
#[derive(Debug, Clone, Copy)]
pub struct LineFormat {
    ansi: bool,
}

impl LineFormat {
    pub fn plain() -> Self {
        Self { ansi: false }
    }

    pub fn colored() -> Self {
        Self { ansi: true }
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = event.metadata().level();
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if self.ansi {
            write!(writer, "[{}] {}[{}]{} ", timestamp, level_color(level), level.as_str(), RESET)?;
        } else {
            write!(writer, "[{}] [{}] ", timestamp, level.as_str())?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file that can be attached after logging has started.
///
/// Until [`LogFile::attach`] is called, events written here are dropped.
#[derive(Debug, Clone, Default)]
pub struct LogFile {
    file: Arc<Mutex<Option<File>>>,
}

impl LogFile {
    /// Start appending plain log lines to `path`
    pub fn attach(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        if let Ok(mut slot) = self.file.lock() {
            *slot = Some(file);
        }
        Ok(())
    }
}

pub struct LogFileWriter {
    file: Arc<Mutex<Option<File>>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.lock() {
            Ok(mut slot) => match slot.as_mut() {
                Some(file) => file.write(buf),
                None => Ok(buf.len()),
            },
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.lock() {
            Ok(mut slot) => match slot.as_mut() {
                Some(file) => file.flush(),
                None => Ok(()),
            },
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Install the console + log file subscriber.
///
/// Returns the log file handle so the pipeline can attach it once the
/// output directory exists.
pub fn init_logging(verbose: bool) -> LogFile {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let log_file = LogFile::default();

    let console = tracing_subscriber::fmt::layer()
        .event_format(LineFormat::colored())
        .with_writer(io::stdout)
        .with_filter(level);
    let file = tracing_subscriber::fmt::layer()
        .event_format(LineFormat::plain())
        .with_ansi(false)
        .with_writer(log_file.clone())
        .with_filter(level);

    // A subscriber may already be installed (tests); keep it
    let _ = tracing_subscriber::registry().with(console).with(file).try_init();
    log_file
}
