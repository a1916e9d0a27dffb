//! Log line formatting.
//!
//! One line per event:
//!
//! ```text
//! 2026-08-24 12:00:00.123 | 9f8a... | INFO  | process[312] | thread[4] | itemstore_server::server:42 - message
//! ```
//!
//! The correlation field is resolved through [`RequestId::current`] at
//! format time, on the emitting task, so every line carries the id of the
//! request that produced it (or `-` outside any request scope).

use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::correlation::RequestId;

const ANSI_RESET: &str = "\x1b[0m";

/// Line-oriented event formatter, optionally ANSI-colorized by level.
///
/// The location segment is `target:line`. `tracing` callsite metadata
/// carries the module path and line but no enclosing function name, so
/// no function segment can be rendered.
pub struct LineFormat {
    ansi: bool,
}

impl LineFormat {
    /// `ansi` enables per-level coloring (console sink only).
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m", // red
        Level::WARN => "\x1b[33m",  // yellow
        Level::INFO => "\x1b[32m",  // green
        Level::DEBUG => "\x1b[34m", // blue
        Level::TRACE => "\x1b[35m", // magenta
    }
}

/// Numeric id of the calling thread.
///
/// `std::thread::ThreadId` exposes no stable accessor, so this parses the
/// Debug rendering (`ThreadId(N)`).
fn current_thread_id() -> u64 {
    let repr = format!("{:?}", std::thread::current().id());
    repr.trim_start_matches("ThreadId(")
        .trim_end_matches(')')
        .parse()
        .unwrap_or(0)
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
        let meta = event.metadata();

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        write!(writer, "{} | ", timestamp)?;

        let request_id = RequestId::current();
        let request_id = request_id.as_ref().map(RequestId::as_str).unwrap_or("-");
        write!(writer, "{} | ", request_id)?;

        if self.ansi {
            write!(
                writer,
                "{}{:^5}{}",
                level_color(meta.level()),
                meta.level().as_str(),
                ANSI_RESET
            )?;
        } else {
            write!(writer, "{:^5}", meta.level().as_str())?;
        }

        write!(
            writer,
            " | process[{}] | thread[{}] | ",
            std::process::id(),
            current_thread_id()
        )?;

        match meta.line() {
            Some(line) => write!(writer, "{}:{}", meta.target(), line)?,
            None => write!(writer, "{}", meta.target())?,
        }
        write!(writer, " - ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
