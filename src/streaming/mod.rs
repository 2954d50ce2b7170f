//! Single-pass line processors.
//!
//! Each processor is a [`LineReducer`]: it sees every trimmed, non-blank line
//! once, may emit an item per line, and may emit one more item when the stream
//! ends. [`run`] drives a reducer over a reader and hands emitted items to a
//! sink; [`collect`] gathers them into a `Vec`.
//!
//! Lines a reducer rejects are reported as a [`SkipReason`]. In
//! [`Mode::Lenient`] they are dropped and counted; in [`Mode::Strict`] the
//! first one aborts the run.
//!
//! ```rust
//! use coursework::streaming::{self, RunLengthCounter, StreamConfig};
//! use std::io::Cursor;
//!
//! let input = Cursor::new("a\na\nb\n");
//! let (runs, report) =
//!     streaming::collect(input, RunLengthCounter::new(), &StreamConfig::default()).unwrap();
//!
//! assert_eq!(runs.len(), 2);
//! assert_eq!(report.skipped, 0);
//! ```

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{CourseworkError, Result};

pub mod average;
pub mod literal;
pub mod run_length;
pub mod tweets;

pub use average::{CountPolicy, Mean, StreamAverager};
pub use run_length::{RunLengthCounter, RunRecord};
pub use tweets::TweetUserExtractor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Drop rejected lines and keep going.
    #[default]
    Lenient,
    /// Fail on the first rejected line.
    Strict,
}

#[derive(Clone, Debug, Default)]
pub struct StreamConfig {
    pub mode: Mode,
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.mode = if strict { Mode::Strict } else { Mode::Lenient };
        self
    }
}

/// Why a reducer refused a line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("missing field {0}")]
    MissingField(&'static str),
    /// The field holds a list, tuple, set or dict. Such values are not
    /// rendered back to literal notation; the line is skipped instead of
    /// printing something like `['a']`.
    #[error("field {0} is not a scalar")]
    NotScalar(&'static str),
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Line counts for one run over a stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    /// Non-blank lines handed to the reducer.
    pub lines_read: usize,
    pub skipped: usize,
    pub emitted: usize,
}

pub trait LineReducer {
    type Item;

    /// Processes one trimmed, non-blank line.
    fn consume(&mut self, line: &str) -> std::result::Result<Option<Self::Item>, SkipReason>;

    /// Called once after the last line.
    fn finish(self) -> Option<Self::Item>;
}

/// Feeds every non-blank line of `reader` to `reducer`, passing emitted items
/// to `emit` as soon as they are produced.
///
/// Lines that are not valid UTF-8 are rejected like any other bad line.
pub fn run<R, L, F>(
    mut reader: R,
    mut reducer: L,
    config: &StreamConfig,
    mut emit: F,
) -> Result<StreamReport>
where
    R: BufRead,
    L: LineReducer,
    F: FnMut(L::Item) -> Result<()>,
{
    let mut report = StreamReport::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let outcome = match std::str::from_utf8(&buf) {
            Ok(text) => {
                let line = text.trim();
                if line.is_empty() {
                    continue;
                }
                reducer.consume(line)
            }
            Err(_) => Err(SkipReason::InvalidUtf8),
        };
        report.lines_read += 1;

        match outcome {
            Ok(Some(item)) => {
                emit(item)?;
                report.emitted += 1;
            }
            Ok(None) => {}
            Err(reason) => match config.mode {
                Mode::Strict => {
                    return Err(CourseworkError::Line { line_no, reason });
                }
                Mode::Lenient => {
                    debug!(line_no, %reason, "skipping line");
                    report.skipped += 1;
                }
            },
        }
    }

    if let Some(item) = reducer.finish() {
        emit(item)?;
        report.emitted += 1;
    }

    if report.skipped > 0 {
        warn!(
            skipped = report.skipped,
            lines = report.lines_read,
            "some input lines were skipped"
        );
    }

    Ok(report)
}

/// [`run`], collecting emitted items.
pub fn collect<R, L>(
    reader: R,
    reducer: L,
    config: &StreamConfig,
) -> Result<(Vec<L::Item>, StreamReport)>
where
    R: BufRead,
    L: LineReducer,
{
    let mut items = Vec::new();
    let report = run(reader, reducer, config, |item| {
        items.push(item);
        Ok(())
    })?;
    Ok((items, report))
}
