//! Counts of consecutive equal keys in a key-sorted stream.
//!
//! Sortedness is assumed, not checked. A key that reappears after a different
//! key starts a fresh run.

use std::fmt;

use super::{LineReducer, SkipReason};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunRecord {
    pub key: String,
    pub count: usize,
}

impl RunRecord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            count: 1,
        }
    }
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.count)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunLengthCounter {
    current: Option<RunRecord>,
}

impl RunLengthCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineReducer for RunLengthCounter {
    type Item = RunRecord;

    fn consume(&mut self, key: &str) -> Result<Option<RunRecord>, SkipReason> {
        if let Some(run) = self.current.as_mut() {
            if run.key == key {
                run.count += 1;
                return Ok(None);
            }
        }
        Ok(self.current.replace(RunRecord::new(key)))
    }

    /// Flushes the pending run. An empty stream has none, so nothing is
    /// emitted.
    fn finish(self) -> Option<RunRecord> {
        self.current
    }
}
