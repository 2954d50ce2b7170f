//! Mean of a stream of numeric lines.

use std::fmt;

use super::{LineReducer, SkipReason};

/// How [`StreamAverager`] counts toward the divisor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountPolicy {
    /// Divide by the number of values that parsed.
    #[default]
    Exact,
    /// Start the count at 1 and bump it for every non-blank line before
    /// parsing, malformed lines included. Matches the historical reducer
    /// output, which under-reports the mean.
    Legacy,
}

/// Output form of a mean: always shows a fractional part, so `36` prints as
/// `36.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mean(pub f64);

impl fmt::Display for Mean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct StreamAverager {
    policy: CountPolicy,
    sum: f64,
    count: u64,
}

impl StreamAverager {
    pub fn new(policy: CountPolicy) -> Self {
        let count = match policy {
            CountPolicy::Exact => 0,
            CountPolicy::Legacy => 1,
        };
        Self {
            policy,
            sum: 0.0,
            count,
        }
    }

    pub fn policy(&self) -> CountPolicy {
        self.policy
    }

    /// Mean of what has been consumed so far, `None` when the divisor is zero.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

impl Default for StreamAverager {
    fn default() -> Self {
        Self::new(CountPolicy::default())
    }
}

impl LineReducer for StreamAverager {
    type Item = f64;

    fn consume(&mut self, line: &str) -> Result<Option<f64>, SkipReason> {
        if self.policy == CountPolicy::Legacy {
            self.count += 1;
        }

        let value: f64 = line
            .parse()
            .map_err(|_| SkipReason::NotANumber(line.to_string()))?;

        self.sum += value;
        if self.policy == CountPolicy::Exact {
            self.count += 1;
        }
        Ok(None)
    }

    fn finish(self) -> Option<f64> {
        self.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::{StreamConfig, collect};
    use std::io::Cursor;

    fn average(input: &str, policy: CountPolicy) -> (Option<f64>, usize) {
        let (items, report) = collect(
            Cursor::new(input.to_string()),
            StreamAverager::new(policy),
            &StreamConfig::default(),
        )
        .unwrap();
        (items.first().copied(), report.skipped)
    }

    #[test]
    fn test_exact_mean() {
        let (mean, skipped) = average("10\n20\n30\n40\n", CountPolicy::Exact);
        assert_eq!(mean, Some(25.0));
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_legacy_divides_by_len_plus_one() {
        let (mean, _) = average("10\n20\n30\n40\n", CountPolicy::Legacy);
        assert_eq!(mean, Some(100.0 / 5.0));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let (mean, skipped) = average("10\nabc\n20\n\n", CountPolicy::Exact);
        assert_eq!(mean, Some(15.0));
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_legacy_counts_malformed_lines() {
        // 1 (initial) + 3 non-blank lines
        let (mean, skipped) = average("10\nabc\n20\n\n", CountPolicy::Legacy);
        assert_eq!(mean, Some(30.0 / 4.0));
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(average("", CountPolicy::Exact).0, None);
        assert_eq!(average("\n\n", CountPolicy::Legacy).0, Some(0.0));
    }

    #[test]
    fn test_mean_display() {
        assert_eq!(Mean(36.0).to_string(), "36.0");
        assert_eq!(Mean(2.5).to_string(), "2.5");
        assert_eq!(Mean(100.0 / 3.0).to_string(), "33.333333333333336");
        assert_eq!(Mean(-0.125).to_string(), "-0.125");
    }

    #[test]
    fn test_whitespace_around_numbers() {
        let (mean, skipped) = average("  1.5 \n\t2.5\n", CountPolicy::Exact);
        assert_eq!(mean, Some(2.0));
        assert_eq!(skipped, 0);
    }
}
