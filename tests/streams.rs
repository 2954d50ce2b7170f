//! End-to-end behaviour of the line reducers over in-memory readers.

use std::io::Cursor;

use coursework::streaming::{
    self, CountPolicy, RunLengthCounter, RunRecord, StreamAverager, StreamConfig,
    TweetUserExtractor,
};
use coursework::{CourseworkError, SkipReason};

fn lenient() -> StreamConfig {
    StreamConfig::default()
}

fn strict() -> StreamConfig {
    StreamConfig::new().strict(true)
}

// ============================================================================
// StreamAverager
// ============================================================================

mod average {
    use super::*;

    const AGES: &str = "23\n35\n41\n29\n52\n";

    #[test]
    fn exact_policy_is_the_arithmetic_mean() {
        let (out, report) =
            streaming::collect(Cursor::new(AGES), StreamAverager::default(), &lenient()).unwrap();
        assert_eq!(out, vec![180.0 / 5.0]);
        assert_eq!(report.lines_read, 5);
    }

    #[test]
    fn legacy_policy_reproduces_len_plus_one_divisor() {
        let (out, _) = streaming::collect(
            Cursor::new(AGES),
            StreamAverager::new(CountPolicy::Legacy),
            &lenient(),
        )
        .unwrap();
        assert_eq!(out, vec![180.0 / 6.0]);
    }

    #[test]
    fn strict_mode_rejects_non_numeric_line() {
        let err = streaming::collect(
            Cursor::new("1\n2\nthirty\n"),
            StreamAverager::default(),
            &strict(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CourseworkError::Line {
                line_no: 3,
                reason: SkipReason::NotANumber(_)
            }
        ));
    }

    #[test]
    fn lenient_mode_surfaces_skipped_count() {
        let (out, report) = streaming::collect(
            Cursor::new("1\nn/a\n3\n??\n"),
            StreamAverager::default(),
            &lenient(),
        )
        .unwrap();
        assert_eq!(out, vec![2.0]);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn undecodable_bytes_only_drop_their_line() {
        let (out, report) = streaming::collect(
            Cursor::new(b"10\n\xff\xfe\n20\n".to_vec()),
            StreamAverager::default(),
            &lenient(),
        )
        .unwrap();
        assert_eq!(out, vec![15.0]);
        assert_eq!(report.skipped, 1);
    }
}

// ============================================================================
// RunLengthCounter
// ============================================================================

mod value_counts {
    use super::*;

    #[test]
    fn counts_runs_in_sorted_input() {
        let (out, report) = streaming::collect(
            Cursor::new("a\na\nb\nb\nb\nc\n"),
            RunLengthCounter::new(),
            &strict(),
        )
        .unwrap();

        let expected = vec![
            RunRecord { key: "a".into(), count: 2 },
            RunRecord { key: "b".into(), count: 3 },
            RunRecord { key: "c".into(), count: 1 },
        ];
        assert_eq!(out, expected);
        assert_eq!(report.emitted, 3);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn runs_are_emitted_before_stream_ends() {
        let mut seen = Vec::new();
        streaming::run(
            Cursor::new("x\nx\ny\n"),
            RunLengthCounter::new(),
            &lenient(),
            |record| {
                seen.push(record.to_string());
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(seen, vec!["x 2".to_string(), "y 1".to_string()]);
    }

    #[test]
    fn empty_input_emits_nothing() {
        let (out, report) =
            streaming::collect(Cursor::new(""), RunLengthCounter::new(), &lenient()).unwrap();
        assert!(out.is_empty());
        assert_eq!(report.emitted, 0);
    }
}

// ============================================================================
// TweetUserExtractor
// ============================================================================

mod tweets {
    use super::*;

    #[test]
    fn extracts_screen_names_and_drops_the_rest() {
        let input = concat!(
            "{'user': {'screen_name': 'alice'}}\n",
            "{'created_at': 'Mon', 'text': 'no user here'}\n",
            "{u'user': {u'screen_name': u'bob', u'followers_count': 10}, ",
            "u'entities': {u'hashtags': []}}\n",
            "{'user': {'screen_name': 'carol'}\n",
        );

        let (names, report) =
            streaming::collect(Cursor::new(input), TweetUserExtractor::new(), &lenient()).unwrap();
        assert_eq!(names, vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn strict_mode_names_the_missing_field() {
        let err = streaming::collect(
            Cursor::new("{'text': 'hi'}\n"),
            TweetUserExtractor::new(),
            &strict(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "line 1: missing field user.screen_name");
    }
}
