//! Pulls `user.screen_name` out of one literal tweet record per line.

use super::{LineReducer, SkipReason, literal};

const SCREEN_NAME_PATH: &str = "user.screen_name";

#[derive(Clone, Debug, Default)]
pub struct TweetUserExtractor;

impl TweetUserExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Screen name of a single record.
    pub fn extract(line: &str) -> Result<String, SkipReason> {
        let record = literal::parse(line).map_err(|e| SkipReason::Malformed(e.to_string()))?;

        let name = record
            .get("user")
            .and_then(|user| user.get("screen_name"))
            .ok_or(SkipReason::MissingField(SCREEN_NAME_PATH))?;

        literal::display_scalar(name).ok_or(SkipReason::NotScalar(SCREEN_NAME_PATH))
    }
}

impl LineReducer for TweetUserExtractor {
    type Item = String;

    fn consume(&mut self, line: &str) -> Result<Option<String>, SkipReason> {
        Self::extract(line).map(Some)
    }

    fn finish(self) -> Option<String> {
        None
    }
}
