//! Flags shared by the stream-processing binaries.

use clap::{ArgAction, Args};

use crate::streaming::StreamConfig;

#[derive(Args, Debug, Clone, Default)]
pub struct StreamArgs {
    /// Exit with an error on the first line that cannot be processed
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl StreamArgs {
    pub fn config(&self) -> StreamConfig {
        StreamConfig::new().strict(self.strict)
    }
}
