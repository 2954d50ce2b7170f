//! Prints `user.screen_name` for each literal tweet record on stdin.

use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use coursework::cli::StreamArgs;
use coursework::logging::init_logging;
use coursework::streaming::{self, TweetUserExtractor};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tweet_users", version, about = "Extract screen names from tweet records")]
struct Cli {
    #[command(flatten)]
    stream: StreamArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.stream.verbose);

    let mut out = BufWriter::new(io::stdout().lock());
    let report = streaming::run(
        io::stdin().lock(),
        TweetUserExtractor::new(),
        &cli.stream.config(),
        |name| {
            writeln!(out, "{}", name)?;
            Ok(())
        },
    )?;
    out.flush()?;

    info!(
        lines = report.lines_read,
        names = report.emitted,
        skipped = report.skipped,
        "done"
    );
    Ok(())
}
