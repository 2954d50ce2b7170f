//! Mean of the numbers on stdin, one per line.

use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use coursework::cli::StreamArgs;
use coursework::logging::init_logging;
use coursework::streaming::{self, CountPolicy, Mean, StreamAverager};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "average_age", version, about = "Mean of the numbers on stdin")]
struct Cli {
    #[command(flatten)]
    stream: StreamArgs,

    /// Divide by 1 + every non-blank line, malformed ones included
    #[arg(long)]
    legacy_count: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.stream.verbose);

    let policy = if cli.legacy_count {
        CountPolicy::Legacy
    } else {
        CountPolicy::Exact
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let report = streaming::run(
        io::stdin().lock(),
        StreamAverager::new(policy),
        &cli.stream.config(),
        |mean| {
            writeln!(out, "{}", Mean(mean))?;
            Ok(())
        },
    )?;
    out.flush()?;

    if report.emitted == 0 {
        info!("no numeric input, nothing to average");
    }
    info!(lines = report.lines_read, skipped = report.skipped, ?policy, "done");
    Ok(())
}
