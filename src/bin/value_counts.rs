//! Run-length counts of the sorted keys on stdin, printed as `key count`.

use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use coursework::cli::StreamArgs;
use coursework::logging::init_logging;
use coursework::streaming::{self, RunLengthCounter};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "value_counts", version, about = "Count runs of equal keys in sorted input")]
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
        RunLengthCounter::new(),
        &cli.stream.config(),
        |record| {
            writeln!(out, "{}", record)?;
            Ok(())
        },
    )?;
    out.flush()?;

    info!(lines = report.lines_read, runs = report.emitted, "done");
    Ok(())
}
