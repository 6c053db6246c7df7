use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use logger::{
    Context, EnabledParameters, LogRecord, LogSeverity, Processor, SeverityVar,
    processors::{console::ConsoleProcessor, minsev::MinSeverityProcessor},
};
use tracing_subscriber::EnvFilter;

use config::Config;

mod config;

/// Print a sample of log records through a minimum-severity gate.
#[derive(Parser, Debug)]
#[command(name = "minsev", version)]
struct Args {
    /// Minimum severity to print, e.g. `warn`, `info3` or `error-1`.
    #[arg(long, env = "MINSEV_MIN_SEVERITY")]
    min_severity: Option<LogSeverity>,

    /// JSON config file, e.g. `{"min_severity": "warn"}`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL serving the same JSON document as `--config`.
    #[arg(long)]
    config_url: Option<String>,

    /// Raise the minimum to this level and print the sample again.
    #[arg(long)]
    raise_to: Option<LogSeverity>,
}

const SAMPLE: [(LogSeverity, &str); 5] = [
    (LogSeverity::Trace, "Entering poll loop"),
    (LogSeverity::Debug, "Cache miss for session"),
    (LogSeverity::Info, "Listening for connections"),
    (LogSeverity::Warn, "Request queue above 80%"),
    (LogSeverity::Error, "Failed to persist checkpoint"),
];

fn emit_sample(gate: &MinSeverityProcessor, ctx: &Context) -> anyhow::Result<()> {
    for (severity, body) in SAMPLE {
        if !gate.enabled(ctx, &EnabledParameters::new(severity)) {
            tracing::trace!(%severity, "skipping disabled severity");
            continue;
        }
        let mut record = LogRecord::new(severity, body).with_attribute("source", "sample");
        gate.on_emit(ctx, &mut record)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::resolve(
        args.config.as_deref(),
        args.config_url.as_deref(),
        args.min_severity,
    )?;
    tracing::info!(min_severity = %config.min_severity, "starting");

    let minimum = Arc::new(SeverityVar::new(config.min_severity));
    let gate = MinSeverityProcessor::new(ConsoleProcessor::new(), minimum.clone());
    let ctx = Context::background();

    emit_sample(&gate, &ctx)?;

    if let Some(level) = args.raise_to {
        minimum.set(level);
        tracing::info!(min_severity = %level, "minimum raised");
        emit_sample(&gate, &ctx)?;
    }

    gate.shutdown(&ctx.with_timeout(Duration::from_secs(5)))?;
    Ok(())
}
