use super::setup::Cli;
use clap::Parser;
use std::io;
use toynbee::browser::SystemBrowser;
use toynbee::endpoints::DEFAULT_ENDPOINTS;
use toynbee::error::{Error, Result};
use toynbee::fetch::HttpFetcher;
use toynbee::inspect::inspect;
use toynbee::render::TemplatePrinter;
use toynbee::tabwriter::TabWriter;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = parse_or_exit();
    init_logging(cli.verbose);

    if cli.projects.is_empty() {
        return Err(Error::NoProjects);
    }

    let printer = TemplatePrinter::compile(&cli.template)?;
    let fetcher = HttpFetcher::new(cli.request_timeout())?;

    let stdout = io::stdout();
    let summary = inspect(
        &cli.options(),
        DEFAULT_ENDPOINTS,
        &printer,
        &fetcher,
        &SystemBrowser,
        TabWriter::new(stdout.lock()),
    )?;

    debug!(?summary, "run complete");
    Ok(())
}

/// Parses arguments. Help and version go to stdout with exit code 0; every parse
/// error exits with 1.
fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("toynbee=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}
