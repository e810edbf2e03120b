use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::setup::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let serving = matches!(cli.command, Commands::Serve { .. });
    init_logging(cli.verbose, serving);

    if let Err(e) = cli::commands::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins. Admin commands log warnings only; the server logs
/// requests. `-v` turns on debug output. Logs go to stderr so command
/// output stays clean.
fn init_logging(verbose: bool, serving: bool) {
    let default = match (verbose, serving) {
        (true, _) => "folio=debug,salvo=debug",
        (false, true) => "folio=info,salvo=info",
        (false, false) => "folio=warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
