use clap::Parser;
use console::style;

use cleartheme::{logging, run, Cli};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        tracing::debug!(error = ?err, "build failed");
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}
