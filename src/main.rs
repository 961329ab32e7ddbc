use clap::Parser;
use sortwise::cli::{Cli, run};

fn main() {
    let cli = Cli::parse();
    cli.setup_logging();
    std::process::exit(run(&cli));
}
