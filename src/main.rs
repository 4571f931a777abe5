use clap::Parser;
use fluid_chart::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(error) = cli::setup_logging(&args) {
        eprintln!("Warning: {:#}", error);
    }

    match cli::run(&args) {
        Ok(summary) => {
            cli::print_summary(&summary);
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
