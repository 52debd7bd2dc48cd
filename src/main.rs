mod emit;
mod error;
mod language;
mod split;

use std::process::exit;

use clap::Parser;
use env_logger::Env;

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    #[clap(flatten)]
    split: split::SplitArgs,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(error) = split::split(&cli.split) {
        eprintln!("Error: {}", error);
        exit(1);
    }
}
