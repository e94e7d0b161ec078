mod cells;
mod cli;
mod error;
#[cfg(test)]
mod fixtures;
mod fmt;
mod format;
mod layout;
mod models;
mod ofx;
mod parser;
mod record;
mod settings;
mod summary;
mod workbook;

use clap::Parser;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            path,
            clean_memo,
            dump,
            output,
        } => cli::convert::run(&path, clean_memo.as_deref(), dump, output.as_deref()),
        Commands::Config { clean_memo } => cli::config::run(clean_memo),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
