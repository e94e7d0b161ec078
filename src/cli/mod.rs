pub mod config;
pub mod convert;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "seb-statement",
    about = "Convert SEB spreadsheet exports into OFX statements."
)]
pub struct Cli {
    /// Log every layout check and parsed row.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an export and write it as OFX next to the input.
    Convert {
        /// Path to the SEB xlsx export
        path: String,
        /// Strip the /YY-MM-DD card date from memos: true, false, 1 or 0
        #[arg(long = "clean-memo")]
        clean_memo: Option<String>,
        /// Print the parsed statement instead of writing OFX
        #[arg(long)]
        dump: bool,
        /// Output file (default: input path with .ofx extension)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show or save default settings.
    Config {
        /// Default for --clean-memo
        #[arg(long = "clean-memo")]
        clean_memo: Option<String>,
    },
}
