use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Without a command, every pipeline runs with its defaults.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run pipelines with their configured defaults.
    Run {
        /// Specify the pipelines to run.
        ///
        /// If no pipelines are provided, all of them run.
        #[arg(short, long)]
        pipelines: Option<Vec<Pipeline>>,
    },

    /// Scrape company profile pages listed in a CSV into a JSON file.
    Companies(CompaniesArgs),

    /// Download the dump archive and load it into the database.
    Dump(DumpArgs),

    /// Recreate the dump tables without loading any data.
    Migrate {
        /// SQLite database file.
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct CompaniesArgs {
    /// CSV with `Company Name` and `YC URL` columns.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Destination JSON file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of concurrent page fetches.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Fail, and write nothing, if any page could not be scraped.
    #[arg(short, long)]
    pub strict: bool,
}

#[derive(Args, Debug, Default)]
pub struct DumpArgs {
    /// URL of the `.tar.gz` dump.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Working directory for the archive and its extracted files.
    #[arg(short = 'D', long)]
    pub dir: Option<PathBuf>,

    /// SQLite database file.
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pipeline {
    /// Company profile pages.
    Companies,

    /// Organizations & customers dump.
    Dump,
}
