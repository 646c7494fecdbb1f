use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Render publication records as an APA-style citation page",
    long_about = "Read the publication records of one or more sources, drop duplicates and \
                  entries older than --min-year, and write a year-grouped citation page.\n\n\
                  The output file is left untouched when no publication survives filtering."
)]
pub struct Cli {
    /// Source identifiers, read from <INPUT>/<ID>.<FORMAT>
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Directory holding one record file per source
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// File to write the rendered page to
    #[arg(short, long, value_name = "FILE", required_unless_present = "stdout")]
    pub output: Option<PathBuf>,

    /// Format of the record files
    #[arg(long, value_enum, default_value = "json")]
    pub format: InputFormat,

    /// Earliest publication year to keep
    #[arg(long, value_name = "YEAR", default_value_t = citelist::aggregate::DEFAULT_MIN_YEAR)]
    pub min_year: i64,

    /// Page title written into the front matter
    #[arg(long)]
    pub title: Option<String>,

    /// Paragraph written below the front matter
    #[arg(long)]
    pub note: Option<String>,

    /// Print the page instead of writing it
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    #[cfg(feature = "csv")]
    Csv,
}
