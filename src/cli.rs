use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::address::{Country, DEFAULT_MAX_INPUT_LEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Addresses to parse (reads standard input line by line when none are given)
    pub addresses: Vec<String>,

    /// File with one address per line, parsed in parallel
    #[arg(short, long, conflicts_with = "addresses")]
    pub input: Option<PathBuf>,

    /// Built-in vocabulary to parse with
    #[arg(short, long, value_enum, default_value_t = Country::Us)]
    pub country: Country,

    /// Custom vocabulary file (YAML, or JSON by extension); overrides --country
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,

    /// Parse the street line only (no city, state or postal code)
    #[arg(long)]
    pub line: bool,

    /// Print captured values without normalization
    #[arg(long)]
    pub raw: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Inputs longer than this many characters are not parsed
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_LEN)]
    pub max_input_len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
