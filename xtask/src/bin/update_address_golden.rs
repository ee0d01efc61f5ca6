//! Regenerate the expected fields of the address golden files.
//!
//! Each `<country>.yml` under the golden directory is re-parsed with the
//! built-in vocabulary of that country and rewritten with the current
//! parser output. Review the diff before committing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use streetwise::address::{AddressParser, Country};
use streetwise::models::{AddressField, ParsedAddress};

#[derive(Parser, Debug)]
#[command(about = "Regenerate testdata/address-golden expectations")]
struct Args {
    /// Directory holding the `<country>.yml` golden files
    #[arg(long, default_value = "testdata/address-golden")]
    dir: PathBuf,

    /// Report changed cases without writing files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct GoldenCase {
    input: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    line: bool,
    expected: Option<ParsedAddress>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut files: Vec<PathBuf> = fs::read_dir(&args.dir)
        .with_context(|| format!("Failed to read golden directory: {}", args.dir.display()))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yml"))
        .collect();
    files.sort();

    let mut changed_total = 0;
    for path in &files {
        let changed = update_file(path, args.dry_run)?;
        println!("{}: {} case(s) changed", path.display(), changed);
        changed_total += changed;
    }

    if args.dry_run && changed_total > 0 {
        return Err(anyhow!("{changed_total} golden case(s) are out of date"));
    }
    Ok(())
}

fn update_file(path: &Path, dry_run: bool) -> Result<usize> {
    let country: Country = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("Unreadable file name: {}", path.display()))?
        .parse()
        .with_context(|| format!("Golden file is not named after a country: {}", path.display()))?;
    let parser = AddressParser::for_country(country)?;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read golden file: {}", path.display()))?;
    let mut cases: Vec<GoldenCase> = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse golden file: {}", path.display()))?;

    if let Some(case) = cases.iter().find(|case| is_truncated(case)) {
        return Err(anyhow!(
            "{}: input {:?} lost its unit; quote inputs containing '#'",
            path.display(),
            case.input
        ));
    }

    let changed: usize = cases
        .par_iter_mut()
        .map(|case| {
            let actual = if case.line {
                parser.parse_address_line(&case.input, true)
            } else {
                parser.parse(&case.input)
            };
            if actual == case.expected {
                0
            } else {
                case.expected = actual;
                1
            }
        })
        .sum();

    if changed > 0 && !dry_run {
        let updated = serde_yaml::to_string(&cases)?;
        fs::write(path, updated)
            .with_context(|| format!("Failed to write golden file: {}", path.display()))?;
    }
    Ok(changed)
}

fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}

/// An unquoted ` #` starts a YAML comment, so the recorded secondary number
/// no longer appears in the truncated input.
fn is_truncated(case: &GoldenCase) -> bool {
    case.expected
        .as_ref()
        .and_then(|expected| expected.get(AddressField::SecondaryNumber))
        .is_some_and(|number| !compact(&case.input).contains(&compact(number)))
}
