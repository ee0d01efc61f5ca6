use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{info, warn};
use rayon::prelude::*;

use streetwise::address::{AddressParser, ParserConfigBuilder, Vocabulary};
use streetwise::cli::{Cli, OutputFormat};
use streetwise::models::{AddressDto, ParsedAddress};

fn main() -> std::io::Result<()> {
    let progress = init_logging();
    if let Err(err) = run(&progress) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
    Ok(())
}

/// Route log records through the progress display so they do not tear
/// the batch progress bar.
fn init_logging() -> MultiProgress {
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).build();
    let level = logger.filter();
    let progress = MultiProgress::new();
    if LogWrapper::new(progress.clone(), logger).try_init().is_ok() {
        log::set_max_level(level);
    }
    progress
}

fn run(progress: &MultiProgress) -> Result<()> {
    let cli = Cli::parse();
    let parser = build_parser(&cli)?;
    info!(
        "Parsing with vocabulary '{}' ({} grammar)",
        parser.vocabulary().name,
        if cli.line { "line" } else { "full" }
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &cli.input {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        let lines: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        let progress_bar = progress.add(create_progress_bar(lines.len())?);
        let results: Vec<Option<ParsedAddress>> = lines
            .par_iter()
            .map(|line| {
                let parsed = parse_one(&parser, &cli, line);
                progress_bar.inc(1);
                parsed
            })
            .collect();
        progress_bar.finish_and_clear();

        let unmatched = results.iter().filter(|parsed| parsed.is_none()).count();
        for (line, parsed) in lines.iter().zip(&results) {
            write_result(&mut out, cli.format, line, parsed.as_ref())?;
        }
        if unmatched > 0 {
            warn!("{} of {} addresses did not parse", unmatched, lines.len());
        }
    } else if !cli.addresses.is_empty() {
        for address in &cli.addresses {
            let parsed = parse_one(&parser, &cli, address);
            write_result(&mut out, cli.format, address, parsed.as_ref())?;
        }
    } else {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        prompt(interactive)?;
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read standard input")?;
            if !line.trim().is_empty() {
                let parsed = parse_one(&parser, &cli, &line);
                write_result(&mut out, cli.format, &line, parsed.as_ref())?;
                out.flush()?;
            }
            prompt(interactive)?;
        }
    }

    Ok(())
}

fn build_parser(cli: &Cli) -> Result<AddressParser> {
    let vocabulary = match &cli.vocabulary {
        Some(path) => Vocabulary::from_path(path)?,
        None => Vocabulary::builtin(cli.country)?,
    };
    let config = ParserConfigBuilder::default()
        .max_input_len(cli.max_input_len)
        .build()?;
    AddressParser::new(vocabulary, config)
}

fn parse_one(parser: &AddressParser, cli: &Cli, input: &str) -> Option<ParsedAddress> {
    if cli.line {
        parser.parse_address_line(input, !cli.raw)
    } else {
        parser.parse_with(input, !cli.raw)
    }
}

fn write_result(
    out: &mut impl Write,
    format: OutputFormat,
    input: &str,
    parsed: Option<&ParsedAddress>,
) -> Result<()> {
    match format {
        OutputFormat::Text => match parsed {
            Some(parsed) => {
                writeln!(out, "{}", input.trim())?;
                for (field, value) in parsed.iter() {
                    writeln!(out, "  {field}: {value}")?;
                }
            }
            None => writeln!(out, "{}\n  no match", input.trim())?,
        },
        OutputFormat::Json => {
            let dto = parsed.map(AddressDto::from);
            writeln!(out, "{}", serde_json::to_string(&dto)?)?;
        }
    }
    Ok(())
}

fn prompt(interactive: bool) -> Result<()> {
    if interactive {
        eprint!("> ");
        io::stderr().flush()?;
    }
    Ok(())
}

fn create_progress_bar(total: usize) -> Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} addresses parsed ({eta})",
            )?
            .progress_chars("#>-"),
    );
    Ok(progress_bar)
}
