// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tablescan — reconstruct tables from scanned pages.
//
// Entry point. Initialises logging, loads the extraction config and text
// recogniser, runs one subcommand, and prints its result as JSON.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tablescan_core::{ExtractionConfig, Result};
use tablescan_document::{TableExtractor, TextRecognizer};

use cli::{Cli, Command, Options};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "tablescan failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.options)?;
    let recognizer = load_recognizer(&cli.options)?;
    let extractor = TableExtractor::new(recognizer.as_ref(), config);

    match cli.command {
        Command::Tables { image } => print_json(&extractor.extract_tables(image)?),
        Command::HideTables { image, output } => {
            print_json(&extractor.extract_and_hide_tables(image, output)?)
        }
        Command::HideCells { image, output } => {
            print_json(&extractor.extract_and_hide_cells(image, output)?)
        }
    }
}

fn load_config(options: &Options) -> Result<ExtractionConfig> {
    let config = match &options.config {
        Some(path) => ExtractionConfig::from_json_file(path)?,
        None => ExtractionConfig::default(),
    };
    Ok(match &options.lang {
        Some(lang) => config.with_lang(lang.clone()),
        None => config,
    })
}

#[cfg(feature = "ocr")]
fn load_recognizer(options: &Options) -> Result<Box<dyn TextRecognizer>> {
    use tablescan_document::OcrEngine;

    let engine = match &options.models {
        Some(dir) => OcrEngine::from_model_dir(dir)?,
        None => OcrEngine::with_defaults()?,
    };
    Ok(Box::new(engine))
}

#[cfg(not(feature = "ocr"))]
fn load_recognizer(options: &Options) -> Result<Box<dyn TextRecognizer>> {
    if options.models.is_some() {
        tracing::warn!("--models has no effect without the `ocr` feature");
    }
    tracing::warn!("Built without the `ocr` feature; cell text will be empty");
    Ok(Box::new(tablescan_document::NullRecognizer))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
