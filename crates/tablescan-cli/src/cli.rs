// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments for the `tablescan` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tablescan")]
#[command(about = "Reconstruct ruled tables from scanned page images", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) options: Options,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Args)]
pub(crate) struct Options {
    /// Recogniser language code (overrides the config file)
    #[arg(long, global = true)]
    pub(crate) lang: Option<String>,

    /// JSON extraction config
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Directory holding text-detection.rten and text-recognition.rten
    #[arg(long, global = true)]
    pub(crate) models: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the tables found on a page as JSON.
    Tables { image: PathBuf },

    /// Write the page with its tables painted white, and print the tables.
    HideTables { image: PathBuf, output: PathBuf },

    /// Write the page with every cell painted white, and print the cells.
    HideCells { image: PathBuf, output: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "tablescan",
            "hide-tables",
            "page.png",
            "out.png",
            "--lang",
            "fra",
        ])
        .unwrap();
        assert_eq!(cli.options.lang.as_deref(), Some("fra"));
        assert!(matches!(
            cli.command,
            Command::HideTables { ref image, ref output }
                if image == &PathBuf::from("page.png") && output == &PathBuf::from("out.png")
        ));
    }

    #[test]
    fn output_is_required_for_redaction() {
        assert!(Cli::try_parse_from(["tablescan", "hide-cells", "page.png"]).is_err());
    }
}
