// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # keyseed
//!
//! Entry point for the `keyseed` binary. Parses CLI arguments, initializes
//! logging, and dispatches to a subcommand:
//!
//! - `new`      : create a fresh identity
//! - `inspect`  : show everything derived from an encoded seed
//! - `recover`  : restore an identity from its words
//! - `phrase`   : print the recovery phrase for an encoded seed
//! - `validate` : check an account number (exit status 1 when invalid)
//! - `version`  : print build version information

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::{Commands, KeyseedCli};
use logging::LogFormat;

fn main() -> Result<ExitCode> {
    let cli = KeyseedCli::parse();

    logging::init_logging(
        logging::DEFAULT_FILTER,
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::New(args) => commands::new_identity(args),
        Commands::Inspect(args) => commands::inspect(args),
        Commands::Recover(args) => commands::recover(args),
        Commands::Phrase(args) => commands::phrase(args),
        Commands::Validate(args) => commands::validate(args),
        Commands::Version => {
            commands::print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}
