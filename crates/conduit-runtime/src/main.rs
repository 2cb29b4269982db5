// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `conduit`: resolve identifiers through the pipeline and build pack archives.
//!
//! Run with: `conduit fetch <identifier>` or `conduit pack <dir> --out <file.pack>`

mod cli;
mod commands;
mod exit;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use conduit_sdk::PipelineConfig;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit::code_for(&err))
        }
    }
}

fn init_logging(verbose: bool) {
    use env_logger::{Builder, Env};

    let default = if verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default)).init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Fetch(args) => {
            let config = match &cli.config {
                Some(path) => PipelineConfig::load(path)?,
                None => PipelineConfig::load_or_default(Path::new(PipelineConfig::FILE_NAME))?,
            };
            commands::fetch::run(config, &args)
        }
        Command::Pack(args) => commands::pack::run(&args),
    }
}
