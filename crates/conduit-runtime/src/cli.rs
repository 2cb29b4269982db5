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

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "conduit", version, about = "Resolve resource identifiers into decoded values")]
pub struct Cli {
    /// Configuration file (defaults to ./Conduit.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an identifier through the pipeline and print the result
    Fetch(FetchArgs),
    /// Build a pack archive from a directory
    Pack(PackArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// e.g. file:///data/sample.json, https://host/a.png, bundle://pack1/icon.png.gz
    pub identifier: String,

    /// Network timeout for this call, overriding the configuration
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Directory whose files become the pack's entries
    pub dir: PathBuf,

    /// Where to write the archive
    #[arg(short, long)]
    pub out: PathBuf,

    /// Store entries LZ4-compressed when that makes them smaller
    #[arg(long)]
    pub lz4: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_fetch_with_global_flags() {
        let cli = Cli::try_parse_from([
            "conduit",
            "fetch",
            "bundle://pack1/icon.png.gz",
            "--timeout-ms",
            "250",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Fetch(args) => {
                assert_eq!(args.identifier, "bundle://pack1/icon.png.gz");
                assert_eq!(args.timeout_ms, Some(250));
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_pack_requires_out() {
        assert!(Cli::try_parse_from(["conduit", "pack", "assets"]).is_err());
    }
}
