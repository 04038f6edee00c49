// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use clap::*;
use colored::Colorize;
use custody_cli::custody_commands::{CustodyCommand, CustodyEnvConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

macro_rules! exit_main {
    ($result:expr) => {
        match $result {
            Ok(_) => (),
            Err(err) => {
                let err = format!("{:?}", err);
                eprintln!("{}", err.bold().red());
                std::process::exit(1);
            }
        }
    };
}

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Record who holds your lent items on the Stellar ledger",
    rename_all = "kebab-case",
    author,
    version = VERSION,
    propagate_version = true,
)]
struct Args {
    #[clap(flatten)]
    config: CustodyEnvConfig,
    /// Print responses as JSON
    #[clap(long, global = true)]
    json: bool,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[clap(subcommand)]
    command: CustodyCommand,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);

    let args = Args::parse();
    init_tracing(args.verbose);
    debug!("Custody CLI version: {VERSION}");
    exit_main!(args.command.execute(args.config, args.json).await);
}
