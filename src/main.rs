mod cli;
mod commands;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;
use ring_calendar::SettingsStore;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command, SettingsStore::open(cli.settings)) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command, store: SettingsStore) -> Result<()> {
    match command {
        Command::Show(args) => commands::show(args, store),
        Command::Day(args) => commands::day(args, store),
        Command::Clock(args) => commands::clock(args, store),
        Command::Labels(command) => commands::labels(command, store),
    }
}
