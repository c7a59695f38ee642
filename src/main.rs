// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use betclip::settings::Settings;
use betclip::{cli, commands, db};

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_new(&settings.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(betclip::settings::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings);

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = db::open_or_init(&settings)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(&settings)?.display());
        }
        Some(("bankroll", sub)) => commands::bankrolls::handle(&mut store, sub)?,
        Some(("bet", sub)) => commands::bets::handle(&mut store, sub)?,
        Some(("config", sub)) => commands::config::handle(&mut store, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
