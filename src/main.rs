// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use costmanager::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logger(matches.get_flag("verbose"));

    let db_arg = matches.get_one::<String>("db").map(Path::new);
    let store = db::open_or_init(db_arg)?;
    debug!(records = store.count()?, "cost store opened");

    match matches.subcommand() {
        Some(("init", _)) => match db_arg {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("add", sub)) => commands::costs::add(&store, sub)?,
        Some(("list", sub)) => commands::costs::list(&store, sub)?,
        Some(("report", sub)) => commands::report::handle(&store, sub)?,
        Some(("chart", sub)) => commands::chart::handle(&store, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&store, sub)?,
        Some(("rates", sub)) => commands::rates::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
