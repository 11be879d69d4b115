// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

const CURRENCIES: [&str; 4] = ["USD", "ILS", "GBP", "EURO"];
const CATEGORIES: [&str; 5] = ["Food", "Transport", "Entertainment", "Utilities", "Other"];

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn year_arg() -> Arg {
    Arg::new("year")
        .long("year")
        .short('y')
        .required(true)
        .value_parser(value_parser!(i32))
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .required(required)
        .value_parser(value_parser!(u32).range(1..=12))
}

fn currency_arg() -> Arg {
    Arg::new("currency")
        .long("currency")
        .short('c')
        .default_value("USD")
        .ignore_case(true)
        .value_parser(CURRENCIES)
}

fn rates_file_arg() -> Arg {
    Arg::new("rates-file")
        .long("rates-file")
        .help("Read rates from a local JSON file instead of the configured URL")
}

pub fn build_cli() -> Command {
    Command::new("costmanager")
        .version(clap::crate_version!())
        .about("Personal expense tracker with multi-currency monthly reports")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("add")
                .about("Record a cost item dated now")
                .arg(Arg::new("sum").long("sum").short('s').required(true))
                .arg(currency_arg())
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('k')
                        .required(true)
                        .ignore_case(true)
                        .value_parser(CATEGORIES),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .default_value(""),
                ),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List costs of a year, or of one month")
                .arg(year_arg())
                .arg(month_arg(false)),
        ))
        .subcommand(json_args(
            Command::new("report")
                .about("Monthly report converted into one currency")
                .arg(year_arg())
                .arg(month_arg(true))
                .arg(currency_arg())
                .arg(rates_file_arg()),
        ))
        .subcommand(
            Command::new("chart")
                .about("Chart series for a month or a year")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(json_args(
                    Command::new("pie")
                        .about("Spend by category for a month")
                        .arg(year_arg())
                        .arg(month_arg(true))
                        .arg(currency_arg())
                        .arg(rates_file_arg()),
                ))
                .subcommand(json_args(
                    Command::new("bar")
                        .about("Spend by month for a year")
                        .arg(year_arg())
                        .arg(currency_arg())
                        .arg(rates_file_arg()),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change the currency rates URL")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-url").arg(Arg::new("url").required(true)))
                .subcommand(Command::new("reset")),
        )
        .subcommand(
            Command::new("rates")
                .about("Fetch and show the current currency rates")
                .arg(rates_file_arg()),
        )
}
