// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::MAX_WINDOW_MONTHS;
use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON value per line"),
    )
}

fn amount_arg(required: bool) -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(required)
        .allow_negative_numbers(true)
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("kind")
        .long("kind")
        .required(required)
        .value_parser(["income", "expense"])
        .help("income or expense")
}

pub fn build_cli() -> Command {
    Command::new("pocketdash")
        .version(clap::crate_version!())
        .about("Income and expense tracker with dashboard analytics")
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(kind_arg(true))
                        .arg(amount_arg(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List stored transactions, newest first")
                        .arg(kind_arg(false))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Match category or description"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of a stored transaction")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(amount_arg(false))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(json_args(
            Command::new("dashboard")
                .about("Totals, categories, trend and projection")
                .arg(
                    Arg::new("now")
                        .long("now")
                        .help("Reference date YYYY-MM-DD (default: today)"),
                )
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(u64).range(1..=MAX_WINDOW_MONTHS as u64))
                        .help("Trend window in months"),
                )
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Categories shown per kind"),
                )
                .arg(
                    Arg::new("remote")
                        .long("remote")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("input")
                        .help("Read transactions from the configured API"),
                )
                .arg(
                    Arg::new("partial")
                        .long("partial")
                        .action(ArgAction::SetTrue)
                        .requires("remote")
                        .help("Continue when only one of the lists could be loaded"),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .help("Read transactions from a JSON file"),
                ),
        ))
        .subcommand(
            Command::new("import")
                .about("Import transactions")
                .subcommand(
                    Command::new("transactions")
                        .about("CSV with columns kind,date,amount,category,description")
                        .arg(Arg::new("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(kind_arg(false)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(Command::new("unset").arg(Arg::new("key").required(true)))
                .subcommand(Command::new("show")),
        )
        .subcommand(Command::new("doctor").about("Find stored records the dashboard ignores"))
}
