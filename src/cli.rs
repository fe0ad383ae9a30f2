// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
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

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Calendar month (defaults to the current month)")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .required(true)
        .value_parser(["income", "expense"])
}

fn bucket_arg() -> Arg {
    Arg::new("bucket")
        .long("bucket")
        .value_parser(["needs", "wants", "savings"])
        .help("Budget split this expense category counts against")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal income/expense tracker with 50/30/20 budgeting")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .env("FINTRACK_DATA_DIR")
                .value_name("DIR")
                .help("Directory holding the data file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (repeat for debug)"),
        )
        .subcommand(Command::new("init").about("Create the data file and print its location"))
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Balance, monthly totals, budget progress and recent activity")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(type_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category id or name"),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(
                            Arg::new("installment")
                                .long("installment")
                                .value_name("CUR/TOTAL"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("Transaction history, newest first")
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Match description or category name"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction by id")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("label"))
                        .arg(type_arg())
                        .arg(Arg::new("color").long("color"))
                        .arg(bucket_arg()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color"))
                        .arg(bucket_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a category; transactions keep their reference")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly 50/30/20 budget")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show").arg(month_arg())))
                .subcommand(
                    Command::new("set-income")
                        .about("Set monthly net income; splits are re-derived")
                        .arg(Arg::new("income").required(true).allow_negative_numbers(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Profile settings")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("initial-balance")
                                .long("initial-balance")
                                .allow_negative_numbers(true),
                        )
                        .arg(
                            Arg::new("theme")
                                .long("theme")
                                .value_parser(["light", "dark"]),
                        ),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all transactions and restore default categories and settings")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the reset"),
                ),
        )
        .subcommand(
            Command::new("export")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Import a CSV with header date,type,amount,category,description")
                        .arg(Arg::new("path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the data for inconsistencies"))
}
