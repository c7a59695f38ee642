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
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

fn bet_filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("search").long("search").help("Text in event, competition, market or bookmaker"))
        .arg(Arg::new("sport").long("sport"))
        .arg(Arg::new("outcome").long("outcome").help("pending|won|lost|cashout|refunded"))
        .arg(Arg::new("kind").long("kind").help("single|combined"))
        .arg(Arg::new("bookmaker").long("bookmaker"))
        .arg(Arg::new("tipster").long("tipster"))
        .arg(Arg::new("bankroll").long("bankroll"))
        .arg(Arg::new("from").long("from").help("YYYY-MM-DD, inclusive"))
        .arg(Arg::new("to").long("to").help("YYYY-MM-DD, inclusive"))
        .arg(
            Arg::new("sort")
                .long("sort")
                .default_value("date-desc")
                .help("date-desc|date-asc|profit-desc|profit-asc|odds-desc"),
        )
}

fn bet_detail_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("bookmaker").long("bookmaker"))
        .arg(Arg::new("tipster").long("tipster"))
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("notes").long("notes"))
}

pub fn build_cli() -> Command {
    Command::new("betclip")
        .about("Local sports-betting ledger: bankrolls, bets and performance")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("bankroll")
                .about("Manage bankrolls and their deposits/withdrawals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("initial").long("initial").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("initial").long("initial")),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("deposit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("withdraw")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("transactions").arg(Arg::new("id").long("id")),
                ))
                .subcommand(Command::new("recalc").arg(id_arg())),
        )
        .subcommand(
            Command::new("bet")
                .about("Record, settle and browse bets")
                .subcommand(bet_detail_args(
                    Command::new("add")
                        .arg(Arg::new("bankroll").long("bankroll").required(true))
                        .arg(Arg::new("sport").long("sport").required(true))
                        .arg(Arg::new("competition").long("competition").default_value(""))
                        .arg(Arg::new("event").long("event").default_value(""))
                        .arg(Arg::new("market").long("market").default_value(""))
                        .arg(Arg::new("odds").long("odds").required(true))
                        .arg(Arg::new("stake").long("stake").required(true))
                        .arg(Arg::new("outcome").long("outcome").default_value("pending"))
                        .arg(
                            Arg::new("cashout")
                                .long("cashout")
                                .help("Amount returned by a cash-out"),
                        )
                        .arg(
                            Arg::new("leg")
                                .long("leg")
                                .action(ArgAction::Append)
                                .help("Extra selection: sport|competition|event|market|odds[|outcome]"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DDTHH:MM, defaults to now"))
                        .arg(Arg::new("live").long("live").action(ArgAction::SetTrue))
                        .arg(Arg::new("freebet").long("freebet").action(ArgAction::SetTrue)),
                ))
                .subcommand(json_flags(bet_filter_args(
                    Command::new("list").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(
                    Command::new("settle")
                        .arg(id_arg())
                        .arg(Arg::new("outcome").long("outcome").required(true))
                        .arg(Arg::new("cashout").long("cashout")),
                )
                .subcommand(bet_detail_args(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("sport").long("sport"))
                        .arg(Arg::new("competition").long("competition"))
                        .arg(Arg::new("event").long("event"))
                        .arg(Arg::new("market").long("market"))
                        .arg(Arg::new("odds").long("odds"))
                        .arg(Arg::new("stake").long("stake")),
                ))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(json_flags(
                    Command::new("sports").about("Sports seen in recorded bets"),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Bookmakers, tipsters, categories, competitions and bet types")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("list").long("list").required(true))
                        .arg(Arg::new("search").long("search")),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("list").long("list").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .arg(Arg::new("list").long("list").required(true))
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("list").long("list").required(true))
                        .arg(id_arg()),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Profit, ROI, hit rate, streaks and distributions")
                .arg(Arg::new("bankroll").long("bankroll")),
        ))
        .subcommand(
            Command::new("export")
                .about("Export bets")
                .subcommand(bet_filter_args(
                    Command::new("bets")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Display preferences")
                .subcommand(Command::new("currency").arg(Arg::new("set").long("set"))),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
