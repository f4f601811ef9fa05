// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON"))
        .arg(arg!(--jsonl "Print as JSON lines"))
}

fn projection_cmd(name: &'static str, about: &'static str, rate: &'static str, years: &'static str) -> Command {
    json_flags(
        Command::new(name)
            .about(about)
            .arg(arg!(--amount <AMOUNT> "Amount in rupees").required(true))
            .arg(
                arg!(--rate <RATE> "Expected annual return, percent")
                    .required(false)
                    .default_value(rate),
            )
            .arg(
                arg!(--years <YEARS> "Investment horizon in whole years")
                    .required(false)
                    .default_value(years),
            )
            .arg(arg!(--csv <PATH> "Also write the yearly series to a CSV file").required(false)),
    )
}

pub fn build_cli() -> Command {
    command!()
        .about("SIP and lumpsum projections, fund listings, glossary and an investing assistant")
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .value_parser(["sqlite", "memory"])
                .default_value("sqlite")
                .help("Storage backend"),
        )
        .subcommand(Command::new("init").about("Create and seed the database"))
        .subcommand(Command::new("health").about("Report store and assistant status"))
        .subcommand(Command::new("doctor").about("Check configuration and catalogue for problems"))
        .subcommand(projection_cmd(
            "sip",
            "Project a monthly SIP (monthly compounding, annuity-due)",
            "12",
            "10",
        ))
        .subcommand(projection_cmd(
            "lumpsum",
            "Project a one-time investment (annual compounding)",
            "10",
            "5",
        ))
        .subcommand(json_flags(
            Command::new("milestones")
                .about("SIP maturity values at several horizons")
                .arg(
                    arg!(--amount <AMOUNT> "Monthly contribution")
                        .required(false)
                        .default_value("5000"),
                )
                .arg(
                    arg!(--rate <RATE> "Expected annual return, percent")
                        .required(false)
                        .default_value("12"),
                )
                .arg(
                    arg!(--years <YEARS> "Comma-separated horizons")
                        .required(false)
                        .default_value("1,3,5,10,20"),
                ),
        ))
        .subcommand(
            Command::new("funds")
                .about("Mutual fund listings")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(arg!(--category <CATEGORY> "Only this category").required(false)),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .arg(arg!(<id> "Fund id").value_parser(clap::value_parser!(i64)))
                        .arg(
                            arg!(--years <YEARS> "Horizon for the SIP illustration")
                                .required(false)
                                .default_value("10"),
                        ),
                )),
        )
        .subcommand(
            Command::new("glossary")
                .about("Financial glossary")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("show").arg(arg!(<term> "Term to look up")))),
        )
        .subcommand(
            Command::new("user")
                .about("Chat users")
                .subcommand(Command::new("add").arg(arg!(<username> "Unique username")))
                .subcommand(Command::new("show").arg(arg!(<username> "Username"))),
        )
        .subcommand(
            Command::new("chat")
                .about("Ask the investing assistant")
                .subcommand(
                    Command::new("send")
                        .arg(arg!(<message> "Your question"))
                        .arg(arg!(--user <USERNAME> "Load and record history for this user").required(false))
                        .arg(
                            arg!(--conversation <FILE> "JSON transcript to continue")
                                .required(false),
                        )
                        .arg(arg!(--save <FILE> "Write the updated transcript here").required(false))
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue).help("Print the exchange as JSON")),
                )
                .subcommand(json_flags(
                    Command::new("history")
                        .arg(arg!(--user <USERNAME> "Username").required(true)),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(arg!(<key> "Setting name"))
                        .arg(arg!(<value> "New value")),
                ),
        )
}
