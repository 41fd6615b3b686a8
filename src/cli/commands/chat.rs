use clap::{Arg, Command};

pub const CMD_CHAT: &str = "chat";
pub const CMD_ASK: &str = "ask";
pub const CMD_QUERY: &str = "query";
pub const CMD_EXPLAIN: &str = "explain";
pub const CMD_HISTORY: &str = "history";
pub const CMD_SEARCH: &str = "search";

pub const ARG_TEXT: &str = "text";
pub const ARG_TEXTBOOK: &str = "textbook";
pub const ARG_UNIT_ID: &str = "unit-id";
pub const ARG_POINT_TYPE: &str = "point-type";
pub const ARG_KNOWLEDGE_POINT: &str = "knowledge-point";
pub const ARG_LIMIT: &str = "limit";
pub const ARG_DELAY_MS: &str = "delay-ms";

fn unit_arg() -> Arg {
    Arg::new(ARG_UNIT_ID).long("unit-id").help("Only this unit")
}

fn point_type_arg() -> Arg {
    Arg::new(ARG_POINT_TYPE)
        .long("type")
        .help("Only this point type")
        .value_parser(["vocabulary", "grammar", "sentence"])
}

fn textbook_arg() -> Arg {
    Arg::new(ARG_TEXTBOOK)
        .long("textbook")
        .help("Scope to this textbook id")
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_CHAT)
        .about("Ask the tutor and look up knowledge points")
        .subcommand_required(true)
        .subcommand(
            Command::new(CMD_ASK)
                .about("Ask a free-form question")
                .arg(Arg::new(ARG_TEXT).help("Question").required(true))
                .arg(textbook_arg()),
        )
        .subcommand(
            Command::new(CMD_QUERY)
                .about("Search knowledge points")
                .arg(Arg::new(ARG_TEXT).help("Search text").required(true))
                .arg(textbook_arg())
                .arg(unit_arg())
                .arg(point_type_arg()),
        )
        .subcommand(
            Command::new(CMD_SEARCH)
                .about("Search as you type: one query per stdin line, only the latest runs")
                .arg(textbook_arg())
                .arg(unit_arg())
                .arg(point_type_arg())
                .arg(
                    Arg::new(ARG_DELAY_MS)
                        .long("delay-ms")
                        .help("Quiet period before a query is sent")
                        .default_value("300")
                        .value_parser(clap::value_parser!(u64).range(1..=10_000)),
                ),
        )
        .subcommand(
            Command::new(CMD_EXPLAIN)
                .about("Explain one knowledge point")
                .arg(
                    Arg::new(ARG_KNOWLEDGE_POINT)
                        .help("Knowledge point id")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_HISTORY).about("Show recent messages").arg(
                Arg::new(ARG_LIMIT)
                    .long("limit")
                    .default_value("20")
                    .value_parser(clap::value_parser!(u32).range(1..=100)),
            ),
        )
}
