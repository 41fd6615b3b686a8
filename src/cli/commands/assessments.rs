use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

pub const CMD_TESTS: &str = "tests";
pub const CMD_GENERATE: &str = "generate";
pub const CMD_SHOW: &str = "show";
pub const CMD_SUBMIT: &str = "submit";
pub const CMD_RECORDS: &str = "records";
pub const CMD_STATS: &str = "stats";
pub const CMD_REVIEW: &str = "review";
pub const CMD_WRONG: &str = "wrong";

pub const ARG_ID: &str = "id";
pub const ARG_TEXTBOOK: &str = "textbook";
pub const ARG_TEST_TYPE: &str = "test-type";
pub const ARG_UNITS: &str = "units";
pub const ARG_POINT_TYPES: &str = "point-types";
pub const ARG_DIFFICULTY: &str = "difficulty";
pub const ARG_COUNT: &str = "count";
pub const ARG_ANSWER: &str = "answer";
pub const ARG_ANSWERS_FILE: &str = "answers-file";
pub const ARG_PAGE: &str = "page";
pub const ARG_PAGE_SIZE: &str = "page-size";
pub const ARG_BODY: &str = "body";

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("Test id").required(true)
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_TESTS)
        .about("Generate, take, and review tests")
        .subcommand_required(true)
        .subcommand(
            Command::new(CMD_GENERATE)
                .about("Generate a test from a parsed textbook")
                .arg(
                    Arg::new(ARG_TEXTBOOK)
                        .long("textbook")
                        .help("Textbook id")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_TEST_TYPE)
                        .long("type")
                        .value_parser(["unit", "comprehensive"])
                        .default_value("unit"),
                )
                .arg(
                    Arg::new(ARG_UNITS)
                        .long("units")
                        .help("Unit numbers (default: all)")
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new(ARG_POINT_TYPES)
                        .long("point-types")
                        .help("vocabulary, grammar, sentence (default: all)")
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .value_parser(["vocabulary", "grammar", "sentence"]),
                )
                .arg(
                    Arg::new(ARG_DIFFICULTY)
                        .long("difficulty")
                        .value_parser(["easy", "medium", "hard"])
                        .default_value("medium"),
                )
                .arg(
                    Arg::new(ARG_COUNT)
                        .long("count")
                        .help("Number of questions (default: chosen by the server)")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(Command::new(CMD_SHOW).about("Show a generated test").arg(id_arg()))
        .subcommand(
            Command::new(CMD_SUBMIT)
                .about("Submit answers for grading")
                .arg(id_arg())
                .arg(
                    Arg::new(ARG_ANSWER)
                        .short('a')
                        .long("answer")
                        .help("QUESTION_ID=ANSWER, repeatable")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new(ARG_ANSWERS_FILE)
                        .long("answers-file")
                        .help("JSON array of {question_id, answer, time_spent}")
                        .value_parser(clap::value_parser!(PathBuf))
                        .conflicts_with(ARG_ANSWER),
                ),
        )
        .subcommand(
            Command::new(CMD_RECORDS)
                .about("List past tests")
                .arg(
                    Arg::new(ARG_PAGE)
                        .long("page")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new(ARG_PAGE_SIZE)
                        .long("page-size")
                        .default_value("10")
                        .value_parser(clap::value_parser!(u32).range(1..=50)),
                ),
        )
        .subcommand(Command::new(CMD_STATS).about("Show learning statistics"))
        .subcommand(
            Command::new(CMD_REVIEW)
                .about("Generate a review test from a finished test's mistakes")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new(CMD_WRONG)
                .about("Generate a drill from collected mistakes")
                .arg(
                    Arg::new(ARG_BODY)
                        .long("body")
                        .help("Request JSON")
                        .default_value("{}"),
                ),
        )
}
