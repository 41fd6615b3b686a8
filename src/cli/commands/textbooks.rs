use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

pub const CMD_TEXTBOOKS: &str = "textbooks";
pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_UPLOAD: &str = "upload";
pub const CMD_PARSE: &str = "parse";
pub const CMD_DELETE: &str = "delete";
pub const CMD_KNOWLEDGE: &str = "knowledge";

pub const ARG_ID: &str = "id";
pub const ARG_FILE: &str = "file";
pub const ARG_NAME: &str = "name";
pub const ARG_VERSION: &str = "version";
pub const ARG_UNITS: &str = "units";
pub const ARG_UNIT_ID: &str = "unit-id";
pub const ARG_POINT_TYPE: &str = "point-type";
pub const ARG_PAGE: &str = "page";
pub const ARG_PAGE_SIZE: &str = "page-size";

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("Textbook id").required(true)
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_TEXTBOOKS)
        .about("Manage uploaded textbooks")
        .subcommand_required(true)
        .subcommand(Command::new(CMD_LIST).about("List your textbooks"))
        .subcommand(Command::new(CMD_SHOW).about("Show a textbook and its units").arg(id_arg()))
        .subcommand(
            Command::new(CMD_UPLOAD)
                .about("Upload a PDF, Word, or Markdown textbook")
                .arg(
                    Arg::new(ARG_FILE)
                        .help("File to upload")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new(ARG_NAME)
                        .short('n')
                        .long("name")
                        .help("Textbook name (default: file stem)"),
                )
                .arg(Arg::new(ARG_VERSION).long("edition").help("Edition or version label")),
        )
        .subcommand(
            Command::new(CMD_PARSE)
                .about("Extract units and knowledge points")
                .arg(id_arg())
                .arg(
                    Arg::new(ARG_UNITS)
                        .long("units")
                        .help("Unit numbers to parse (default: all)")
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(Command::new(CMD_DELETE).about("Delete a textbook").arg(id_arg()))
        .subcommand(
            Command::new(CMD_KNOWLEDGE)
                .about("List knowledge points")
                .arg(id_arg())
                .arg(Arg::new(ARG_UNIT_ID).long("unit-id").help("Only this unit"))
                .arg(
                    Arg::new(ARG_POINT_TYPE)
                        .long("type")
                        .help("Only this point type")
                        .value_parser(["vocabulary", "grammar", "sentence"]),
                )
                .arg(
                    Arg::new(ARG_PAGE)
                        .long("page")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new(ARG_PAGE_SIZE)
                        .long("page-size")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                ),
        )
}
