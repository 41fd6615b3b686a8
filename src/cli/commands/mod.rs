pub mod assessments;
pub mod chat;
pub mod logging;
pub mod session;
pub mod textbooks;

use crate::client::config::DEFAULT_API_BASE_URL;
use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STATE_FILE: &str = "state-file";
pub const ARG_TIMEOUT: &str = "timeout-seconds";
pub const ARG_OUTPUT: &str = "output";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("elearn")
        .about("English learning platform client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the platform API")
                .default_value(DEFAULT_API_BASE_URL)
                .env("ELEARN_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STATE_FILE)
                .long("state-file")
                .help("Where the session token is stored")
                .long_help(
                    "Where the session token is stored. Defaults to $XDG_CONFIG_HOME/elearn/state.json, falling back to $HOME/.config/elearn/state.json.",
                )
                .env("ELEARN_STATE_FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout-seconds")
                .help("Request timeout in seconds (default: 10)")
                .env("ELEARN_TIMEOUT_SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_OUTPUT)
                .short('o')
                .long("output")
                .help("Output format for listings")
                .value_parser(["json", "text"])
                .default_value("json")
                .env("ELEARN_OUTPUT")
                .global(true),
        );

    let command = session::with_subcommands(command)
        .subcommand(textbooks::subcommand())
        .subcommand(chat::subcommand())
        .subcommand(assessments::subcommand());
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleared_env<F: FnOnce()>(f: F) {
        temp_env::with_vars(
            [
                ("ELEARN_API_URL", None::<&str>),
                ("ELEARN_STATE_FILE", None),
                ("ELEARN_TIMEOUT_SECONDS", None),
                ("ELEARN_OUTPUT", None),
                ("ELEARN_LOG_LEVEL", None),
                ("ELEARN_LOG_JSON", None),
                ("ELEARN_EMAIL", None),
                ("ELEARN_PASSWORD", None),
            ],
            f,
        );
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "elearn");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("English learning platform client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
        command.debug_assert();
    }

    #[test]
    fn test_defaults() {
        cleared_env(|| {
            let matches = new().get_matches_from(vec!["elearn", "whoami"]);
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).cloned(),
                Some(DEFAULT_API_BASE_URL.to_string())
            );
            assert!(matches.get_one::<u64>(ARG_TIMEOUT).is_none());
            assert!(matches.get_one::<PathBuf>(ARG_STATE_FILE).is_none());
            assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(0));
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("ELEARN_API_URL", Some("https://learn.example.com/api")),
                ("ELEARN_STATE_FILE", Some("/tmp/elearn-state.json")),
                ("ELEARN_TIMEOUT_SECONDS", Some("30")),
                ("ELEARN_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["elearn", "whoami"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://learn.example.com/api".to_string())
                );
                assert_eq!(
                    matches.get_one::<PathBuf>(ARG_STATE_FILE).cloned(),
                    Some(PathBuf::from("/tmp/elearn-state.json"))
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(30));
                assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        cleared_env(|| {
            let matches = new().get_matches_from(vec![
                "elearn",
                "textbooks",
                "list",
                "--api-url",
                "http://127.0.0.1:9000/api",
                "-vvv",
            ]);
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).cloned(),
                Some("http://127.0.0.1:9000/api".to_string())
            );
            assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(3));
        });
    }

    #[test]
    fn test_login_requires_credentials() {
        cleared_env(|| {
            let result = new().try_get_matches_from(vec!["elearn", "login", "--email", "a@x.com"]);
            assert_eq!(
                result.map_err(|e| e.kind()).err(),
                Some(clap::error::ErrorKind::MissingRequiredArgument)
            );
        });
    }

    #[test]
    fn test_password_from_env() {
        cleared_env(|| {
            temp_env::with_var("ELEARN_PASSWORD", Some("pw"), || {
                let matches = new().get_matches_from(vec!["elearn", "login", "-e", "a@x.com"]);
                let (_, login) = matches.subcommand().unwrap();
                assert_eq!(
                    login.get_one::<String>(session::ARG_PASSWORD).map(String::as_str),
                    Some("pw")
                );
            });
        });
    }

    #[test]
    fn test_subcommand_required() {
        cleared_env(|| {
            assert!(new().try_get_matches_from(vec!["elearn"]).is_err());
            assert!(new().try_get_matches_from(vec!["elearn", "tests"]).is_err());
        });
    }

    #[test]
    fn test_units_accept_comma_list() {
        cleared_env(|| {
            let matches = new().get_matches_from(vec![
                "elearn",
                "tests",
                "generate",
                "--textbook",
                "tb-1",
                "--units",
                "1,2",
                "--units",
                "4",
            ]);
            let (_, tests) = matches.subcommand().unwrap();
            let (_, generate) = tests.subcommand().unwrap();
            let units: Vec<u32> = generate
                .get_many::<u32>(assessments::ARG_UNITS)
                .unwrap()
                .copied()
                .collect();
            assert_eq!(units, vec![1, 2, 4]);
        });
    }
}
