//! Maps validated CLI matches to an [`Action`].
//!
//! Value parsers in `commands` already enforce ranges and choices, so lookups
//! here only fail when a required value is missing.

use crate::{
    cli::{
        actions::{
            Action, assessments as tests_action, chat as chat_action, navigate, session,
            textbooks as textbooks_action,
        },
        commands::{
            ARG_API_URL, ARG_OUTPUT, ARG_STATE_FILE, ARG_TIMEOUT, assessments, chat,
            session as session_cmd, textbooks,
        },
        globals::{GlobalArgs, OutputFormat, default_state_file},
    },
    client::config::DEFAULT_TIMEOUT_SECONDS,
    features::{
        assessments::types::{GenerateTestRequest, RecordsPage, TestType},
        auth::types::AccountType,
        chat::types::KnowledgeQuery,
        textbooks::types::KnowledgeFilter,
    },
    util::{Difficulty, debounce::DEFAULT_DEBOUNCE},
};
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = global_args(matches)?;

    match matches.subcommand() {
        Some((session_cmd::CMD_LOGIN, sub)) => Ok(Action::Session(
            globals,
            session::Command::Login(session::LoginArgs {
                email: required(sub, session_cmd::ARG_EMAIL)?,
                password: password(sub)?,
                redirect: optional(sub, session_cmd::ARG_REDIRECT),
            }),
        )),
        Some((session_cmd::CMD_REGISTER, sub)) => Ok(Action::Session(
            globals,
            session::Command::Register(session::RegisterArgs {
                email: required(sub, session_cmd::ARG_EMAIL)?,
                password: password(sub)?,
                name: required(sub, session_cmd::ARG_NAME)?,
                user_type: user_type(sub.get_one::<String>(session_cmd::ARG_USER_TYPE))?,
            }),
        )),
        Some((session_cmd::CMD_LOGOUT, _)) => {
            Ok(Action::Session(globals, session::Command::Logout))
        }
        Some((session_cmd::CMD_WHOAMI, _)) => {
            Ok(Action::Session(globals, session::Command::WhoAmI))
        }
        Some((session_cmd::CMD_OPEN, sub)) => Ok(Action::Open(
            globals,
            navigate::Args {
                path: required(sub, session_cmd::ARG_PATH)?,
            },
        )),
        Some((textbooks::CMD_TEXTBOOKS, sub)) => {
            Ok(Action::Textbooks(globals, textbooks_command(sub)?))
        }
        Some((chat::CMD_CHAT, sub)) => Ok(Action::Chat(globals, chat_command(sub)?)),
        Some((assessments::CMD_TESTS, sub)) => {
            Ok(Action::Tests(globals, assessments_command(sub)?))
        }
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("missing command, see --help"),
    }
}

fn global_args(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = required(matches, ARG_API_URL)?;
    let state_file = match matches.get_one::<PathBuf>(ARG_STATE_FILE) {
        Some(path) => path.clone(),
        None => default_state_file()
            .context("cannot determine state file; pass --state-file")?,
    };
    let timeout = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
    let output = matches
        .get_one::<String>(ARG_OUTPUT)
        .map_or_else(OutputFormat::default, |value| OutputFormat::parse(value));

    Ok(GlobalArgs {
        timeout: Duration::from_secs(timeout),
        output,
        ..GlobalArgs::new(api_url, state_file)
    })
}

fn textbooks_command(matches: &ArgMatches) -> Result<textbooks_action::Command> {
    let command = match matches.subcommand() {
        Some((textbooks::CMD_LIST, _)) => textbooks_action::Command::List,
        Some((textbooks::CMD_SHOW, sub)) => textbooks_action::Command::Show {
            id: required(sub, textbooks::ARG_ID)?,
        },
        Some((textbooks::CMD_UPLOAD, sub)) => textbooks_action::Command::Upload {
            file: sub
                .get_one::<PathBuf>(textbooks::ARG_FILE)
                .cloned()
                .context("missing required argument: file")?,
            name: optional(sub, textbooks::ARG_NAME),
            version: optional(sub, textbooks::ARG_VERSION),
        },
        Some((textbooks::CMD_PARSE, sub)) => textbooks_action::Command::Parse {
            id: required(sub, textbooks::ARG_ID)?,
            units: numbers(sub, textbooks::ARG_UNITS),
        },
        Some((textbooks::CMD_DELETE, sub)) => textbooks_action::Command::Delete {
            id: required(sub, textbooks::ARG_ID)?,
        },
        Some((textbooks::CMD_KNOWLEDGE, sub)) => textbooks_action::Command::Knowledge {
            id: required(sub, textbooks::ARG_ID)?,
            filter: KnowledgeFilter {
                unit_id: optional(sub, textbooks::ARG_UNIT_ID),
                point_type: optional(sub, textbooks::ARG_POINT_TYPE),
                page: sub.get_one::<u32>(textbooks::ARG_PAGE).copied(),
                page_size: sub.get_one::<u32>(textbooks::ARG_PAGE_SIZE).copied(),
            },
        },
        _ => bail!("missing textbooks subcommand, see --help"),
    };
    Ok(command)
}

fn chat_command(matches: &ArgMatches) -> Result<chat_action::Command> {
    let command = match matches.subcommand() {
        Some((chat::CMD_ASK, sub)) => chat_action::Command::Ask {
            text: required(sub, chat::ARG_TEXT)?,
            textbook: optional(sub, chat::ARG_TEXTBOOK),
        },
        Some((chat::CMD_QUERY, sub)) => chat_action::Command::Query(KnowledgeQuery {
            query: required(sub, chat::ARG_TEXT)?,
            textbook_id: optional(sub, chat::ARG_TEXTBOOK),
            unit_id: optional(sub, chat::ARG_UNIT_ID),
            point_type: optional(sub, chat::ARG_POINT_TYPE),
        }),
        Some((chat::CMD_EXPLAIN, sub)) => chat_action::Command::Explain {
            id: required(sub, chat::ARG_KNOWLEDGE_POINT)?,
        },
        Some((chat::CMD_HISTORY, sub)) => chat_action::Command::History {
            limit: sub
                .get_one::<u32>(chat::ARG_LIMIT)
                .copied()
                .unwrap_or(crate::features::chat::client::DEFAULT_HISTORY_LIMIT),
        },
        Some((chat::CMD_SEARCH, sub)) => chat_action::Command::Search {
            template: KnowledgeQuery {
                query: String::new(),
                textbook_id: optional(sub, chat::ARG_TEXTBOOK),
                unit_id: optional(sub, chat::ARG_UNIT_ID),
                point_type: optional(sub, chat::ARG_POINT_TYPE),
            },
            delay: sub
                .get_one::<u64>(chat::ARG_DELAY_MS)
                .copied()
                .map_or(DEFAULT_DEBOUNCE, Duration::from_millis),
        },
        _ => bail!("missing chat subcommand, see --help"),
    };
    Ok(command)
}

fn assessments_command(matches: &ArgMatches) -> Result<tests_action::Command> {
    let command = match matches.subcommand() {
        Some((assessments::CMD_GENERATE, sub)) => {
            let mut request = GenerateTestRequest::new(required(sub, assessments::ARG_TEXTBOOK)?);
            request.test_type = match sub.get_one::<String>(assessments::ARG_TEST_TYPE) {
                Some(value) if value == "comprehensive" => TestType::Comprehensive,
                _ => TestType::Unit,
            };
            request.unit_numbers = numbers(sub, assessments::ARG_UNITS);
            request.point_types = sub
                .get_many::<String>(assessments::ARG_POINT_TYPES)
                .map(|values| values.cloned().collect());
            request.difficulty = sub
                .get_one::<String>(assessments::ARG_DIFFICULTY)
                .map_or_else(Difficulty::default, |value| Difficulty::from(value.as_str()));
            request.question_count = sub.get_one::<u32>(assessments::ARG_COUNT).copied();
            tests_action::Command::Generate(request)
        }
        Some((assessments::CMD_SHOW, sub)) => tests_action::Command::Show {
            id: required(sub, assessments::ARG_ID)?,
        },
        Some((assessments::CMD_SUBMIT, sub)) => tests_action::Command::Submit {
            id: required(sub, assessments::ARG_ID)?,
            answers: sub
                .get_many::<String>(assessments::ARG_ANSWER)
                .into_iter()
                .flatten()
                .map(|raw| tests_action::parse_answer(raw))
                .collect::<Result<Vec<_>>>()?,
            answers_file: sub.get_one::<PathBuf>(assessments::ARG_ANSWERS_FILE).cloned(),
        },
        Some((assessments::CMD_RECORDS, sub)) => {
            let defaults = RecordsPage::default();
            tests_action::Command::Records(RecordsPage {
                page: sub
                    .get_one::<u32>(assessments::ARG_PAGE)
                    .copied()
                    .unwrap_or(defaults.page),
                page_size: sub
                    .get_one::<u32>(assessments::ARG_PAGE_SIZE)
                    .copied()
                    .unwrap_or(defaults.page_size),
            })
        }
        Some((assessments::CMD_STATS, _)) => tests_action::Command::Stats,
        Some((assessments::CMD_REVIEW, sub)) => tests_action::Command::Review {
            id: required(sub, assessments::ARG_ID)?,
        },
        Some((assessments::CMD_WRONG, sub)) => {
            let raw = required(sub, assessments::ARG_BODY)?;
            tests_action::Command::Wrong {
                body: serde_json::from_str(&raw).context("--body must be valid JSON")?,
            }
        }
        _ => bail!("missing tests subcommand, see --help"),
    };
    Ok(command)
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: {name}"))
}

/// Optional string argument; blank values count as unset.
fn optional(matches: &ArgMatches, name: &str) -> Option<String> {
    matches
        .get_one::<String>(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn numbers(matches: &ArgMatches, name: &str) -> Option<Vec<u32>> {
    matches
        .get_many::<u32>(name)
        .map(|values| values.copied().collect())
}

fn password(matches: &ArgMatches) -> Result<SecretString> {
    required(matches, session_cmd::ARG_PASSWORD).map(SecretString::from)
}

fn user_type(value: Option<&String>) -> Result<AccountType> {
    match value.map(String::as_str) {
        None | Some("student") => Ok(AccountType::Student),
        Some("parent") => Ok(AccountType::Parent),
        Some(other) => bail!("invalid user type: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    fn with_clean_env<F: FnOnce()>(f: F) {
        temp_env::with_vars(
            [
                ("ELEARN_API_URL", None::<&str>),
                ("ELEARN_STATE_FILE", Some("/tmp/elearn-test/state.json")),
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

    fn dispatch(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn login_reads_credentials_and_globals() {
        with_clean_env(|| {
            let action = dispatch(&[
                "elearn",
                "--timeout-seconds",
                "3",
                "-o",
                "text",
                "login",
                "-e",
                "s@x.com",
                "-p",
                "pw",
                "--redirect",
                "/textbooks/7",
            ])
            .unwrap();

            let Action::Session(globals, session::Command::Login(args)) = action else {
                panic!("expected login action");
            };
            assert_eq!(globals.timeout, Duration::from_secs(3));
            assert_eq!(globals.output, OutputFormat::Text);
            assert_eq!(
                globals.state_file,
                PathBuf::from("/tmp/elearn-test/state.json")
            );
            assert_eq!(args.email, "s@x.com");
            assert_eq!(args.password.expose_secret(), "pw");
            assert_eq!(args.redirect.as_deref(), Some("/textbooks/7"));
        });
    }

    #[test]
    fn password_from_env() {
        with_clean_env(|| {
            temp_env::with_var("ELEARN_PASSWORD", Some("env-pw"), || {
                let action =
                    dispatch(&["elearn", "register", "-e", "p@x.com", "-n", "Pat", "-t", "parent"])
                        .unwrap();
                let Action::Session(globals, session::Command::Register(args)) = action else {
                    panic!("expected register action");
                };
                assert_eq!(globals.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
                assert_eq!(args.password.expose_secret(), "env-pw");
                assert_eq!(args.user_type, AccountType::Parent);
            });
        });
    }

    #[test]
    fn open_takes_path() {
        with_clean_env(|| {
            let action = dispatch(&["elearn", "open", "/test/3/result"]).unwrap();
            let Action::Open(_, args) = action else {
                panic!("expected open action");
            };
            assert_eq!(args.path, "/test/3/result");
        });
    }

    #[test]
    fn textbook_parse_units() {
        with_clean_env(|| {
            let action = dispatch(&["elearn", "textbooks", "parse", "tb1", "--units", "1,3"]).unwrap();
            let Action::Textbooks(_, textbooks_action::Command::Parse { id, units }) = action else {
                panic!("expected parse action");
            };
            assert_eq!(id, "tb1");
            assert_eq!(units, Some(vec![1, 3]));

            let action = dispatch(&["elearn", "textbooks", "parse", "tb1"]).unwrap();
            let Action::Textbooks(_, textbooks_action::Command::Parse { units, .. }) = action else {
                panic!("expected parse action");
            };
            assert_eq!(units, None);
        });
    }

    #[test]
    fn generate_request_from_flags() {
        with_clean_env(|| {
            let action = dispatch(&[
                "elearn",
                "tests",
                "generate",
                "--textbook",
                "tb1",
                "--type",
                "comprehensive",
                "--point-types",
                "vocabulary,grammar",
                "--difficulty",
                "hard",
            ])
            .unwrap();
            let Action::Tests(_, tests_action::Command::Generate(request)) = action else {
                panic!("expected generate action");
            };
            assert_eq!(request.textbook_id, "tb1");
            assert_eq!(request.test_type, TestType::Comprehensive);
            assert_eq!(
                request.point_types,
                Some(vec!["vocabulary".to_string(), "grammar".to_string()])
            );
            assert_eq!(request.difficulty, Difficulty::Hard);
            assert_eq!(request.unit_numbers, None);
            assert_eq!(request.question_count, None);
        });
    }

    #[test]
    fn submit_parses_answers() {
        with_clean_env(|| {
            let action =
                dispatch(&["elearn", "tests", "submit", "t1", "-a", "q1=B", "-a", "q2=went"])
                    .unwrap();
            let Action::Tests(_, tests_action::Command::Submit { answers, .. }) = action else {
                panic!("expected submit action");
            };
            assert_eq!(answers.len(), 2);
            assert_eq!(answers[1].answer, "went");

            let err = dispatch(&["elearn", "tests", "submit", "t1", "-a", "oops"]).unwrap_err();
            assert!(err.to_string().contains("QUESTION_ID=ANSWER"));
        });
    }

    #[test]
    fn wrong_body_must_be_json() {
        with_clean_env(|| {
            assert!(dispatch(&["elearn", "tests", "wrong", "--body", "{oops"]).is_err());
            let action = dispatch(&["elearn", "tests", "wrong"]).unwrap();
            let Action::Tests(_, tests_action::Command::Wrong { body }) = action else {
                panic!("expected wrong action");
            };
            assert_eq!(body, serde_json::json!({}));
        });
    }

    #[test]
    fn history_limit_defaults() {
        with_clean_env(|| {
            let action = dispatch(&["elearn", "chat", "history"]).unwrap();
            let Action::Chat(_, chat_action::Command::History { limit }) = action else {
                panic!("expected history action");
            };
            assert_eq!(limit, 20);
        });
    }

    #[test]
    fn search_takes_filters_and_delay() {
        with_clean_env(|| {
            let action = dispatch(&[
                "elearn",
                "chat",
                "search",
                "--textbook",
                "tb1",
                "--type",
                "grammar",
            ])
            .unwrap();
            let Action::Chat(_, chat_action::Command::Search { template, delay }) = action else {
                panic!("expected search action");
            };
            assert_eq!(template.textbook_id.as_deref(), Some("tb1"));
            assert_eq!(template.point_type.as_deref(), Some("grammar"));
            assert_eq!(delay, DEFAULT_DEBOUNCE);

            let action = dispatch(&["elearn", "chat", "search", "--delay-ms", "50"]).unwrap();
            let Action::Chat(_, chat_action::Command::Search { delay, .. }) = action else {
                panic!("expected search action");
            };
            assert_eq!(delay, Duration::from_millis(50));
        });
    }

    #[test]
    fn blank_optional_is_unset() {
        with_clean_env(|| {
            let action = dispatch(&["elearn", "chat", "ask", "hi", "--textbook", "  "]).unwrap();
            let Action::Chat(_, chat_action::Command::Ask { textbook, .. }) = action else {
                panic!("expected ask action");
            };
            assert_eq!(textbook, None);
        });
    }

    #[test]
    fn missing_state_file_location_is_an_error() {
        temp_env::with_vars(
            [
                ("ELEARN_STATE_FILE", None::<&str>),
                ("XDG_CONFIG_HOME", None),
                ("HOME", None),
            ],
            || {
                let err = dispatch(&["elearn", "whoami"]).unwrap_err();
                assert!(err.to_string().contains("--state-file"));
            },
        );
    }
}
