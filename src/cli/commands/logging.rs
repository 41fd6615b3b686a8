use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>()
            && parsed <= 4
        {
            return Ok(parsed);
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ELEARN_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long("log-json")
                .help("Emit logs as JSON lines on stderr")
                .env("ELEARN_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_accepts_names_and_numbers() {
        for (raw, expected) in [("error", 0), ("WARN", 1), ("info", 2), ("3", 3), ("trace", 4)] {
            // Env defaults are read when the arg is built.
            temp_env::with_var("ELEARN_LOG_LEVEL", Some(raw), || {
                let matches = with_args(Command::new("t")).get_matches_from(vec!["t"]);
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(expected));
            });
        }
    }

    #[test]
    fn log_level_rejects_garbage() {
        temp_env::with_var("ELEARN_LOG_LEVEL", Some("loud"), || {
            let result = with_args(Command::new("t")).try_get_matches_from(vec!["t"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn log_json_reads_env() {
        temp_env::with_var("ELEARN_LOG_JSON", Some("true"), || {
            let matches = with_args(Command::new("t")).get_matches_from(vec!["t"]);
            assert!(matches.get_flag(ARG_LOG_JSON));
        });
        temp_env::with_var("ELEARN_LOG_JSON", None::<&str>, || {
            let matches = with_args(Command::new("t")).get_matches_from(vec!["t"]);
            assert!(!matches.get_flag(ARG_LOG_JSON));
        });
    }
}
