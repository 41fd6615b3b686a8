use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::Duration,
};

const STATE_DIR: &str = "elearn";
const STATE_FILE: &str = "state.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl OutputFormat {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("text") {
            Self::Text
        } else {
            Self::Json
        }
    }
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub api_url: String,
    pub state_file: PathBuf,
    pub timeout: Duration,
    pub output: OutputFormat,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, state_file: PathBuf) -> Self {
        Self {
            api_url,
            state_file,
            timeout: Duration::from_secs(crate::client::config::DEFAULT_TIMEOUT_SECONDS),
            output: OutputFormat::default(),
        }
    }
}

/// Default state file under the XDG config dir, or `~/.config` without one.
#[must_use]
pub fn default_state_file() -> Option<PathBuf> {
    state_file_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn state_file_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty() && Path::new(dir).is_absolute())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|dir| !dir.is_empty())
                .map(|dir| PathBuf::from(dir).join(".config"))
        })?;
    Some(config_dir.join(STATE_DIR).join(STATE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new("http://localhost:8000/api".to_string(), PathBuf::from("/tmp/s.json"));
        assert_eq!(args.api_url, "http://localhost:8000/api");
        assert_eq!(args.timeout, Duration::from_secs(10));
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn test_state_file_prefers_xdg() {
        assert_eq!(
            state_file_from(Some("/xdg".into()), Some("/home/u".into())),
            Some(PathBuf::from("/xdg/elearn/state.json"))
        );
        assert_eq!(
            state_file_from(Some("relative".into()), Some("/home/u".into())),
            Some(PathBuf::from("/home/u/.config/elearn/state.json"))
        );
        assert_eq!(
            state_file_from(None, Some("/home/u".into())),
            Some(PathBuf::from("/home/u/.config/elearn/state.json"))
        );
        assert_eq!(state_file_from(None, None), None);
    }

    #[test]
    fn test_default_state_file_reads_env() {
        temp_env::with_vars(
            [("XDG_CONFIG_HOME", Some("/cfg")), ("HOME", Some("/home/u"))],
            || {
                assert_eq!(
                    default_state_file(),
                    Some(PathBuf::from("/cfg/elearn/state.json"))
                );
            },
        );
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
    }
}
