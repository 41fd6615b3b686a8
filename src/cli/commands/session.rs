use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_OPEN: &str = "open";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NAME: &str = "name";
pub const ARG_USER_TYPE: &str = "user-type";
pub const ARG_REDIRECT: &str = "redirect";
pub const ARG_PATH: &str = "path";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long("email")
        .help("Account email")
        .env("ELEARN_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password")
        .env("ELEARN_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in and persist the session token")
                .arg(email_arg())
                .arg(password_arg())
                .arg(
                    Arg::new(ARG_REDIRECT)
                        .long("redirect")
                        .help("Page to open after signing in (same-origin path)"),
                ),
        )
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Create an account and sign in")
                .arg(email_arg())
                .arg(password_arg())
                .arg(
                    Arg::new(ARG_NAME)
                        .short('n')
                        .long("name")
                        .help("Display name")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_USER_TYPE)
                        .short('t')
                        .long("user-type")
                        .help("Account type")
                        .value_parser(["student", "parent"])
                        .default_value("student"),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Forget the stored session"))
        .subcommand(Command::new(CMD_WHOAMI).about("Show the current session"))
        .subcommand(
            Command::new(CMD_OPEN)
                .about("Navigate to an in-app page through the route guard")
                .arg(
                    Arg::new(ARG_PATH)
                        .help("In-app path, e.g. /textbooks/7")
                        .required(true),
                ),
        )
}
