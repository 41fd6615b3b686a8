use crate::{
    cli::actions::context::{AppContext, print_json},
    features::auth::{
        AuthOutcome, SessionState, post_login_destination,
        types::{AccountType, RegisterRequest},
    },
};
use anyhow::{Result, bail};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

#[derive(Debug)]
pub struct LoginArgs {
    pub email: String,
    pub password: SecretString,
    pub redirect: Option<String>,
}

#[derive(Debug)]
pub struct RegisterArgs {
    pub email: String,
    pub password: SecretString,
    pub name: String,
    pub user_type: AccountType,
}

#[derive(Debug)]
pub enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    WhoAmI,
}

/// Execute a session command.
/// # Errors
/// Returns an error if authentication fails or the state file cannot be written.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Login(args) => {
            let outcome = ctx
                .session
                .login(&args.email, args.password.expose_secret())
                .await?;
            ensure_success(outcome)?;
            let destination = post_login_destination(args.redirect.as_deref());
            print_json(&json!({
                "status": "logged_in",
                "user": ctx.session.user(),
                "next": destination,
            }))
        }
        Command::Register(args) => {
            let request = RegisterRequest {
                email: args.email,
                password: args.password.expose_secret().to_string(),
                user_type: args.user_type,
                name: args.name,
            };
            let outcome = ctx.session.register(&request).await?;
            ensure_success(outcome)?;
            print_json(&json!({
                "status": "registered",
                "user": ctx.session.user(),
                "next": post_login_destination(None),
            }))
        }
        Command::Logout => {
            ctx.session.logout()?;
            print_json(&json!({"status": "logged_out"}))
        }
        Command::WhoAmI => print_json(&describe(&ctx.session.snapshot())),
    }
}

fn ensure_success(outcome: AuthOutcome) -> Result<()> {
    match outcome {
        AuthOutcome::Success => Ok(()),
        AuthOutcome::Failure { message } => bail!(message),
    }
}

/// Public view of the session; never includes the token.
fn describe(state: &SessionState) -> serde_json::Value {
    json!({
        "logged_in": state.is_logged_in(),
        "phase": state.phase().as_str(),
        "is_parent": state.is_parent(),
        "is_student": state.is_student(),
        "user": state.user,
    })
}
