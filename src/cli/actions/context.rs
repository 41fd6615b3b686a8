//! Per-invocation wiring: storage, transport, and the session, constructed
//! once and initialized before any command runs.

use crate::{
    APP_USER_AGENT,
    cli::globals::{GlobalArgs, OutputFormat},
    client::{ApiClient, ClientConfig},
    features::auth::{AuthClient, RefreshOutcome, Session, TokenStore},
    storage::{FileStorage, Storage},
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct AppContext {
    pub api: ApiClient,
    pub session: Session<AuthClient>,
    pub output: OutputFormat,
}

impl AppContext {
    /// Builds the client stack and restores the persisted session.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the state file
    /// cannot be read.
    pub async fn connect(globals: &GlobalArgs) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(globals.state_file.clone()));
        let tokens = TokenStore::new(storage);

        let config = ClientConfig::new(&globals.api_url)?
            .with_timeout(globals.timeout)
            .with_user_agent(APP_USER_AGENT);
        let api = ApiClient::new(&config, tokens.clone())?;

        let session = Session::new(AuthClient::new(api.clone()), tokens).with_context(|| {
            format!(
                "Failed to read session state from {}",
                globals.state_file.display()
            )
        })?;

        match session
            .initialize()
            .await
            .context("Failed to restore session")?
        {
            RefreshOutcome::Unavailable { message } => {
                warn!("Could not verify the stored session: {message}");
            }
            RefreshOutcome::Expired => warn!("Stored session expired; please log in again"),
            outcome => debug!(?outcome, "session initialized"),
        }

        Ok(Self {
            api,
            session,
            output: globals.output,
        })
    }

    /// Fails unless the session is authenticated.
    ///
    /// # Errors
    /// Returns an error telling the user to log in.
    pub fn require_login(&self) -> Result<()> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            bail!("Not logged in. Run `elearn login` first.")
        }
    }
}

/// Prints a value as pretty JSON on stdout.
///
/// # Errors
/// Returns an error if the value cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
