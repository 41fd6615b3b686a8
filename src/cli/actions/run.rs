use crate::cli::actions::{
    Action, assessments, chat, context::AppContext, navigate, session, textbooks,
};
use anyhow::Result;

// Single dispatch point for all CLI actions. Every action gets a freshly
// initialized session before it runs.

/// Execute the provided action.
/// # Errors
/// Returns an error if the session cannot be restored or the action fails.
pub async fn execute(action: Action) -> Result<()> {
    let ctx = AppContext::connect(action.globals()).await?;

    match action {
        Action::Session(_, command) => session::execute(&ctx, command).await,
        Action::Open(_, args) => navigate::execute(&ctx, &args),
        Action::Textbooks(_, command) => textbooks::execute(&ctx, command).await,
        Action::Chat(_, command) => chat::execute(&ctx, command).await,
        Action::Tests(_, command) => assessments::execute(&ctx, command).await,
    }
}
