pub mod assessments;
pub mod chat;
pub mod context;
pub mod navigate;
pub mod session;
pub mod textbooks;

// Internal "interpreter" for `Action`.
// The match lives in a separate module so `mod.rs` stays small as actions grow.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Session(GlobalArgs, session::Command),
    Open(GlobalArgs, navigate::Args),
    Textbooks(GlobalArgs, textbooks::Command),
    Chat(GlobalArgs, chat::Command),
    Tests(GlobalArgs, assessments::Command),
}

impl Action {
    #[must_use]
    pub const fn globals(&self) -> &GlobalArgs {
        match self {
            Action::Session(globals, _)
            | Action::Open(globals, _)
            | Action::Textbooks(globals, _)
            | Action::Chat(globals, _)
            | Action::Tests(globals, _) => globals,
        }
    }

    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
