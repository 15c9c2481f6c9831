use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Carries the message the user should see.
    #[error("{message}")]
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login,
    SelectMonth { index: usize },
    SubmitEntry,
}

#[async_trait::async_trait]
pub trait CommandHandler: Send {
    /// Runs `command` and returns the confirmation to show.
    async fn handle(&mut self, command: Command) -> error_stack::Result<String, CommandError>;
}
