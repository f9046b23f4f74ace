use anyhow::Result;
use thiserror::Error;

/// This trait describes a command.
#[async_trait::async_trait]
pub trait Command {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()>;
}

/// The arguments given to a command were wrong. Both variants carry the command's
/// help text so the user can correct the invocation.
#[derive(Debug, Error)]
pub enum UsageError {
    /// Printed to standard error.
    #[error("Incorrect Usage: {message}")]
    Invalid { message: String, help: String },
    /// Printed to standard output, in the wording older releases used for arity errors.
    #[error("Incorrect Usage. {message}")]
    Arity { message: String, help: String },
}
