use std::io::Write;

use anyhow::{anyhow, Result};
use clap::Parser;

/// Show help for cf or one of its commands.
#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct CmdHelp {
    /// The command to show help for.
    #[clap(name = "COMMAND")]
    command: Option<String>,
}

#[async_trait::async_trait]
impl crate::cmd::Command for CmdHelp {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()> {
        let args = match self.command.as_deref() {
            // set-org-role renders its own help rather than clap's.
            Some("set-org-role") => {
                write!(ctx.io.out, "{}", crate::cmd_set_org_role::help_text())?;
                return Ok(());
            }
            Some(name) => vec!["cf", name, "--help"],
            None => vec!["cf", "--help"],
        };

        match crate::Opts::try_parse_from(args) {
            Err(err) if err.kind() == clap::ErrorKind::DisplayHelp => {
                write!(ctx.io.out, "{}", err)?;
                Ok(())
            }
            _ => Err(anyhow!(
                "'{}' is not a registered command. See 'cf help'",
                self.command.as_deref().unwrap_or_default()
            )),
        }
    }
}
