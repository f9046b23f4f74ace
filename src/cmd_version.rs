use std::io::Write;

use anyhow::Result;
use clap::Parser;

/// Prints the version of the program.
#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct CmdVersion {}

#[async_trait::async_trait]
impl crate::cmd::Command for CmdVersion {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()> {
        writeln!(ctx.io.out, "cf version {}", clap::crate_version!())?;

        Ok(())
    }
}
