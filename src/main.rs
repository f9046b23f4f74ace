//! The cf command line tool.
#![deny(missing_docs)]

// Always export the cmd_* modules as public so that it tells us when we are
// missing docs.

mod cmd;
/// The help command.
pub mod cmd_help;
/// The set-org-role command.
pub mod cmd_set_org_role;
/// The version command.
pub mod cmd_version;
mod colors;
mod config;
mod config_file;
mod config_from_env;
mod config_from_file;
mod config_map;
mod context;
mod http;
mod iostreams;
mod logger;
mod session;
#[cfg(test)]
mod tests;
mod types;

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Work with Cloud Foundry from the command line.
///
/// Environment variables that can be used with cf.
///
/// CF_HOST: the Cloud Controller API host to talk to. Takes precedence over the hosts
/// stored in the config.
///
/// CF_TOKEN: an access token for Cloud Controller requests. Takes precedence over
/// previously stored credentials.
///
/// DEBUG: set to any value to enable verbose output to standard error.
///
/// NO_COLOR: set to any value to avoid printing ANSI escape sequences for color output.
///
/// CLICOLOR: set to "0" to disable printing ANSI colors in output.
///
/// CLICOLOR_FORCE: set to a value other than "0" to keep ANSI colors in output
/// even when the output is piped.
///
/// CF_CONFIG_DIR: the directory where cf will look for configuration files.
/// Default: "$XDG_CONFIG_HOME/cf" or "$HOME/.config/cf".
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "cf",
    version = clap::crate_version!(),
    verbatim_doc_comment,
    disable_help_subcommand = true
)]
struct Opts {
    /// Print debug info
    #[clap(short, long, global = true, env)]
    debug: bool,

    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommand {
    Help(cmd_help::CmdHelp),
    SetOrgRole(cmd_set_org_role::CmdSetOrgRole),
    Version(cmd_version::CmdVersion),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Let's get our configuration.
    let mut c = crate::config_file::parse_default_config()?;
    let mut config = crate::config_from_env::EnvConfig::inherit_env(&mut c);
    let mut ctx = crate::context::Context::new(&mut config);

    let args: Vec<String> = std::env::args().collect();

    let code = match do_main(args, &mut ctx).await {
        Ok(code) => code,
        Err(err) => {
            writeln!(ctx.io.err_out, "{}", err)?;
            1
        }
    };

    crate::logger::flush();
    std::process::exit(code);
}

/// Parse `args` and run the command they name, returning the process exit code.
async fn do_main(args: Vec<String>, ctx: &mut crate::context::Context<'_>) -> Result<i32> {
    let args_str = shlex::join(args.iter().map(|s| s.as_str()));

    let opts = match Opts::try_parse_from(args) {
        Ok(opts) => opts,
        Err(err) => {
            return match err.kind() {
                clap::ErrorKind::DisplayHelp | clap::ErrorKind::DisplayVersion => {
                    write!(ctx.io.out, "{}", err)?;
                    Ok(0)
                }
                _ => {
                    write!(ctx.io.err_out, "{}", err)?;
                    Ok(1)
                }
            };
        }
    };

    // Set our debug flag.
    ctx.debug = opts.debug;
    crate::logger::init(opts.debug);
    log::debug!("running {}", args_str);

    match opts.subcmd {
        SubCommand::Help(cmd) => run_cmd(&cmd, ctx).await,
        SubCommand::SetOrgRole(cmd) => run_cmd(&cmd, ctx).await,
        SubCommand::Version(cmd) => run_cmd(&cmd, ctx).await,
    }
}

async fn run_cmd(cmd: &impl crate::cmd::Command, ctx: &mut crate::context::Context<'_>) -> Result<i32> {
    let err = match cmd.run(ctx).await {
        Ok(()) => return Ok(0),
        Err(err) => err,
    };

    if let Some(usage) = err.downcast_ref::<crate::cmd::UsageError>() {
        match usage {
            crate::cmd::UsageError::Invalid { help, .. } => {
                writeln!(ctx.io.err_out, "{}", usage)?;
                write!(ctx.io.out, "{}", help)?;
            }
            crate::cmd::UsageError::Arity { help, .. } => {
                writeln!(ctx.io.out, "{}\n", usage)?;
                write!(ctx.io.out, "{}", help)?;
            }
        }

        return Ok(1);
    }

    if ctx.debug {
        log::debug!("command failed: {:?}", err);
    }

    let cs = ctx.io.color_scheme();
    writeln!(ctx.io.out, "{}", cs.red("FAILED"))?;
    writeln!(ctx.io.out, "{}", err)?;

    Ok(1)
}
