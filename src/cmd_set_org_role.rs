use std::io::Write;

use anyhow::Result;
use clap::Parser;

use crate::{
    cmd::UsageError,
    http::PlatformClient,
    iostreams::IoStreams,
    session::{NotLoggedIn, Session},
    types::OrgRole,
};

const ARGUMENTS: [&str; 3] = ["USERNAME", "ORG", "ROLE"];

/// Assign an org role to a user.
///
/// ROLE is one of 'OrgManager', 'BillingManager' or 'OrgAuditor'.
#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment, disable_help_flag = true)]
pub struct CmdSetOrgRole {
    /// Show help.
    #[clap(short = 'h', long = "help")]
    help: bool,

    /// USERNAME, ORG and ROLE.
    #[clap(name = "ARGS", multiple_values = true)]
    args: Vec<String>,
}

/// One role assignment, as requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
    /// The user to give the role to.
    pub username: String,
    /// The name of the org the role is scoped to.
    pub org: String,
    /// The role to assign.
    pub role: OrgRole,
}

/// Returns the help text printed by `cf set-org-role -h` and after usage errors.
pub fn help_text() -> String {
    let mut help = String::from(
        "NAME:
   set-org-role - Assign an org role to a user

USAGE:
   cf set-org-role USERNAME ORG ROLE

ROLES:
",
    );

    for role in OrgRole::variants() {
        help.push_str(&format!("   '{}' - {}\n", role, role.description()));
    }

    help.push_str(
        "
SEE ALSO:
   org-users, set-space-role
",
    );

    help
}

impl CmdSetOrgRole {
    fn request(&self) -> Result<AssignmentRequest, UsageError> {
        match self.args.as_slice() {
            [username, org, role] => {
                let role = role.parse::<OrgRole>().map_err(|_| UsageError::Invalid {
                    message: r#"ROLE must be "OrgManager", "BillingManager" and "OrgAuditor""#.to_string(),
                    help: help_text(),
                })?;

                Ok(AssignmentRequest {
                    username: username.to_string(),
                    org: org.to_string(),
                    role,
                })
            }
            args if args.len() > ARGUMENTS.len() => Err(UsageError::Arity {
                message: format!("Requires {} as arguments", ARGUMENTS.join(", ")),
                help: help_text(),
            }),
            args => Err(UsageError::Invalid {
                message: format!("the required argument `{}` was not provided", ARGUMENTS[args.len()]),
                help: help_text(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl crate::cmd::Command for CmdSetOrgRole {
    async fn run(&self, ctx: &mut crate::context::Context) -> Result<()> {
        if self.help {
            write!(ctx.io.out, "{}", help_text())?;
            return Ok(());
        }

        // Nothing goes over the network until the arguments are known to be good.
        let request = self.request()?;

        let session = ctx.session();
        if !session.is_logged_in() {
            return Err(NotLoggedIn.into());
        }

        let client = ctx.api_client(&session)?;

        set_org_role(&request, &session, &client, &mut ctx.io).await
    }
}

/// Assign the requested role for a logged in session, reporting progress on `io`.
///
/// The org is resolved before anything is printed, so an unknown org fails
/// without announcing the assignment. The user is only resolved by the platform
/// while assigning, so an unknown user fails after the announcement.
pub(crate) async fn set_org_role<S, C>(
    request: &AssignmentRequest,
    session: &S,
    client: &C,
    io: &mut IoStreams,
) -> Result<()>
where
    S: Session + ?Sized,
    C: PlatformClient + ?Sized,
{
    let org = client.find_org(&request.org).await?;

    let cs = io.color_scheme();
    writeln!(
        io.out,
        "Assigning role {} to user {} in org {} as {}...",
        cs.cyan(&request.role.to_string()),
        cs.cyan(&request.username),
        cs.cyan(&request.org),
        cs.cyan(&session.current_username()?),
    )?;

    client.assign_org_role(&request.username, &org, request.role).await?;

    writeln!(io.out, "{}", cs.green("OK"))?;

    Ok(())
}
