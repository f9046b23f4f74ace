use parse_display::{Display, FromStr};

/// A role scoped to a single organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromStr, Display)]
pub enum OrgRole {
    OrgManager,
    BillingManager,
    OrgAuditor,
}

impl OrgRole {
    pub fn variants() -> Vec<OrgRole> {
        vec![OrgRole::OrgManager, OrgRole::BillingManager, OrgRole::OrgAuditor]
    }

    pub fn description(&self) -> &'static str {
        match self {
            OrgRole::OrgManager => "Invite and manage users, select and change plans, and set spending limits",
            OrgRole::BillingManager => "Create and manage the billing account and payment info",
            OrgRole::OrgAuditor => "Read-only access to org info and reports",
        }
    }

    /// The collection under `/v2/organizations/:guid` that holds members of this role.
    pub fn api_path(&self) -> &'static str {
        match self {
            OrgRole::OrgManager => "managers",
            OrgRole::BillingManager => "billing_managers",
            OrgRole::OrgAuditor => "auditors",
        }
    }
}
