//! Permission Resolver
//!
//! Maps a role to the full set of capability flags it grants. The mapping is
//! a total `match` over [`Role`], so a new role cannot be added without
//! deciding its capabilities.

use reviewdesk_core::{Identity, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single privileged action a caller may check for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Access the back-office controls at all
    AdministrativeControls,
    /// Edit companies the identity does not own
    CrossCompanyEdit,
    /// List platform users
    UserListing,
    /// Ban and unban users
    BanUsers,
    /// Remove companies
    CompanyRemoval,
    /// Handle review reports
    ReportHandling,
    /// Edit public pages
    PageEditing,
    /// Cancel a company's subscription
    SubscriptionCancellation,
    /// Convert company accounts
    CompanyConversion,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::AdministrativeControls,
        Capability::CrossCompanyEdit,
        Capability::UserListing,
        Capability::BanUsers,
        Capability::CompanyRemoval,
        Capability::ReportHandling,
        Capability::PageEditing,
        Capability::SubscriptionCancellation,
        Capability::CompanyConversion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::AdministrativeControls => "administrative_controls",
            Capability::CrossCompanyEdit => "cross_company_edit",
            Capability::UserListing => "user_listing",
            Capability::BanUsers => "ban_users",
            Capability::CompanyRemoval => "company_removal",
            Capability::ReportHandling => "report_handling",
            Capability::PageEditing => "page_editing",
            Capability::SubscriptionCancellation => "subscription_cancellation",
            Capability::CompanyConversion => "company_conversion",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every capability flag for one role. Always fully populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub administrative_controls: bool,
    pub cross_company_edit: bool,
    pub user_listing: bool,
    pub ban_users: bool,
    pub company_removal: bool,
    pub report_handling: bool,
    pub page_editing: bool,
    pub subscription_cancellation: bool,
    pub company_conversion: bool,
}

impl CapabilitySet {
    /// Every flag false
    pub const NONE: CapabilitySet = CapabilitySet {
        administrative_controls: false,
        cross_company_edit: false,
        user_listing: false,
        ban_users: false,
        company_removal: false,
        report_handling: false,
        page_editing: false,
        subscription_cancellation: false,
        company_conversion: false,
    };

    /// Every flag true
    pub const ALL: CapabilitySet = CapabilitySet {
        administrative_controls: true,
        cross_company_edit: true,
        user_listing: true,
        ban_users: true,
        company_removal: true,
        report_handling: true,
        page_editing: true,
        subscription_cancellation: true,
        company_conversion: true,
    };

    /// Check a single flag
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::AdministrativeControls => self.administrative_controls,
            Capability::CrossCompanyEdit => self.cross_company_edit,
            Capability::UserListing => self.user_listing,
            Capability::BanUsers => self.ban_users,
            Capability::CompanyRemoval => self.company_removal,
            Capability::ReportHandling => self.report_handling,
            Capability::PageEditing => self.page_editing,
            Capability::SubscriptionCancellation => self.subscription_cancellation,
            Capability::CompanyConversion => self.company_conversion,
        }
    }

    /// Granted capabilities, in declaration order
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.allows(*c))
            .collect()
    }
}

/// Compute the capability set for a role
pub fn resolve_capabilities(role: Role) -> CapabilitySet {
    match role {
        Role::Manager => CapabilitySet::ALL,
        Role::Support => CapabilitySet {
            administrative_controls: true,
            report_handling: true,
            subscription_cancellation: true,
            ..CapabilitySet::NONE
        },
        Role::Standard => CapabilitySet::NONE,
    }
}

/// Capability set for an optional identity; anonymous callers get the standard set
pub fn resolve_for(identity: Option<&Identity>) -> CapabilitySet {
    resolve_capabilities(identity.map(|i| i.role).unwrap_or_default())
}
