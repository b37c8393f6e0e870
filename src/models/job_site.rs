//! Job site model.

use serde::{Deserialize, Serialize};

use super::{CompanyId, SiteId};

/// A location an employee can be assigned to while clocked in.
///
/// Job sites are referenced by segments and soft-deleted (deactivated)
/// rather than removed, so historical segments always resolve to a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSite {
    /// Unique identifier for the job site.
    pub id: SiteId,
    /// The organizational scope the site belongs to.
    pub company_id: CompanyId,
    /// Display name of the site (e.g. "Downtown Site A").
    pub name: String,
    /// Optional street address.
    pub address: Option<String>,
    /// Soft-delete flag; inactive sites reject new clock-ins and switches
    /// but remain resolvable for historical segments.
    pub active: bool,
}
