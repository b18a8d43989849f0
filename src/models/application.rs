use serde::Deserialize;

use super::observation::WeeklyObservation;

/// An application known to the server, as listed by the applications
/// endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRef {
    pub id: String,
    #[serde(default)]
    pub public_id: String,
    pub name: String,
}

impl ApplicationRef {
    /// A search term matches on name, internal id or public id.
    pub fn matches(&self, term: &str) -> bool {
        term == self.name || term == self.id || term == self.public_id
    }
}

/// An organization known to the server.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationRef {
    pub id: String,
    pub name: String,
}

impl OrganizationRef {
    pub fn matches(&self, term: &str) -> bool {
        term == self.name || term == self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationList {
    pub applications: Vec<ApplicationRef>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationList {
    pub organizations: Vec<OrganizationRef>,
}

/// One application's record in the weekly metrics response: identity plus
/// its observation sequence, oldest week first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationMetrics {
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub application_public_id: String,
    pub application_name: String,
    pub organization_name: String,
    #[serde(default)]
    pub aggregations: Vec<WeeklyObservation>,
}
