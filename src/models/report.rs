use serde::Serialize;

use crate::metrics::cost::CostEstimate;
use crate::metrics::fleet::FleetSummary;
use crate::metrics::summary::ApplicationSummary;

/// One application's slice of the final report: identity plus its
/// aggregated summary and cost estimate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReport {
    pub application_name: String,
    pub organization_name: String,
    pub summary: ApplicationSummary,
    pub cost: CostEstimate,
}

/// The complete report document: the fleet summary first, then every
/// application's detail.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub summary: FleetSummary,
    pub apps: Vec<ApplicationReport>,
}
