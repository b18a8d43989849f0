use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::errors::VulnpulseError;
use crate::metrics::WeekWindow;
use crate::models::{
    ApplicationList, ApplicationMetrics, ApplicationRef, OrganizationList, OrganizationRef,
};

/// Request body for the weekly metrics endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRequest {
    pub time_period: &'static str,
    pub first_time_period: String,
    pub last_time_period: String,
    pub application_ids: Vec<String>,
    pub organization_ids: Vec<String>,
}

impl MetricsRequest {
    /// A WEEK-granularity request covering the whole reporting window.
    /// Empty id lists mean no filtering on that axis.
    pub fn weekly(
        window: &WeekWindow,
        application_ids: Vec<String>,
        organization_ids: Vec<String>,
    ) -> Self {
        Self {
            time_period: "WEEK",
            first_time_period: window.first().period(),
            last_time_period: window.last().period(),
            application_ids,
            organization_ids,
        }
    }
}

/// Where raw weekly metrics come from.
///
/// The aggregation core never performs I/O; anything able to produce
/// these records can stand in for the real server.
#[async_trait]
pub trait MetricsSource {
    async fn fetch_applications(&self) -> Result<Vec<ApplicationRef>, VulnpulseError>;
    async fn fetch_organizations(&self) -> Result<Vec<OrganizationRef>, VulnpulseError>;
    async fn fetch_metrics(
        &self,
        request: &MetricsRequest,
    ) -> Result<Vec<ApplicationMetrics>, VulnpulseError>;
}

/// HTTP client for the IQ server's v2 REST API, using basic auth.
pub struct IqClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl IqClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, VulnpulseError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| VulnpulseError::Network(format!("Request to {} failed: {}", path, e)))?;

        check_status(path, response.status())?;

        response
            .json()
            .await
            .map_err(|e| VulnpulseError::Api(format!("Invalid response from {}: {}", path, e)))
    }
}

fn check_status(path: &str, status: StatusCode) -> Result<(), VulnpulseError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(VulnpulseError::Authentication(
            "Invalid credentials for the IQ server".into(),
        ));
    }
    if !status.is_success() {
        return Err(VulnpulseError::Api(format!(
            "{} returned HTTP {}",
            path, status
        )));
    }
    Ok(())
}

#[async_trait]
impl MetricsSource for IqClient {
    async fn fetch_applications(&self) -> Result<Vec<ApplicationRef>, VulnpulseError> {
        let list: ApplicationList = self.get_json("/api/v2/applications").await?;
        debug!(applications = list.applications.len(), "Listed applications");
        Ok(list.applications)
    }

    async fn fetch_organizations(&self) -> Result<Vec<OrganizationRef>, VulnpulseError> {
        let list: OrganizationList = self.get_json("/api/v2/organizations").await?;
        debug!(organizations = list.organizations.len(), "Listed organizations");
        Ok(list.organizations)
    }

    async fn fetch_metrics(
        &self,
        request: &MetricsRequest,
    ) -> Result<Vec<ApplicationMetrics>, VulnpulseError> {
        let path = "/api/v2/reports/metrics";
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| VulnpulseError::Network(format!("Request to {} failed: {}", path, e)))?;

        check_status(path, response.status())?;

        let records: Vec<ApplicationMetrics> = response
            .json()
            .await
            .map_err(|e| VulnpulseError::Api(format!("Invalid response from {}: {}", path, e)))?;
        debug!(applications = records.len(), "Fetched weekly metrics");
        Ok(records)
    }
}

/// Resolves a comma-separated list of application names, ids or public
/// ids to server ids. An absent or empty filter resolves to no ids,
/// which the metrics endpoint reads as "all applications".
pub async fn resolve_application_ids(
    source: &dyn MetricsSource,
    filter: Option<&str>,
) -> Result<Vec<String>, VulnpulseError> {
    let Some(filter) = filter.filter(|f| !f.is_empty()) else {
        return Ok(Vec::new());
    };
    let applications = source.fetch_applications().await?;
    let terms: Vec<&str> = filter.split(',').map(str::trim).collect();
    Ok(applications
        .iter()
        .filter(|app| terms.iter().any(|term| app.matches(term)))
        .map(|app| app.id.clone())
        .collect())
}

/// Resolves a comma-separated list of organization names or ids.
pub async fn resolve_organization_ids(
    source: &dyn MetricsSource,
    filter: Option<&str>,
) -> Result<Vec<String>, VulnpulseError> {
    let Some(filter) = filter.filter(|f| !f.is_empty()) else {
        return Ok(Vec::new());
    };
    let organizations = source.fetch_organizations().await?;
    let terms: Vec<&str> = filter.split(',').map(str::trim).collect();
    Ok(organizations
        .iter()
        .filter(|org| terms.iter().any(|term| org.matches(term)))
        .map(|org| org.id.clone())
        .collect())
}
