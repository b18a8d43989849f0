use chrono::Utc;
use tracing::{debug, info};

use crate::cli::commands::ReportArgs;
use crate::client::{
    resolve_application_ids, resolve_organization_ids, IqClient, MetricsRequest, MetricsSource,
};
use crate::config::{self, VulnpulseConfig};
use crate::errors::VulnpulseError;
use crate::metrics::cost::{self, CumulativeTotals};
use crate::metrics::{aggregate, fleet, WeekWindow};
use crate::models::{ApplicationReport, MetricsReport};
use crate::reporting::write_report;

pub async fn handle_report(args: ReportArgs) -> Result<(), VulnpulseError> {
    let file_config = match &args.config {
        Some(path) => config::parse_config(path).await?,
        None => VulnpulseConfig::default(),
    };
    let scope = file_config.scope.unwrap_or(args.scope);
    let cost = file_config.cost.unwrap_or_default();

    let (username, password) = split_auth(&args.auth)?;
    let client = IqClient::new(&args.server, username, password);

    let window = WeekWindow::build(scope, Utc::now().date_naive())?;
    info!(scope, first = %window.first(), last = %window.last(), "Reporting window");

    let application_ids = resolve_application_ids(&client, args.app.as_deref()).await?;
    if args.app.as_deref().is_some_and(|f| !f.is_empty()) && application_ids.is_empty() {
        return Err(VulnpulseError::EmptyReport);
    }
    let organization_ids = resolve_organization_ids(&client, args.org.as_deref()).await?;
    if args.org.as_deref().is_some_and(|f| !f.is_empty()) && organization_ids.is_empty() {
        return Err(VulnpulseError::EmptyReport);
    }

    let request = MetricsRequest::weekly(&window, application_ids, organization_ids);
    let records = client.fetch_metrics(&request).await?;
    if records.is_empty() {
        return Err(VulnpulseError::EmptyReport);
    }
    info!(applications = records.len(), "Aggregating weekly metrics");

    let mut apps = Vec::with_capacity(records.len());
    for record in records {
        debug!(
            application = %record.application_name,
            weeks = record.aggregations.len(),
            "Folding observations"
        );
        let summary = aggregate(&record.aggregations);
        let estimate = cost::estimate(CumulativeTotals::from_matrix(&summary.counts), &cost);
        apps.push(ApplicationReport {
            application_name: record.application_name,
            organization_name: record.organization_name,
            summary,
            cost: estimate,
        });
    }

    let summary = fleet::merge(&apps, &window, &cost);
    let report = MetricsReport { summary, apps };
    write_report(&args.out, &report, args.pretty).await?;

    println!("Report saved to {}", args.out.display());
    Ok(())
}

fn split_auth(auth: &str) -> Result<(&str, &str), VulnpulseError> {
    auth.split_once(':')
        .ok_or_else(|| VulnpulseError::Config("auth must be user:password".into()))
}
