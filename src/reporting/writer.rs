use std::path::Path;

use tracing::info;

use crate::errors::VulnpulseError;
use crate::models::MetricsReport;

/// Serializes the report next to its final path and renames it into
/// place, so a crash mid-write never leaves a truncated report behind.
pub async fn write_report(
    path: &Path,
    report: &MetricsReport,
    pretty: bool,
) -> Result<(), VulnpulseError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &json).await?;
    tokio::fs::rename(&tmp, path).await?;
    info!(path = %path.display(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostConfig;
    use crate::metrics::cost::{self, CumulativeTotals};
    use crate::metrics::{aggregate, fleet, WeekWindow};
    use crate::models::ApplicationReport;

    fn sample_report() -> MetricsReport {
        let cost = CostConfig::default();
        let observations: Vec<crate::models::WeeklyObservation> = serde_json::from_str(
            r#"[{
                "timePeriodStart": "2026-07-27",
                "discoveredCounts": {"SECURITY": {"LOW": 1}},
                "openCountsAtTimePeriodEnd": {"SECURITY": {"LOW": 1}},
                "evaluationCount": 1
            }]"#,
        )
        .unwrap();
        let summary = aggregate(&observations);
        let estimate = cost::estimate(CumulativeTotals::from_matrix(&summary.counts), &cost);
        let apps = vec![ApplicationReport {
            application_name: "WebGoat".to_string(),
            organization_name: "Engineering".to_string(),
            summary,
            cost: estimate,
        }];
        let today = chrono::NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let window = WeekWindow::build(2, today).unwrap();
        let summary = fleet::merge(&apps, &window, &cost);
        MetricsReport { summary, apps }
    }

    #[tokio::test]
    async fn test_write_report_lands_on_final_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("successmetrics.json");
        write_report(&path, &sample_report(), false).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["apps"][0]["applicationName"], "WebGoat");
        assert_eq!(value["summary"]["appOnboard"], serde_json::json!([0, 1]));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_pretty_output_is_indented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("successmetrics.json");
        write_report(&path, &sample_report(), true).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("\n  "));
    }
}
