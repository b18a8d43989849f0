use serde::Serialize;

use crate::models::WeeklyObservation;

use super::cell::round2;
use super::matrix::CountMatrix;
use super::mttr::MttrSeries;
use super::rates;
use super::window::WeekId;

/// Everything derived from one application's weekly observations.
///
/// Built in a single pass over the observation stream, then read-only.
/// `weeks` lists the weeks the application actually reported, which may
/// be a subset of the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationSummary {
    pub weeks: Vec<WeekId>,
    #[serde(flatten)]
    pub counts: CountMatrix,
    #[serde(flatten)]
    pub mttr: MttrSeries,
    #[serde(rename = "fixedRate")]
    pub fixed_rate: Vec<f64>,
    #[serde(rename = "waivedRate")]
    pub waived_rate: Vec<f64>,
    #[serde(rename = "dealtRate")]
    pub dealt_rate: Vec<f64>,
    #[serde(rename = "FixRate")]
    pub fix_rate: f64,
    #[serde(rename = "WaiveRate")]
    pub waive_rate: f64,
    #[serde(rename = "DealtRate")]
    pub dealt_rate_cumulative: f64,
    #[serde(rename = "FixPercent")]
    pub fix_percent: f64,
    #[serde(rename = "WaiPercent")]
    pub waive_percent: f64,
}

/// Folds an application's observation stream, oldest week first, into its
/// summary. The per-week rate series are computed eagerly at the end of
/// each week's fold against the running totals, so they chart how the
/// rates looked at that point in time.
pub fn aggregate(observations: &[WeeklyObservation]) -> ApplicationSummary {
    let mut weeks = Vec::with_capacity(observations.len());
    let mut counts = CountMatrix::default();
    let mut mttr = MttrSeries::default();
    let mut fixed_rate = Vec::with_capacity(observations.len());
    let mut waived_rate = Vec::with_capacity(observations.len());
    let mut dealt_rate = Vec::with_capacity(observations.len());

    for observation in observations {
        weeks.push(WeekId::from_date(observation.time_period_start));
        counts.fold_week(observation);
        mttr.fold_week(observation);
        fixed_rate.push(rates::fixed_rate(&counts, false));
        waived_rate.push(rates::waived_rate(&counts, false));
        dealt_rate.push(rates::dealt_rate(&counts, false));
    }

    counts.finalize();
    mttr.finalize();

    ApplicationSummary {
        fix_rate: rates::fixed_rate(&counts, true),
        waive_rate: rates::waived_rate(&counts, true),
        dealt_rate_cumulative: rates::dealt_rate(&counts, true),
        fix_percent: round2(rates::fix_fraction(&counts)),
        waive_percent: round2(rates::waive_fraction(&counts)),
        weeks,
        counts,
        mttr,
        fixed_rate,
        waived_rate,
        dealt_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observations() -> Vec<WeeklyObservation> {
        let json = r#"[
            {
                "timePeriodStart": "2026-06-01",
                "discoveredCounts": {"SECURITY": {"LOW": 3}},
                "fixedCounts": {"SECURITY": {"LOW": 2}},
                "waivedCounts": {"SECURITY": {"LOW": 1}},
                "openCountsAtTimePeriodEnd": {"SECURITY": {"LOW": 10}},
                "evaluationCount": 1
            },
            {
                "timePeriodStart": "2026-06-08",
                "discoveredCounts": {"SECURITY": {"LOW": 1}},
                "fixedCounts": {"SECURITY": {"LOW": 4}},
                "waivedCounts": {"SECURITY": {"LOW": 2}},
                "openCountsAtTimePeriodEnd": {"SECURITY": {"LOW": 8}},
                "evaluationCount": 2
            }
        ]"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_two_week_scenario_rates() {
        let summary = aggregate(&observations());
        assert_eq!(summary.fix_rate, 33.33); // (2+4)/(10+8)
        assert_eq!(summary.waive_rate, 16.67); // (1+2)/18
        assert_eq!(summary.dealt_rate_cumulative, 50.0); // 9/18
        assert_eq!(summary.fix_percent, 0.67); // 6/9 rounded
        assert_eq!(summary.waive_percent, 0.33);
    }

    #[test]
    fn test_weekly_rate_series_use_running_latest_mode() {
        let summary = aggregate(&observations());
        assert_eq!(summary.fixed_rate, vec![20.0, 50.0]); // 2/10 then 4/8
        assert_eq!(summary.waived_rate, vec![10.0, 25.0]);
        assert_eq!(summary.dealt_rate, vec![30.0, 75.0]);
    }

    #[test]
    fn test_week_ids_follow_observation_order() {
        let summary = aggregate(&observations());
        assert_eq!(summary.weeks.len(), 2);
        assert_eq!(summary.weeks[0].to_string(), "2026-W23");
        assert_eq!(summary.weeks[1].to_string(), "2026-W24");
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let input = observations();
        assert_eq!(aggregate(&input), aggregate(&input));
    }

    #[test]
    fn test_empty_observations_produce_zeroed_summary() {
        let summary = aggregate(&[]);
        assert!(summary.weeks.is_empty());
        assert_eq!(summary.fix_rate, 0.0);
        assert_eq!(summary.fix_percent, 0.0);
        assert_eq!(summary.counts.cell(crate::models::StatusKind::Open, None, None).average, None);
    }
}
