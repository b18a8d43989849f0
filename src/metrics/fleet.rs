use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::config::CostConfig;
use crate::models::{ApplicationReport, MttrTier, StatusKind};

use super::cell::round2;
use super::cost::{self, CostEstimate, CumulativeTotals};
use super::matrix::{category_slots, risk_slots, Matrix};
use super::window::{WeekId, WeekWindow};

/// Window-aligned series of per-application sums; every slot holds one
/// count per window week, zero where nothing was reported.
pub type FleetMatrix = Matrix<Vec<i64>>;

impl FleetMatrix {
    fn zeroed(len: usize) -> Self {
        let mut matrix = Self::default();
        matrix.for_each_mut(|series| *series = vec![0; len]);
        matrix
    }
}

/// The fleet-wide rollup across every reported application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub app_names: Vec<String>,
    pub org_names: Vec<String>,
    pub weeks: Vec<WeekId>,
    pub time_period_start: Vec<NaiveDate>,
    pub app_onboard: Vec<u32>,
    pub app_number_scan: Vec<u32>,
    pub weekly_scans: Vec<i64>,
    #[serde(rename = "mttrLowThreat")]
    pub mttr_low: Vec<Option<f64>>,
    #[serde(rename = "mttrModerateThreat")]
    pub mttr_moderate: Vec<Option<f64>>,
    #[serde(rename = "mttrSevereThreat")]
    pub mttr_severe: Vec<Option<f64>>,
    #[serde(rename = "mttrCriticalThreat")]
    pub mttr_critical: Vec<Option<f64>>,
    #[serde(rename = "evaluationCount")]
    pub evaluation_count: Vec<Option<f64>>,
    #[serde(flatten)]
    pub counts: FleetMatrix,
    pub cost: CostEstimate,
}

/// Per-week mean over only the applications that reported a value.
struct WeekAverager {
    sums: Vec<f64>,
    counts: Vec<u32>,
}

impl WeekAverager {
    fn new(len: usize) -> Self {
        Self {
            sums: vec![0.0; len],
            counts: vec![0; len],
        }
    }

    fn add(&mut self, position: usize, value: f64) {
        self.sums[position] += value;
        self.counts[position] += 1;
    }

    fn finish(self) -> Vec<Option<f64>> {
        self.sums
            .into_iter()
            .zip(self.counts)
            .map(|(sum, count)| {
                if count == 0 {
                    None
                } else {
                    Some(round2(sum / count as f64))
                }
            })
            .collect()
    }
}

/// Merges every application's summary into one fleet-wide view, aligned
/// by window position. An application reporting only some of the window's
/// weeks contributes only at those positions.
///
/// MTTR figures are the mean of per-application means for each week, not
/// a count-weighted mean; the simpler statistic is part of the report's
/// contract.
pub fn merge(apps: &[ApplicationReport], window: &WeekWindow, cost: &CostConfig) -> FleetSummary {
    let len = window.len();
    let mut app_names = Vec::with_capacity(apps.len());
    let mut org_names = Vec::with_capacity(apps.len());
    let mut app_onboard = vec![0u32; len];
    let mut app_number_scan = vec![0u32; len];
    let mut weekly_scans = vec![0i64; len];
    let mut counts = FleetMatrix::zeroed(len);
    let mut tier_averages = [
        WeekAverager::new(len),
        WeekAverager::new(len),
        WeekAverager::new(len),
        WeekAverager::new(len),
    ];
    let mut evaluation_average = WeekAverager::new(len);

    for app in apps {
        app_names.push(app.application_name.clone());
        org_names.push(app.organization_name.clone());
        let summary = &app.summary;

        for (index, week) in summary.weeks.iter().enumerate() {
            let Some(position) = window.position(*week) else {
                warn!(
                    week = %week,
                    application = %app.application_name,
                    "Observed week outside the reporting window, skipping"
                );
                continue;
            };

            app_onboard[position] += 1;

            for tier in MttrTier::ALL {
                let sample = summary.mttr.tier(tier).series.get(index).copied();
                if let Some(value) = sample.and_then(|s| s.value()) {
                    tier_averages[tier.index()].add(position, value);
                }
            }

            let evaluations = summary
                .mttr
                .evaluation_count
                .series
                .get(index)
                .and_then(|s| s.value())
                .unwrap_or(0.0);
            evaluation_average.add(position, evaluations);
            if evaluations != 0.0 {
                app_number_scan[position] += 1;
                weekly_scans[position] += evaluations as i64;
            }

            // Every slot is added, totals included; each summary is
            // internally additive so the fleet totals stay consistent.
            for status in StatusKind::ALL {
                for category in category_slots() {
                    for risk in risk_slots() {
                        let cell = summary.counts.cell(status, category, risk);
                        if let Some(value) = cell.series.get(index).and_then(|s| s.value()) {
                            counts.cell_mut(status, category, risk)[position] += value as i64;
                        }
                    }
                }
            }
        }
    }

    let grand = |status: StatusKind| -> f64 {
        counts.cell(status, None, None).iter().sum::<i64>() as f64
    };
    let estimate = cost::estimate(
        CumulativeTotals {
            discovered: grand(StatusKind::Discovered),
            fixed: grand(StatusKind::Fixed),
            waived: grand(StatusKind::Waived),
            open: grand(StatusKind::Open),
        },
        cost,
    );

    let [low, moderate, severe, critical] = tier_averages;
    FleetSummary {
        app_names,
        org_names,
        weeks: window.weeks().to_vec(),
        time_period_start: window.period_starts().to_vec(),
        app_onboard,
        app_number_scan,
        weekly_scans,
        mttr_low: low.finish(),
        mttr_moderate: moderate.finish(),
        mttr_severe: severe.finish(),
        mttr_critical: critical.finish(),
        evaluation_count: evaluation_average.finish(),
        counts,
        cost: estimate,
    }
}
