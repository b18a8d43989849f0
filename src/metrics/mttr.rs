use serde::Serialize;

use crate::models::{MttrTier, WeeklyObservation};

use super::cell::{CountCell, Sample};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Mean-time-to-remediate series per severity tier, plus the evaluation
/// count series.
///
/// Durations arrive as milliseconds and are stored as whole days. A null
/// duration means nothing at that tier was remediated that week; the
/// entry stays absent so the tier's average covers only real samples.
/// The evaluation count is recorded unconditionally — zero scans is a
/// fact, not missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MttrSeries {
    #[serde(rename = "mttrLowThreat")]
    pub low: CountCell,
    #[serde(rename = "mttrModerateThreat")]
    pub moderate: CountCell,
    #[serde(rename = "mttrSevereThreat")]
    pub severe: CountCell,
    #[serde(rename = "mttrCriticalThreat")]
    pub critical: CountCell,
    #[serde(rename = "evaluationCount")]
    pub evaluation_count: CountCell,
}

impl MttrSeries {
    pub fn tier(&self, tier: MttrTier) -> &CountCell {
        match tier {
            MttrTier::Low => &self.low,
            MttrTier::Moderate => &self.moderate,
            MttrTier::Severe => &self.severe,
            MttrTier::Critical => &self.critical,
        }
    }

    fn tier_mut(&mut self, tier: MttrTier) -> &mut CountCell {
        match tier {
            MttrTier::Low => &mut self.low,
            MttrTier::Moderate => &mut self.moderate,
            MttrTier::Severe => &mut self.severe,
            MttrTier::Critical => &mut self.critical,
        }
    }

    /// Appends one observation's samples as the next week entry.
    pub fn fold_week(&mut self, observation: &WeeklyObservation) {
        for tier in MttrTier::ALL {
            let sample = match observation.mttr_ms(tier) {
                Some(ms) => Sample::Value((ms as f64 / MS_PER_DAY).round()),
                None => Sample::Absent,
            };
            self.tier_mut(tier).push(sample);
        }
        self.evaluation_count
            .push_value(observation.evaluation_count as f64);
    }

    pub fn finalize(&mut self) {
        for tier in MttrTier::ALL {
            self.tier_mut(tier).finalize();
        }
        self.evaluation_count.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(json: &str) -> WeeklyObservation {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_milliseconds_convert_to_rounded_days() {
        let mut mttr = MttrSeries::default();
        // 2 days exactly, and 3.4 days which rounds to 3.
        mttr.fold_week(&observation(
            r#"{"timePeriodStart": "2026-06-01", "mttrLowThreat": 172800000, "mttrModerateThreat": 293760000}"#,
        ));
        assert_eq!(mttr.low.series, vec![Sample::Value(2.0)]);
        assert_eq!(mttr.moderate.series, vec![Sample::Value(3.0)]);
    }

    #[test]
    fn test_null_duration_stays_absent() {
        let mut mttr = MttrSeries::default();
        mttr.fold_week(&observation(
            r#"{"timePeriodStart": "2026-06-01", "mttrSevereThreat": null, "evaluationCount": 0}"#,
        ));
        assert_eq!(mttr.severe.series, vec![Sample::Absent]);
        // the evaluation count appends even when zero
        assert_eq!(mttr.evaluation_count.series, vec![Sample::Value(0.0)]);
    }

    #[test]
    fn test_all_absent_tier_averages_to_none() {
        let mut mttr = MttrSeries::default();
        for _ in 0..3 {
            mttr.fold_week(&observation(r#"{"timePeriodStart": "2026-06-01"}"#));
        }
        mttr.finalize();
        assert_eq!(mttr.critical.average, None);
        assert_eq!(mttr.evaluation_count.average, Some(0.0));
    }

    #[test]
    fn test_average_covers_only_present_weeks() {
        let mut mttr = MttrSeries::default();
        mttr.fold_week(&observation(
            r#"{"timePeriodStart": "2026-06-01", "mttrLowThreat": 86400000}"#,
        ));
        mttr.fold_week(&observation(r#"{"timePeriodStart": "2026-06-08"}"#));
        mttr.fold_week(&observation(
            r#"{"timePeriodStart": "2026-06-15", "mttrLowThreat": 259200000}"#,
        ));
        mttr.finalize();
        // (1 + 3) / 2, not divided by the absent middle week
        assert_eq!(mttr.low.average, Some(2.0));
    }
}
