use serde::{Serialize, Serializer};

/// A single week's measurement: either a real value or no data at all.
///
/// Absence is kept explicit so "no evaluation happened this week" can
/// never be averaged as a measured zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Absent,
    Value(f64),
}

impl Sample {
    pub fn value(self) -> Option<f64> {
        match self {
            Sample::Absent => None,
            Sample::Value(v) => Some(v),
        }
    }
}

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Sample::Absent => serializer.serialize_none(),
            Sample::Value(v) => serializer.serialize_f64(*v),
        }
    }
}

/// Rounds to two decimal places, the precision of every published figure.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One cell of the aggregation matrix: a week-aligned series plus the
/// mean over the weeks that actually reported a value.
///
/// The JSON keys `avg` and `rng` are the wire names of the report format.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountCell {
    #[serde(rename = "avg")]
    pub average: Option<f64>,
    #[serde(rename = "rng")]
    pub series: Vec<Sample>,
}

impl CountCell {
    pub fn push(&mut self, sample: Sample) {
        self.series.push(sample);
    }

    pub fn push_value(&mut self, value: f64) {
        self.series.push(Sample::Value(value));
    }

    /// Mean over present samples, `None` when nothing was reported.
    pub fn mean(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for sample in &self.series {
            if let Some(v) = sample.value() {
                sum += v;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(round2(sum / count as f64))
        }
    }

    /// Sum over present samples; absent weeks contribute nothing.
    pub fn sum(&self) -> f64 {
        self.series.iter().filter_map(|s| s.value()).sum()
    }

    /// Most recent entry, or 0.0 for an empty series.
    pub fn latest(&self) -> f64 {
        self.series.last().and_then(|s| s.value()).unwrap_or(0.0)
    }

    /// Fixes the published average after the fold completes.
    pub fn finalize(&mut self) {
        self.average = self.mean();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_rounds_to_two_decimals() {
        let mut cell = CountCell::default();
        cell.push_value(1.0);
        cell.push_value(2.0);
        cell.push_value(2.0);
        assert_eq!(cell.mean(), Some(1.67));
    }

    #[test]
    fn test_empty_series_has_no_average() {
        let cell = CountCell::default();
        assert_eq!(cell.mean(), None);
        assert_eq!(cell.sum(), 0.0);
        assert_eq!(cell.latest(), 0.0);
    }

    #[test]
    fn test_absent_samples_excluded_from_average() {
        let mut cell = CountCell::default();
        cell.push(Sample::Absent);
        cell.push_value(4.0);
        cell.push(Sample::Absent);
        assert_eq!(cell.mean(), Some(4.0));
        assert_eq!(cell.sum(), 4.0);
    }

    #[test]
    fn test_all_absent_yields_none_not_zero() {
        let mut cell = CountCell::default();
        cell.push(Sample::Absent);
        cell.push(Sample::Absent);
        assert_eq!(cell.mean(), None);
    }

    #[test]
    fn test_absent_serializes_as_null() {
        let mut cell = CountCell::default();
        cell.push_value(3.0);
        cell.push(Sample::Absent);
        cell.finalize();
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["avg"], serde_json::json!(3.0));
        assert_eq!(json["rng"][0], serde_json::json!(3.0));
        assert!(json["rng"][1].is_null());
    }

    #[test]
    fn test_latest_skips_nothing() {
        let mut cell = CountCell::default();
        cell.push_value(5.0);
        cell.push_value(8.0);
        assert_eq!(cell.latest(), 8.0);
    }
}
