use crate::models::StatusKind;

use super::cell::round2;
use super::matrix::CountMatrix;

/// n/d as a plain ratio, defined as 0 for a zero denominator so a
/// brand-new application reports 0% instead of failing the report.
pub fn rate(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// n/d as a percentage rounded to two decimals.
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    round2(rate(numerator, denominator) * 100.0)
}

fn total(matrix: &CountMatrix, status: StatusKind, cumulative: bool) -> f64 {
    let cell = matrix.cell(status, None, None);
    if cumulative {
        cell.sum()
    } else {
        cell.latest()
    }
}

/// Fixed findings as a percentage of open-at-period-end. Latest-week mode
/// reads the most recent entries; cumulative mode sums the history first.
pub fn fixed_rate(matrix: &CountMatrix, cumulative: bool) -> f64 {
    percent(
        total(matrix, StatusKind::Fixed, cumulative),
        total(matrix, StatusKind::Open, cumulative),
    )
}

/// Waived findings as a percentage of open-at-period-end.
pub fn waived_rate(matrix: &CountMatrix, cumulative: bool) -> f64 {
    percent(
        total(matrix, StatusKind::Waived, cumulative),
        total(matrix, StatusKind::Open, cumulative),
    )
}

/// Fixed-or-waived findings as a percentage of open-at-period-end.
pub fn dealt_rate(matrix: &CountMatrix, cumulative: bool) -> f64 {
    percent(
        total(matrix, StatusKind::Fixed, cumulative)
            + total(matrix, StatusKind::Waived, cumulative),
        total(matrix, StatusKind::Open, cumulative),
    )
}

/// Share of dealt-with findings that were fixed, as a raw fraction over
/// the full history. Consumers that publish it round separately; the
/// cost model wants full precision.
pub fn fix_fraction(matrix: &CountMatrix) -> f64 {
    let fixed = matrix.cell(StatusKind::Fixed, None, None).sum();
    let waived = matrix.cell(StatusKind::Waived, None, None).sum();
    rate(fixed, fixed + waived)
}

/// Share of dealt-with findings that were waived, as a raw fraction.
pub fn waive_fraction(matrix: &CountMatrix) -> f64 {
    let fixed = matrix.cell(StatusKind::Fixed, None, None).sum();
    let waived = matrix.cell(StatusKind::Waived, None, None).sum();
    rate(waived, fixed + waived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeeklyObservation;

    fn matrix_for(weeks: &[&str]) -> CountMatrix {
        let mut matrix = CountMatrix::default();
        for json in weeks {
            let obs: WeeklyObservation = serde_json::from_str(json).unwrap();
            matrix.fold_week(&obs);
        }
        matrix
    }

    #[test]
    fn test_zero_denominator_yields_zero() {
        let matrix = matrix_for(&[
            r#"{"timePeriodStart": "2026-06-01", "fixedCounts": {"SECURITY": {"LOW": 9}}}"#,
        ]);
        assert_eq!(fixed_rate(&matrix, false), 0.0);
        assert_eq!(fixed_rate(&matrix, true), 0.0);
        assert_eq!(dealt_rate(&matrix, true), 0.0);
    }

    #[test]
    fn test_latest_vs_cumulative_modes() {
        let matrix = matrix_for(&[
            r#"{"timePeriodStart": "2026-06-01",
                "fixedCounts": {"SECURITY": {"LOW": 2}},
                "openCountsAtTimePeriodEnd": {"SECURITY": {"LOW": 10}}}"#,
            r#"{"timePeriodStart": "2026-06-08",
                "fixedCounts": {"SECURITY": {"LOW": 4}},
                "openCountsAtTimePeriodEnd": {"SECURITY": {"LOW": 8}}}"#,
        ]);
        assert_eq!(fixed_rate(&matrix, false), 50.0); // 4/8
        assert_eq!(fixed_rate(&matrix, true), 33.33); // 6/18
    }

    #[test]
    fn test_fractions_split_dealt_share() {
        let matrix = matrix_for(&[
            r#"{"timePeriodStart": "2026-06-01",
                "fixedCounts": {"SECURITY": {"LOW": 6}},
                "waivedCounts": {"SECURITY": {"LOW": 3}}}"#,
        ]);
        let fix = fix_fraction(&matrix);
        let waive = waive_fraction(&matrix);
        assert!((fix - 2.0 / 3.0).abs() < 1e-12);
        assert!((fix + waive - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fractions_zero_when_nothing_dealt() {
        let matrix = matrix_for(&[r#"{"timePeriodStart": "2026-06-01"}"#]);
        assert_eq!(fix_fraction(&matrix), 0.0);
        assert_eq!(waive_fraction(&matrix), 0.0);
    }
}
