use serde::Serialize;

use crate::config::CostConfig;
use crate::models::StatusKind;

use super::matrix::CountMatrix;
use super::rates::rate;

/// Cumulative grand totals a cost estimate is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CumulativeTotals {
    pub discovered: f64,
    pub fixed: f64,
    pub waived: f64,
    pub open: f64,
}

impl CumulativeTotals {
    pub fn from_matrix(matrix: &CountMatrix) -> Self {
        Self {
            discovered: matrix.cell(StatusKind::Discovered, None, None).sum(),
            fixed: matrix.cell(StatusKind::Fixed, None, None).sum(),
            waived: matrix.cell(StatusKind::Waived, None, None).sum(),
            open: matrix.cell(StatusKind::Open, None, None).sum(),
        }
    }
}

/// Estimated labor cost avoided, in configured currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub discovery_cost: f64,
    pub manual_debt_cost: f64,
    pub automated_debt_cost: f64,
    pub total_value: f64,
}

/// Derives the savings estimate from cumulative totals and the configured
/// time constants. Pure: identical inputs produce identical output.
pub fn estimate(totals: CumulativeTotals, cost: &CostConfig) -> CostEstimate {
    let dealt = totals.fixed + totals.waived;
    let fix_share = rate(totals.fixed, dealt);
    let waive_share = rate(totals.waived, dealt);

    let discovery_cost = totals.discovered * cost.hourly_cost * cost.discovery_hours;
    let manual_debt_cost = totals.open
        * cost.hourly_cost
        * (fix_share * cost.manual_fix_hours + waive_share * cost.manual_waive_hours);
    let automated_debt_cost = totals.open
        * cost.hourly_cost
        * (fix_share * cost.automated_fix_hours + waive_share * cost.automated_waive_hours);

    CostEstimate {
        discovery_cost,
        manual_debt_cost,
        automated_debt_cost,
        total_value: discovery_cost + (manual_debt_cost - automated_debt_cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals() -> CumulativeTotals {
        CumulativeTotals {
            discovered: 10.0,
            fixed: 6.0,
            waived: 3.0,
            open: 18.0,
        }
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let cost = CostConfig::default();
        let a = estimate(totals(), &cost);
        let b = estimate(totals(), &cost);
        assert_eq!(a, b);
    }

    #[test]
    fn test_discovery_cost_scales_linearly() {
        let cost = CostConfig::default();
        let base = estimate(totals(), &cost);
        let scaled = estimate(
            CumulativeTotals {
                discovered: 30.0,
                ..totals()
            },
            &cost,
        );
        assert_eq!(scaled.discovery_cost, 3.0 * base.discovery_cost);
    }

    #[test]
    fn test_default_constants_produce_expected_figures() {
        let cost = CostConfig::default();
        let result = estimate(totals(), &cost);
        // 10 discovered * 100/h * 2h
        assert_eq!(result.discovery_cost, 2000.0);
        // 18 open * 100/h * (2/3 * 2h + 1/3 * 7h)
        assert!((result.manual_debt_cost - 6600.0).abs() < 1e-9);
        // 18 open * 100/h * (2/3 * 0.3h + 1/3 * 0.3h) = 540
        assert!((result.automated_debt_cost - 540.0).abs() < 1e-9);
        assert!((result.total_value - (2000.0 + 6600.0 - 540.0)).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_dealt_costs_only_discovery() {
        let cost = CostConfig::default();
        let result = estimate(
            CumulativeTotals {
                discovered: 5.0,
                fixed: 0.0,
                waived: 0.0,
                open: 12.0,
            },
            &cost,
        );
        assert_eq!(result.manual_debt_cost, 0.0);
        assert_eq!(result.automated_debt_cost, 0.0);
        assert_eq!(result.total_value, result.discovery_cost);
    }
}
