use serde::{Deserialize, Serialize};

/// Root shape of the optional YAML configuration file. Every section may
/// be omitted; missing values fall back to the defaults below or to the
/// command line.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct VulnpulseConfig {
    pub scope: Option<usize>,
    pub cost: Option<CostConfig>,
}

/// Labor-time and cost constants for the savings estimate: hours per
/// finding and currency per hour.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CostConfig {
    pub hourly_cost: f64,
    pub discovery_hours: f64,
    pub manual_fix_hours: f64,
    pub manual_waive_hours: f64,
    pub automated_fix_hours: f64,
    pub automated_waive_hours: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            hourly_cost: 100.0,
            discovery_hours: 2.0,
            manual_fix_hours: 2.0,
            manual_waive_hours: 7.0,
            automated_fix_hours: 0.3,
            automated_waive_hours: 0.3,
        }
    }
}
