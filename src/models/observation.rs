use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Risk tier of a policy violation, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Risk {
    Low,
    Moderate,
    Severe,
    Critical,
}

impl Risk {
    pub const ALL: [Risk; 4] = [Risk::Low, Risk::Moderate, Risk::Severe, Risk::Critical];

    pub fn index(self) -> usize {
        match self {
            Risk::Low => 0,
            Risk::Moderate => 1,
            Risk::Severe => 2,
            Risk::Critical => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Risk::Low => "LOW",
            Risk::Moderate => "MODERATE",
            Risk::Severe => "SEVERE",
            Risk::Critical => "CRITICAL",
        }
    }
}

/// Policy category a violation falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Security,
    License,
    Quality,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Security,
        Category::License,
        Category::Quality,
        Category::Other,
    ];

    pub fn index(self) -> usize {
        match self {
            Category::Security => 0,
            Category::License => 1,
            Category::Quality => 2,
            Category::Other => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Security => "SECURITY",
            Category::License => "LICENSE",
            Category::Quality => "QUALITY",
            Category::Other => "OTHER",
        }
    }
}

/// Lifecycle status a weekly count group describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Discovered,
    Fixed,
    Waived,
    Open,
}

impl StatusKind {
    pub const ALL: [StatusKind; 4] = [
        StatusKind::Discovered,
        StatusKind::Fixed,
        StatusKind::Waived,
        StatusKind::Open,
    ];

    pub fn index(self) -> usize {
        match self {
            StatusKind::Discovered => 0,
            StatusKind::Fixed => 1,
            StatusKind::Waived => 2,
            StatusKind::Open => 3,
        }
    }

    /// Wire name of the count group in the metrics payload and the report.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Discovered => "discoveredCounts",
            StatusKind::Fixed => "fixedCounts",
            StatusKind::Waived => "waivedCounts",
            StatusKind::Open => "openCountsAtTimePeriodEnd",
        }
    }
}

/// Severity tiers the service reports remediation durations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MttrTier {
    Low,
    Moderate,
    Severe,
    Critical,
}

impl MttrTier {
    pub const ALL: [MttrTier; 4] = [
        MttrTier::Low,
        MttrTier::Moderate,
        MttrTier::Severe,
        MttrTier::Critical,
    ];

    pub fn index(self) -> usize {
        match self {
            MttrTier::Low => 0,
            MttrTier::Moderate => 1,
            MttrTier::Severe => 2,
            MttrTier::Critical => 3,
        }
    }
}

/// Counts per risk tier for one status/category pair. A tier the server
/// omitted deserializes to 0, which participates in sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct RiskBreakdown {
    pub low: i64,
    pub moderate: i64,
    pub severe: i64,
    pub critical: i64,
}

impl RiskBreakdown {
    pub fn get(&self, risk: Risk) -> i64 {
        match risk {
            Risk::Low => self.low,
            Risk::Moderate => self.moderate,
            Risk::Severe => self.severe,
            Risk::Critical => self.critical,
        }
    }
}

/// Counts per category for one status, each broken out by risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct CategoryBreakdown {
    pub security: RiskBreakdown,
    pub license: RiskBreakdown,
    pub quality: RiskBreakdown,
    pub other: RiskBreakdown,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> &RiskBreakdown {
        match category {
            Category::Security => &self.security,
            Category::License => &self.license,
            Category::Quality => &self.quality,
            Category::Other => &self.other,
        }
    }
}

/// One application's raw metrics for a single week.
///
/// MTTR durations are milliseconds and null when no finding at that tier
/// was remediated that week. The evaluation count is always present in
/// spirit: a missing field means zero scans, and zero is a real value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyObservation {
    pub time_period_start: NaiveDate,
    #[serde(default)]
    pub discovered_counts: CategoryBreakdown,
    #[serde(default)]
    pub fixed_counts: CategoryBreakdown,
    #[serde(default)]
    pub waived_counts: CategoryBreakdown,
    #[serde(default)]
    pub open_counts_at_time_period_end: CategoryBreakdown,
    #[serde(default)]
    pub mttr_low_threat: Option<i64>,
    #[serde(default)]
    pub mttr_moderate_threat: Option<i64>,
    #[serde(default)]
    pub mttr_severe_threat: Option<i64>,
    #[serde(default)]
    pub mttr_critical_threat: Option<i64>,
    #[serde(default)]
    pub evaluation_count: i64,
}

impl WeeklyObservation {
    pub fn status_counts(&self, status: StatusKind) -> &CategoryBreakdown {
        match status {
            StatusKind::Discovered => &self.discovered_counts,
            StatusKind::Fixed => &self.fixed_counts,
            StatusKind::Waived => &self.waived_counts,
            StatusKind::Open => &self.open_counts_at_time_period_end,
        }
    }

    pub fn mttr_ms(&self, tier: MttrTier) -> Option<i64> {
        match tier {
            MttrTier::Low => self.mttr_low_threat,
            MttrTier::Moderate => self.mttr_moderate_threat,
            MttrTier::Severe => self.mttr_severe_threat,
            MttrTier::Critical => self.mttr_critical_threat,
        }
    }
}
