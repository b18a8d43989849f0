use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{Category, Risk, StatusKind, WeeklyObservation};

use super::cell::CountCell;

pub const RISK_SLOTS: usize = Risk::ALL.len() + 1;
pub const CATEGORY_SLOTS: usize = Category::ALL.len() + 1;
const STATUS_SLOTS: usize = StatusKind::ALL.len();

fn risk_slot(risk: Option<Risk>) -> usize {
    risk.map_or(Risk::ALL.len(), Risk::index)
}

fn category_slot(category: Option<Category>) -> usize {
    category.map_or(Category::ALL.len(), Category::index)
}

/// Every risk slot in wire order, the TOTAL last.
pub fn risk_slots() -> impl Iterator<Item = Option<Risk>> {
    Risk::ALL.iter().copied().map(Some).chain([None])
}

/// Every category slot in wire order, the TOTAL last.
pub fn category_slots() -> impl Iterator<Item = Option<Category>> {
    Category::ALL.iter().copied().map(Some).chain([None])
}

/// Per-risk cells for one status/category pair, with the risk TOTAL in
/// the trailing slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskGroup<T> {
    cells: [T; RISK_SLOTS],
}

impl<T> RiskGroup<T> {
    pub fn cell(&self, risk: Option<Risk>) -> &T {
        &self.cells[risk_slot(risk)]
    }

    pub fn cell_mut(&mut self, risk: Option<Risk>) -> &mut T {
        &mut self.cells[risk_slot(risk)]
    }
}

impl<T: Serialize> Serialize for RiskGroup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(RISK_SLOTS))?;
        for risk in Risk::ALL {
            map.serialize_entry(risk.as_str(), self.cell(Some(risk)))?;
        }
        map.serialize_entry("TOTAL", self.cell(None))?;
        map.end()
    }
}

/// Per-category groups for one status, with the category TOTAL in the
/// trailing slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroup<T> {
    groups: [RiskGroup<T>; CATEGORY_SLOTS],
}

impl<T> CategoryGroup<T> {
    pub fn group(&self, category: Option<Category>) -> &RiskGroup<T> {
        &self.groups[category_slot(category)]
    }

    pub fn group_mut(&mut self, category: Option<Category>) -> &mut RiskGroup<T> {
        &mut self.groups[category_slot(category)]
    }
}

impl<T: Serialize> Serialize for CategoryGroup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CATEGORY_SLOTS))?;
        for category in Category::ALL {
            map.serialize_entry(category.as_str(), self.group(Some(category)))?;
        }
        map.serialize_entry("TOTAL", self.group(None))?;
        map.end()
    }
}

/// Fixed-shape storage over status × category × risk.
///
/// The shape is closed by the enumerations, so a "missing key" cannot
/// exist at runtime; `None` in an accessor addresses that dimension's
/// TOTAL slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix<T> {
    statuses: [CategoryGroup<T>; STATUS_SLOTS],
}

impl<T> Matrix<T> {
    pub fn status(&self, status: StatusKind) -> &CategoryGroup<T> {
        &self.statuses[status.index()]
    }

    pub fn cell(&self, status: StatusKind, category: Option<Category>, risk: Option<Risk>) -> &T {
        self.statuses[status.index()].group(category).cell(risk)
    }

    pub fn cell_mut(
        &mut self,
        status: StatusKind,
        category: Option<Category>,
        risk: Option<Risk>,
    ) -> &mut T {
        self.statuses[status.index()].group_mut(category).cell_mut(risk)
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        for status in &mut self.statuses {
            for group in &mut status.groups {
                for cell in &mut group.cells {
                    f(cell);
                }
            }
        }
    }
}

impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STATUS_SLOTS))?;
        for status in StatusKind::ALL {
            map.serialize_entry(status.as_str(), self.status(status))?;
        }
        map.end()
    }
}

/// The count matrix for one application: a week-aligned [`CountCell`] per
/// status × category × risk slot, totals included.
pub type CountMatrix = Matrix<CountCell>;

impl CountMatrix {
    /// Appends one observation's counts as the next week entry, folding
    /// the per-category totals, per-risk totals and grand total as it
    /// goes. Absent input keys already read as 0 and take part in sums.
    pub fn fold_week(&mut self, observation: &WeeklyObservation) {
        for status in StatusKind::ALL {
            let counts = observation.status_counts(status);

            for category in Category::ALL {
                let breakdown = counts.get(category);
                let mut category_total = 0;
                for risk in Risk::ALL {
                    let value = breakdown.get(risk);
                    self.cell_mut(status, Some(category), Some(risk))
                        .push_value(value as f64);
                    category_total += value;
                }
                self.cell_mut(status, Some(category), None)
                    .push_value(category_total as f64);
            }

            let mut grand_total = 0;
            for risk in Risk::ALL {
                let mut risk_total = 0;
                for category in Category::ALL {
                    risk_total += counts.get(category).get(risk);
                }
                self.cell_mut(status, None, Some(risk))
                    .push_value(risk_total as f64);
                grand_total += risk_total;
            }
            self.cell_mut(status, None, None).push_value(grand_total as f64);
        }
    }

    /// Recomputes every cell's published average once the fold is done.
    pub fn finalize(&mut self) {
        self.for_each_mut(CountCell::finalize);
    }
}
