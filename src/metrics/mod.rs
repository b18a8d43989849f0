pub mod cell;
pub mod cost;
pub mod fleet;
pub mod matrix;
pub mod mttr;
pub mod rates;
pub mod summary;
pub mod window;

pub use fleet::FleetSummary;
pub use summary::{aggregate, ApplicationSummary};
pub use window::{WeekId, WeekWindow};
