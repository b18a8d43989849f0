pub mod types;

pub use types::VulnpulseError;
