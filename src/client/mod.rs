pub mod iq;

pub use iq::{
    resolve_application_ids, resolve_organization_ids, IqClient, MetricsRequest, MetricsSource,
};
