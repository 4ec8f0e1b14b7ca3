pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod result;

pub use client::{ProgressCallback, RankingClient};
pub use config::{ApiConfig, AuthScheme};
pub use error::ClientError;
pub use metrics::{Metric, parse_metric_list};
pub use result::DomainRecord;
