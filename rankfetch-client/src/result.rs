use crate::metrics::Metric;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of output: a domain plus either every requested metric or a
/// single error message, never a mix of the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain: String,
    pub metrics: Vec<(Metric, Value)>,
    pub error: Option<String>,
}

impl DomainRecord {
    pub fn success(domain: String, metrics: Vec<(Metric, Value)>) -> Self {
        Self {
            domain,
            metrics,
            error: None,
        }
    }

    pub fn with_error(domain: String, error: String) -> Self {
        Self {
            domain,
            metrics: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Value recorded for a metric, if this record carries it.
    pub fn metric(&self, metric: Metric) -> Option<&Value> {
        self.metrics
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| v)
    }
}
