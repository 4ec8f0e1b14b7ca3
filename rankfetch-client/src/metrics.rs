use serde::{Deserialize, Serialize};

/// Metrics the ranking service can report for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    DomainTrust,
    Backlinks,
    KeywordsCount,
    OrganicTraffic,
    Visibility,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::DomainTrust,
        Metric::Backlinks,
        Metric::KeywordsCount,
        Metric::OrganicTraffic,
        Metric::Visibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::DomainTrust => "domain_trust",
            Metric::Backlinks => "backlinks",
            Metric::KeywordsCount => "keywords_count",
            Metric::OrganicTraffic => "organic_traffic",
            Metric::Visibility => "visibility",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "domain_trust" => Some(Metric::DomainTrust),
            "backlinks" => Some(Metric::Backlinks),
            "keywords_count" => Some(Metric::KeywordsCount),
            "organic_traffic" => Some(Metric::OrganicTraffic),
            "visibility" => Some(Metric::Visibility),
            _ => None,
        }
    }

    /// Selection used when the caller does not pick any metrics.
    pub fn default_selection() -> Vec<Metric> {
        vec![Metric::DomainTrust, Metric::Backlinks, Metric::OrganicTraffic]
    }
}

/// Parse a comma-separated metric list, de-duplicating while keeping the
/// first-seen order.
pub fn parse_metric_list(input: &str) -> Result<Vec<Metric>, String> {
    let mut metrics = Vec::new();

    for raw in input.split(',') {
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }

        let metric = Metric::from_str(name).ok_or_else(|| {
            format!(
                "Unknown metric '{}'. Valid metrics: {}",
                name,
                Metric::ALL
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;

        if !metrics.contains(&metric) {
            metrics.push(metric);
        }
    }

    if metrics.is_empty() {
        return Err("No metrics selected".to_string());
    }

    Ok(metrics)
}
