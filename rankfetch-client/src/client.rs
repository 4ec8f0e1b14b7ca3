use crate::config::ApiConfig;
use crate::error::{ClientError, Result};
use crate::metrics::Metric;
use crate::result::DomainRecord;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Callback invoked after each domain has been resolved: completed fraction
/// in [0, 1] plus a status line naming the domain and its position.
pub type ProgressCallback = Arc<dyn Fn(f64, String) + Send + Sync>;

const NOT_AVAILABLE: &str = "N/A";
const BODY_EXCERPT_CHARS: usize = 100;

pub struct RankingClient {
    client: Client,
    base: Url,
    config: ApiConfig,
    api_key: String,
    progress_callback: Option<ProgressCallback>,
}

impl RankingClient {
    pub fn new(config: ApiConfig, api_key: String) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ClientError::InvalidUrl(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .user_agent(concat!("rankfetch/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base,
            config,
            api_key,
            progress_callback: None,
        })
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Query every domain in order, one request at a time. Each domain
    /// yields exactly one record; a failed domain is captured as an error
    /// record and never aborts the remaining domains.
    pub async fn fetch_all(&self, domains: &[String], metrics: &[Metric]) -> Vec<DomainRecord> {
        let total = domains.len();
        let mut records = Vec::with_capacity(total);

        for (idx, domain) in domains.iter().enumerate() {
            debug!("Fetching metrics for {} ({}/{})", domain, idx + 1, total);

            let record = self.fetch_domain(domain, metrics).await;
            if let Some(ref error) = record.error {
                warn!("Lookup failed for {}: {}", domain, error);
            }
            records.push(record);

            if let Some(ref callback) = self.progress_callback {
                callback(
                    (idx + 1) as f64 / total as f64,
                    format!("Fetching data for {}... ({}/{})", domain, idx + 1, total),
                );
            }
        }

        records
    }

    async fn fetch_domain(&self, domain: &str, metrics: &[Metric]) -> DomainRecord {
        let url = self.overview_url(domain);

        let response = match self
            .client
            .get(url)
            .header(
                AUTHORIZATION,
                self.config.auth_scheme.header_value(&self.api_key),
            )
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return DomainRecord::with_error(domain.to_string(), e.to_string()),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return DomainRecord::with_error(domain.to_string(), e.to_string()),
        };

        let payload: Value = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(_) => {
                return DomainRecord::with_error(
                    domain.to_string(),
                    format!("Invalid response: {}", excerpt(&body)),
                );
            }
        };

        if !status.is_success() {
            let message = service_message(&payload).unwrap_or(body);
            return DomainRecord::with_error(domain.to_string(), message);
        }

        match payload
            .get("data")
            .and_then(Value::as_array)
            .filter(|rows| !rows.is_empty())
        {
            Some(rows) => {
                let info = &rows[0];
                let values = metrics
                    .iter()
                    .map(|metric| {
                        let value = info
                            .get(metric.as_str())
                            .cloned()
                            .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_string()));
                        (*metric, value)
                    })
                    .collect();
                DomainRecord::success(domain.to_string(), values)
            }
            None => {
                let message =
                    service_message(&payload).unwrap_or_else(|| "No data returned".to_string());
                DomainRecord::with_error(domain.to_string(), message)
            }
        }
    }

    fn overview_url(&self, domain: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&self.config.endpoint_path);
        url.query_pairs_mut()
            .append_pair(&self.config.query_param, domain);
        url
    }
}

/// First `BODY_EXCERPT_CHARS` characters of a response body, for error text.
fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

fn service_message(payload: &Value) -> Option<String> {
    payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthScheme;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> ApiConfig {
        ApiConfig {
            base_url,
            timeout_secs: 2,
            ..ApiConfig::default()
        }
    }

    fn client_for(server: &MockServer) -> RankingClient {
        RankingClient::new(test_config(server.uri()), "secret".to_string()).unwrap()
    }

    #[tokio::test]
    async fn missing_metric_defaults_to_na() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .and(query_param("domain", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "organic_traffic": 500 }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(
                &["example.com".to_string()],
                &[Metric::OrganicTraffic, Metric::Backlinks],
            )
            .await;

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.domain, "example.com");
        assert!(record.error.is_none());
        assert_eq!(record.metric(Metric::OrganicTraffic), Some(&json!(500)));
        assert_eq!(record.metric(Metric::Backlinks), Some(&json!("N/A")));
    }

    #[tokio::test]
    async fn non_json_body_reports_excerpt() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::Backlinks])
            .await;

        let error = records[0].error.as_deref().unwrap();
        assert!(error.starts_with("Invalid response:"));
        assert!(error.contains("Internal Server Error"));
    }

    #[tokio::test]
    async fn non_json_body_is_truncated_to_100_chars() {
        let server = MockServer::start().await;
        let long_body = "x".repeat(250);

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .respond_with(ResponseTemplate::new(200).set_body_string(long_body))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::Backlinks])
            .await;

        let error = records[0].error.as_deref().unwrap();
        assert_eq!(error, format!("Invalid response: {}", "x".repeat(100)));
    }

    #[tokio::test]
    async fn error_status_uses_service_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "message": "plan limit exceeded"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::DomainTrust])
            .await;

        let record = &records[0];
        assert_eq!(record.error.as_deref(), Some("plan limit exceeded"));
        assert!(record.metrics.is_empty());
    }

    #[tokio::test]
    async fn error_status_without_message_uses_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"code":9}"#))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::DomainTrust])
            .await;

        assert_eq!(records[0].error.as_deref(), Some(r#"{"code":9}"#));
    }

    #[tokio::test]
    async fn empty_data_list_reports_no_data() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::Visibility])
            .await;

        assert_eq!(records[0].error.as_deref(), Some("No data returned"));
    }

    #[tokio::test]
    async fn empty_payload_prefers_service_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "domain is still being processed"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::Visibility])
            .await;

        assert_eq!(
            records[0].error.as_deref(),
            Some("domain is still being processed")
        );
    }

    #[tokio::test]
    async fn transport_fault_is_absorbed_and_batch_continues() {
        // Nothing listens on port 9; every request fails at the transport
        // layer and must still produce a record.
        let config = test_config("http://127.0.0.1:9".to_string());
        let client = RankingClient::new(config, "secret".to_string()).unwrap();

        let domains = vec![
            "a.example".to_string(),
            "b.example".to_string(),
            "c.example".to_string(),
        ];
        let records = client.fetch_all(&domains, &[Metric::Backlinks]).await;

        assert_eq!(records.len(), 3);
        for (record, domain) in records.iter().zip(&domains) {
            assert_eq!(&record.domain, domain);
            assert!(record.error.is_some());
        }
    }

    #[tokio::test]
    async fn mixed_outcomes_preserve_input_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .and(query_param("domain", "good.example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "backlinks": 42 }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .and(query_param("domain", "bad.example"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let domains = vec![
            "good.example".to_string(),
            "bad.example".to_string(),
            "good.example".to_string(),
        ];
        let records = client.fetch_all(&domains, &[Metric::Backlinks]).await;

        assert_eq!(records.len(), 3);
        assert!(records[0].error.is_none());
        assert!(records[1].error.is_some());
        assert!(records[2].error.is_none());
        assert_eq!(records[1].domain, "bad.example");
    }

    #[tokio::test]
    async fn duplicates_are_processed_independently() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .and(query_param("domain", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "domain_trust": 55 }]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(
                &["example.com".to_string(), "example.com".to_string()],
                &[Metric::DomainTrust],
            )
            .await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].metric(Metric::DomainTrust), Some(&json!(55)));
        assert_eq!(records[1].metric(Metric::DomainTrust), Some(&json!(55)));
    }

    #[tokio::test]
    async fn progress_fractions_are_exact() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "visibility": 1 }]
            })))
            .mount(&server)
            .await;

        let seen: Arc<StdMutex<Vec<(f64, String)>>> = Arc::new(StdMutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let client = client_for(&server).with_progress_callback(Arc::new(
            move |fraction: f64, status: String| {
                seen_clone.lock().unwrap().push((fraction, status));
            },
        ));

        let domains = vec![
            "a.example".to_string(),
            "b.example".to_string(),
            "c.example".to_string(),
            "d.example".to_string(),
        ];
        client.fetch_all(&domains, &[Metric::Visibility]).await;

        let seen = seen.lock().unwrap();
        let fractions: Vec<f64> = seen.iter().map(|(f, _)| *f).collect();
        assert_eq!(fractions, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(seen.last().unwrap().1, "Fetching data for d.example... (4/4)");
    }

    #[tokio::test]
    async fn empty_domain_list_yields_empty_results() {
        let config = test_config("http://127.0.0.1:9".to_string());
        let client = RankingClient::new(config, "secret".to_string()).unwrap();

        let records = client.fetch_all(&[], &[Metric::Backlinks]).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn token_scheme_sets_authorization_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .and(header("Authorization", "Token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "backlinks": 1 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::Backlinks])
            .await;

        assert!(records[0].error.is_none());
    }

    #[tokio::test]
    async fn bearer_scheme_sets_authorization_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/domain/overview"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "backlinks": 1 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiConfig {
            auth_scheme: AuthScheme::Bearer,
            ..test_config(server.uri())
        };
        let client = RankingClient::new(config, "secret".to_string()).unwrap();
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::Backlinks])
            .await;

        assert!(records[0].error.is_none());
    }

    #[tokio::test]
    async fn alternate_endpoint_path_is_honored() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/sites"))
            .and(query_param("domain", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "keywords_count": 7 }]
            })))
            .mount(&server)
            .await;

        let config = ApiConfig {
            endpoint_path: "/v3/sites".to_string(),
            ..test_config(server.uri())
        };
        let client = RankingClient::new(config, "secret".to_string()).unwrap();
        let records = client
            .fetch_all(&["example.com".to_string()], &[Metric::KeywordsCount])
            .await;

        assert_eq!(records[0].metric(Metric::KeywordsCount), Some(&json!(7)));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let result = RankingClient::new(config, "secret".to_string());
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
