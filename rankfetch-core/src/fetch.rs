use indicatif::{ProgressBar, ProgressStyle};
use rankfetch_client::{ApiConfig, DomainRecord, Metric, ProgressCallback, RankingClient};
use std::sync::Arc;

/// Options for configuring a batch fetch
pub struct FetchOptions {
    pub domains: Vec<String>,
    pub metrics: Vec<Metric>,
    pub config: ApiConfig,
    pub api_key: String,
    pub show_progress_bar: bool,
}

/// Callback for reporting fetch status lines
pub type StatusCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Execute a batch fetch with the given options.
/// Returns one record per input domain, in input order.
pub async fn execute_fetch(
    options: FetchOptions,
    status_callback: Option<StatusCallback>,
) -> Result<Vec<DomainRecord>, String> {
    let FetchOptions {
        domains,
        metrics,
        config,
        api_key,
        show_progress_bar,
    } = options;

    if domains.is_empty() {
        return Err("No domains provided".to_string());
    }
    if api_key.trim().is_empty() {
        return Err("API key is empty".to_string());
    }
    if metrics.is_empty() {
        return Err("No metrics selected".to_string());
    }

    let progress_bar = if show_progress_bar {
        let pb = ProgressBar::new(domains.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(Arc::new(pb))
    } else {
        None
    };

    let internal_callback: ProgressCallback = {
        let pb = progress_bar.clone();
        let status = status_callback.clone();
        Arc::new(move |_fraction: f64, message: String| {
            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(message.clone());
            }
            if let Some(ref status) = status {
                status(message);
            }
        })
    };

    let client = RankingClient::new(config, api_key)
        .map_err(|e| format!("Failed to create ranking client: {}", e))?
        .with_progress_callback(internal_callback);

    let records = client.fetch_all(&domains, &metrics).await;

    if let Some(ref pb) = progress_bar {
        let failed = records.iter().filter(|r| r.is_error()).count();
        pb.finish_with_message(format!(
            "Fetch complete: {} domains, {} errors",
            records.len(),
            failed
        ));
    }

    Ok(records)
}
