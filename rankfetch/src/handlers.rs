use clap::ArgMatches;
use colored::Colorize;
use rankfetch_client::{ApiConfig, AuthScheme, Metric, parse_metric_list};
use rankfetch_core::fetch::{FetchOptions, execute_fetch};
use rankfetch_core::report::{
    ReportFormat, generate_csv_report, generate_json_report, generate_text_report, save_report,
};
use std::env;
use std::fs;
use std::path::PathBuf;

const API_KEY_ENV: &str = "SE_RANKING_API_KEY";

// Helper functions for the fetch handler

/// Load domains from repeated --domain flags or a domains file
pub fn load_domains_from_source(
    domains: &[String],
    domains_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(path) = domains_file {
        load_domains_from_file(path)
    } else if !domains.is_empty() {
        let parsed: Vec<String> = domains
            .iter()
            .filter_map(|d| parse_domain_line(d))
            .collect();
        if parsed.is_empty() {
            return Err("No valid domains provided".to_string());
        }
        Ok(parsed)
    } else {
        Err("Either --domain or --domains-file must be provided".to_string())
    }
}

/// Load and parse domains from a newline-delimited file
pub fn load_domains_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let expanded = shellexpand::tilde(&path.display().to_string()).to_string();
    let content = fs::read_to_string(&expanded)
        .map_err(|e| format!("Failed to read domains file {}: {}", expanded, e))?;

    let domains: Vec<String> = content.lines().filter_map(parse_domain_line).collect();

    if domains.is_empty() {
        return Err(format!("No domains found in {}", expanded));
    }

    Ok(domains)
}

/// Parse a single line as a domain: trimmed, empties and comments skipped
pub fn parse_domain_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.to_string())
}

/// Resolve the API key from the CLI flag, falling back to the environment
pub fn resolve_api_key(cli_key: Option<&String>) -> Result<String, String> {
    if let Some(key) = cli_key
        && !key.trim().is_empty()
    {
        return Ok(key.clone());
    }

    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(format!(
            "No API key provided. Pass --api-key or set {}",
            API_KEY_ENV
        )),
    }
}

/// Resolve the metric selection from the CLI flag, defaulting when absent
pub fn resolve_metrics(arg: Option<&String>) -> Result<Vec<Metric>, String> {
    match arg {
        Some(list) => parse_metric_list(list),
        None => Ok(Metric::default_selection()),
    }
}

pub async fn handle_fetch(args: &ArgMatches, quiet: bool) {
    tracing_subscriber::fmt::init();

    if let Err(e) = run_fetch(args, quiet).await {
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_fetch(args: &ArgMatches, quiet: bool) -> Result<(), String> {
    let cli_domains: Vec<String> = args
        .get_many::<String>("domain")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let domains_file = args.get_one::<PathBuf>("domains-file");
    let domains = load_domains_from_source(&cli_domains, domains_file)?;

    let metrics = resolve_metrics(args.get_one::<String>("metrics"))?;
    let api_key = resolve_api_key(args.get_one::<String>("api-key"))?;

    let auth_scheme = args
        .get_one::<String>("auth-scheme")
        .and_then(|s| AuthScheme::from_str(s))
        .unwrap_or(AuthScheme::Token);

    let config = ApiConfig {
        base_url: args.get_one::<String>("base-url").unwrap().clone(),
        endpoint_path: args.get_one::<String>("endpoint-path").unwrap().clone(),
        query_param: args.get_one::<String>("query-param").unwrap().clone(),
        auth_scheme,
        timeout_secs: *args.get_one::<u64>("timeout").unwrap(),
    };

    let format = ReportFormat::from_str(args.get_one::<String>("format").unwrap())
        .unwrap_or(ReportFormat::Text);
    let output = args.get_one::<PathBuf>("output");

    if !quiet {
        println!(
            "Looking up {} domain(s), {} metric(s)\n",
            domains.len(),
            metrics.len()
        );
    }

    let options = FetchOptions {
        domains,
        metrics: metrics.clone(),
        config,
        api_key,
        show_progress_bar: !quiet,
    };

    let records = execute_fetch(options, None).await?;

    let content = match format {
        ReportFormat::Text => generate_text_report(&records, &metrics),
        ReportFormat::Json => generate_json_report(&records, &metrics)
            .map_err(|e| format!("Failed to serialize report: {}", e))?,
        ReportFormat::Csv => generate_csv_report(&records, &metrics)?,
    };

    match output {
        Some(path) => {
            save_report(&content, path)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            if !quiet {
                println!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display()
                );
            }
        }
        None => {
            if !quiet {
                println!();
            }
            print!("{}", content);
        }
    }

    Ok(())
}

pub fn handle_metrics() {
    let default = Metric::default_selection();
    println!("Supported metrics:");
    for metric in Metric::ALL {
        let suffix = if default.contains(&metric) {
            " (default)"
        } else {
            ""
        };
        println!("  {} {}{}", "•".bright_cyan(), metric.as_str(), suffix);
    }
}
