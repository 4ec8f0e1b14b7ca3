// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    load_domains_from_file, load_domains_from_source, parse_domain_line, resolve_api_key,
    resolve_metrics,
};

// Re-export fetch functionality from rankfetch-core
pub use rankfetch_core::fetch::{FetchOptions, StatusCallback, execute_fetch};
