use serde::{Deserialize, Serialize};

/// Prefix used when attaching the API key to the Authorization header.
/// Both prefixes are observed across deployments of the ranking service,
/// so the scheme is configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthScheme {
    Bearer,
    Token,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Bearer => "Bearer",
            AuthScheme::Token => "Token",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bearer" => Some(AuthScheme::Bearer),
            "token" => Some(AuthScheme::Token),
            _ => None,
        }
    }

    /// Format the Authorization header value for the given key.
    pub fn header_value(&self, api_key: &str) -> String {
        format!("{} {}", self.as_str(), api_key)
    }
}

/// Connection settings for the ranking service.
///
/// The endpoint path and query parameter name vary between provider API
/// revisions; the defaults follow the current `/v3/domain/overview` shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub endpoint_path: String,
    pub query_param: String,
    pub auth_scheme: AuthScheme,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.seranking.com".to_string(),
            endpoint_path: "/v3/domain/overview".to_string(),
            query_param: "domain".to_string(),
            auth_scheme: AuthScheme::Token,
            timeout_secs: 10,
        }
    }
}
