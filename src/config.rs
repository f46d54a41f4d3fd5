use std::env;

#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub api_base: String,
    pub auth_token: Option<String>,
    pub page_size: u32,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("PORTAL_API_BASE")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            auth_token: env::var("PORTAL_AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            page_size: env::var("PORTAL_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
