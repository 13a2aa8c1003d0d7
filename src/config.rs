//! Dashboard Configuration
//!
//! Build-time settings read through `option_env!`, with defaults for local
//! development against a service on port 9090.

use crate::table::StaleResponsePolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9090";
pub const DEFAULT_LOCAL_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Base address shared by every request
    pub api_base_url: String,
    /// Rows per client-side page (independent of the server page size)
    pub local_page_size: usize,
    /// What to do with a list response that arrives after a newer request was issued
    pub stale_responses: StaleResponsePolicy,
    /// Records kept by the in-memory log ring
    pub log_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            local_page_size: DEFAULT_LOCAL_PAGE_SIZE,
            stale_responses: StaleResponsePolicy::DropSuperseded,
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl DashboardConfig {
    /// Configuration baked in at compile time
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("INVENTORY_API_BASE_URL"),
            option_env!("INVENTORY_LOCAL_PAGE_SIZE"),
            option_env!("INVENTORY_STALE_RESPONSES"),
            option_env!("INVENTORY_LOG_CAPACITY"),
        )
    }

    /// Invalid values fall back to the default for that field.
    pub fn from_values(
        base_url: Option<&str>,
        local_page_size: Option<&str>,
        stale_responses: Option<&str>,
        log_capacity: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let api_base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let local_page_size = parse_positive(local_page_size, "INVENTORY_LOCAL_PAGE_SIZE")
            .unwrap_or(defaults.local_page_size);

        let stale_responses = match stale_responses.map(str::trim) {
            None | Some("") => defaults.stale_responses,
            Some(raw) => StaleResponsePolicy::parse(raw).unwrap_or_else(|| {
                tracing::warn!(value = raw, "unknown INVENTORY_STALE_RESPONSES, using default");
                defaults.stale_responses
            }),
        };

        let log_capacity = parse_positive(log_capacity, "INVENTORY_LOG_CAPACITY")
            .unwrap_or(defaults.log_capacity);

        Self {
            api_base_url,
            local_page_size,
            stale_responses,
            log_capacity,
        }
    }
}

fn parse_positive(raw: Option<&str>, name: &str) -> Option<usize> {
    let raw = raw?.trim();
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(setting = name, value = raw, "ignoring invalid setting");
            None
        }
    }
}
